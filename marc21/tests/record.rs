use marc21::decimal::decode_decimal;
use marc21::directory::Directory;
use marc21::encoding::Encoding;
use marc21::framer::read_record;
use marc21::leader::is_valid_leader;
use marc21::{Error, ReadOptions, Record, RecordReader};
use std::borrow::Cow;

// Extracted from the Harvard Library Open Metadata
// http://openmetadata.lib.harvard.edu/bibdata
const FULL_RECORD: &[u8] = b"00458nam a22001577u 4500001001200000005001700012008004100029035001600070245005400086260004100140300003500181650003100216710003300247988001300280906000700293\x1e000000002-7\x1e20120831093346.0\x1e821202|1937    |||||||  |||| |0||||eng|d\x1e0 \x1faocm83544809\x1e00\x1faGarden exhibition /\x1fcSan Francisco Museum of Art.\x1e0 \x1faSan Francisco :\x1fbThe Museum,\x1fc[1937]\x1e  \x1fa1 folded sheet (4p.) ;\x1fc14 cm.\x1e 0\x1faHorticultural exhibitions.\x1e2 \x1faSan Francisco Museum of Art.\x1e  \x1fa20020608\x1e  \x1f0MH\x1e\x1d";

const TITLE_STATEMENT: &[u8] = b"00\x1faGarden exhibition /\x1fcSan Francisco Museum of Art.\x1e";

/// The reference record with its leader declaring UTF-8.
fn utf8_record() -> Record {
    let mut bytes = FULL_RECORD.to_vec();
    bytes[8] = b'a';
    Record::from_bytes(bytes).unwrap()
}

#[test]
fn read_record_round_trip() {
    let mut reader = FULL_RECORD;

    let (len, bytes) = read_record(&mut reader).unwrap().unwrap();
    assert_eq!(len, FULL_RECORD.len());
    assert_eq!(len, 458);
    assert_eq!(bytes, FULL_RECORD);

    assert!(read_record(&mut reader).unwrap().is_none());
}

#[test]
fn decimals() {
    assert_eq!(decode_decimal(b"03245"), Some(3245));
    assert_eq!(decode_decimal(b"0"), Some(0));
}

#[test]
fn leader_validation() {
    assert!(is_valid_leader(FULL_RECORD));
}

#[test]
fn directory_loader() {
    let dir = Directory::decode(FULL_RECORD).unwrap();
    assert_eq!(dir.len(), 11);
    assert_eq!(dir.base_address(), 157);
}

#[test]
fn leader_fields() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    assert_eq!(record.len(), 458);
    assert_eq!(record.leader_text(), "00458nam a22001577u 4500");
    assert_eq!(record.status(), b'n');
    assert_eq!(record.record_type(), b'a');
    assert_eq!(record.bib_level(), b'm');
    assert_eq!(record.encoding(), Encoding::Marc8);
    assert_eq!(record.encoding_level(), b'7');
    assert_eq!(record.cataloging_form(), b'u');
    assert_eq!(record.multipart_level(), b' ');
    assert!(record.warnings().is_empty());
}

#[test]
fn raw_field_extraction() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    let field = record.raw_field("245");
    assert_eq!(field.value_count(), 1);
    assert_eq!(field.raw_value(0).unwrap(), Some(TITLE_STATEMENT));
    assert!(!field.is_control_field());

    // ask for a non-existent field
    let field = record.raw_field("666");
    assert_eq!(field.value_count(), 0);
    assert_eq!(field.raw_value(0).unwrap(), None);
    assert_eq!(field.subfield("a", 0).unwrap(), "");

    let field = record.raw_field("001");
    assert_eq!(field.value_count(), 1);
    assert!(field.is_control_field());
}

#[test]
fn raw_subfield_extraction() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();
    let field = record.raw_field("245");

    assert_eq!(
        field.nth_raw_subfield("a", 0, 0).unwrap(),
        Some(&b"Garden exhibition /"[..])
    );
    assert_eq!(field.nth_raw_subfield("z", 0, 0).unwrap(), None);
    assert_eq!(
        field.nth_raw_subfield("c", 0, 0).unwrap(),
        Some(&b"San Francisco Museum of Art."[..])
    );
    assert_eq!(field.nth_raw_subfield("a", 0, 1).unwrap(), None);
}

#[test]
fn subfield_extraction_utf8() {
    let record = utf8_record();
    assert_eq!(record.encoding(), Encoding::Utf8);

    let field = record.raw_field("245");
    assert_eq!(field.value_count(), 1);
    assert_eq!(field.nth_subfield("a", 0, 0).unwrap(), "Garden exhibition /");
    assert_eq!(
        field.nth_subfield("c", 0, 0).unwrap(),
        "San Francisco Museum of Art."
    );
    assert_eq!(field.nth_subfield("z", 0, 0).unwrap(), "");
}

fn upper_case(bytes: &[u8]) -> Cow<'_, str> {
    Cow::Owned(String::from_utf8_lossy(bytes).to_uppercase())
}

#[test]
fn custom_marc8_transcoder() {
    let mut options = ReadOptions::new();
    options.set_marc8_transcoder(upper_case);

    let record = Record::from_bytes_with_options(FULL_RECORD, &options).unwrap();
    assert_eq!(record.encoding(), Encoding::Marc8);

    let field = record.raw_field("245");
    assert_eq!(field.nth_subfield("a", 0, 0).unwrap(), "GARDEN EXHIBITION /");
    assert_eq!(record.get_values("650", "a").unwrap(), ["HORTICULTURAL EXHIBITIONS."]);
    assert_eq!(record.control_field("005").unwrap(), "20120831093346.0");

    // Raw bytes are never transcoded.
    assert_eq!(
        field.nth_raw_subfield("a", 0, 0).unwrap(),
        Some(&b"Garden exhibition /"[..])
    );

    // UTF-8 records ignore the MARC-8 transcoder.
    let mut bytes = FULL_RECORD.to_vec();
    bytes[8] = b'a';
    let record = Record::from_bytes_with_options(bytes, &options).unwrap();
    assert_eq!(record.raw_field("245").subfield("a", 0).unwrap(), "Garden exhibition /");
}

#[test]
fn control_fields() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    assert_eq!(record.control_field("001").unwrap(), "000000002-7");
    assert_eq!(record.control_field("005").unwrap(), "20120831093346.0");

    // Missing, but a legal control tag.
    assert_eq!(record.control_field("003").unwrap(), "");

    assert!(matches!(
        record.control_field("245"),
        Err(Error::NotAControlField(t)) if t == "245"
    ));
}

#[test]
fn data_fields() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    assert!(matches!(
        record.data_field("008"),
        Err(Error::NotADataField(t)) if t == "008"
    ));

    assert_eq!(record.data_field("650").unwrap().value_count(), 1);
    assert_eq!(record.data_field("500").unwrap().value_count(), 0);
}

#[test]
fn duplicate_control_field() {
    let bytes = b"00056nam a2200049   4500001000300000001000300003\x1eA1\x1eB2\x1e\x1d";
    let record = Record::from_bytes(&bytes[..]).unwrap();

    assert_eq!(record.raw_field("001").value_count(), 2);
    assert!(matches!(
        record.control_field("001"),
        Err(Error::DuplicateControlField(_))
    ));
}

#[test]
fn field_tags_sorted_and_distinct() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();
    let tags = record.field_tags();

    assert_eq!(
        tags,
        ["001", "005", "008", "035", "245", "260", "300", "650", "710", "906", "988"]
    );
}

#[test]
fn indicators() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    assert_eq!(
        record.raw_field("245").indicators(0).unwrap().as_deref(),
        Some("00")
    );
    assert_eq!(
        record.raw_field("300").indicators(0).unwrap().as_deref(),
        Some("##")
    );
    assert_eq!(
        record.raw_field("650").indicators(0).unwrap().as_deref(),
        Some("#0")
    );
    assert_eq!(record.raw_field("650").indicators(1).unwrap(), None);
}

#[test]
fn subfield_codes() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();

    assert_eq!(
        record.raw_field("260").subfield_codes(0).unwrap(),
        ["a", "b", "c"]
    );
    assert_eq!(record.raw_field("906").subfield_codes(0).unwrap(), ["0"]);

    // Control fields have no subfield runs.
    assert!(record.raw_field("008").subfield_codes(0).unwrap().is_empty());
}

#[test]
fn repeated_subfield_codes() {
    let bytes = b"00059nam a2200037   4500650002100000\x1e 0\x1fzB\x1faFirst\x1faSecond\x1e\x1d";
    let record = Record::from_bytes(&bytes[..]).unwrap();
    let field = record.raw_field("650");

    assert_eq!(field.subfield_codes(0).unwrap(), ["a", "a", "z"]);
    assert_eq!(field.nth_subfield("a", 0, 0).unwrap(), "First");
    assert_eq!(field.nth_subfield("a", 0, 1).unwrap(), "Second");
    assert_eq!(field.nth_subfield("a", 0, 2).unwrap(), "");
    assert_eq!(record.get_values("650", "a").unwrap(), ["First", "Second"]);
}

#[test]
fn missing_terminator() {
    let mut bytes = FULL_RECORD.to_vec();
    *bytes.last_mut().unwrap() = b'X';

    assert!(matches!(
        Record::from_bytes(bytes.clone()),
        Err(Error::MissingTerminator)
    ));
    assert!(matches!(
        read_record(&mut bytes.as_slice()),
        Err(Error::MissingTerminator)
    ));
}

#[test]
fn invalid_length() {
    let mut reader: &[u8] = b"00012nam a2200025   4500\x1e\x1d";
    assert!(matches!(
        read_record(&mut reader),
        Err(Error::InvalidLength(_))
    ));

    let mut bytes = FULL_RECORD.to_vec();
    bytes[..5].copy_from_slice(b"00457");
    assert!(matches!(
        Record::from_bytes(bytes),
        Err(Error::InvalidLength(_))
    ));
}

#[test]
fn skip_leader_validation() {
    let mut bytes = FULL_RECORD.to_vec();
    bytes[20] = b'9';

    assert!(matches!(
        Record::from_bytes(bytes.clone()),
        Err(Error::InvalidLeader { position: 20, .. })
    ));

    let mut options = ReadOptions::new();
    options.set_validate_leader(false);

    let record = Record::from_bytes_with_options(bytes, &options).unwrap();
    assert_eq!(record.control_field("001").unwrap(), "000000002-7");
}

#[test]
fn reader_over_concatenated_records() {
    let stream = FULL_RECORD.repeat(3);
    let mut reader = RecordReader::new(stream.as_slice());
    let mut offsets = Vec::new();

    while let Some(record) = reader.next() {
        let record = record.unwrap();
        assert_eq!(record.raw_field("245").subfield("a", 0).unwrap(), "Garden exhibition /");
        offsets.push(reader.record_offset());
    }

    assert_eq!(offsets, [0, 458, 916]);
    assert_eq!(reader.offset(), 1374);
}

#[test]
fn reader_reports_truncated_stream() {
    let mut stream = FULL_RECORD.to_vec();
    stream.extend_from_slice(&FULL_RECORD[..100]);

    let mut reader = RecordReader::new(stream.as_slice());

    assert!(reader.next().unwrap().is_ok());
    assert!(matches!(
        reader.next(),
        Some(Err(Error::TruncatedStream {
            expected: 458,
            found: 100
        }))
    ));
    assert!(reader.next().is_none());
}

#[test]
fn breaker() {
    let record = Record::from_bytes(FULL_RECORD).unwrap();
    let breaker = record.to_breaker();
    let lines: Vec<&str> = breaker.lines().collect();

    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "=LDR 00458nam a22001577u 4500");
    assert_eq!(lines[1], "=001 000000002-7");
    assert_eq!(
        lines[5],
        "=245 00$aGarden exhibition /$cSan Francisco Museum of Art."
    );
    assert_eq!(lines[7], "=300 \\\\$a1 folded sheet (4p.) ;$c14 cm.");

    // Directory order, not tag order.
    assert_eq!(lines[10], "=988 \\\\$a20020608");
    assert_eq!(lines[11], "=906 \\\\$0MH");
}
