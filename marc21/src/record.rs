//! Decoded binary MARC record and its query surface.
use crate::decimal::decode_decimal;
use crate::directory::Directory;
use crate::encoding::{select_transcoder, Encoding, EncodingPolicy, Transcoder};
use crate::error::Error;
use crate::field::VariableField;
use crate::leader::validate_leader_except;
use crate::options::ReadOptions;
use crate::query::TagQuery;
use crate::{LEADER_SIZE, MIN_RECORD_LEN, RECORD_SIZE_ENTRY, RECORD_TERMINATOR};

#[cfg(feature = "marc21_bibliographic")]
mod marc21_bibliographic;

const STATUS_POS: usize = 5;
const TYPE_POS: usize = 6;
const BIB_LEVEL_POS: usize = 7;
const ENCODING_POS: usize = 8;
const ENCODING_LEVEL_POS: usize = 17;
const CATALOGING_FORM_POS: usize = 18;
const MULTIPART_LEVEL_POS: usize = 19;

/// True for tags of the form "00x".
///
/// ```
/// use marc21::record::is_control_tag;
///
/// assert!(is_control_tag("001"));
/// assert!(is_control_tag("008"));
/// assert!(!is_control_tag("010"));
/// assert!(!is_control_tag("0"));
/// ```
pub fn is_control_tag(tag: &str) -> bool {
    tag.as_bytes().starts_with(b"00")
}

/// One binary MARC record.
///
/// The record owns its bytes; field views returned by queries borrow
/// from it.  Nothing is mutated after construction, so a `Record` can be
/// shared across threads for reading.
#[derive(Debug, Clone)]
pub struct Record {
    raw: Vec<u8>,
    status: u8,
    record_type: u8,
    bib_level: u8,
    character_encoding: u8,
    encoding_level: u8,
    cataloging_form: u8,
    multipart_level: u8,
    encoding: Encoding,
    directory: Directory,
    transcoder: Transcoder,
    warnings: Vec<String>,
}

impl Record {
    /// Build a record from one complete, framed record using the
    /// default [`ReadOptions`].
    ///
    /// # References
    ///
    /// * <https://www.loc.gov/marc/bibliographic/bdleader.html>
    /// * <https://www.loc.gov/marc/bibliographic/bddirectory.html>
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Record, Error> {
        Self::from_bytes_with_options(bytes, &ReadOptions::default())
    }

    /// Build a record from one complete, framed record.
    ///
    /// ```
    /// use marc21::Record;
    /// use marc21::options::ReadOptions;
    ///
    /// // Leader position 10 must be '2'.
    /// let bytes = b"00026nam a3200025   4500\x1e\x1d";
    /// assert!(Record::from_bytes(&bytes[..]).is_err());
    ///
    /// let mut options = ReadOptions::new();
    /// options.set_validate_leader(false);
    /// assert!(Record::from_bytes_with_options(&bytes[..], &options).is_ok());
    /// ```
    pub fn from_bytes_with_options(
        bytes: impl Into<Vec<u8>>,
        options: &ReadOptions,
    ) -> Result<Record, Error> {
        let raw = bytes.into();

        let size_bytes = raw.get(..RECORD_SIZE_ENTRY).unwrap_or(&raw);
        match decode_decimal(size_bytes) {
            Some(len) if len >= MIN_RECORD_LEN && len == raw.len() => {}
            _ => {
                return Err(Error::InvalidLength(
                    String::from_utf8_lossy(size_bytes).into_owned(),
                ));
            }
        }

        if raw.last() != Some(&RECORD_TERMINATOR) {
            return Err(Error::MissingTerminator);
        }

        if options.validate_leader() {
            // With the UTF-8 fallback the encoding byte is judged by
            // select_transcoder, not the leader rules.
            let exempt: &[usize] = match options.unknown_encoding() {
                EncodingPolicy::FallbackUtf8 => &[ENCODING_POS],
                EncodingPolicy::Reject => &[],
            };

            if let Err(e) = validate_leader_except(&raw, exempt) {
                if options.verbose() {
                    log::warn!(
                        "leader validation failed for {:?}: {e}",
                        String::from_utf8_lossy(&raw[..LEADER_SIZE])
                    );
                }
                return Err(e);
            }
        }

        let character_encoding = raw[ENCODING_POS];
        let encoding = Encoding::from_leader_byte(character_encoding);
        let (transcoder, warning) = select_transcoder(encoding, options)?;

        let directory = Directory::decode(&raw)?;

        if options.strict_directory() {
            directory.check_bounds(raw.len())?;
        }

        log::debug!(
            "decoded record of {} bytes with {} distinct tags",
            raw.len(),
            directory.len()
        );

        Ok(Record {
            status: raw[STATUS_POS],
            record_type: raw[TYPE_POS],
            bib_level: raw[BIB_LEVEL_POS],
            character_encoding,
            encoding_level: raw[ENCODING_LEVEL_POS],
            cataloging_form: raw[CATALOGING_FORM_POS],
            multipart_level: raw[MULTIPART_LEVEL_POS],
            encoding,
            directory,
            transcoder,
            warnings: warning.into_iter().collect(),
            raw,
        })
    }

    /// The complete record exactly as read.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Record length in bytes.  Matches the length declared in the leader.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The 24 leader bytes as text.  Not transcoded.
    pub fn leader_text(&self) -> String {
        String::from_utf8_lossy(&self.raw[..LEADER_SIZE]).into_owned()
    }

    pub fn status(&self) -> u8 {
        self.status
    }
    pub fn record_type(&self) -> u8 {
        self.record_type
    }
    pub fn bib_level(&self) -> u8 {
        self.bib_level
    }
    pub fn character_encoding(&self) -> u8 {
        self.character_encoding
    }
    pub fn encoding_level(&self) -> u8 {
        self.encoding_level
    }
    pub fn cataloging_form(&self) -> u8 {
        self.cataloging_form
    }
    pub fn multipart_level(&self) -> u8 {
        self.multipart_level
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn base_address(&self) -> usize {
        self.directory.base_address()
    }

    /// Problems tolerated while building the record.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn transcoder(&self) -> Transcoder {
        self.transcoder
    }

    /// Distinct field tags, sorted.
    pub fn field_tags(&self) -> Vec<&str> {
        self.directory.tags().collect()
    }

    /// Distinct field tags selected by a [`TagQuery`], sorted.
    ///
    /// ```
    /// use marc21::Record;
    ///
    /// let bytes = b"00048nam a2200037   4500245001000000\x1e00\x1faTitle\x1e\x1d";
    /// let record = Record::from_bytes(&bytes[..]).unwrap();
    ///
    /// assert_eq!(record.matching_tags("2xx"), ["245"]);
    /// assert!(record.matching_tags(600..=699).is_empty());
    /// ```
    pub fn matching_tags(&self, query: impl Into<TagQuery>) -> Vec<&str> {
        let query = query.into();
        self.directory.tags().filter(|t| query.matches(t)).collect()
    }

    /// All occurrences of `tag`.  Unknown tags produce a field with no
    /// occurrences.
    pub fn raw_field(&self, tag: &str) -> VariableField<'_> {
        VariableField::new(self, tag, self.directory.get(tag))
    }

    /// Value of a control field (tags "00x").
    ///
    /// A missing field yields an empty string.
    pub fn control_field(&self, tag: &str) -> Result<String, Error> {
        if !is_control_tag(tag) {
            return Err(Error::NotAControlField(tag.to_string()));
        }

        let field = self.raw_field(tag);
        match field.value_count() {
            0 => Ok(String::new()),
            1 => field.value(0),
            _ => Err(Error::DuplicateControlField(tag.to_string())),
        }
    }

    /// All occurrences of a data field (any tag not of the form "00x").
    pub fn data_field(&self, tag: &str) -> Result<VariableField<'_>, Error> {
        if is_control_tag(tag) {
            return Err(Error::NotADataField(tag.to_string()));
        }
        Ok(self.raw_field(tag))
    }

    /// Returns every value for the specified tag and subfield across
    /// all occurrences of the field.
    pub fn get_values(&self, tag: &str, code: &str) -> Result<Vec<String>, Error> {
        let field = self.data_field(tag)?;
        let mut values = Vec::new();

        for idx in 0..field.value_count() {
            for sf in field.subfields(idx)? {
                if sf.matches(code) {
                    values.push((self.transcoder)(sf.content()).into_owned());
                }
            }
        }

        Ok(values)
    }
}
