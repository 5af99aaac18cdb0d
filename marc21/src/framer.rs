//! Splits a byte stream into individual binary MARC records.
use crate::decimal::decode_decimal;
use crate::error::Error;
use crate::options::ReadOptions;
use crate::record::Record;
use crate::{MAX_RECORD_LEN, MIN_RECORD_LEN, RECORD_SIZE_ENTRY, RECORD_TERMINATOR};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};

/// Read until `buf` is full or the stream ends.  Returns the byte count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut count = 0;
    while count < buf.len() {
        match reader.read(&mut buf[count..]) {
            Ok(0) => break,
            Ok(n) => count += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(count)
}

/// Read one length-prefixed chunk without checking its terminator.
///
/// Returns `Ok(None)` when the stream is exhausted before the first byte.
fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, Error> {
    let mut size_bytes = [0u8; RECORD_SIZE_ENTRY];

    let count = fill(reader, &mut size_bytes)?;
    if count == 0 {
        return Ok(None);
    }
    if count < RECORD_SIZE_ENTRY {
        return Err(Error::TruncatedStream {
            expected: RECORD_SIZE_ENTRY,
            found: count,
        });
    }

    let rec_len = match decode_decimal(&size_bytes) {
        Some(n) if (MIN_RECORD_LEN..=MAX_RECORD_LEN).contains(&n) => n,
        _ => {
            return Err(Error::InvalidLength(
                String::from_utf8_lossy(&size_bytes).into_owned(),
            ));
        }
    };

    let mut bytes = vec![0u8; rec_len];
    bytes[..RECORD_SIZE_ENTRY].copy_from_slice(&size_bytes);

    let count = fill(reader, &mut bytes[RECORD_SIZE_ENTRY..])?;
    if count < rec_len - RECORD_SIZE_ENTRY {
        return Err(Error::TruncatedStream {
            expected: rec_len,
            found: RECORD_SIZE_ENTRY + count,
        });
    }

    Ok(Some(bytes))
}

fn check_terminator(bytes: &[u8]) -> Result<(), Error> {
    match bytes.last() {
        Some(&RECORD_TERMINATOR) => Ok(()),
        _ => Err(Error::MissingTerminator),
    }
}

/// Read the next complete record from `reader`.
///
/// Returns the declared record length along with the record bytes, or
/// `Ok(None)` at a clean end of stream.
///
/// ```
/// let data = b"00026nam a2200025   4500\x1e\x1d";
/// let mut reader = &data[..];
///
/// let (len, bytes) = marc21::framer::read_record(&mut reader).unwrap().unwrap();
/// assert_eq!(len, 26);
/// assert_eq!(bytes, data);
///
/// assert!(marc21::framer::read_record(&mut reader).unwrap().is_none());
/// ```
pub fn read_record<R: Read>(reader: &mut R) -> Result<Option<(usize, Vec<u8>)>, Error> {
    let Some(bytes) = read_frame(reader)? else {
        return Ok(None);
    };

    check_terminator(&bytes)?;

    Ok(Some((bytes.len(), bytes)))
}

/// Reads binary MARC from a stream and emits [`Record`] values.
///
/// Iteration stops after an error that leaves the stream position
/// unknown (bad length, truncation, read failure).  Errors confined to
/// one record are returned and reading continues with the next record.
pub struct RecordReader<R> {
    reader: R,
    options: ReadOptions,

    // Stream offset of the next unread byte.
    offset: usize,

    // Stream offset of the most recently framed record.
    record_offset: usize,

    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a binary MARC file for reading.
    pub fn from_file(filename: &str) -> Result<Self, Error> {
        let file = File::open(filename)
            .map_err(|e| Error::Io(format!("cannot read MARC file: {filename} {e}")))?;

        Ok(RecordReader::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReadOptions::default())
    }

    pub fn with_options(reader: R, options: ReadOptions) -> Self {
        RecordReader {
            reader,
            options,
            offset: 0,
            record_offset: 0,
            done: false,
        }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Replace the options applied to records read from here on.
    pub fn set_options(&mut self, options: ReadOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Bytes consumed from the stream so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Stream offset where the most recently read record began.
    pub fn record_offset(&self) -> usize {
        self.record_offset
    }

    /// Read the next framed record as raw bytes.
    pub fn next_bytes(&mut self) -> Option<Result<Vec<u8>, Error>> {
        if self.done {
            return None;
        }

        let bytes = match read_frame(&mut self.reader) {
            Ok(Some(b)) => b,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                log::error!("giving up on stream at offset {}: {e}", self.offset);
                self.done = true;
                return Some(Err(e));
            }
        };

        self.record_offset = self.offset;
        self.offset += bytes.len();

        if let Err(e) = check_terminator(&bytes) {
            log::warn!("record at offset {} {e}", self.record_offset);
            return Some(Err(e));
        }

        Some(Ok(bytes))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.next_bytes()? {
            Ok(b) => b,
            Err(e) => return Some(Err(e)),
        };

        let result = Record::from_bytes_with_options(bytes, &self.options);

        if let Err(e) = &result {
            log::warn!("skipping record at offset {}: {e}", self.record_offset);
        }

        Some(result)
    }
}
