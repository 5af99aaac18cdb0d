//! Record directory decoding.
//!
//! # References
//!
//! * <https://www.loc.gov/marc/bibliographic/bddirectory.html>
use crate::decimal::decode_decimal;
use crate::error::Error;
use crate::{FIELD_TERMINATOR, LEADER_SIZE};
use std::collections::BTreeMap;
use std::ops::Range;

const DATA_OFFSET_START: usize = 12;
const DATA_OFFSET_SIZE: usize = 5;
const TAG_SIZE: usize = 3;
const DATA_LENGTH_SIZE: usize = 4;
const DIRECTORY_ENTRY_LEN: usize = 12;

/// Absolute position of one field occurrence within the record bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub length: usize,
}

impl Location {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// One row of the directory, in the order it was listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub tag: String,
    pub location: Location,
}

/// Tag-indexed view of a record directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    base_address: usize,
    entries: Vec<DirectoryEntry>,
    index: BTreeMap<String, Vec<Location>>,
}

impl Directory {
    /// Decode the directory of a complete record.
    ///
    /// Entry offsets are not compared against the record length here;
    /// see [`Directory::check_bounds`].
    ///
    /// ```
    /// use marc21::directory::Directory;
    ///
    /// let bytes = b"00048nam a2200037   4500245001000000\x1e00\x1faTitle\x1e\x1d";
    /// let dir = Directory::decode(bytes).unwrap();
    ///
    /// assert_eq!(dir.base_address(), 37);
    /// assert_eq!(dir.get("245")[0].offset, 37);
    /// assert_eq!(dir.get("245")[0].length, 10);
    /// assert!(dir.get("100").is_empty());
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let base_bytes = bytes
            .get(DATA_OFFSET_START..(DATA_OFFSET_START + DATA_OFFSET_SIZE))
            .ok_or_else(|| Error::CorruptDirectory("record too short for leader".to_string()))?;

        let base_address = decode_decimal(base_bytes).ok_or_else(|| {
            Error::CorruptDirectory(format!(
                "invalid base address {:?}",
                String::from_utf8_lossy(base_bytes)
            ))
        })?;

        let mut dir = Directory {
            base_address,
            ..Default::default()
        };

        let mut idx = LEADER_SIZE;

        loop {
            match bytes.get(idx) {
                Some(&FIELD_TERMINATOR) => break,
                Some(_) => {}
                None => {
                    return Err(Error::CorruptDirectory(
                        "directory has no field terminator".to_string(),
                    ));
                }
            }

            let entry = bytes.get(idx..(idx + DIRECTORY_ENTRY_LEN)).ok_or_else(|| {
                Error::CorruptDirectory(format!("truncated directory entry at byte {idx}"))
            })?;

            dir.push_entry(entry, idx)?;

            idx += DIRECTORY_ENTRY_LEN;
        }

        Ok(dir)
    }

    /// Decode a single 12-byte entry found at `at` and add it.
    fn push_entry(&mut self, entry: &[u8], at: usize) -> Result<(), Error> {
        let tag = String::from_utf8_lossy(&entry[..TAG_SIZE]).into_owned();
        let len_bytes = &entry[TAG_SIZE..(TAG_SIZE + DATA_LENGTH_SIZE)];
        let pos_bytes = &entry[(TAG_SIZE + DATA_LENGTH_SIZE)..];

        let (Some(length), Some(start)) = (decode_decimal(len_bytes), decode_decimal(pos_bytes))
        else {
            return Err(Error::CorruptDirectory(format!(
                "non-numeric directory entry at byte {at}: {:?}",
                String::from_utf8_lossy(entry)
            )));
        };

        let location = Location {
            offset: self.base_address + start,
            length,
        };

        log::trace!("directory entry tag={tag} offset={} length={length}", location.offset);

        self.index.entry(tag.clone()).or_default().push(location);
        self.entries.push(DirectoryEntry { tag, location });

        Ok(())
    }

    /// Where field data begins, as declared in the leader.
    pub fn base_address(&self) -> usize {
        self.base_address
    }

    /// Locations of every occurrence of `tag`, in directory order.
    pub fn get(&self, tag: &str) -> &[Location] {
        self.index.get(tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Distinct tags in byte order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|t| t.as_str())
    }

    /// Directory rows in the order the record lists them.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Confirm every entry lies inside a record of `record_len` bytes.
    pub fn check_bounds(&self, record_len: usize) -> Result<(), Error> {
        for entry in &self.entries {
            let loc = entry.location;
            if loc.end() > record_len {
                return Err(Error::CorruptDirectory(format!(
                    "tag={} offset={} length={} exceeds record length {record_len}",
                    entry.tag, loc.offset, loc.length
                )));
            }
        }
        Ok(())
    }
}
