//! Field occurrences and subfield extraction.
use crate::directory::Location;
use crate::encoding::Transcoder;
use crate::error::Error;
use crate::record::{is_control_tag, Record};
use crate::{DELIMITER, FIELD_TERMINATOR};

const INDICATOR_COUNT: usize = 2;
const BLANK_INDICATOR: char = '#';

/// All occurrences of one tag within a [`Record`].
///
/// Holds byte ranges into the record rather than copies, so it cannot
/// outlive the record it came from.
#[derive(Debug, Clone)]
pub struct VariableField<'a> {
    tag: String,
    raw: &'a [u8],
    locations: &'a [Location],
    transcoder: Transcoder,
}

impl<'a> VariableField<'a> {
    pub(crate) fn new(record: &'a Record, tag: &str, locations: &'a [Location]) -> Self {
        VariableField {
            tag: tag.to_string(),
            raw: record.raw_bytes(),
            locations,
            transcoder: record.transcoder(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of occurrences of this tag in the record.
    pub fn value_count(&self) -> usize {
        self.locations.len()
    }

    pub fn is_control_field(&self) -> bool {
        is_control_tag(&self.tag)
    }

    /// Bytes of one occurrence, including its field terminator.
    ///
    /// `Ok(None)` if there is no such occurrence.  A directory entry that
    /// points outside the record is a [`Error::CorruptDirectory`].
    pub fn raw_value(&self, occurrence: usize) -> Result<Option<&'a [u8]>, Error> {
        let Some(loc) = self.locations.get(occurrence) else {
            return Ok(None);
        };

        match self.raw.get(loc.range()) {
            Some(bytes) => Ok(Some(bytes)),
            None => Err(Error::CorruptDirectory(format!(
                "tag={} occurrence={occurrence} offset={} length={} exceeds record length {}",
                self.tag,
                loc.offset,
                loc.length,
                self.raw.len()
            ))),
        }
    }

    /// Transcoded text of one occurrence, without its field terminator.
    ///
    /// Mostly useful for control fields.  Empty if there is no such
    /// occurrence.
    pub fn value(&self, occurrence: usize) -> Result<String, Error> {
        let Some(mut bytes) = self.raw_value(occurrence)? else {
            return Ok(String::new());
        };

        if let Some((&FIELD_TERMINATOR, rest)) = bytes.split_last() {
            bytes = rest;
        }

        Ok(self.transcode(bytes))
    }

    /// The two indicator bytes of one occurrence, blanks shown as '#'.
    pub fn indicators(&self, occurrence: usize) -> Result<Option<String>, Error> {
        let Some(bytes) = self.raw_value(occurrence)? else {
            return Ok(None);
        };

        if bytes.len() < INDICATOR_COUNT {
            return Ok(None);
        }

        Ok(Some(
            bytes[..INDICATOR_COUNT]
                .iter()
                .map(|&b| if b == b' ' { BLANK_INDICATOR } else { b as char })
                .collect(),
        ))
    }

    /// Iterate the subfields of one occurrence in the order they appear.
    pub fn subfields(&self, occurrence: usize) -> Result<Subfields<'a>, Error> {
        let bytes = self.raw_value(occurrence)?.unwrap_or(&[]);
        Ok(Subfields::new(bytes))
    }

    /// Subfield codes of one occurrence, sorted.  Repeated codes are kept.
    pub fn subfield_codes(&self, occurrence: usize) -> Result<Vec<String>, Error> {
        let mut codes: Vec<String> = self
            .subfields(occurrence)?
            .map(|sf| sf.code().to_string())
            .collect();

        codes.sort();

        Ok(codes)
    }

    /// Raw bytes of the `n`th (zero-based) subfield with `code` in one
    /// occurrence.
    ///
    /// `Ok(None)` when there are fewer than `n + 1` matches.
    pub fn nth_raw_subfield(
        &self,
        code: &str,
        occurrence: usize,
        n: usize,
    ) -> Result<Option<&'a [u8]>, Error> {
        Ok(self
            .subfields(occurrence)?
            .filter(|sf| sf.matches(code))
            .nth(n)
            .map(|sf| sf.content()))
    }

    /// Transcoded text of the `n`th subfield with `code`, or an empty
    /// string if there is no such subfield.
    pub fn nth_subfield(&self, code: &str, occurrence: usize, n: usize) -> Result<String, Error> {
        Ok(self
            .nth_raw_subfield(code, occurrence, n)?
            .map(|bytes| self.transcode(bytes))
            .unwrap_or_default())
    }

    pub(crate) fn transcode(&self, bytes: &[u8]) -> String {
        (self.transcoder)(bytes).into_owned()
    }

    /// Shorthand for the first subfield with `code`.
    pub fn subfield(&self, code: &str, occurrence: usize) -> Result<String, Error> {
        self.nth_subfield(code, occurrence, 0)
    }
}

/// A subfield code and its undecoded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSubfield<'a> {
    code: u8,
    content: &'a [u8],
}

impl<'a> RawSubfield<'a> {
    pub fn code(&self) -> char {
        self.code as char
    }

    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    /// True if this subfield's code is the first byte of `code`.
    pub fn matches(&self, code: &str) -> bool {
        code.as_bytes().first() == Some(&self.code)
    }
}

/// Single pass over the delimiter-prefixed runs of a data field.
///
/// Scanning begins after the indicators and stops at the field
/// terminator, at any byte that should have been a delimiter but isn't,
/// or where the bytes run out before a run is closed.
#[derive(Debug, Clone)]
pub struct Subfields<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Subfields<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Subfields {
            bytes,
            pos: INDICATOR_COUNT,
        }
    }
}

impl<'a> Iterator for Subfields<'a> {
    type Item = RawSubfield<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.get(self.pos) != Some(&DELIMITER) {
            self.pos = self.bytes.len();
            return None;
        }

        let Some(&code) = self.bytes.get(self.pos + 1) else {
            self.pos = self.bytes.len();
            return None;
        };

        let start = self.pos + 2;
        let run = self.bytes.get(start..).unwrap_or(&[]);

        let Some(len) = run
            .iter()
            .position(|&b| b == DELIMITER || b == FIELD_TERMINATOR)
        else {
            // Truncated run; no terminator to close it.
            self.pos = self.bytes.len();
            return None;
        };

        self.pos = start + len;

        Some(RawSubfield {
            code,
            content: &run[..len],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(bytes: &[u8]) -> Vec<(char, &[u8])> {
        Subfields::new(bytes)
            .map(|sf| (sf.code(), sf.content()))
            .collect()
    }

    #[test]
    fn scans_runs_in_order() {
        let found = collect(b"00\x1faGarden\x1fcSF\x1fa\x1e");
        assert_eq!(
            found,
            [('a', &b"Garden"[..]), ('c', &b"SF"[..]), ('a', &b""[..])]
        );
    }

    #[test]
    fn no_runs_after_indicators() {
        assert!(collect(b"00abc\x1e").is_empty());
        assert!(collect(b"0").is_empty());
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn truncated_run_is_dropped() {
        let found = collect(b"  \x1faone\x1fbtwo");
        assert_eq!(found, [('a', &b"one"[..])]);
    }

    #[test]
    fn delimiter_at_end() {
        assert!(collect(b"  \x1f").is_empty());
    }

    #[test]
    fn matches_uses_first_byte() {
        let sf = RawSubfield {
            code: b'a',
            content: b"x",
        };
        assert!(sf.matches("a"));
        assert!(!sf.matches("b"));
        assert!(!sf.matches(""));
    }
}
