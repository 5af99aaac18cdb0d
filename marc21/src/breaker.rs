//! Routines for rendering decoded records as MARC Breaker text
use super::field::VariableField;
use super::Record;
use std::collections::HashMap;

const MARC_BREAKER_SF_DELIMITER: &str = "$";
const MARC_BREAKER_SF_DELIMITER_ESCAPE: &str = "{dollar}";

/// Replace bare subfield delimiter values with their escaped version.
pub fn escape_to_breaker(value: &str) -> String {
    value.replace(MARC_BREAKER_SF_DELIMITER, MARC_BREAKER_SF_DELIMITER_ESCAPE)
}

fn breaker_indicator(byte: u8) -> char {
    if byte == b' ' { '\\' } else { byte as char }
}

impl VariableField<'_> {
    /// Generate breaker text for one occurrence of this field.
    ///
    /// Returns `None` if the occurrence does not exist or its directory
    /// entry is out of range.
    pub fn to_breaker(&self, occurrence: usize) -> Option<String> {
        let bytes = match self.raw_value(occurrence) {
            Ok(Some(b)) => b,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("cannot render field: {e}");
                return None;
            }
        };

        if self.is_control_field() {
            let content = self.value(occurrence).ok()?;
            return Some(if content.is_empty() {
                format!("={}", self.tag())
            } else {
                format!("={} {}", self.tag(), escape_to_breaker(&content))
            });
        }

        let mut s = format!(
            "={} {}{}",
            self.tag(),
            breaker_indicator(bytes.first().copied().unwrap_or(b' ')),
            breaker_indicator(bytes.get(1).copied().unwrap_or(b' ')),
        );

        for sf in self.subfields(occurrence).ok()? {
            s += &format!(
                "${}{}",
                escape_to_breaker(&sf.code().to_string()),
                escape_to_breaker(&self.transcode(sf.content()))
            );
        }

        Some(s)
    }
}

impl Record {
    /// Generate breaker text for a [`Record`], fields in directory order.
    ///
    /// # References
    ///
    /// * <https://www.loc.gov/marc/makrbrkr.html>
    ///
    /// # Examples
    ///
    /// ```
    /// use marc21::Record;
    ///
    /// let bytes = b"00045nam a2200037   4500245000700000\x1e1 \x1fa$5\x1e\x1d";
    /// let record = Record::from_bytes(&bytes[..]).unwrap();
    ///
    /// assert_eq!(
    ///     record.to_breaker(),
    ///     "=LDR 00045nam a2200037   4500\n=245 1\\$a{dollar}5"
    /// );
    /// ```
    pub fn to_breaker(&self) -> String {
        let mut s = format!("=LDR {}", &escape_to_breaker(&self.leader_text()));

        // Occurrences rendered so far, per tag.
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for entry in self.directory().entries() {
            let count = seen.entry(entry.tag.as_str()).or_insert(0);
            let occurrence = *count;
            *count += 1;

            if let Some(line) = self.raw_field(&entry.tag).to_breaker(occurrence) {
                s += format!("\n{line}").as_str();
            }
        }

        s
    }
}
