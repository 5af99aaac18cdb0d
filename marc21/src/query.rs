use std::ops::RangeInclusive;

/// Selects field tags by numeric range or by "x"-wildcard pattern.
pub struct TagQuery {
    pub tag_filter: Box<dyn Fn(&str) -> bool>,
}

/// True if `tag` matches a 3-character pattern where 'x' or 'X' matches
/// any character.
///
/// # Examples
///
/// ```
/// use marc21::query::tag_matches;
///
/// assert!(tag_matches("505", "505"));
/// assert!(tag_matches("505", "5xx"));
/// assert!(tag_matches("505", "5x5"));
/// assert!(tag_matches("505", "X05"));
///
/// assert!(!tag_matches("505", "6xx"));
/// assert!(!tag_matches("505", "LDR"));
/// assert!(!tag_matches("505", "invalid spec"));
/// ```
pub fn tag_matches(tag: &str, pattern: &str) -> bool {
    if pattern.len() != 3 || tag.len() != 3 {
        return false;
    }
    pattern
        .chars()
        .zip(tag.chars())
        .all(|(p, t)| p.eq_ignore_ascii_case(&'x') || p == t)
}

impl TagQuery {
    pub fn matches(&self, tag: &str) -> bool {
        (self.tag_filter)(tag)
    }
}

impl From<RangeInclusive<i64>> for TagQuery {
    fn from(range: RangeInclusive<i64>) -> Self {
        TagQuery {
            tag_filter: Box::new(move |tag: &str| match tag.parse::<i64>() {
                Ok(tag_number) => range.contains(&tag_number),
                Err(_) => false,
            }),
        }
    }
}

/// Colon-separated patterns, e.g. "245:6xx".
impl From<&str> for TagQuery {
    fn from(spec_input: &str) -> Self {
        let specs: Vec<String> = spec_input.split(':').map(str::to_owned).collect();
        TagQuery {
            tag_filter: Box::new(move |tag: &str| specs.iter().any(|spec| tag_matches(tag, spec))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    const RECORD: &[u8] = b"00071nam a2200061   4500955000300000600000300003650000300006\x1eAB\x1eCD\x1eEF\x1e\x1d";

    #[test]
    fn test_can_filter_by_inclusive_range() {
        let record = Record::from_bytes(RECORD).unwrap();
        let query = TagQuery::from(600..=699);

        let mut filtered = record.field_tags().into_iter().filter(|t| query.matches(t));
        assert_eq!(filtered.next(), Some("600"));
        assert_eq!(filtered.next(), Some("650"));
        assert!(filtered.next().is_none());
    }

    #[test]
    fn test_can_filter_by_string_slice_with_multiple_specs() {
        let record = Record::from_bytes(RECORD).unwrap();
        let query = TagQuery::from("600:9XX");

        let tags = record.matching_tags(query);
        assert_eq!(tags, ["600", "955"]);
    }

    #[test]
    fn non_numeric_tags_never_match_ranges() {
        let query = TagQuery::from(0..=999);
        assert!(!query.matches("DAT"));
        assert!(query.matches("001"));
    }
}
