//! Fixed-width ASCII decimal fields.

/// Decode a run of ASCII digits as an unsigned integer.
///
/// Returns `None` if any byte is not a digit, the slice is empty, or the
/// value does not fit in a `usize`.
///
/// # Examples
///
/// ```
/// use marc21::decimal::decode_decimal;
///
/// assert_eq!(decode_decimal(b"03245"), Some(3245));
/// assert_eq!(decode_decimal(b"0"), Some(0));
/// assert_eq!(decode_decimal(b"12a45"), None);
/// ```
pub fn decode_decimal(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }

    bytes.iter().try_fold(0usize, |acc, b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add((b - b'0') as usize)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert_eq!(decode_decimal(b"00042"), decode_decimal(b"42"));
        assert_eq!(decode_decimal(b"99999"), Some(99999));
    }

    #[test]
    fn rejects_sign_and_space() {
        assert_eq!(decode_decimal(b"-1234"), None);
        assert_eq!(decode_decimal(b" 1234"), None);
        assert_eq!(decode_decimal(b""), None);
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(decode_decimal(b"99999999999999999999999"), None);
        assert_eq!(
            decode_decimal(usize::MAX.to_string().as_bytes()),
            Some(usize::MAX)
        );
    }
}
