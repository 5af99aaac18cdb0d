//! Character encoding dispatch on leader position 9 (offset 8).
use crate::error::Error;
use crate::options::ReadOptions;
use std::borrow::Cow;

/// Converts raw field bytes into text.
pub type Transcoder = for<'a> fn(&'a [u8]) -> Cow<'a, str>;

/// Character coding scheme declared in the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Leader byte `' '`.
    Marc8,
    /// Leader byte `'a'`.
    Utf8,
    /// Anything else.
    Unknown(u8),
}

impl Encoding {
    /// # Examples
    ///
    /// ```
    /// use marc21::encoding::Encoding;
    ///
    /// assert_eq!(Encoding::from_leader_byte(b'a'), Encoding::Utf8);
    /// assert_eq!(Encoding::from_leader_byte(b' '), Encoding::Marc8);
    /// assert_eq!(Encoding::from_leader_byte(b'z'), Encoding::Unknown(b'z'));
    /// ```
    pub fn from_leader_byte(byte: u8) -> Self {
        match byte {
            b' ' => Encoding::Marc8,
            b'a' => Encoding::Utf8,
            other => Encoding::Unknown(other),
        }
    }

    pub fn leader_byte(&self) -> u8 {
        match self {
            Encoding::Marc8 => b' ',
            Encoding::Utf8 => b'a',
            Encoding::Unknown(b) => *b,
        }
    }
}

/// What to do with a record whose encoding byte is neither `' '` nor `'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Fail record construction with [`Error::UnknownCharacterEncoding`].
    #[default]
    Reject,
    /// Read the record as UTF-8 and record a warning.
    FallbackUtf8,
}

/// Interpret bytes as UTF-8, replacing invalid sequences.
pub fn utf8_transcoder(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Stand-in for a MARC-8 conversion table.
///
/// Maps each byte to the char with the same code point, so the original
/// bytes can always be recovered.  The ASCII range of MARC-8 is identical
/// to UTF-8.  Supply a real table with [`ReadOptions::set_marc8_transcoder`].
///
/// ```
/// use marc21::encoding::marc8_passthrough;
///
/// let text = marc8_passthrough(b"caf\xe2e");
/// assert_eq!(text, "caf\u{e2}e");
///
/// let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
/// assert_eq!(bytes, b"caf\xe2e");
/// ```
pub fn marc8_passthrough(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
        _ => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Pick the transcoder for a record.
///
/// Returns the transcoder and, when the unknown-encoding fallback was
/// taken, a warning describing it.
pub fn select_transcoder(
    encoding: Encoding,
    options: &ReadOptions,
) -> Result<(Transcoder, Option<String>), Error> {
    match encoding {
        Encoding::Marc8 => Ok((options.marc8_transcoder(), None)),
        Encoding::Utf8 => Ok((utf8_transcoder as Transcoder, None)),
        Encoding::Unknown(b) => match options.unknown_encoding() {
            EncodingPolicy::Reject => Err(Error::UnknownCharacterEncoding(b)),
            EncodingPolicy::FallbackUtf8 => {
                let warning =
                    format!("unknown character encoding {:?}; reading as UTF-8", b as char);
                log::warn!("{warning}");
                Ok((utf8_transcoder as Transcoder, Some(warning)))
            }
        },
    }
}
