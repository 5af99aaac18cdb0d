use std::error;
use std::fmt;

/// Errors produced while framing, decoding, or querying MARC21 records.
#[derive(Debug)]
pub enum Error {
    /// Declared record length is not a 5-digit decimal in [26, 99999].
    /// Carries the length prefix as read.
    InvalidLength(String),
    /// Final record byte is not the record terminator.
    MissingTerminator,
    /// The stream ended after the record length was known.
    TruncatedStream { expected: usize, found: usize },
    /// The underlying reader failed.
    Io(String),
    /// A leader position holds a value outside its permitted set.
    InvalidLeader {
        position: usize,
        expected: &'static str,
        found: u8,
    },
    UnknownCharacterEncoding(u8),
    NotAControlField(String),
    NotADataField(String),
    DuplicateControlField(String),
    /// Directory content cannot be decoded or points outside the record.
    CorruptDirectory(String),
}

use self::Error::*;

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLength(len) => write!(f, "record length is invalid: {len:?}"),
            MissingTerminator => write!(f, "record must end in a record terminator"),
            TruncatedStream { expected, found } => write!(
                f,
                "stream ended mid-record: expected {expected} bytes, found {found}"
            ),
            Io(e) => write!(f, "read error: {e}"),
            InvalidLeader {
                position,
                expected,
                found,
            } => write!(
                f,
                "leader is invalid at position {position}: expected one of {expected:?}, found {:?}",
                *found as char
            ),
            UnknownCharacterEncoding(b) => {
                write!(f, "unknown character encoding {:?}", *b as char)
            }
            NotAControlField(tag) => write!(f, "\"{tag}\" is not a valid control field"),
            NotADataField(tag) => write!(f, "\"{tag}\" is not a data field"),
            DuplicateControlField(tag) => {
                write!(f, "too many instances of control field \"{tag}\"")
            }
            CorruptDirectory(s) => write!(f, "corrupt directory: {s}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Io(e.to_string())
    }
}
