#![forbid(unsafe_code)]

//! Reader for MARC21 records in the ISO 2709 binary exchange format.
//!
//! Records are framed from a byte stream, their leaders validated, and
//! their directories indexed.  Field and subfield values are extracted
//! lazily from the record bytes on request.
//!
//! ```
//! use marc21::RecordReader;
//!
//! let data = b"00048nam a2200037   4500245001000000\x1e00\x1faTitle\x1e\x1d";
//!
//! for record in RecordReader::new(&data[..]) {
//!     let record = record.unwrap();
//!     let title = record.data_field("245").unwrap();
//!     assert_eq!(title.subfield("a", 0).unwrap(), "Title");
//! }
//! ```
//!
//! # Optional features
//!
//! - **marc21_bibliographic**: convenience methods to get
//!   commonly used data from a MARC21 bibliographic record

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use self::error::Error;
pub use self::field::VariableField;
pub use self::framer::RecordReader;
pub use self::options::ReadOptions;
pub use self::record::Record;

pub mod breaker;
pub mod decimal;
pub mod directory;
pub mod encoding;
mod error;
pub mod field;
pub mod framer;
pub mod leader;
pub mod options;
pub mod query;
pub mod record;

/// Introduces a subfield code within a data field.
pub const DELIMITER: u8 = 0x1F;
/// Ends each field, and the directory.
pub const FIELD_TERMINATOR: u8 = 0x1E;
/// Ends each record.
pub const RECORD_TERMINATOR: u8 = 0x1D;

pub const LEADER_SIZE: usize = 24;
pub const RECORD_SIZE_ENTRY: usize = 5;
/// Leader plus the directory terminator and record terminator.
pub const MIN_RECORD_LEN: usize = LEADER_SIZE + 2;
pub const MAX_RECORD_LEN: usize = 99999;
