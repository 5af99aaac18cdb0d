#![cfg(feature = "marc21_bibliographic")]
use crate::Record;

impl Record {
    /// First 245$a, if present.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc21::Record;
    /// let bytes = b"00050nam a2200037   4500245001200000\x1e10\x1faRobot /\x1e\x1d";
    /// let record = Record::from_bytes(&bytes[..]).unwrap();
    /// assert_eq!(record.main_title(), Some("Robot /".to_string()));
    /// ```
    pub fn main_title(&self) -> Option<String> {
        let field = self.data_field("245").ok()?;
        let title = field.subfield("a", 0).ok()?;
        (!title.is_empty()).then_some(title)
    }

    /// The 001 control number, if present.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc21::Record;
    /// let bytes = b"00044nam a2200037   4500001000600000\x1eocm42\x1e\x1d";
    /// let record = Record::from_bytes(&bytes[..]).unwrap();
    /// assert_eq!(record.control_number(), Some("ocm42".to_string()));
    /// ```
    pub fn control_number(&self) -> Option<String> {
        let number = self.control_field("001").ok()?;
        (!number.is_empty()).then_some(number)
    }
}
