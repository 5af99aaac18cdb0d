use crate::encoding::{marc8_passthrough, EncodingPolicy, Transcoder};

/// Settings applied when building a [`crate::Record`] from bytes.
///
/// ```
/// use marc21::options::ReadOptions;
/// use marc21::encoding::EncodingPolicy;
///
/// let mut options = ReadOptions::new();
/// options
///     .set_validate_leader(false)
///     .set_unknown_encoding(EncodingPolicy::FallbackUtf8);
///
/// assert!(!options.validate_leader());
/// assert!(!options.strict_directory());
/// ```
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Check leader positions against the permitted value table.
    validate_leader: bool,

    /// Log leader validation diagnostics.
    verbose: bool,

    unknown_encoding: EncodingPolicy,

    /// Bounds-check every directory entry up front instead of on query.
    strict_directory: bool,

    marc8_transcoder: Transcoder,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        ReadOptions {
            validate_leader: true,
            verbose: false,
            unknown_encoding: EncodingPolicy::Reject,
            strict_directory: false,
            marc8_transcoder: marc8_passthrough,
        }
    }

    pub fn validate_leader(&self) -> bool {
        self.validate_leader
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
    pub fn unknown_encoding(&self) -> EncodingPolicy {
        self.unknown_encoding
    }
    pub fn strict_directory(&self) -> bool {
        self.strict_directory
    }
    pub fn marc8_transcoder(&self) -> Transcoder {
        self.marc8_transcoder
    }

    // ---

    pub fn set_validate_leader(&mut self, value: bool) -> &mut Self {
        self.validate_leader = value;
        self
    }
    pub fn set_verbose(&mut self, value: bool) -> &mut Self {
        self.verbose = value;
        self
    }
    /// With [`EncodingPolicy::FallbackUtf8`], leader validation no
    /// longer checks the encoding byte.
    pub fn set_unknown_encoding(&mut self, value: EncodingPolicy) -> &mut Self {
        self.unknown_encoding = value;
        self
    }
    pub fn set_strict_directory(&mut self, value: bool) -> &mut Self {
        self.strict_directory = value;
        self
    }
    pub fn set_marc8_transcoder(&mut self, value: Transcoder) -> &mut Self {
        self.marc8_transcoder = value;
        self
    }
}
