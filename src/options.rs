//! Decoder configuration

/// Options for a single decode call.
///
/// The defaults verify both trailer fields and allow any size a single gzip
/// member can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateOptions {
    /// Compare the trailer CRC32 with the CRC32 of the output
    pub verify_checksum: bool,
    /// Compare the trailer ISIZE with the output length (mod 2^32)
    pub verify_size: bool,
    /// Hard upper bound on the number of bytes written
    pub max_output_size: usize,
}

impl Default for InflateOptions {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            verify_size: true,
            max_output_size: u32::MAX as usize,
        }
    }
}

impl InflateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every trailer check, matching decoders that trust the data
    pub fn unchecked() -> Self {
        Self {
            verify_checksum: false,
            verify_size: false,
            ..Self::default()
        }
    }

    /// Set the CRC32 check
    pub fn with_verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    /// Set the ISIZE check
    pub fn with_verify_size(mut self, verify: bool) -> Self {
        self.verify_size = verify;
        self
    }

    /// Set the output limit
    pub fn with_max_output_size(mut self, limit: usize) -> Self {
        self.max_output_size = limit;
        self
    }
}
