//! Error types for gzinflate
//!
//! Every failure of a decode call is reported as an [`InflateError`]; nothing is
//! recovered silently.

use thiserror::Error;

/// Discriminant of an [`InflateError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidHeader,
    InvalidBlockType,
    UnexpectedEof,
    CorruptHuffmanCode,
    InvalidBackReference,
    ChecksumMismatch,
    SizeMismatch,
    OutputLimitExceeded,
    InvalidRange,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidHeader => "invalid_header",
            ErrorKind::InvalidBlockType => "invalid_block_type",
            ErrorKind::UnexpectedEof => "unexpected_eof",
            ErrorKind::CorruptHuffmanCode => "corrupt_huffman_code",
            ErrorKind::InvalidBackReference => "invalid_back_reference",
            ErrorKind::ChecksumMismatch => "checksum_mismatch",
            ErrorKind::SizeMismatch => "size_mismatch",
            ErrorKind::OutputLimitExceeded => "output_limit_exceeded",
            ErrorKind::InvalidRange => "invalid_range",
        }
    }
}

/// Main error type for gzinflate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InflateError {
    /// Bad gzip magic, method or flags, or a stored block whose NLEN is not
    /// the complement of LEN
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: &'static str },

    /// Reserved block type 3
    #[error("invalid block type {btype}")]
    InvalidBlockType { btype: u8 },

    /// Read past the end of the input
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: usize },

    /// Malformed code lengths, or a bit sequence that does not decode
    #[error("corrupt huffman code: {reason}")]
    CorruptHuffmanCode { reason: &'static str },

    /// Match distance reaches before the start of the output
    #[error("back-reference distance {distance} exceeds {available} bytes of output")]
    InvalidBackReference { distance: usize, available: usize },

    /// CRC32 in the trailer does not match the decompressed data
    #[error("CRC32 mismatch: trailer {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// ISIZE in the trailer does not match the decompressed length
    #[error("size mismatch: trailer declares {declared} bytes, decoded {actual}")]
    SizeMismatch { declared: u32, actual: usize },

    /// Output would grow past the configured maximum
    #[error("output exceeds limit of {limit} bytes")]
    OutputLimitExceeded { limit: usize },

    /// Offset/length window does not fit the buffer
    #[error("range {offset}+{length} is out of bounds for buffer of {available} bytes")]
    InvalidRange {
        offset: usize,
        length: usize,
        available: usize,
    },
}

impl InflateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InflateError::InvalidHeader { .. } => ErrorKind::InvalidHeader,
            InflateError::InvalidBlockType { .. } => ErrorKind::InvalidBlockType,
            InflateError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            InflateError::CorruptHuffmanCode { .. } => ErrorKind::CorruptHuffmanCode,
            InflateError::InvalidBackReference { .. } => ErrorKind::InvalidBackReference,
            InflateError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            InflateError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            InflateError::OutputLimitExceeded { .. } => ErrorKind::OutputLimitExceeded,
            InflateError::InvalidRange { .. } => ErrorKind::InvalidRange,
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(reason: &'static str) -> Self {
        InflateError::InvalidHeader { reason }
    }

    /// Create a corrupt huffman code error
    pub fn corrupt(reason: &'static str) -> Self {
        InflateError::CorruptHuffmanCode { reason }
    }

    /// Create an end-of-input error at a byte position
    pub fn eof(position: usize) -> Self {
        InflateError::UnexpectedEof { position }
    }
}

/// Result type for gzinflate operations
pub type Result<T> = std::result::Result<T, InflateError>;
