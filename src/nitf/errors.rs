//! Custom error types for band and segment I/O

use std::fmt;
use std::io;

/// Error kinds reported by the streaming I/O layer
#[derive(Debug)]
pub enum NitfError {
    /// A read or seek fell outside the logical or physical extent
    OutOfBounds {
        /// Position the operation started from
        offset: u64,
        /// Number of bytes (or the signed displacement) requested
        requested: i64,
        /// Extent that was exceeded
        limit: u64,
    },
    /// I/O error from the underlying file handle
    IoError(io::Error),
    /// A fetched block did not have the expected size
    FormatMismatch {
        expected: usize,
        actual: usize,
    },
    /// A row generator reported failure
    GeneratorFailure(String),
    /// A block transform reported failure
    TransformFailure(String),
    /// Invalid argument, such as an unrecognized whence value
    InvalidArgument(String),
    /// No segment handler is registered under the given name
    UnknownHandler(String),
    /// Payload could not be decoded or encoded
    CompressionError(String),
    /// Generic error with message
    GenericError(String),
}

/// Copyable tag for the variants of [`NitfError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfBounds,
    IoError,
    FormatMismatch,
    GeneratorFailure,
    TransformFailure,
    InvalidArgument,
    UnknownHandler,
    CompressionError,
    GenericError,
}

impl NitfError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            NitfError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            NitfError::IoError(_) => ErrorKind::IoError,
            NitfError::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            NitfError::GeneratorFailure(_) => ErrorKind::GeneratorFailure,
            NitfError::TransformFailure(_) => ErrorKind::TransformFailure,
            NitfError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            NitfError::UnknownHandler(_) => ErrorKind::UnknownHandler,
            NitfError::CompressionError(_) => ErrorKind::CompressionError,
            NitfError::GenericError(_) => ErrorKind::GenericError,
        }
    }

    pub(crate) fn out_of_bounds(offset: u64, requested: i64, limit: u64) -> Self {
        NitfError::OutOfBounds { offset, requested, limit }
    }
}

impl fmt::Display for NitfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NitfError::OutOfBounds { offset, requested, limit } => write!(
                f,
                "Out of bounds: {} bytes from offset {} exceeds extent {}",
                requested, offset, limit
            ),
            NitfError::IoError(e) => write!(f, "I/O error: {}", e),
            NitfError::FormatMismatch { expected, actual } => write!(
                f,
                "Block size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            NitfError::GeneratorFailure(msg) => write!(f, "Row generator failed: {}", msg),
            NitfError::TransformFailure(msg) => write!(f, "Block transform failed: {}", msg),
            NitfError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            NitfError::UnknownHandler(name) => write!(f, "Unknown segment handler: {}", name),
            NitfError::CompressionError(msg) => write!(f, "Compression error: {}", msg),
            NitfError::GenericError(msg) => write!(f, "NITF error: {}", msg),
        }
    }
}

impl std::error::Error for NitfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NitfError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NitfError {
    fn from(error: io::Error) -> Self {
        NitfError::IoError(error)
    }
}

impl From<String> for NitfError {
    fn from(msg: String) -> Self {
        NitfError::GenericError(msg)
    }
}

/// Result type for band and segment operations
pub type NitfResult<T> = Result<T, NitfError>;
