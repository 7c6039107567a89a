//! Compression handler trait definition
//!
//! A segment's stored bytes are decoded through one of these handlers by
//! `segment::DecompressingHandler`, which then serves the decoded bytes as
//! the segment's virtual file.

use crate::nitf::errors::NitfResult;

/// Strategy trait for handling different payload compression methods
pub trait CompressionHandler: Send + Sync {
    /// Decode a stored payload into its logical bytes
    ///
    /// The length of the result becomes the segment's virtual length.
    fn decompress(&self, data: &[u8]) -> NitfResult<Vec<u8>>;

    /// Encode logical bytes into a stored payload
    fn compress(&self, data: &[u8]) -> NitfResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Get the compression code
    fn code(&self) -> u64;
}
