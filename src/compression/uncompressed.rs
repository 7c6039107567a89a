//! Handler for payloads stored verbatim
//!
//! Registered as the "uncompressed"/"none"/"raw" segment type, it gives a
//! segment an in-memory copy of its stored bytes as the decoded view.

use crate::nitf::constants::compression;
use crate::nitf::errors::NitfResult;
use super::handler::CompressionHandler;

/// Pass-through handler
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn compress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }

    fn code(&self) -> u64 {
        compression::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_view_is_stored_bytes() {
        let stored = [0u8, 1, 2, 250];
        assert_eq!(UncompressedHandler.decompress(&stored).unwrap(), stored.to_vec());
        assert_eq!(UncompressedHandler.code(), compression::NONE);
    }
}
