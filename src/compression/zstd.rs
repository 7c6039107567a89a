//! Handler for Zstandard compressed payloads

use log::{debug, warn};

use crate::nitf::constants::compression;
use crate::nitf::errors::{NitfError, NitfResult};
use super::handler::CompressionHandler;

/// ZSTD compression handler
pub struct ZstdHandler {
    /// Compression level (1-22, default 3)
    compression_level: i32,
}

impl ZstdHandler {
    /// Create a new ZSTD handler with default compression level
    pub fn new() -> Self {
        ZstdHandler {
            compression_level: 3
        }
    }
}

impl Default for ZstdHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        match zstd::decode_all(data) {
            Ok(decoded) => {
                debug!("ZSTD decoded {} bytes into {}", data.len(), decoded.len());
                Ok(decoded)
            }
            Err(e) => {
                warn!("ZSTD payload decode error: {}", e);
                Err(NitfError::CompressionError(format!("ZSTD decode failed: {}", e)))
            }
        }
    }

    fn compress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        zstd::encode_all(data, self.compression_level)
            .map_err(|e| NitfError::CompressionError(format!("ZSTD encode failed: {}", e)))
    }

    fn name(&self) -> &'static str {
        "ZSTD"
    }

    fn code(&self) -> u64 {
        compression::ZSTD
    }
}
