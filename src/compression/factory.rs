//! Factory for creating compression handlers

use crate::nitf::constants::compression;
use crate::nitf::errors::{NitfError, NitfResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::DeflateHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    pub fn create_handler(code: u64) -> NitfResult<Box<dyn CompressionHandler>> {
        match code {
            compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::DEFLATE => Ok(Box::new(DeflateHandler)),
            compression::ZSTD => Ok(Box::new(ZstdHandler::new())),
            _ => Err(NitfError::CompressionError(format!("unsupported compression code {}", code))),
        }
    }
}
