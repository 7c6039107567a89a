//! Registry of segment type handlers
//!
//! Handlers are looked up by name (case-insensitive), with aliases for the
//! common spellings of each compression method.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::compression::CompressionFactory;
use crate::nitf::constants::compression;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::segment::user_segment::SegmentHandler;
use super::decompressing::DecompressingHandler;

lazy_static! {
    // Handler names and aliases mapped to the compression code they decode
    static ref HANDLER_REGISTRY: BTreeMap<&'static str, u64> = {
        let mut registry = BTreeMap::new();
        for name in ["uncompressed", "none", "raw"] {
            registry.insert(name, compression::NONE);
        }
        for name in ["deflate", "zlib", "zip"] {
            registry.insert(name, compression::DEFLATE);
        }
        for name in ["zstd", "zstandard"] {
            registry.insert(name, compression::ZSTD);
        }
        registry
    };
}

/// Factory for creating segment handlers
pub struct SegmentHandlerFactory;

impl SegmentHandlerFactory {
    /// Create the handler registered under `name`
    pub fn create_by_name(name: &str) -> NitfResult<Box<dyn SegmentHandler>> {
        let key = name.trim().to_lowercase();
        match HANDLER_REGISTRY.get(key.as_str()) {
            Some(&code) => Self::create_for_compression(code),
            None => Err(NitfError::UnknownHandler(name.to_string())),
        }
    }

    /// Create a handler decoding payloads stored with compression `code`
    pub fn create_for_compression(code: u64) -> NitfResult<Box<dyn SegmentHandler>> {
        let codec = CompressionFactory::create_handler(code)?;
        Ok(Box::new(DecompressingHandler::new(codec)))
    }

    /// All registered names, aliases included, in sorted order
    pub fn available_names() -> Vec<&'static str> {
        HANDLER_REGISTRY.keys().copied().collect()
    }
}
