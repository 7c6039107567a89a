//! Compression handling for segment payloads
//!
//! Strategies for decoding (and, for writers and fixtures, encoding) the
//! stored bytes of compressed data extension segments.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::DeflateHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;
