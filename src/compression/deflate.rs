//! Handler for zlib/deflate compressed payloads
//!
//! Segments stored as zlib streams ("deflate", "zlib" or "zip" in the
//! handler registry) are inflated once when their reader is set up.

use std::io::{Read, Write};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;

use crate::nitf::constants::compression;
use crate::nitf::errors::{NitfError, NitfResult};
use super::handler::CompressionHandler;

/// Deflate (zlib stream) handler
pub struct DeflateHandler;

impl CompressionHandler for DeflateHandler {
    fn decompress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decoded = Vec::new();
        decoder
            .read_to_end(&mut decoded)
            .map_err(|e| NitfError::CompressionError(format!("deflate decode failed: {}", e)))?;
        debug!("Deflate decoded {} bytes into {}", data.len(), decoded.len());
        Ok(decoded)
    }

    fn compress(&self, data: &[u8]) -> NitfResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn name(&self) -> &'static str {
        "Deflate"
    }

    fn code(&self) -> u64 {
        compression::DEFLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nitf::ErrorKind;

    #[test]
    fn test_bad_zlib_header_is_compression_error() {
        let mut stored = DeflateHandler.compress(&[42u8; 256]).unwrap();
        stored[0] = 0x00;
        let err = DeflateHandler.decompress(&stored).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CompressionError);
    }
}
