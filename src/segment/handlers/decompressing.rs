//! Handler serving the decoded view of a compressed payload
//!
//! The stored payload is read and decoded once, at setup; afterwards the
//! virtual file is the decoded bytes and no further file access happens.

use log::{debug, info};

use crate::compression::CompressionHandler;
use crate::io::physical::{PhysicalFile, Whence};
use crate::nitf::errors::{NitfError, NitfResult};
use crate::segment::user_segment::{SegmentCursor, SegmentHandler};

/// Segment handler that decodes its payload with a [`CompressionHandler`]
pub struct DecompressingHandler {
    codec: Box<dyn CompressionHandler>,
    name: String,
    decoded: Vec<u8>,
}

impl DecompressingHandler {
    pub fn new(codec: Box<dyn CompressionHandler>) -> Self {
        let name = codec.name().to_lowercase();
        DecompressingHandler {
            codec,
            name,
            decoded: Vec::new(),
        }
    }
}

impl SegmentHandler for DecompressingHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&mut self, cursor: &mut SegmentCursor, file: &mut PhysicalFile) -> NitfResult<()> {
        let stored_length = usize::try_from(cursor.virtual_length()).map_err(|_| {
            NitfError::InvalidArgument(format!("payload of {} bytes is too large", cursor.virtual_length()))
        })?;
        let mut stored = vec![0u8; stored_length];
        file.seek(cursor.real_offset(0)?, Whence::Set)?;
        file.read(&mut stored)?;

        self.decoded = self.codec.decompress(&stored)?;
        info!(
            "{} segment payload: {} stored bytes, {} decoded",
            self.codec.name(),
            stored_length,
            self.decoded.len()
        );
        cursor.set_virtual_length(self.decoded.len() as u64);
        cursor.set_offset(0)
    }

    fn read(
        &mut self,
        cursor: &mut SegmentCursor,
        _file: &mut PhysicalFile,
        buf: &mut [u8],
    ) -> Option<NitfResult<()>> {
        let start = cursor.virtual_offset();
        let end = start + buf.len() as u64;
        let result = if end > self.decoded.len() as u64 {
            Err(NitfError::out_of_bounds(start, buf.len() as i64, self.decoded.len() as u64))
        } else {
            buf.copy_from_slice(&self.decoded[start as usize..end as usize]);
            Ok(())
        };
        // Hook reads advance by the requested count, failed or not
        cursor.advance(buf.len() as u64);
        Some(result)
    }

    fn seek(
        &mut self,
        cursor: &mut SegmentCursor,
        _file: &mut PhysicalFile,
        offset: i64,
        whence: Whence,
    ) -> Option<NitfResult<u64>> {
        let result = cursor.candidate(offset, whence).and_then(|target| {
            debug!("{} segment seek to decoded offset {}", self.name, target);
            cursor.set_offset(target)?;
            Ok(target)
        });
        Some(result)
    }
}
