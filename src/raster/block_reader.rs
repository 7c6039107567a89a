//! Uncompressed block reader
//!
//! Serves fixed-size blocks stored back to back from a data offset. It is
//! the minimal deblocker needed to drive direct block copies of
//! uncompressed imagery; compressed block layouts need a real deblocking
//! engine behind the same trait.

use log::debug;

use crate::io::physical::{PhysicalFile, Whence};
use crate::nitf::errors::{NitfError, NitfResult};
use super::deblocker::{BlockingInfo, Deblocker};

/// Deblocker over consecutive uncompressed blocks in a file
#[derive(Debug)]
pub struct RawBlockReader<'a> {
    file: &'a mut PhysicalFile,
    /// File offset of block 0
    data_offset: u64,
    info: BlockingInfo,
    /// Band count recorded by `prepare_direct_block_read`
    num_bands: Option<u32>,
    /// Most recently fetched block
    block: Vec<u8>,
}

impl<'a> RawBlockReader<'a> {
    pub fn new(file: &'a mut PhysicalFile, data_offset: u64, info: BlockingInfo) -> NitfResult<Self> {
        if info.block_size == 0 {
            return Err(NitfError::InvalidArgument("block size must be positive".to_string()));
        }
        Ok(RawBlockReader {
            file,
            data_offset,
            info,
            num_bands: None,
            block: Vec::new(),
        })
    }

    /// Band count the reader was prepared for, if prepared
    pub fn num_bands(&self) -> Option<u32> {
        self.num_bands
    }
}

impl Deblocker for RawBlockReader<'_> {
    fn prepare_direct_block_read(&mut self, num_bands: u32) -> NitfResult<()> {
        if num_bands == 0 {
            return Err(NitfError::InvalidArgument("band count must be positive".to_string()));
        }
        self.num_bands = Some(num_bands);
        self.block = vec![0u8; self.info.block_size];
        Ok(())
    }

    fn blocking_info(&self) -> BlockingInfo {
        self.info
    }

    fn read_block_direct(&mut self, block_index: u64) -> NitfResult<&[u8]> {
        if self.num_bands.is_none() {
            return Err(NitfError::InvalidArgument(
                "direct block read before prepare_direct_block_read".to_string(),
            ));
        }
        let num_blocks = self.info.num_blocks();
        if block_index >= num_blocks {
            return Err(NitfError::out_of_bounds(block_index, 1, num_blocks));
        }

        let offset = self.data_offset + block_index * self.info.block_size as u64;
        debug!("Reading block {} at offset {}", block_index, offset);
        self.file.seek(offset as i64, Whence::Set)?;
        self.file.read(&mut self.block)?;
        Ok(self.block.as_slice())
    }
}
