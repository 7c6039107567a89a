//! Deblocking collaborator interface
//!
//! The engine that understands on-disk block geometry hands raw blocks to
//! the direct block source through this trait.

use crate::nitf::errors::NitfResult;

/// Block layout of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingInfo {
    /// Blocks across one row of blocks
    pub blocks_per_row: u32,
    /// Rows of blocks
    pub blocks_per_col: u32,
    /// Size of one decoded block in bytes
    pub block_size: usize,
}

impl BlockingInfo {
    /// Total number of blocks in the image
    pub fn num_blocks(&self) -> u64 {
        self.blocks_per_row as u64 * self.blocks_per_col as u64
    }
}

/// Source of raw blocks for direct transfer
pub trait Deblocker {
    /// Prepare to serve whole blocks for `num_bands` bands
    fn prepare_direct_block_read(&mut self, num_bands: u32) -> NitfResult<()>;

    /// Block geometry of the image being read
    fn blocking_info(&self) -> BlockingInfo;

    /// Fetch block `block_index`; the returned slice is valid until the next call
    fn read_block_direct(&mut self, block_index: u64) -> NitfResult<&[u8]>;
}
