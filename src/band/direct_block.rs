//! Direct block band source
//!
//! Moves on-disk blocks nearly verbatim instead of reformatting them into
//! rows, for file-to-file copies and block-aligned merges. Each read pulls
//! exactly one raw block from the deblocker and runs it through a transform.
//! The source is single pass: the block cursor never moves backwards, even
//! when a read fails.

use log::{debug, warn};

use crate::raster::deblocker::Deblocker;
use crate::nitf::errors::{NitfError, NitfResult};
use super::source::BandSource;
use super::transforms::BlockTransform;

/// Band source that transfers whole blocks from a [`Deblocker`]
pub struct DirectBlockSource<'a> {
    deblocker: &'a mut dyn Deblocker,
    transform: Box<dyn BlockTransform + 'a>,
    num_bands: u32,
    /// Index of the next block to fetch
    block_number: u64,
    num_blocks: u64,
    /// Size recorded through `set_size`
    size: u64,
}

impl<'a> DirectBlockSource<'a> {
    /// Create a source over `deblocker` for `num_bands` bands
    ///
    /// The deblocker is prepared for direct block reads and its geometry
    /// queried once, here.
    pub fn new<T: BlockTransform + 'a>(
        transform: T,
        deblocker: &'a mut dyn Deblocker,
        num_bands: u32,
    ) -> NitfResult<Self> {
        deblocker.prepare_direct_block_read(num_bands)?;
        let info = deblocker.blocking_info();
        let num_blocks = info.num_blocks();
        debug!(
            "Direct block source: {}x{} blocks of {} bytes, {} band(s)",
            info.blocks_per_row, info.blocks_per_col, info.block_size, num_bands
        );
        Ok(DirectBlockSource {
            deblocker,
            transform: Box::new(transform),
            num_bands,
            block_number: 0,
            num_blocks,
            size: 0,
        })
    }

    /// Index of the next block to fetch
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Total number of blocks in the image
    pub fn num_blocks(&self) -> u64 {
        self.num_blocks
    }

    /// Number of bands the deblocker was prepared for
    pub fn num_bands(&self) -> u32 {
        self.num_bands
    }
}

impl BandSource for DirectBlockSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        if self.block_number >= self.num_blocks {
            return Err(NitfError::out_of_bounds(self.block_number, 1, self.num_blocks));
        }

        let block_number = self.block_number;
        self.block_number += 1;
        let raw = self.deblocker.read_block_direct(block_number)?;

        if raw.len() != buf.len() {
            warn!(
                "Block {} is {} bytes but {} were requested",
                block_number,
                raw.len(),
                buf.len()
            );
            return Err(NitfError::FormatMismatch {
                expected: buf.len(),
                actual: raw.len(),
            });
        }

        let block_size = raw.len();
        self.transform
            .next_block(buf, raw, block_number, block_size)
            .map_err(|e| match e {
                NitfError::TransformFailure(_) => e,
                other => NitfError::TransformFailure(format!("block {}: {}", block_number, other)),
            })
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn set_size(&mut self, size: u64) -> NitfResult<()> {
        self.size = size;
        Ok(())
    }
}
