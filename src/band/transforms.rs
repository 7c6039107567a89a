//! Block transforms for direct block transfer
//!
//! A transform moves one raw block into the destination buffer of a direct
//! block source. `copy_block` is the verbatim reference transform.

use crate::io::byte_order::swap_samples;
use crate::nitf::errors::{NitfError, NitfResult};

/// Transform applied to each raw block
///
/// Closures of the form `FnMut(&mut [u8], &[u8], u64, usize) -> NitfResult<()>`
/// implement it, as does the function [`copy_block`].
pub trait BlockTransform {
    fn next_block(
        &mut self,
        dest: &mut [u8],
        raw: &[u8],
        block_number: u64,
        block_size: usize,
    ) -> NitfResult<()>;
}

impl<F> BlockTransform for F
where
    F: FnMut(&mut [u8], &[u8], u64, usize) -> NitfResult<()>,
{
    fn next_block(
        &mut self,
        dest: &mut [u8],
        raw: &[u8],
        block_number: u64,
        block_size: usize,
    ) -> NitfResult<()> {
        self(dest, raw, block_number, block_size)
    }
}

/// Copy the raw block into `dest` unchanged
pub fn copy_block(dest: &mut [u8], raw: &[u8], block_number: u64, block_size: usize) -> NitfResult<()> {
    if dest.len() < block_size || raw.len() < block_size {
        return Err(NitfError::TransformFailure(format!(
            "block {} of {} bytes does not fit ({} byte source, {} byte destination)",
            block_number,
            block_size,
            raw.len(),
            dest.len()
        )));
    }
    dest[..block_size].copy_from_slice(&raw[..block_size]);
    Ok(())
}

/// Copies each block while reversing the byte order of its samples
#[derive(Debug, Clone, Copy)]
pub struct ByteSwapTransform {
    sample_size: usize,
}

impl ByteSwapTransform {
    /// Create a transform for samples of `sample_size` bytes (1, 2, 4 or 8)
    pub fn new(sample_size: usize) -> NitfResult<Self> {
        match sample_size {
            1 | 2 | 4 | 8 => Ok(ByteSwapTransform { sample_size }),
            other => Err(NitfError::InvalidArgument(format!("unsupported sample size {}", other))),
        }
    }
}

impl BlockTransform for ByteSwapTransform {
    fn next_block(
        &mut self,
        dest: &mut [u8],
        raw: &[u8],
        block_number: u64,
        block_size: usize,
    ) -> NitfResult<()> {
        copy_block(dest, raw, block_number, block_size)?;
        swap_samples(&mut dest[..block_size], self.sample_size).map_err(|e| {
            NitfError::TransformFailure(format!("block {}: {}", block_number, e))
        })
    }
}
