//! Band sources
//!
//! This module implements the sources a copy pipeline pulls band bytes
//! from: resident memory, a file, a row generator, or whole raw blocks.
//! Every variant is consumed sequentially, start to end, exactly once.

mod source;
mod stride;
mod memory;
mod file;
mod row;
mod direct_block;
pub mod transforms;

pub use source::BandSource;
pub use memory::MemorySource;
pub use file::FileSource;
pub use row::{RowGenerator, RowSource};
pub use direct_block::DirectBlockSource;
pub use transforms::{copy_block, BlockTransform, ByteSwapTransform};
