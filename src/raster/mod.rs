//! Raster block access and band copying
//!
//! The deblocking interface consumed by direct block sources, a minimal
//! uncompressed implementation of it, and the pipeline that drains band
//! sources into an output stream.

pub mod deblocker;
mod block_reader;
mod band_writer;
pub mod preview;

pub use deblocker::{BlockingInfo, Deblocker};
pub use block_reader::RawBlockReader;
pub use band_writer::{BandWriter, Interleave};
