pub mod io;
pub mod nitf;
pub mod band;
pub mod segment;
pub mod raster;
pub mod utils;
pub mod compression;
pub mod commands;
pub mod api;

pub use crate::api::NitfIo;

pub use nitf::{ErrorKind, NitfError, NitfResult};
pub use band::{BandSource, DirectBlockSource, FileSource, MemorySource, RowSource};
pub use segment::{SegmentReader, UserSegment};
