//! Shared definitions for the imagery container I/O layer
//!
//! Error taxonomy and format constants used by the band sources,
//! segment readers and the image copy pipeline.

pub mod errors;
pub(crate) mod constants;

pub use errors::{ErrorKind, NitfError, NitfResult};
