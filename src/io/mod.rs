//! I/O utilities for file handling
//!
//! This module provides the physical file primitive beneath the band
//! sources and segment readers, plus byte order helpers.

pub mod seekable;
pub mod byte_order;
pub mod physical;

pub use physical::{PhysicalFile, Whence};
