//! Seekable reader trait and implementations
//!
//! This module provides a unified trait for readers that support both
//! reading and seeking operations, so physical files can be backed by
//! real files or in-memory cursors alike.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
