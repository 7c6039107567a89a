//! Container I/O constants
//!
//! Raw seek origins, default sizes and compression codes shared by the
//! band sources, segment handlers and the CLI.

/// Raw seek origin values, matching the POSIX numbering
pub mod seek {
    pub const SEEK_SET: i32 = 0;
    pub const SEEK_CUR: i32 = 1;
    pub const SEEK_END: i32 = 2;
}

/// Defaults used by the copy pipeline
pub mod copy {
    /// Bytes pulled from each band per pipeline step
    pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
}

/// Compression codes understood by the segment handlers
pub mod compression {
    pub const NONE: u64 = 1;        // Stored verbatim
    pub const DEFLATE: u64 = 8;     // Zlib/deflate stream
    pub const ZSTD: u64 = 14;       // Zstandard frame
}
