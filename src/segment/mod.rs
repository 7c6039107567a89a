//! Data extension segment access
//!
//! A segment's payload is exposed as a bounded virtual file with
//! POSIX-like read, seek and tell, optionally decoded by a type handler.

mod user_segment;
mod reader;
mod source;
pub mod handlers;

pub use user_segment::{SegmentCursor, SegmentHandler, UserSegment};
pub use reader::SegmentReader;
pub use source::SegmentReaderSource;
pub use handlers::{DecompressingHandler, SegmentHandlerFactory};
