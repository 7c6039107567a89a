//! Segment type handlers
//!
//! Built-in handlers for payloads that cannot be read directly, and the
//! registry that creates them by name.

mod decompressing;
mod factory;

pub use decompressing::DecompressingHandler;
pub use factory::SegmentHandlerFactory;
