//! Utility modules for common functionality
//!
//! Logging, progress reporting, layout configuration and CLI value parsing.

pub mod logger;
pub(crate) mod progress;
pub mod layout_config;
pub mod arg_utils;

pub use layout_config::{BandPlacement, LayoutConfig, LayoutInterleave};
