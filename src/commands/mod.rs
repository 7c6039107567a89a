//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod segment_command;
pub mod band_command;
pub mod blocks_command;

pub use command_traits::{Command, CommandFactory};
pub use segment_command::SegmentCommand;
pub use band_command::BandCommand;
pub use blocks_command::BlocksCommand;

use std::fs::File;
use std::io::BufWriter;

use clap::ArgMatches;
use crate::nitf::errors::{NitfError, NitfResult};

/// Create (truncate) an output file for streaming writes
pub(crate) fn create_output(path: &str) -> NitfResult<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| NitfError::GenericError(format!("Cannot create output file {}: {}", path, e)))?;
    Ok(BufWriter::new(file))
}

/// Factory for creating command instances based on CLI arguments
///
/// Exactly one of `--segment`, `--extract-band` or `--copy-blocks`
/// selects the command.
pub struct NitfioCommandFactory;

impl NitfioCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        NitfioCommandFactory
    }
}

impl Default for NitfioCommandFactory {
    fn default() -> Self {
        NitfioCommandFactory::new()
    }
}

impl CommandFactory for NitfioCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> NitfResult<Box<dyn Command>> {
        if args.contains_id("segment") {
            Ok(Box::new(SegmentCommand::new(args)?))
        } else if args.contains_id("extract-band") {
            Ok(Box::new(BandCommand::new(args)?))
        } else if args.get_flag("copy-blocks") {
            Ok(Box::new(BlocksCommand::new(args)?))
        } else {
            Err(NitfError::InvalidArgument(
                "nothing to do: use --segment, --extract-band or --copy-blocks".to_string(),
            ))
        }
    }
}
