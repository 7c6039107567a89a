//! Direct block copy command
//!
//! Copies the uncompressed blocks of an image straight to an output file,
//! optionally swapping the byte order of every sample on the way.

use clap::ArgMatches;
use log::info;

use crate::api::NitfIo;
use crate::commands::command_traits::Command;
use crate::commands::create_output;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::raster::BlockingInfo;
use crate::utils::arg_utils::parse_dimensions;

/// Command for copying raw blocks
pub struct BlocksCommand {
    input_file: String,
    output_file: String,
    data_offset: u64,
    info: BlockingInfo,
    /// Sample size to byte-swap
    swap_sample_size: Option<usize>,
    show_progress: bool,
}

impl BlocksCommand {
    /// Create a new block copy command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new BlocksCommand instance or an error
    pub fn new(args: &ArgMatches) -> NitfResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| NitfError::InvalidArgument("Missing input file".to_string()))?
            .clone();
        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| NitfError::InvalidArgument("Missing output file path for block copy".to_string()))?
            .clone();

        let blocks = args.get_one::<String>("blocks")
            .ok_or_else(|| NitfError::InvalidArgument("Missing block grid (--blocks RxC)".to_string()))?;
        let (blocks_per_col, blocks_per_row) = parse_dimensions(blocks)?;

        let block_size = args.get_one::<String>("block-size")
            .ok_or_else(|| NitfError::InvalidArgument("Missing --block-size".to_string()))?;
        let block_size = block_size
            .parse::<usize>()
            .map_err(|_| NitfError::InvalidArgument(format!("Invalid block size: {}", block_size)))?;

        let data_offset = match args.get_one::<String>("data-offset") {
            Some(text) => text
                .parse::<u64>()
                .map_err(|_| NitfError::InvalidArgument(format!("Invalid data offset: {}", text)))?,
            None => 0,
        };

        let swap_sample_size = if args.get_flag("swap") {
            let size = match args.get_one::<String>("bytes-per-pixel") {
                Some(text) => text
                    .parse::<usize>()
                    .map_err(|_| NitfError::InvalidArgument(format!("Invalid sample size: {}", text)))?,
                None => {
                    return Err(NitfError::InvalidArgument(
                        "--swap needs --bytes-per-pixel for block copies".to_string(),
                    ))
                }
            };
            Some(size)
        } else {
            None
        };

        Ok(BlocksCommand {
            input_file,
            output_file,
            data_offset,
            info: BlockingInfo {
                blocks_per_row,
                blocks_per_col,
                block_size,
            },
            swap_sample_size,
            show_progress: args.get_flag("progress"),
        })
    }
}

impl Command for BlocksCommand {
    fn execute(&self) -> NitfResult<()> {
        info!(
            "Copying {}x{} blocks from {} (offset {}) into {}",
            self.info.blocks_per_col, self.info.blocks_per_row, self.input_file, self.data_offset, self.output_file
        );
        let mut out = create_output(&self.output_file)?;
        let written = NitfIo::new()
            .with_progress(self.show_progress)
            .copy_blocks(&self.input_file, self.data_offset, self.info, self.swap_sample_size, &mut out)?;
        info!("Wrote {} bytes to {}", written, self.output_file);
        Ok(())
    }
}
