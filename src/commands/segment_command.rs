//! Segment read command
//!
//! Reads a user-defined segment through its type handler and either
//! writes the payload to a file or prints a hex preview.

use clap::ArgMatches;
use log::info;

use crate::api::NitfIo;
use crate::commands::command_traits::Command;
use crate::commands::create_output;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::utils::arg_utils::parse_range;

/// Bytes shown when no output file is given
const PREVIEW_BYTES: usize = 256;

/// Command for reading a segment's payload
pub struct SegmentCommand {
    /// Path to the input file
    input_file: String,
    /// File offset of the segment data
    offset: u64,
    /// Stored length of the segment data
    length: u64,
    /// Type handler name
    handler: Option<String>,
    /// Path to the output file
    output_file: Option<String>,
    show_progress: bool,
}

impl SegmentCommand {
    /// Create a new segment command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new SegmentCommand instance or an error
    pub fn new(args: &ArgMatches) -> NitfResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| NitfError::InvalidArgument("Missing input file".to_string()))?
            .clone();

        let range = args.get_one::<String>("segment")
            .ok_or_else(|| NitfError::InvalidArgument("Missing segment range".to_string()))?;
        let (offset, length) = parse_range(range)?;

        Ok(SegmentCommand {
            input_file,
            offset,
            length,
            handler: args.get_one::<String>("handler").cloned(),
            output_file: args.get_one::<String>("output").cloned(),
            show_progress: args.get_flag("progress"),
        })
    }

    fn print_preview(data: &[u8]) {
        println!("Segment payload: {} bytes", data.len());
        for (row, chunk) in data[..data.len().min(PREVIEW_BYTES)].chunks(16).enumerate() {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            let text: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            println!("{:08x}  {:<47}  {}", row * 16, hex.join(" "), text);
        }
        if data.len() > PREVIEW_BYTES {
            println!("... {} more bytes", data.len() - PREVIEW_BYTES);
        }
    }
}

impl Command for SegmentCommand {
    fn execute(&self) -> NitfResult<()> {
        info!(
            "Reading segment at {} ({} bytes) from {} with handler {}",
            self.offset,
            self.length,
            self.input_file,
            self.handler.as_deref().unwrap_or("none")
        );
        let nitf = NitfIo::new().with_progress(self.show_progress);

        match &self.output_file {
            Some(output_file) => {
                let mut out = create_output(output_file)?;
                let written = nitf.copy_segment(
                    &self.input_file,
                    self.offset,
                    self.length,
                    self.handler.as_deref(),
                    &mut out,
                )?;
                info!("Wrote {} bytes to {}", written, output_file);
            }
            None => {
                let data = nitf.read_segment(&self.input_file, self.offset, self.length, self.handler.as_deref())?;
                Self::print_preview(&data);
            }
        }
        Ok(())
    }
}
