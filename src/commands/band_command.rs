//! Band extraction command
//!
//! Pulls one band out of a raw multi-band pixel file. The layout comes from
//! a TOML file (`--layout`), from individual flags, or both, with flags
//! taking precedence.

use clap::ArgMatches;
use log::{debug, info};

use crate::api::NitfIo;
use crate::commands::command_traits::Command;
use crate::commands::create_output;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::raster::preview::save_grayscale;
use crate::utils::arg_utils::parse_dimensions;
use crate::utils::layout_config::{LayoutConfig, LayoutInterleave};

/// Command for extracting a band from a raw pixel file
pub struct BandCommand {
    input_file: String,
    output_file: String,
    band: u32,
    layout: LayoutConfig,
    /// Preview dimensions, when the band is saved as an image
    png: Option<(u32, u32)>,
    show_progress: bool,
}

fn parse_number<T: std::str::FromStr>(args: &ArgMatches, id: &str) -> NitfResult<Option<T>> {
    match args.get_one::<String>(id) {
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|_| NitfError::InvalidArgument(format!("Invalid value for --{}: {}", id, text))),
        None => Ok(None),
    }
}

impl BandCommand {
    /// Create a new band command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new BandCommand instance or an error
    pub fn new(args: &ArgMatches) -> NitfResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| NitfError::InvalidArgument("Missing input file".to_string()))?
            .clone();
        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| NitfError::InvalidArgument("Missing output file path for band extraction".to_string()))?
            .clone();
        let band = parse_number::<u32>(args, "extract-band")?
            .ok_or_else(|| NitfError::InvalidArgument("Missing band index".to_string()))?;

        let layout = Self::layout_from_args(args)?;
        debug!("Band layout: {:?}", layout);

        let png = match args.get_one::<String>("png") {
            Some(text) => Some(parse_dimensions(text)?),
            None => None,
        };

        Ok(BandCommand {
            input_file,
            output_file,
            band,
            layout,
            png,
            show_progress: args.get_flag("progress"),
        })
    }

    fn layout_from_args(args: &ArgMatches) -> NitfResult<LayoutConfig> {
        let mut layout = match args.get_one::<String>("layout") {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };

        if let Some(bands) = parse_number(args, "bands")? {
            layout.bands = bands;
        }
        if let Some(bytes_per_pixel) = parse_number(args, "bytes-per-pixel")? {
            layout.bytes_per_pixel = bytes_per_pixel;
        }
        if let Some(start) = parse_number(args, "start")? {
            layout.start = start;
        }
        if let Some(rows) = parse_number(args, "rows")? {
            layout.rows = Some(rows);
        }
        if let Some(columns) = parse_number(args, "columns")? {
            layout.columns = Some(columns);
        }
        if let Some(interleave) = args.get_one::<String>("interleave") {
            layout.interleave = match interleave.to_lowercase().as_str() {
                "pixel" | "bip" => LayoutInterleave::Pixel,
                "band" | "bsq" => LayoutInterleave::Band,
                other => {
                    return Err(NitfError::InvalidArgument(format!("Unknown interleave: {}", other)))
                }
            };
        }
        if args.get_flag("swap") {
            layout.swap_bytes = true;
        }

        layout.validate()?;
        Ok(layout)
    }
}

impl Command for BandCommand {
    fn execute(&self) -> NitfResult<()> {
        info!("Extracting band {} of {} into {}", self.band, self.input_file, self.output_file);
        let nitf = NitfIo::new().with_progress(self.show_progress);

        match self.png {
            Some((width, height)) => {
                let mut pixels = Vec::new();
                nitf.extract_band(&self.input_file, &self.layout, self.band, &mut pixels)?;
                save_grayscale(&self.output_file, width, height, pixels)?;
            }
            None => {
                let mut out = create_output(&self.output_file)?;
                let written = nitf.extract_band(&self.input_file, &self.layout, self.band, &mut out)?;
                info!("Wrote {} bytes to {}", written, self.output_file);
            }
        }
        Ok(())
    }
}
