//! Raw image layout configuration
//!
//! Describes how bands are laid out in a raw pixel file. Layouts come from
//! a TOML file with a `[layout]` table, CLI flags, or both:
//!
//! ```toml
//! [layout]
//! bands = 3
//! bytes_per_pixel = 2
//! start = 512
//! rows = 100
//! columns = 200
//! interleave = "pixel"   # or "band"
//! byte_order = "swap"    # or "native"
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::nitf::errors::{NitfError, NitfResult};

/// How the bands of the raw file are organized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutInterleave {
    /// Band-interleaved-by-pixel
    Pixel,
    /// Band-sequential
    Band,
}

/// Layout of a raw multi-band pixel file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub bands: u32,
    pub bytes_per_pixel: usize,
    /// File offset of the first pixel
    pub start: u64,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub interleave: LayoutInterleave,
    /// Reverse the byte order of each sample while copying
    pub swap_bytes: bool,
}

/// Where one band lives inside the raw file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPlacement {
    pub start: u64,
    pub bytes_per_pixel: usize,
    pub pixel_skip: usize,
    /// Exact band size, when the layout pins it
    pub size: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            bands: 1,
            bytes_per_pixel: 1,
            start: 0,
            rows: None,
            columns: None,
            interleave: LayoutInterleave::Pixel,
            swap_bytes: false,
        }
    }
}

impl LayoutConfig {
    /// Load a layout from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> NitfResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        debug!("Loaded layout file {}", path.as_ref().display());
        Self::from_str(&content)
    }

    /// Parse a layout from TOML text; missing keys keep their defaults
    pub fn from_str(content: &str) -> NitfResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| NitfError::InvalidArgument(format!("Failed to parse layout TOML: {}", e)))?;

        let mut config = LayoutConfig::default();
        let table = match toml_value.get("layout").and_then(|v| v.as_table()) {
            Some(table) => table,
            None => return Ok(config),
        };

        if let Some(bands) = Self::get_uint(table, "bands")? {
            config.bands = bands as u32;
        }
        if let Some(bpp) = Self::get_uint(table, "bytes_per_pixel")? {
            config.bytes_per_pixel = bpp as usize;
        }
        if let Some(start) = Self::get_uint(table, "start")? {
            config.start = start;
        }
        config.rows = Self::get_uint(table, "rows")?.map(|v| v as u32);
        config.columns = Self::get_uint(table, "columns")?.map(|v| v as u32);

        if let Some(interleave) = table.get("interleave").and_then(|v| v.as_str()) {
            config.interleave = match interleave.to_lowercase().as_str() {
                "pixel" | "bip" => LayoutInterleave::Pixel,
                "band" | "bsq" => LayoutInterleave::Band,
                other => {
                    return Err(NitfError::InvalidArgument(format!("unknown interleave '{}'", other)))
                }
            };
        }
        if let Some(order) = table.get("byte_order").and_then(|v| v.as_str()) {
            config.swap_bytes = match order.to_lowercase().as_str() {
                "native" => false,
                "swap" => true,
                other => {
                    return Err(NitfError::InvalidArgument(format!("unknown byte order '{}'", other)))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a non-negative integer key
    fn get_uint(table: &toml::value::Table, key: &str) -> NitfResult<Option<u64>> {
        match table.get(key) {
            None => Ok(None),
            Some(value) => match value.as_integer() {
                Some(v) if v >= 0 => Ok(Some(v as u64)),
                _ => Err(NitfError::InvalidArgument(format!(
                    "layout key '{}' must be a non-negative integer",
                    key
                ))),
            },
        }
    }

    /// Checks the layout is usable
    pub fn validate(&self) -> NitfResult<()> {
        if self.bands == 0 || self.bytes_per_pixel == 0 {
            return Err(NitfError::InvalidArgument(
                "layout needs at least one band of at least one byte per pixel".to_string(),
            ));
        }
        if self.interleave == LayoutInterleave::Band && self.pixels_per_band().is_none() {
            return Err(NitfError::InvalidArgument(
                "band-sequential layouts need rows and columns".to_string(),
            ));
        }
        Ok(())
    }

    /// Pixels in one band, when rows and columns are known
    pub fn pixels_per_band(&self) -> Option<u64> {
        match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => Some(rows as u64 * columns as u64),
            _ => None,
        }
    }

    /// Locate `band` inside the raw file
    pub fn placement(&self, band: u32) -> NitfResult<BandPlacement> {
        self.validate()?;
        if band >= self.bands {
            return Err(NitfError::InvalidArgument(format!(
                "band {} requested from a {}-band layout",
                band, self.bands
            )));
        }

        let band_bytes = self.pixels_per_band().map(|p| p * self.bytes_per_pixel as u64);
        let placement = match self.interleave {
            LayoutInterleave::Pixel => BandPlacement {
                start: self.start + band as u64 * self.bytes_per_pixel as u64,
                bytes_per_pixel: self.bytes_per_pixel,
                pixel_skip: (self.bands - 1) as usize,
                size: band_bytes,
            },
            LayoutInterleave::Band => {
                let band_bytes = band_bytes.unwrap_or(0);
                BandPlacement {
                    start: self.start + band as u64 * band_bytes,
                    bytes_per_pixel: self.bytes_per_pixel,
                    pixel_skip: 0,
                    size: Some(band_bytes),
                }
            }
        };
        Ok(placement)
    }
}
