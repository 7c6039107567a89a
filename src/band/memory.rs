//! Memory-backed band source
//!
//! Serves a band out of a buffer that is already resident, applying the
//! pixel stride so one band can be picked out of pixel-interleaved data.

use std::borrow::Cow;

use log::debug;

use crate::nitf::errors::{NitfError, NitfResult};
use super::source::BandSource;
use super::stride::PixelStride;

/// Band source over a borrowed (or, for segment data, copied) buffer
#[derive(Debug)]
pub struct MemorySource<'a> {
    /// Backing buffer
    data: Cow<'a, [u8]>,
    /// Offset of the first live byte
    start: u64,
    /// Backing cursor
    mark: usize,
    stride: PixelStride,
    /// Size recorded through `set_size`
    size_override: Option<u64>,
}

impl<'a> MemorySource<'a> {
    /// Create a source over `data`, starting at `start`
    ///
    /// # Arguments
    /// * `data` - Backing buffer; it is borrowed, never freed
    /// * `start` - Offset of the band's first byte in `data`
    /// * `bytes_per_pixel` - Live bytes per pixel (0 is treated as 1)
    /// * `pixel_skip` - Pixels of other bands following each live pixel
    pub fn new(
        data: &'a [u8],
        start: u64,
        bytes_per_pixel: usize,
        pixel_skip: usize,
    ) -> NitfResult<Self> {
        Self::build(Cow::Borrowed(data), start, PixelStride::new(bytes_per_pixel, pixel_skip))
    }

    /// Create a single-byte source for segment data with a byte skip
    ///
    /// Passing a `Vec<u8>` gives the source its own copy, so the caller's
    /// buffer may be released before the source is drained; passing a slice
    /// borrows it.
    pub fn with_byte_skip<D: Into<Cow<'a, [u8]>>>(
        data: D,
        start: u64,
        byte_skip: usize,
    ) -> NitfResult<Self> {
        Self::build(data.into(), start, PixelStride::new(1, byte_skip))
    }

    fn build(data: Cow<'a, [u8]>, start: u64, stride: PixelStride) -> NitfResult<Self> {
        if start > data.len() as u64 {
            return Err(NitfError::out_of_bounds(start, 0, data.len() as u64));
        }
        debug!(
            "Memory source over {} bytes from {} ({} bytes/pixel, skip {})",
            data.len(),
            start,
            stride.bytes_per_pixel,
            stride.pixel_skip
        );
        Ok(MemorySource {
            data,
            start,
            mark: start as usize,
            stride,
            size_override: None,
        })
    }

    /// Whether the source holds its own copy of the data
    pub fn owns_data(&self) -> bool {
        matches!(self.data, Cow::Owned(_))
    }

    /// Current backing cursor, in bytes from the start of the buffer
    pub fn position(&self) -> u64 {
        self.mark as u64
    }
}

impl MemorySource<'_> {
    /// Live bytes between `start` and the end of the data
    fn live_extent(&self) -> u64 {
        self.stride.live_bytes(self.data.len() as u64 - self.start)
    }
}

impl BandSource for MemorySource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        if buf.is_empty() {
            return Ok(());
        }

        let required = self.stride.required(buf.len())?;
        let extent = self.data.len();
        if self.mark > extent || required > extent - self.mark {
            return Err(NitfError::out_of_bounds(
                self.mark as u64,
                buf.len() as i64,
                extent as u64,
            ));
        }

        let src = &self.data[self.mark..self.mark + required];
        if self.stride.is_contiguous() {
            buf.copy_from_slice(src);
        } else {
            self.stride.gather(src, buf);
        }
        self.mark += self.stride.span(buf.len())?;
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size_override.unwrap_or_else(|| self.live_extent())
    }

    fn set_size(&mut self, size: u64) -> NitfResult<()> {
        let live = self.live_extent();
        if size > live {
            return Err(NitfError::out_of_bounds(self.start, size as i64, live));
        }
        self.size_override = Some(size);
        Ok(())
    }
}
