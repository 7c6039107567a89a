//! Pixel stride arithmetic for band-interleaved-by-pixel layouts
//!
//! With `bytes_per_pixel` B and `pixel_skip` P, each live pixel is B bytes
//! followed by P*B bytes belonging to other bands.

use crate::nitf::errors::{NitfError, NitfResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelStride {
    pub bytes_per_pixel: usize,
    pub pixel_skip: usize,
}

impl PixelStride {
    /// Zero bytes per pixel is treated as one
    pub fn new(bytes_per_pixel: usize, pixel_skip: usize) -> Self {
        PixelStride {
            bytes_per_pixel: bytes_per_pixel.max(1),
            pixel_skip,
        }
    }

    pub fn is_contiguous(&self) -> bool {
        self.pixel_skip == 0
    }

    /// Distance in backing bytes from one live pixel to the next
    pub fn pitch(&self) -> usize {
        self.bytes_per_pixel * (1 + self.pixel_skip)
    }

    /// Live bytes obtainable from `extent` backing bytes
    pub fn live_bytes(&self, extent: u64) -> u64 {
        if self.is_contiguous() {
            return extent;
        }
        let bpp = self.bytes_per_pixel as u64;
        if extent < bpp {
            return 0;
        }
        ((extent - bpp) / self.pitch() as u64 + 1) * bpp
    }

    fn check_whole_pixels(&self, live: usize) -> NitfResult<()> {
        if !self.is_contiguous() && live % self.bytes_per_pixel != 0 {
            return Err(NitfError::InvalidArgument(format!(
                "read of {} bytes is not a whole number of {}-byte pixels",
                live, self.bytes_per_pixel
            )));
        }
        Ok(())
    }

    /// Backing bytes that must exist to deliver `live` bytes
    pub fn required(&self, live: usize) -> NitfResult<usize> {
        self.check_whole_pixels(live)?;
        if self.is_contiguous() || live == 0 {
            return Ok(live);
        }
        let pixels = live / self.bytes_per_pixel;
        Ok((pixels - 1) * self.pitch() + self.bytes_per_pixel)
    }

    /// How far the backing cursor advances after delivering `live` bytes
    pub fn span(&self, live: usize) -> NitfResult<usize> {
        self.check_whole_pixels(live)?;
        if self.is_contiguous() {
            return Ok(live);
        }
        Ok(live / self.bytes_per_pixel * self.pitch())
    }

    /// Copy the live pixels of `src` into `dst`; `src` must hold `required(dst.len())` bytes
    pub fn gather(&self, src: &[u8], dst: &mut [u8]) {
        let bpp = self.bytes_per_pixel;
        let pitch = self.pitch();
        for (i, pixel) in dst.chunks_exact_mut(bpp).enumerate() {
            let offset = i * pitch;
            pixel.copy_from_slice(&src[offset..offset + bpp]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_stride() {
        let stride = PixelStride::new(2, 0);
        assert!(stride.is_contiguous());
        assert_eq!(stride.live_bytes(11), 11);
        assert_eq!(stride.required(5).unwrap(), 5);
        assert_eq!(stride.span(5).unwrap(), 5);
    }

    #[test]
    fn test_interleaved_stride() {
        let stride = PixelStride::new(2, 1);
        assert_eq!(stride.pitch(), 4);
        assert_eq!(stride.live_bytes(12), 6);
        assert_eq!(stride.live_bytes(10), 6);
        assert_eq!(stride.live_bytes(9), 4);
        assert_eq!(stride.live_bytes(1), 0);
        assert_eq!(stride.required(4).unwrap(), 6);
        assert_eq!(stride.span(4).unwrap(), 8);
        assert!(stride.required(3).is_err());
    }

    #[test]
    fn test_gather() {
        let stride = PixelStride::new(2, 1);
        let src = [1, 2, 0, 0, 3, 4];
        let mut dst = [0u8; 4];
        stride.gather(&src, &mut dst);
        assert_eq!(dst, [1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_bytes_per_pixel_is_one() {
        assert_eq!(PixelStride::new(0, 2).bytes_per_pixel, 1);
    }
}
