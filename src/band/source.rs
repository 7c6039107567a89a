//! Band source trait definition
//!
//! A band source produces the byte stream of one band, start to end,
//! exactly once. The copy pipeline pulls from it once per output chunk and
//! never seeks; releasing a source is dropping it.

use crate::nitf::errors::NitfResult;

/// Strategy trait for the physical origin of a band's bytes
pub trait BandSource {
    /// Fill `buf` completely with the next `buf.len()` bytes of the band
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()>;

    /// Total number of bytes this source can deliver
    fn size(&self) -> u64;

    /// Record the total size for sources that learn it only after setup
    fn set_size(&mut self, size: u64) -> NitfResult<()>;
}

impl<S: BandSource + ?Sized> BandSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        (**self).read(buf)
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn set_size(&mut self, size: u64) -> NitfResult<()> {
        (**self).set_size(size)
    }
}
