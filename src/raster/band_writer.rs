//! Band copy pipeline
//!
//! Pulls bytes from a set of band sources one chunk at a time and writes
//! them out either band-sequential or re-interleaved by pixel.

use std::io::Write;

use log::{debug, info};

use crate::band::BandSource;
use crate::nitf::constants::copy::DEFAULT_CHUNK_SIZE;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::utils::progress::ProgressTracker;

/// Output sample organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interleave {
    /// Each band written whole, one after another
    Band,
    /// Samples of all bands alternate pixel by pixel
    Pixel { bytes_per_pixel: usize },
}

/// Writes band sources to an output stream
#[derive(Debug, Clone)]
pub struct BandWriter {
    interleave: Interleave,
    chunk_size: usize,
    show_progress: bool,
}

impl BandWriter {
    pub fn new(interleave: Interleave) -> Self {
        BandWriter {
            interleave,
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: false,
        }
    }

    /// Bytes requested from each source per read
    ///
    /// Direct block sources need this to equal the block size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Show a progress bar while writing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Drain every source into `out`, returning the number of bytes written
    pub fn write<S: BandSource, W: Write>(&self, sources: &mut [S], out: &mut W) -> NitfResult<u64> {
        if sources.is_empty() {
            return Err(NitfError::InvalidArgument("no band sources to write".to_string()));
        }
        let total: u64 = sources.iter().map(|s| s.size()).sum();
        info!("Writing {} band(s), {} bytes, {:?}", sources.len(), total, self.interleave);

        let progress = if self.show_progress {
            Some(ProgressTracker::new(total, "Copying bands"))
        } else {
            None
        };

        let written = match self.interleave {
            Interleave::Band => self.write_sequential(sources, out, progress.as_ref())?,
            Interleave::Pixel { bytes_per_pixel } => {
                self.write_interleaved(sources, out, bytes_per_pixel.max(1), progress.as_ref())?
            }
        };
        out.flush()?;

        if let Some(progress) = progress {
            progress.finish();
        }
        Ok(written)
    }

    fn write_sequential<S: BandSource, W: Write>(
        &self,
        sources: &mut [S],
        out: &mut W,
        progress: Option<&ProgressTracker>,
    ) -> NitfResult<u64> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut written = 0u64;

        for (band, source) in sources.iter_mut().enumerate() {
            let mut remaining = source.size();
            debug!("Band {}: {} bytes", band, remaining);
            while remaining > 0 {
                let count = (self.chunk_size as u64).min(remaining) as usize;
                source.read(&mut buf[..count])?;
                out.write_all(&buf[..count])?;
                remaining -= count as u64;
                written += count as u64;
                if let Some(progress) = progress {
                    progress.increment(count as u64);
                }
            }
        }
        Ok(written)
    }

    fn write_interleaved<S: BandSource, W: Write>(
        &self,
        sources: &mut [S],
        out: &mut W,
        bytes_per_pixel: usize,
        progress: Option<&ProgressTracker>,
    ) -> NitfResult<u64> {
        let band_size = sources[0].size();
        if sources.iter().any(|s| s.size() != band_size) {
            return Err(NitfError::InvalidArgument(
                "pixel interleaving needs bands of equal size".to_string(),
            ));
        }
        if band_size % bytes_per_pixel as u64 != 0 {
            return Err(NitfError::InvalidArgument(format!(
                "band size {} is not a whole number of {}-byte pixels",
                band_size, bytes_per_pixel
            )));
        }

        let chunk = (self.chunk_size / bytes_per_pixel).max(1) * bytes_per_pixel;
        let mut band_bufs = vec![vec![0u8; chunk]; sources.len()];
        let mut interleaved = vec![0u8; chunk * sources.len()];
        let mut remaining = band_size;
        let mut written = 0u64;

        while remaining > 0 {
            let count = (chunk as u64).min(remaining) as usize;
            for (source, buf) in sources.iter_mut().zip(band_bufs.iter_mut()) {
                source.read(&mut buf[..count])?;
            }

            let pixels = count / bytes_per_pixel;
            let mut pos = 0;
            for pixel in 0..pixels {
                let from = pixel * bytes_per_pixel;
                for buf in &band_bufs {
                    interleaved[pos..pos + bytes_per_pixel].copy_from_slice(&buf[from..from + bytes_per_pixel]);
                    pos += bytes_per_pixel;
                }
            }

            out.write_all(&interleaved[..pos])?;
            remaining -= count as u64;
            written += pos as u64;
            if let Some(progress) = progress {
                progress.increment(pos as u64);
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::{MemorySource, RowSource};
    use crate::nitf::ErrorKind;

    #[test]
    fn test_sequential_bands() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5, 6];
        let mut sources = vec![
            MemorySource::new(&a, 0, 1, 0).unwrap(),
            MemorySource::new(&b, 0, 1, 0).unwrap(),
        ];
        let mut out = Vec::new();
        let written = BandWriter::new(Interleave::Band)
            .with_chunk_size(2)
            .write(&mut sources, &mut out)
            .unwrap();
        assert_eq!(written, 6);
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_split_and_reinterleave_round_trip() {
        // Three bands, two bytes per sample, interleaved by pixel
        let bip: Vec<u8> = (0u8..24).collect();
        let mut sources: Vec<Box<dyn BandSource + '_>> = Vec::new();
        for band in 0..3u64 {
            sources.push(Box::new(MemorySource::new(&bip, band * 2, 2, 2).unwrap()));
        }
        let mut out = Vec::new();
        BandWriter::new(Interleave::Pixel { bytes_per_pixel: 2 })
            .with_chunk_size(3)
            .write(&mut sources, &mut out)
            .unwrap();
        assert_eq!(out, bip);
    }

    #[test]
    fn test_mixed_sources() {
        let data = [9u8, 9];
        let rows = |_band: u32, row: &mut [u8]| -> NitfResult<()> {
            row.fill(1);
            Ok(())
        };
        let mut sources: Vec<Box<dyn BandSource + '_>> = Vec::new();
        sources.push(Box::new(MemorySource::new(&data, 0, 1, 0).unwrap()));
        sources.push(Box::new(RowSource::new(rows, 1, 1, 2).unwrap()));
        let mut out = Vec::new();
        BandWriter::new(Interleave::Pixel { bytes_per_pixel: 1 })
            .write(&mut sources, &mut out)
            .unwrap();
        assert_eq!(out, vec![9, 1, 9, 1]);
    }

    #[test]
    fn test_unequal_bands_rejected() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5];
        let mut sources = vec![
            MemorySource::new(&a, 0, 1, 0).unwrap(),
            MemorySource::new(&b, 0, 1, 0).unwrap(),
        ];
        let err = BandWriter::new(Interleave::Pixel { bytes_per_pixel: 1 })
            .write(&mut sources, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_no_sources_rejected() {
        let mut sources: Vec<MemorySource> = Vec::new();
        let err = BandWriter::new(Interleave::Band).write(&mut sources, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
