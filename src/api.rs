use std::io::Write;
use std::path::Path;

use log::info;

use crate::band::{copy_block, BandSource, BlockTransform, ByteSwapTransform, DirectBlockSource, FileSource, RowSource};
use crate::io::byte_order::{swap_samples, ByteOrder};
use crate::io::physical::PhysicalFile;
use crate::nitf::errors::{NitfError, NitfResult};
use crate::raster::{BandWriter, BlockingInfo, Interleave, RawBlockReader};
use crate::segment::{SegmentHandlerFactory, SegmentReader, SegmentReaderSource, UserSegment};
use crate::utils::layout_config::LayoutConfig;

/// Main interface to the nitfio library
#[derive(Debug, Clone, Default)]
pub struct NitfIo {
    show_progress: bool,
}

impl NitfIo {
    pub fn new() -> Self {
        NitfIo::default()
    }

    /// Show progress bars during copies
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn open_segment<'f>(
        file: &'f mut PhysicalFile,
        offset: u64,
        length: u64,
        handler: Option<&str>,
    ) -> NitfResult<SegmentReader<'f>> {
        let segment = match handler {
            Some(name) => UserSegment::with_handler(offset, length, SegmentHandlerFactory::create_by_name(name)?),
            None => UserSegment::new(offset, length),
        };
        SegmentReader::new(file, segment)
    }

    /// Read a whole segment payload into memory
    ///
    /// # Arguments
    /// * `path` - File holding the segment
    /// * `offset` - File offset of the segment data
    /// * `length` - Stored length of the segment data
    /// * `handler` - Optional type handler name, such as "deflate"
    pub fn read_segment<P: AsRef<Path>>(
        &self,
        path: P,
        offset: u64,
        length: u64,
        handler: Option<&str>,
    ) -> NitfResult<Vec<u8>> {
        let mut file = PhysicalFile::open(path)?;
        let mut reader = Self::open_segment(&mut file, offset, length, handler)?;
        let size = usize::try_from(reader.size()).map_err(|_| {
            NitfError::InvalidArgument(format!("segment of {} bytes is too large to buffer", reader.size()))
        })?;
        let mut data = vec![0u8; size];
        reader.read(&mut data)?;
        Ok(data)
    }

    /// Stream a segment payload to `out`, returning the bytes written
    pub fn copy_segment<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        offset: u64,
        length: u64,
        handler: Option<&str>,
        out: &mut W,
    ) -> NitfResult<u64> {
        let mut file = PhysicalFile::open(path)?;
        let mut reader = Self::open_segment(&mut file, offset, length, handler)?;
        let mut sources = [SegmentReaderSource::new(&mut reader)];
        BandWriter::new(Interleave::Band)
            .with_progress(self.show_progress)
            .write(&mut sources, out)
    }

    /// Extract one band of a raw pixel file described by `layout`
    ///
    /// When the layout asks for swapped samples, rows are pulled from the
    /// file one at a time and swapped before they are written.
    pub fn extract_band<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        layout: &LayoutConfig,
        band: u32,
        out: &mut W,
    ) -> NitfResult<u64> {
        let placement = layout.placement(band)?;
        info!("Extracting band {} starting at offset {}", band, placement.start);

        let mut source = FileSource::open(path, placement.start, placement.bytes_per_pixel, placement.pixel_skip)?;
        if let Some(size) = placement.size {
            source.set_size(size)?;
        }

        let bpp = placement.bytes_per_pixel;
        let chunk = (crate::nitf::constants::copy::DEFAULT_CHUNK_SIZE / bpp).max(1) * bpp;
        let writer = BandWriter::new(Interleave::Band)
            .with_chunk_size(chunk)
            .with_progress(self.show_progress);

        if !layout.swap_bytes || bpp == 1 {
            return writer.write(&mut [source], out);
        }

        let (rows, columns) = match (layout.rows, layout.columns) {
            (Some(rows), Some(columns)) => (rows, columns),
            _ => {
                return Err(NitfError::InvalidArgument(
                    "byte swapping needs rows and columns in the layout".to_string(),
                ))
            }
        };
        info!("Swapping {}-byte samples on a {} host", bpp, ByteOrder::native().name());
        let swapping_rows = move |_band: u32, row: &mut [u8]| -> NitfResult<()> {
            source.read(row)?;
            swap_samples(row, bpp)
        };
        let rows_source = RowSource::new(swapping_rows, band, rows, columns as usize * bpp)?;
        writer.write(&mut [rows_source], out)
    }

    /// Copy the uncompressed blocks of an image verbatim (or byte-swapped)
    ///
    /// # Arguments
    /// * `path` - File holding the blocks
    /// * `data_offset` - File offset of the first block
    /// * `info` - Block geometry
    /// * `swap_sample_size` - Sample size to byte-swap, if any
    /// * `out` - Destination stream
    pub fn copy_blocks<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        data_offset: u64,
        info: BlockingInfo,
        swap_sample_size: Option<usize>,
        out: &mut W,
    ) -> NitfResult<u64> {
        let mut file = PhysicalFile::open(path)?;
        let mut deblocker = RawBlockReader::new(&mut file, data_offset, info)?;
        match swap_sample_size {
            Some(sample_size) => {
                let transform = ByteSwapTransform::new(sample_size)?;
                self.drain_blocks(transform, &mut deblocker, info, out)
            }
            None => self.drain_blocks(copy_block, &mut deblocker, info, out),
        }
    }

    fn drain_blocks<T: BlockTransform, W: Write>(
        &self,
        transform: T,
        deblocker: &mut RawBlockReader<'_>,
        info: BlockingInfo,
        out: &mut W,
    ) -> NitfResult<u64> {
        let mut source = DirectBlockSource::new(transform, deblocker, 1)?;
        source.set_size(source.num_blocks() * info.block_size as u64)?;
        info!("Copying {} blocks of {} bytes", source.num_blocks(), info.block_size);
        BandWriter::new(Interleave::Band)
            .with_chunk_size(info.block_size)
            .with_progress(self.show_progress)
            .write(&mut [source], out)
    }
}
