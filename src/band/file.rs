//! File-backed band source
//!
//! Reads a band straight from a physical file. Interleaved bands are read in
//! one span per call and the live pixels picked out in memory, which is much
//! cheaper than seeking once per pixel.

use std::path::Path;

use log::{debug, info};

use crate::io::physical::{PhysicalFile, Whence};
use crate::nitf::errors::{NitfError, NitfResult};
use super::source::BandSource;
use super::stride::PixelStride;

/// A file handle that is either owned by the source or lent to it
#[derive(Debug)]
enum FileHandle<'a> {
    /// Opened by the source; closed when the source is dropped
    Owned(PhysicalFile),
    /// Opened by the caller; never closed by the source
    Borrowed(&'a mut PhysicalFile),
}

impl FileHandle<'_> {
    fn get(&mut self) -> &mut PhysicalFile {
        match self {
            FileHandle::Owned(file) => file,
            FileHandle::Borrowed(file) => file,
        }
    }
}

/// Band source reading from a file handle with a pixel stride
#[derive(Debug)]
pub struct FileSource<'a> {
    handle: FileHandle<'a>,
    /// Offset of the first live byte
    start: u64,
    /// Backing cursor, as an absolute file offset
    mark: u64,
    /// File size queried at construction
    file_size: u64,
    stride: PixelStride,
    size_override: Option<u64>,
}

impl<'a> FileSource<'a> {
    /// Create a source over a caller-opened file
    ///
    /// The handle is borrowed and stays open after the source is dropped.
    pub fn new(
        handle: &'a mut PhysicalFile,
        start: u64,
        bytes_per_pixel: usize,
        pixel_skip: usize,
    ) -> NitfResult<Self> {
        Self::build(FileHandle::Borrowed(handle), start, PixelStride::new(bytes_per_pixel, pixel_skip))
    }

    /// Create a single-byte source over a caller-opened file with a byte skip
    pub fn with_byte_skip(handle: &'a mut PhysicalFile, start: u64, byte_skip: usize) -> NitfResult<Self> {
        Self::build(FileHandle::Borrowed(handle), start, PixelStride::new(1, byte_skip))
    }

    fn build(mut handle: FileHandle<'a>, start: u64, stride: PixelStride) -> NitfResult<Self> {
        let file_size = handle.get().size()?;
        if start > file_size {
            return Err(NitfError::out_of_bounds(start, 0, file_size));
        }
        debug!(
            "File source over {} bytes from {} ({} bytes/pixel, skip {})",
            file_size, start, stride.bytes_per_pixel, stride.pixel_skip
        );
        Ok(FileSource {
            handle,
            start,
            mark: start,
            file_size,
            stride,
            size_override: None,
        })
    }

    /// Whether the source opened, and will close, its own handle
    pub fn is_owned(&self) -> bool {
        matches!(self.handle, FileHandle::Owned(_))
    }

    /// Current backing cursor, as an absolute file offset
    pub fn position(&self) -> u64 {
        self.mark
    }
}

impl FileSource<'_> {
    /// Live bytes between `start` and the end of the file
    fn live_extent(&self) -> u64 {
        self.stride.live_bytes(self.file_size - self.start)
    }
}

impl FileSource<'static> {
    /// Open `path` and create a source that owns the handle
    pub fn open<P: AsRef<Path>>(
        path: P,
        start: u64,
        bytes_per_pixel: usize,
        pixel_skip: usize,
    ) -> NitfResult<Self> {
        let file = PhysicalFile::open(path)?;
        Self::build(FileHandle::Owned(file), start, PixelStride::new(bytes_per_pixel, pixel_skip))
    }
}

impl BandSource for FileSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        if buf.is_empty() {
            return Ok(());
        }

        let required = self.stride.required(buf.len())? as u64;
        if self.mark > self.file_size || required > self.file_size - self.mark {
            return Err(NitfError::out_of_bounds(self.mark, buf.len() as i64, self.file_size));
        }

        if self.mark == self.start {
            info!("First read of file source at offset {}", self.start);
        }
        // Handle may be shared; always reposition
        let file = self.handle.get();
        file.seek(self.mark as i64, Whence::Set)?;

        if self.stride.is_contiguous() {
            file.read(buf)?;
        } else {
            let span = self.stride.span(buf.len())? as u64;
            let fetch = span.min(self.file_size - self.mark) as usize;
            let mut scratch = vec![0u8; fetch];
            file.read(&mut scratch)?;
            self.stride.gather(&scratch, buf);
        }

        self.mark += self.stride.span(buf.len())? as u64;
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use crate::nitf::ErrorKind;

    fn cursor_file(len: u8) -> PhysicalFile {
        PhysicalFile::from_reader(Cursor::new((0..len).collect::<Vec<u8>>()))
    }

    #[test]
    fn test_contiguous_read_from_start() {
        let mut file = cursor_file(20);
        let mut source = FileSource::new(&mut file, 4, 1, 0).unwrap();
        assert!(!source.is_owned());
        assert_eq!(source.size(), 16);

        let mut out = vec![0u8; 16];
        let (a, b) = out.split_at_mut(10);
        source.read(a).unwrap();
        source.read(b).unwrap();
        assert_eq!(out, (4u8..20).collect::<Vec<u8>>());
    }

    #[test]
    fn test_pixel_skip() {
        let mut file = cursor_file(12);
        let mut source = FileSource::new(&mut file, 0, 1, 2).unwrap();
        let mut out = [0u8; 4];
        for byte in out.iter_mut() {
            let mut one = [0u8; 1];
            source.read(&mut one).unwrap();
            *byte = one[0];
        }
        assert_eq!(out, [0, 3, 6, 9]);
        assert_eq!(source.position(), 12);
    }

    #[test]
    fn test_trailing_skip_clipped_at_end_of_file() {
        let mut file = cursor_file(10);
        let mut source = FileSource::new(&mut file, 0, 2, 1).unwrap();
        assert_eq!(source.size(), 6);
        let mut buf = [0u8; 6];
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [0, 1, 4, 5, 8, 9]);
    }

    #[test]
    fn test_reads_survive_foreign_seeks() {
        let mut file = cursor_file(8);
        let mut source = FileSource::new(&mut file, 2, 1, 0).unwrap();
        let mut buf = [0u8; 2];
        source.read(&mut buf).unwrap();
        source.handle.get().seek(0, Whence::Set).unwrap();
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [4, 5]);
    }

    #[test]
    fn test_read_past_end() {
        let mut file = cursor_file(6);
        let mut source = FileSource::new(&mut file, 2, 1, 0).unwrap();
        let mut buf = [0u8; 5];
        assert_eq!(source.read(&mut buf).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_set_size_bounded_by_file() {
        let mut file = cursor_file(6);
        let mut source = FileSource::new(&mut file, 0, 1, 0).unwrap();
        assert!(source.set_size(7).is_err());
        source.set_size(3).unwrap();
        assert_eq!(source.size(), 3);
    }

    #[test]
    fn test_set_size_bounded_by_live_bytes() {
        let mut file = cursor_file(10);
        let mut source = FileSource::new(&mut file, 8, 1, 0).unwrap();
        assert_eq!(source.set_size(5).unwrap_err().kind(), ErrorKind::OutOfBounds);
        source.set_size(2).unwrap();
        let mut buf = [0u8; 2];
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [8, 9]);

        let mut file = cursor_file(10);
        let mut source = FileSource::new(&mut file, 1, 1, 2).unwrap();
        assert_eq!(source.size(), 3);
        assert!(source.set_size(4).is_err());
        source.set_size(3).unwrap();
        let mut buf = [0u8; 3];
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [1, 4, 7]);
    }

    #[test]
    fn test_borrowed_handle_outlives_source() {
        let mut file = cursor_file(4);
        {
            let mut source = FileSource::with_byte_skip(&mut file, 0, 1).unwrap();
            let mut buf = [0u8; 2];
            source.read(&mut buf).unwrap();
            assert_eq!(buf, [0, 2]);
        }
        assert_eq!(file.size().unwrap(), 4);
    }

    #[test]
    fn test_open_owns_handle() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[7, 8, 9]).unwrap();
        tmp.flush().unwrap();

        let mut source = FileSource::open(tmp.path(), 1, 1, 0).unwrap();
        assert!(source.is_owned());
        let mut buf = [0u8; 2];
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [8, 9]);
    }
}
