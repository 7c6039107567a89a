//! Bounded virtual-file reader over a segment
//!
//! Exposes a segment as a POSIX-like file of `virtual_length` bytes: reads
//! and seeks are bounds checked against the segment and translated onto the
//! physical file, or handed entirely to the segment's type handler.

use std::io;

use log::{debug, warn};

use crate::io::physical::{PhysicalFile, Whence};
use crate::nitf::errors::{NitfError, NitfResult};
use super::user_segment::UserSegment;

/// Reader for one segment of a file
///
/// The physical file is borrowed: dropping the reader releases only the
/// segment state and never closes the file.
pub struct SegmentReader<'a> {
    file: &'a mut PhysicalFile,
    segment: UserSegment,
}

impl<'a> SegmentReader<'a> {
    /// Attach `segment` to `file`, running the handler's setup if present
    pub fn new(file: &'a mut PhysicalFile, mut segment: UserSegment) -> NitfResult<Self> {
        if let Some(handler) = segment.handler.as_mut() {
            debug!(
                "Setting up segment handler '{}' at offset {}",
                handler.name(),
                segment.cursor.base_offset()
            );
            handler.setup(&mut segment.cursor, file)?;
        }
        debug!(
            "Segment reader at base offset {}, {} virtual bytes",
            segment.cursor.base_offset(),
            segment.cursor.virtual_length()
        );
        Ok(SegmentReader { file, segment })
    }

    /// Fill `buf` with the next `buf.len()` bytes of the segment
    ///
    /// On the direct path the position advances by `buf.len()` even if the
    /// physical read fails. Only a bounds failure leaves it untouched.
    pub fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        let UserSegment { cursor, handler } = &mut self.segment;
        if let Some(handler) = handler.as_mut() {
            if let Some(result) = handler.read(cursor, self.file, buf) {
                return result;
            }
        }

        let count = buf.len() as u64;
        let offset = cursor.virtual_offset();
        if offset + count > cursor.virtual_length() {
            return Err(NitfError::out_of_bounds(offset, buf.len() as i64, cursor.virtual_length()));
        }

        let seeked = if offset == 0 {
            cursor
                .real_offset(0)
                .and_then(|real| self.file.seek(real, Whence::Set))
                .map(|_| ())
        } else {
            Ok(())
        };
        let result = seeked.and_then(|_| self.file.read(buf));
        cursor.advance(count);

        if let Err(e) = &result {
            warn!(
                "Segment read of {} bytes at virtual offset {} failed: {}",
                count, offset, e
            );
        }
        result
    }

    /// Move the virtual position; returns the new position
    ///
    /// The target is validated against `[0, size()]` before anything moves,
    /// so a rejected seek leaves the position unchanged.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> NitfResult<u64> {
        let UserSegment { cursor, handler } = &mut self.segment;
        let candidate = cursor.candidate(offset, whence)?;

        if let Some(handler) = handler.as_mut() {
            if let Some(result) = handler.seek(cursor, self.file, offset, whence) {
                return result;
            }
        }

        let real = cursor.real_offset(candidate)?;
        let position = self.file.seek(real, Whence::Set)?;
        cursor.set_offset(position - cursor.base_offset())?;
        Ok(cursor.virtual_offset())
    }

    /// Current virtual position
    pub fn tell(&self) -> u64 {
        self.segment.cursor.virtual_offset()
    }

    /// Length of the virtual file
    pub fn size(&self) -> u64 {
        self.segment.cursor.virtual_length()
    }

    /// The segment being read
    pub fn segment(&self) -> &UserSegment {
        &self.segment
    }

    /// Detach from the file, returning the segment state
    pub fn into_segment(self) -> UserSegment {
        self.segment
    }
}

impl io::Read for SegmentReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.size() - self.tell();
        let count = (buf.len() as u64).min(remaining) as usize;
        if count == 0 {
            return Ok(0);
        }
        SegmentReader::read(self, &mut buf[..count]).map_err(into_io_error)?;
        Ok(count)
    }
}

impl io::Seek for SegmentReader<'_> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            io::SeekFrom::Start(offset) => {
                let offset = i64::try_from(offset).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset too large")
                })?;
                (offset, Whence::Set)
            }
            io::SeekFrom::Current(offset) => (offset, Whence::Cur),
            io::SeekFrom::End(offset) => (offset, Whence::End),
        };
        SegmentReader::seek(self, offset, whence).map_err(into_io_error)
    }
}

fn into_io_error(error: NitfError) -> io::Error {
    match error {
        NitfError::IoError(e) => e,
        NitfError::OutOfBounds { .. } | NitfError::InvalidArgument(_) => {
            io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
        }
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Seek, SeekFrom};
    use crate::nitf::ErrorKind;

    /// 200-byte file whose byte at offset i is i
    fn numbered_file() -> PhysicalFile {
        PhysicalFile::from_reader(Cursor::new((0..200).map(|i| i as u8).collect::<Vec<u8>>()))
    }

    #[test]
    fn test_seek_bounds_example() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(100, 50)).unwrap();

        let err = reader.seek(60, Whence::Set).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(reader.tell(), 0);

        assert_eq!(reader.seek(50, Whence::Set).unwrap(), 50);
        assert_eq!(reader.tell(), 50);
        assert_eq!(reader.seek(-10, Whence::Cur).unwrap(), 40);
        assert_eq!(reader.tell(), 40);
    }

    #[test]
    fn test_seek_past_addressable_offsets_fails() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(u64::MAX - 5, 10)).unwrap();

        let err = reader.seek(8, Whence::Set).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(reader.tell(), 0);

        let err = reader.read(&mut [0u8; 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_seek_start_and_end() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(100, 50)).unwrap();
        reader.seek(0, Whence::Set).unwrap();
        assert_eq!(reader.tell(), 0);
        reader.seek(0, Whence::End).unwrap();
        assert_eq!(reader.tell(), 50);
        assert_eq!(reader.size(), 50);
    }

    #[test]
    fn test_seek_succeeds_exactly_within_bounds() {
        let mut file = numbered_file();
        let length = 7i64;
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(10, length as u64)).unwrap();
        for start in 0..=length {
            for offset in -10..=10i64 {
                for whence in [Whence::Set, Whence::Cur, Whence::End] {
                    reader.seek(start, Whence::Set).unwrap();
                    let origin = match whence {
                        Whence::Set => 0,
                        Whence::Cur => start,
                        Whence::End => length,
                    };
                    let expected = origin + offset;
                    let result = reader.seek(offset, whence);
                    if (0..=length).contains(&expected) {
                        assert_eq!(result.unwrap(), expected as u64);
                        assert_eq!(reader.tell(), expected as u64);
                    } else {
                        assert!(result.is_err());
                        assert_eq!(reader.tell(), start as u64);
                    }
                }
            }
        }
    }

    #[test]
    fn test_read_translates_to_base_offset() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(100, 50)).unwrap();
        let mut buf = [0u8; 4];
        reader.read(&mut buf).unwrap();
        assert_eq!(buf, [100, 101, 102, 103]);
        reader.read(&mut buf).unwrap();
        assert_eq!(buf, [104, 105, 106, 107]);
        assert_eq!(reader.tell(), 8);

        reader.seek(-2, Whence::End).unwrap();
        let mut tail = [0u8; 2];
        reader.read(&mut tail).unwrap();
        assert_eq!(tail, [148, 149]);
    }

    #[test]
    fn test_read_past_end_leaves_position() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(100, 50)).unwrap();
        reader.seek(45, Whence::Set).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(reader.read(&mut buf).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(reader.tell(), 45);
    }

    #[test]
    fn test_failed_physical_read_still_advances() {
        // Segment claims more bytes than the file holds
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(190, 30)).unwrap();
        let mut buf = [0u8; 20];
        assert_eq!(reader.read(&mut buf).unwrap_err().kind(), ErrorKind::IoError);
        assert_eq!(reader.tell(), 20);
    }

    #[test]
    fn test_dropping_reader_keeps_file_open() {
        let mut file = numbered_file();
        {
            let mut reader = SegmentReader::new(&mut file, UserSegment::new(0, 10)).unwrap();
            let mut buf = [0u8; 2];
            reader.read(&mut buf).unwrap();
        }
        assert_eq!(file.tell().unwrap(), 2);
    }

    #[test]
    fn test_std_read_and_seek() {
        let mut file = numbered_file();
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(20, 5)).unwrap();
        let mut all = Vec::new();
        reader.read_to_end(&mut all).unwrap();
        assert_eq!(all, vec![20, 21, 22, 23, 24]);

        assert_eq!(Seek::seek(&mut reader, SeekFrom::Start(1)).unwrap(), 1);
        let mut two = [0u8; 2];
        Read::read_exact(&mut reader, &mut two).unwrap();
        assert_eq!(two, [21, 22]);
        assert!(Seek::seek(&mut reader, SeekFrom::End(1)).is_err());
    }
}
