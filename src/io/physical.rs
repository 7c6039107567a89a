//! Physical file primitive
//!
//! A thin read/seek/tell wrapper over an open handle. Every band source and
//! segment reader goes through this type, never through the raw handle.

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind as IoErrorKind, SeekFrom};
use std::path::Path;

use log::debug;

use crate::io::seekable::SeekableReader;
use crate::nitf::constants::seek;
use crate::nitf::errors::{NitfError, NitfResult};

/// Origin of a seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// From the beginning of the file
    Set,
    /// From the current position
    Cur,
    /// From the end of the file
    End,
}

impl Whence {
    /// Converts a raw POSIX-style whence value (0, 1, 2)
    pub fn from_raw(whence: i32) -> NitfResult<Self> {
        match whence {
            seek::SEEK_SET => Ok(Whence::Set),
            seek::SEEK_CUR => Ok(Whence::Cur),
            seek::SEEK_END => Ok(Whence::End),
            other => Err(NitfError::InvalidArgument(format!("unrecognized whence {}", other))),
        }
    }

    /// Returns the raw POSIX-style value for this origin
    pub fn as_raw(&self) -> i32 {
        match self {
            Whence::Set => seek::SEEK_SET,
            Whence::Cur => seek::SEEK_CUR,
            Whence::End => seek::SEEK_END,
        }
    }
}

/// An open file handle with read, seek and tell
pub struct PhysicalFile {
    inner: Box<dyn SeekableReader>,
    /// Path the handle was opened from, if any
    path: Option<String>,
}

impl PhysicalFile {
    /// Opens a file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> NitfResult<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)?;
        debug!("Opened physical file {}", path_ref.display());
        Ok(PhysicalFile {
            inner: Box::new(file),
            path: Some(path_ref.display().to_string()),
        })
    }

    /// Wraps an already open reader, such as a `Cursor` over a buffer
    pub fn from_reader<R: SeekableReader + 'static>(reader: R) -> Self {
        PhysicalFile {
            inner: Box::new(reader),
            path: None,
        }
    }

    /// Path the file was opened from, if it came from `open`
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Moves the file position and returns the new absolute offset
    ///
    /// A seek that would land before the start of the file is rejected
    /// with `InvalidArgument` and leaves the position unchanged.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> NitfResult<u64> {
        let from = match whence {
            Whence::Set => {
                if offset < 0 {
                    return Err(NitfError::InvalidArgument(format!(
                        "negative absolute seek offset {}",
                        offset
                    )));
                }
                SeekFrom::Start(offset as u64)
            }
            Whence::Cur => SeekFrom::Current(offset),
            Whence::End => SeekFrom::End(offset),
        };

        self.inner.seek(from).map_err(|e| match e.kind() {
            IoErrorKind::InvalidInput => {
                NitfError::InvalidArgument(format!("seek to {} {:?} failed: {}", offset, whence, e))
            }
            _ => NitfError::IoError(e),
        })
    }

    /// Fills `buf` completely from the current position
    pub fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        self.inner.read_exact(buf)?;
        Ok(())
    }

    /// Returns the current absolute offset
    pub fn tell(&mut self) -> NitfResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Returns the total size of the file, restoring the current position
    pub fn size(&mut self) -> NitfResult<u64> {
        let current = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if current != end {
            self.inner.seek(SeekFrom::Start(current))?;
        }
        Ok(end)
    }
}

impl fmt::Debug for PhysicalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalFile")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::nitf::ErrorKind;

    fn ten_bytes() -> PhysicalFile {
        PhysicalFile::from_reader(Cursor::new((0u8..10).collect::<Vec<u8>>()))
    }

    #[test]
    fn test_whence_from_raw() {
        assert_eq!(Whence::from_raw(0).unwrap(), Whence::Set);
        assert_eq!(Whence::from_raw(1).unwrap(), Whence::Cur);
        assert_eq!(Whence::from_raw(2).unwrap(), Whence::End);
        assert_eq!(Whence::from_raw(7).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(Whence::End.as_raw(), 2);
    }

    #[test]
    fn test_seek_read_tell() {
        let mut file = ten_bytes();
        assert_eq!(file.seek(4, Whence::Set).unwrap(), 4);
        let mut buf = [0u8; 3];
        file.read(&mut buf).unwrap();
        assert_eq!(buf, [4, 5, 6]);
        assert_eq!(file.tell().unwrap(), 7);
        assert_eq!(file.seek(-2, Whence::Cur).unwrap(), 5);
        assert_eq!(file.seek(-1, Whence::End).unwrap(), 9);
    }

    #[test]
    fn test_size_keeps_position() {
        let mut file = ten_bytes();
        file.seek(3, Whence::Set).unwrap();
        assert_eq!(file.size().unwrap(), 10);
        assert_eq!(file.tell().unwrap(), 3);
    }

    #[test]
    fn test_short_read_is_io_error() {
        let mut file = ten_bytes();
        file.seek(8, Whence::Set).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(file.read(&mut buf).unwrap_err().kind(), ErrorKind::IoError);
    }

    #[test]
    fn test_negative_seek_rejected() {
        let mut file = ten_bytes();
        assert_eq!(file.seek(-1, Whence::Set).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(file.seek(-20, Whence::End).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(file.tell().unwrap(), 0);
    }
}
