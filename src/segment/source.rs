//! Band source over a segment reader
//!
//! Lets a segment's virtual file feed a writer directly, e.g. to copy a
//! data extension segment's payload from one file into another.

use crate::band::BandSource;
use crate::nitf::errors::NitfResult;
use super::reader::SegmentReader;

/// Band source that pulls sequentially from a [`SegmentReader`]
pub struct SegmentReaderSource<'r, 'a> {
    reader: &'r mut SegmentReader<'a>,
    size: u64,
}

impl<'r, 'a> SegmentReaderSource<'r, 'a> {
    /// Source delivering the rest of the segment from its current position
    pub fn new(reader: &'r mut SegmentReader<'a>) -> Self {
        let size = reader.size() - reader.tell();
        SegmentReaderSource { reader, size }
    }
}

impl BandSource for SegmentReaderSource<'_, '_> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        self.reader.read(buf)
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn set_size(&mut self, size: u64) -> NitfResult<()> {
        self.size = size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::io::physical::{PhysicalFile, Whence};
    use crate::segment::UserSegment;

    #[test]
    fn test_source_covers_remaining_segment() {
        let mut file = PhysicalFile::from_reader(Cursor::new((0u8..32).collect::<Vec<u8>>()));
        let mut reader = SegmentReader::new(&mut file, UserSegment::new(8, 16)).unwrap();
        reader.seek(4, Whence::Set).unwrap();

        let mut source = SegmentReaderSource::new(&mut reader);
        assert_eq!(source.size(), 12);
        let mut buf = [0u8; 12];
        source.read(&mut buf).unwrap();
        assert_eq!(buf, [12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23]);
        assert!(source.read(&mut [0u8; 1]).is_err());
    }
}
