//! Integration tests for band sources, segment readers and the copy pipeline

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};
use tempfile::NamedTempFile;

use nitfio::band::{BandSource, MemorySource, RowSource};
use nitfio::compression::{CompressionHandler, DeflateHandler, ZstdHandler};
use nitfio::io::PhysicalFile;
use nitfio::nitf::ErrorKind;
use nitfio::raster::{BandWriter, BlockingInfo, Interleave};
use nitfio::segment::{SegmentHandlerFactory, SegmentReader, UserSegment};
use nitfio::utils::layout_config::{LayoutConfig, LayoutInterleave};
use nitfio::NitfIo;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// File with a 64-byte header, the payload, then a trailer
fn file_with_segment(payload: &[u8]) -> (NamedTempFile, u64) {
    let mut bytes = vec![b'H'; 64];
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(b"TRAILER");
    (write_temp(&bytes), 64)
}

#[test]
fn test_read_plain_segment_from_file() {
    let payload = b"data extension segment payload";
    let (file, offset) = file_with_segment(payload);

    let nitf = NitfIo::new();
    let data = nitf.read_segment(file.path(), offset, payload.len() as u64, None).unwrap();
    assert_eq!(data, payload);

    let mut copied = Vec::new();
    let written = nitf
        .copy_segment(file.path(), offset, payload.len() as u64, None, &mut copied)
        .unwrap();
    assert_eq!(written, payload.len() as u64);
    assert_eq!(copied, payload);
}

#[test]
fn test_compressed_segments_read_decoded() {
    let logical: Vec<u8> = b"0123456789abcdef".iter().cycle().take(1000).copied().collect();
    let codecs: Vec<(&str, Box<dyn CompressionHandler>)> = vec![
        ("deflate", Box::new(DeflateHandler)),
        ("zstd", Box::new(ZstdHandler::new())),
    ];

    for (name, codec) in codecs {
        let stored = codec.compress(&logical).unwrap();
        let (file, offset) = file_with_segment(&stored);

        let data = NitfIo::new()
            .read_segment(file.path(), offset, stored.len() as u64, Some(name))
            .unwrap();
        assert_eq!(data, logical, "{}", name);
    }
}

#[test]
fn test_unknown_handler_name() {
    let (file, offset) = file_with_segment(b"abc");
    let err = NitfIo::new()
        .read_segment(file.path(), offset, 3, Some("jpeg2000"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownHandler);
}

#[test]
fn test_segment_reader_as_std_reader() {
    let mut bytes = vec![0u8; 10];
    bytes.extend_from_slice(b"hello, segment");
    bytes.extend_from_slice(&[0xff; 6]);
    let mut file = PhysicalFile::from_reader(Cursor::new(bytes));

    let mut reader = SegmentReader::new(&mut file, UserSegment::new(10, 14)).unwrap();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(text, "hello, segment");

    assert_eq!(Seek::seek(&mut reader, SeekFrom::End(-7)).unwrap(), 7);
    let mut tail = [0u8; 7];
    reader.read_exact(&mut tail).unwrap();
    assert_eq!(&tail, b"segment");

    assert!(Seek::seek(&mut reader, SeekFrom::Current(1)).is_err());
    assert_eq!(reader.tell(), 14);
}

#[test]
fn test_deflate_handler_seeks_in_decoded_view() {
    let logical: Vec<u8> = (0..200u16).map(|v| (v % 251) as u8).collect();
    let stored = DeflateHandler.compress(&logical).unwrap();
    let mut bytes = vec![0u8; 32];
    bytes.extend_from_slice(&stored);
    let mut file = PhysicalFile::from_reader(Cursor::new(bytes));

    let handler = SegmentHandlerFactory::create_by_name("zlib").unwrap();
    let segment = UserSegment::with_handler(32, stored.len() as u64, handler);
    let mut reader = SegmentReader::new(&mut file, segment).unwrap();
    assert_eq!(reader.size(), 200);

    reader.seek(150, nitfio::io::Whence::Set).unwrap();
    let mut buf = [0u8; 50];
    reader.read(&mut buf).unwrap();
    assert_eq!(&buf[..], &logical[150..]);
    assert_eq!(reader.read(&mut [0u8; 1]).unwrap_err().kind(), ErrorKind::OutOfBounds);
}

/// Three bands of 2x3 big-endian u16 samples, pixel interleaved after a 16-byte header
fn pixel_interleaved_file() -> NamedTempFile {
    let mut bytes = vec![0u8; 16];
    for pixel in 0..6u16 {
        for band in 0..3u16 {
            bytes.write_u16::<BigEndian>(band * 100 + pixel).unwrap();
        }
    }
    write_temp(&bytes)
}

fn pixel_layout() -> LayoutConfig {
    LayoutConfig {
        bands: 3,
        bytes_per_pixel: 2,
        start: 16,
        rows: Some(2),
        columns: Some(3),
        interleave: LayoutInterleave::Pixel,
        swap_bytes: false,
    }
}

#[test]
fn test_extract_band_from_pixel_interleaved_file() {
    let file = pixel_interleaved_file();
    let mut out = Vec::new();
    let written = NitfIo::new()
        .extract_band(file.path(), &pixel_layout(), 1, &mut out)
        .unwrap();

    let mut expected = Vec::new();
    for pixel in 0..6u16 {
        expected.write_u16::<BigEndian>(100 + pixel).unwrap();
    }
    assert_eq!(written, 12);
    assert_eq!(out, expected);
}

#[test]
fn test_extract_band_with_swapped_samples() {
    let file = pixel_interleaved_file();
    let mut layout = pixel_layout();
    layout.swap_bytes = true;

    let mut out = Vec::new();
    NitfIo::new().extract_band(file.path(), &layout, 2, &mut out).unwrap();

    let expected: Vec<u8> = (0..6u16).flat_map(|p| (200 + p).to_le_bytes()).collect();
    assert_eq!(out, expected);
}

#[test]
fn test_extract_band_from_band_sequential_file() {
    let mut bytes = vec![1u8; 4];
    bytes.extend_from_slice(&[10, 11, 12, 13]);
    bytes.extend_from_slice(&[20, 21, 22, 23]);
    let file = write_temp(&bytes);

    let layout = LayoutConfig::from_str(
        "[layout]\nbands = 2\nbytes_per_pixel = 1\nstart = 4\nrows = 2\ncolumns = 2\ninterleave = \"band\"\n",
    )
    .unwrap();
    let mut out = Vec::new();
    NitfIo::new().extract_band(file.path(), &layout, 1, &mut out).unwrap();
    assert_eq!(out, vec![20, 21, 22, 23]);
}

#[test]
fn test_copy_blocks_verbatim_and_swapped() {
    let mut bytes = vec![0xeeu8; 8];
    for value in 0..8u16 {
        bytes.write_u16::<BigEndian>(value).unwrap();
    }
    let file = write_temp(&bytes);
    let info = BlockingInfo {
        blocks_per_row: 2,
        blocks_per_col: 2,
        block_size: 4,
    };

    let mut verbatim = Vec::new();
    let written = NitfIo::new()
        .copy_blocks(file.path(), 8, info, None, &mut verbatim)
        .unwrap();
    assert_eq!(written, 16);
    assert_eq!(verbatim, bytes[8..].to_vec());

    let mut swapped = Vec::new();
    NitfIo::new()
        .copy_blocks(file.path(), 8, info, Some(2), &mut swapped)
        .unwrap();
    let expected: Vec<u8> = (0..8u16).flat_map(|v| v.to_le_bytes()).collect();
    assert_eq!(swapped, expected);
}

#[test]
fn test_copy_blocks_past_end_of_file() {
    let file = write_temp(&[0u8; 10]);
    let info = BlockingInfo {
        blocks_per_row: 1,
        blocks_per_col: 2,
        block_size: 8,
    };
    let err = NitfIo::new()
        .copy_blocks(file.path(), 0, info, None, &mut Vec::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoError);
}

#[test]
fn test_writer_interleaves_mixed_sources() {
    let red = vec![1u8, 2, 3, 4];
    let mut row = 0u8;
    let green = move |_band: u32, buf: &mut [u8]| -> nitfio::NitfResult<()> {
        buf.fill(10 + row);
        row += 1;
        Ok(())
    };

    let mut sources: Vec<Box<dyn BandSource + '_>> = Vec::new();
    sources.push(Box::new(MemorySource::new(&red, 0, 1, 0).unwrap()));
    sources.push(Box::new(RowSource::new(green, 1, 2, 2).unwrap()));

    let mut out = Vec::new();
    BandWriter::new(Interleave::Pixel { bytes_per_pixel: 1 })
        .write(&mut sources, &mut out)
        .unwrap();
    assert_eq!(out, vec![1, 10, 2, 10, 3, 11, 4, 11]);
}
