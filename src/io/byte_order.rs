//! Byte order handling for raw samples
//!
//! Block data is moved between files nearly verbatim; the only reformatting
//! allowed on that path is flipping the byte order of multi-byte samples.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::nitf::errors::{NitfError, NitfResult};

/// Byte order of multi-byte samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian samples
    LittleEndian,
    /// Big-endian samples (the container's on-disk order)
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the running machine
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian",
            ByteOrder::BigEndian => "Big Endian",
        }
    }
}

/// Reverses the byte order of every `sample_size`-byte sample in `data`
///
/// Supported sample sizes are 1 (no-op), 2, 4 and 8 bytes. The buffer length
/// must be a whole number of samples.
pub fn swap_samples(data: &mut [u8], sample_size: usize) -> NitfResult<()> {
    if sample_size == 0 || data.len() % sample_size != 0 {
        return Err(NitfError::InvalidArgument(format!(
            "{} bytes is not a whole number of {}-byte samples",
            data.len(),
            sample_size
        )));
    }

    match sample_size {
        1 => {}
        2 => {
            for chunk in data.chunks_exact_mut(2) {
                let value = LittleEndian::read_u16(chunk);
                BigEndian::write_u16(chunk, value);
            }
        }
        4 => {
            for chunk in data.chunks_exact_mut(4) {
                let value = LittleEndian::read_u32(chunk);
                BigEndian::write_u32(chunk, value);
            }
        }
        8 => {
            for chunk in data.chunks_exact_mut(8) {
                let value = LittleEndian::read_u64(chunk);
                BigEndian::write_u64(chunk, value);
            }
        }
        other => {
            return Err(NitfError::InvalidArgument(format!(
                "unsupported sample size {}",
                other
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nitf::ErrorKind;

    #[test]
    fn test_swap_16_and_32() {
        let mut data = vec![0x01, 0x02, 0x03, 0x04];
        swap_samples(&mut data, 2).unwrap();
        assert_eq!(data, vec![0x02, 0x01, 0x04, 0x03]);

        swap_samples(&mut data, 4).unwrap();
        assert_eq!(data, vec![0x03, 0x04, 0x01, 0x02]);
    }

    #[test]
    fn test_swap_64() {
        let mut data: Vec<u8> = (1..=8).collect();
        swap_samples(&mut data, 8).unwrap();
        assert_eq!(data, vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_swap_rejects_partial_samples() {
        let mut data = vec![0u8; 5];
        assert_eq!(swap_samples(&mut data, 2).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(swap_samples(&mut data[..3], 3).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_native_order_name() {
        assert!(!ByteOrder::native().name().is_empty());
    }
}
