//! Row generator adapter
//!
//! Turns a callback that produces one full row of one band at a time into a
//! byte-oriented band source. Reads of any length are supported; rows are
//! generated lazily and buffered until fully consumed.

use log::{debug, warn};

use crate::nitf::errors::{NitfError, NitfResult};
use super::source::BandSource;

/// Producer of band rows
///
/// Each call must fill `row` (exactly one row of `band`) or fail. Closures
/// of the form `FnMut(u32, &mut [u8]) -> NitfResult<()>` implement it.
pub trait RowGenerator {
    fn next_row(&mut self, band: u32, row: &mut [u8]) -> NitfResult<()>;
}

impl<F> RowGenerator for F
where
    F: FnMut(u32, &mut [u8]) -> NitfResult<()>,
{
    fn next_row(&mut self, band: u32, row: &mut [u8]) -> NitfResult<()> {
        self(band, row)
    }
}

/// Band source fed by a [`RowGenerator`]
pub struct RowSource<'a> {
    generator: Box<dyn RowGenerator + 'a>,
    band: u32,
    num_rows: u32,
    row_length: usize,
    /// Most recently generated row
    row: Vec<u8>,
    /// Unconsumed bytes left in `row`
    bytes_left: usize,
    /// Index of the next unconsumed byte in `row`
    next: usize,
    /// Bytes handed out so far
    delivered: u64,
    rows_generated: u32,
    /// Set once the generator has failed
    failed: bool,
}

impl<'a> RowSource<'a> {
    /// Create a source producing `num_rows` rows of `row_length` bytes for `band`
    pub fn new<G: RowGenerator + 'a>(
        generator: G,
        band: u32,
        num_rows: u32,
        row_length: usize,
    ) -> NitfResult<Self> {
        if row_length == 0 {
            return Err(NitfError::InvalidArgument("row length must be positive".to_string()));
        }
        debug!("Row source for band {}: {} rows of {} bytes", band, num_rows, row_length);
        Ok(RowSource {
            generator: Box::new(generator),
            band,
            num_rows,
            row_length,
            row: vec![0u8; row_length],
            bytes_left: 0,
            next: 0,
            delivered: 0,
            rows_generated: 0,
            failed: false,
        })
    }

    /// Number of times the generator has been invoked successfully
    pub fn rows_generated(&self) -> u32 {
        self.rows_generated
    }

    fn refill(&mut self) -> NitfResult<()> {
        let row_index = self.rows_generated;
        if let Err(e) = self.generator.next_row(self.band, &mut self.row) {
            self.failed = true;
            warn!("Row generator failed on band {} row {}: {}", self.band, row_index, e);
            return Err(match e {
                NitfError::GeneratorFailure(_) => e,
                other => NitfError::GeneratorFailure(format!("row {}: {}", row_index, other)),
            });
        }
        self.rows_generated += 1;
        self.bytes_left = self.row_length;
        self.next = 0;
        Ok(())
    }
}

impl BandSource for RowSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> NitfResult<()> {
        if self.failed {
            return Err(NitfError::GeneratorFailure(format!(
                "band {} generator already failed",
                self.band
            )));
        }
        let remaining = self.size() - self.delivered;
        if buf.len() as u64 > remaining {
            return Err(NitfError::out_of_bounds(self.delivered, buf.len() as i64, self.size()));
        }

        let mut filled = 0;
        while filled < buf.len() {
            if self.bytes_left == 0 {
                self.refill()?;
            }
            let count = (buf.len() - filled).min(self.bytes_left);
            buf[filled..filled + count].copy_from_slice(&self.row[self.next..self.next + count]);
            filled += count;
            self.next += count;
            self.bytes_left -= count;
            self.delivered += count as u64;
        }
        Ok(())
    }

    fn size(&self) -> u64 {
        self.num_rows as u64 * self.row_length as u64
    }

    fn set_size(&mut self, _size: u64) -> NitfResult<()> {
        Ok(())
    }
}
