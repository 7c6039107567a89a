//! User segment state and the type-handler plug-in interface
//!
//! A user segment presents a data extension segment's payload as a flat
//! virtual file. Without a handler, virtual offsets map one-to-one onto the
//! physical file starting at the segment's base offset. A handler may
//! replace reading and seeking entirely, for payloads that need decoding.

use std::fmt;

use crate::io::physical::{PhysicalFile, Whence};
use crate::nitf::errors::{NitfError, NitfResult};

/// Position bookkeeping for a segment's virtual file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCursor {
    base_offset: u64,
    virtual_length: u64,
    virtual_offset: u64,
}

impl SegmentCursor {
    pub fn new(base_offset: u64, virtual_length: u64) -> Self {
        SegmentCursor {
            base_offset,
            virtual_length,
            virtual_offset: 0,
        }
    }

    /// Real file offset of the segment's first byte
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Length of the virtual file
    pub fn virtual_length(&self) -> u64 {
        self.virtual_length
    }

    /// Current position in the virtual file
    pub fn virtual_offset(&self) -> u64 {
        self.virtual_offset
    }

    /// Real file offset of virtual position `offset`
    ///
    /// Fails with `OutOfBounds` when the sum does not fit a signed file offset.
    pub fn real_offset(&self, offset: u64) -> NitfResult<i64> {
        self.base_offset
            .checked_add(offset)
            .and_then(|real| i64::try_from(real).ok())
            .ok_or_else(|| NitfError::out_of_bounds(self.base_offset, offset as i64, i64::MAX as u64))
    }

    /// Resolve a seek request to a virtual position within `[0, virtual_length]`
    ///
    /// Nothing is modified; a rejected request reports `OutOfBounds`.
    pub fn candidate(&self, offset: i64, whence: Whence) -> NitfResult<u64> {
        let origin = match whence {
            Whence::Set => 0i128,
            Whence::Cur => self.virtual_offset as i128,
            Whence::End => self.virtual_length as i128,
        };
        let candidate = origin + offset as i128;
        if candidate < 0 || candidate > self.virtual_length as i128 {
            return Err(NitfError::out_of_bounds(self.virtual_offset, offset, self.virtual_length));
        }
        Ok(candidate as u64)
    }

    /// Move to `offset`, which must not exceed the virtual length
    pub fn set_offset(&mut self, offset: u64) -> NitfResult<()> {
        if offset > self.virtual_length {
            return Err(NitfError::out_of_bounds(offset, 0, self.virtual_length));
        }
        self.virtual_offset = offset;
        Ok(())
    }

    /// Advance by `count`, stopping at the end of the virtual file
    pub fn advance(&mut self, count: u64) {
        self.virtual_offset = self.virtual_offset.saturating_add(count).min(self.virtual_length);
    }

    /// Replace the virtual length; the position is clamped to it
    pub fn set_virtual_length(&mut self, length: u64) {
        self.virtual_length = length;
        self.virtual_offset = self.virtual_offset.min(length);
    }
}

/// Payload-specific access to a segment
///
/// Hooks returning `None` fall back to direct, file-relative access. A
/// handler that implements `read` is responsible for its own bounds checks
/// and for advancing the cursor; one that implements `seek` must leave the
/// cursor at the position it returns.
pub trait SegmentHandler {
    /// Name used in logs and by the handler registry
    fn name(&self) -> &str;

    /// Instance setup, run once when a reader is attached
    ///
    /// The cursor arrives holding the stored payload extent; a handler that
    /// decodes the payload sets the decoded length here.
    fn setup(&mut self, cursor: &mut SegmentCursor, file: &mut PhysicalFile) -> NitfResult<()> {
        let _ = (cursor, file);
        Ok(())
    }

    /// Replacement for the default read
    fn read(
        &mut self,
        cursor: &mut SegmentCursor,
        file: &mut PhysicalFile,
        buf: &mut [u8],
    ) -> Option<NitfResult<()>> {
        let _ = (cursor, file, buf);
        None
    }

    /// Replacement for the default seek, given the caller's original request
    fn seek(
        &mut self,
        cursor: &mut SegmentCursor,
        file: &mut PhysicalFile,
        offset: i64,
        whence: Whence,
    ) -> Option<NitfResult<u64>> {
        let _ = (cursor, file, offset, whence);
        None
    }
}

/// A data extension segment's payload, with an optional type handler
pub struct UserSegment {
    pub(crate) cursor: SegmentCursor,
    pub(crate) handler: Option<Box<dyn SegmentHandler>>,
}

impl UserSegment {
    /// Segment read directly from `virtual_length` bytes at `base_offset`
    pub fn new(base_offset: u64, virtual_length: u64) -> Self {
        UserSegment {
            cursor: SegmentCursor::new(base_offset, virtual_length),
            handler: None,
        }
    }

    /// Segment whose `stored_length` payload bytes at `base_offset` are served by `handler`
    pub fn with_handler(base_offset: u64, stored_length: u64, handler: Box<dyn SegmentHandler>) -> Self {
        UserSegment {
            cursor: SegmentCursor::new(base_offset, stored_length),
            handler: Some(handler),
        }
    }

    pub fn cursor(&self) -> &SegmentCursor {
        &self.cursor
    }

    /// Name of the installed handler, if any
    pub fn handler_name(&self) -> Option<&str> {
        self.handler.as_ref().map(|h| h.name())
    }
}

impl fmt::Debug for UserSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSegment")
            .field("cursor", &self.cursor)
            .field("handler", &self.handler_name())
            .finish()
    }
}
