//! Frame header emitter.

use bytes::BytesMut;

use crate::error::{Error, Result};
use crate::frame::{
    FrameHeader, FrameType, DEFAULT_MAX_FRAME_SIZE, FRAME_HEADER_SIZE, MAX_STREAM_ID,
};
use crate::pool::Lease;

/// Writes the fixed 9-byte header that starts every frame and enforces the
/// negotiated maximum frame size.
#[derive(Debug, Clone)]
pub struct HeaderGenerator {
    max_frame_size: u32,
}

impl HeaderGenerator {
    /// Create an emitter bounded by `max_frame_size`.
    pub fn new(max_frame_size: u32) -> Self {
        Self { max_frame_size }
    }

    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    pub(crate) fn set_max_frame_size(&mut self, size: u32) {
        self.max_frame_size = size;
    }

    /// Emit a frame header into a buffer acquired from `lease`.
    ///
    /// The returned buffer holds exactly 9 bytes; the caller appends it to
    /// the lease. Fails with [`Error::FrameSize`] when `length` is larger
    /// than the maximum frame size.
    pub fn generate(
        &self,
        lease: &Lease<'_>,
        frame_type: FrameType,
        length: usize,
        flags: u8,
        stream_id: u32,
    ) -> Result<BytesMut> {
        if length > self.max_frame_size as usize {
            return Err(Error::frame_size(length, self.max_frame_size));
        }
        if stream_id > MAX_STREAM_ID {
            return Err(Error::InvalidStreamId(stream_id));
        }

        let header = FrameHeader {
            length: length as u32,
            frame_type,
            flags,
            stream_id,
        };
        let mut buf = lease.acquire(FRAME_HEADER_SIZE, false);
        header.serialize(&mut buf);

        tracing::trace!(
            "H2 frame header: {:?} stream={} len={} flags={:#04x}",
            frame_type,
            stream_id,
            length,
            flags
        );
        Ok(buf)
    }
}

impl Default for HeaderGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_SIZE)
    }
}
