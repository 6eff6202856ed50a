//! Generator configuration.

use crate::error::{Error, Result};
use crate::frame::{DEFAULT_MAX_FRAME_SIZE, MAX_ALLOWED_FRAME_SIZE};

/// Sizes that bound the frames a generator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Peer's SETTINGS_MAX_FRAME_SIZE. Every emitted frame payload is
    /// checked against it.
    pub max_frame_size: u32,
    /// Largest header block fragment carried by one HEADERS or
    /// CONTINUATION frame. 0 disables fragmentation.
    pub max_header_block_fragment: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_header_block_fragment: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum frame size.
    pub fn max_frame_size(mut self, size: u32) -> Self {
        self.max_frame_size = size;
        self
    }

    /// Set the header block fragment size (0 disables fragmentation).
    pub fn max_header_block_fragment(mut self, size: usize) -> Self {
        self.max_header_block_fragment = size;
        self
    }

    /// Check the frame size against the range RFC 9113 Section 6.5.2 allows.
    ///
    /// The fragment size is not checked against the frame size here; a
    /// fragment that cannot fit surfaces as [`Error::FrameSize`] when the
    /// first oversized frame header is emitted.
    pub fn validate(&self) -> Result<()> {
        validate_max_frame_size(self.max_frame_size)
    }
}

pub(crate) fn validate_max_frame_size(size: u32) -> Result<()> {
    if !(DEFAULT_MAX_FRAME_SIZE..=MAX_ALLOWED_FRAME_SIZE).contains(&size) {
        return Err(Error::InvalidMaxFrameSize(size));
    }
    Ok(())
}
