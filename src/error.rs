//! Error types for h2-headers-gen.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating frames.
///
/// Everything except `Compression` is a contract violation by the caller
/// or its configuration and is not worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stream id with the reserved bit set.
    #[error("Invalid stream id: {0}")]
    InvalidStreamId(u32),

    /// Parent stream id with the reserved bit set.
    #[error("Invalid parent stream id: {0}")]
    InvalidParentStreamId(u32),

    /// A stream cannot depend on itself (RFC 9113 Section 5.3.1).
    #[error("Stream {stream_id} cannot depend on stream {stream_id}")]
    SelfDependency { stream_id: u32 },

    /// Priority weight that does not fit in one byte.
    #[error("Invalid weight: {0}")]
    InvalidWeight(u16),

    /// A frame would exceed the negotiated maximum frame size. Means the
    /// header block fragment size is inconsistent with the frame size.
    #[error("FRAME_SIZE_ERROR: frame length {length} exceeds max frame size {max_frame_size}")]
    FrameSize { length: usize, max_frame_size: u32 },

    /// SETTINGS_MAX_FRAME_SIZE outside 2^14 ..= 2^24-1.
    #[error("Invalid max frame size: {0}")]
    InvalidMaxFrameSize(u32),

    /// Error raised by the header compression engine, passed through as-is.
    #[error("Header compression error: {0}")]
    Compression(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Create a frame size error.
    pub fn frame_size(length: usize, max_frame_size: u32) -> Self {
        Self::FrameSize {
            length,
            max_frame_size,
        }
    }

    /// Wrap an error coming out of the compression engine.
    pub fn compression<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Compression(Box::new(err))
    }

    /// True for errors caused by configuration rather than call arguments.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::FrameSize { .. } | Self::InvalidMaxFrameSize(_))
    }
}
