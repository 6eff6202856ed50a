//! HTTP/2 frame types for the HEADERS family.
//!
//! Implements the RFC 9113 frame header layout and the frame values a caller
//! hands to the generators. Frames are modelled as a closed enum: the set of
//! kinds this crate writes is fixed by the protocol.
//!
//! ```text
//! +-----------------------------------------------+
//! |                 Length (24)                   |
//! +---------------+---------------+---------------+
//! |   Type (8)    |   Flags (8)   |
//! +-+-------------+---------------+-------------------------------+
//! |R|                 Stream Identifier (31)                      |
//! +=+=============================================================+
//! |                   Frame Payload (0...)                        |
//! +---------------------------------------------------------------+
//! ```

use bytes::BufMut;

/// Frame header size (9 bytes per RFC 9113).
pub const FRAME_HEADER_SIZE: usize = 9;

/// Default maximum frame size (16KB per RFC 9113).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16384;

/// Largest value a peer may advertise for SETTINGS_MAX_FRAME_SIZE (2^24 - 1).
pub const MAX_ALLOWED_FRAME_SIZE: u32 = 16_777_215;

/// Size of the priority fields carried by HEADERS and PRIORITY frames.
pub const PRIORITY_LENGTH: usize = 5;

/// Largest valid stream identifier (31 bits).
pub const MAX_STREAM_ID: u32 = 0x7fff_ffff;

/// Exclusive bit of the stream dependency field.
const EXCLUSIVE_BIT: u32 = 0x8000_0000;

/// Frame type identifiers per RFC 9113.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    Headers = 0x1,
    Priority = 0x2,
    Continuation = 0x9,
}

impl From<FrameType> for u8 {
    fn from(ft: FrameType) -> u8 {
        ft as u8
    }
}

/// Frame flags.
pub mod flags {
    pub const NONE: u8 = 0x0;
    pub const END_STREAM: u8 = 0x1;
    pub const END_HEADERS: u8 = 0x4;
    pub const PRIORITY: u8 = 0x20;
}

/// Frame header as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub length: u32,
    pub frame_type: FrameType,
    pub flags: u8,
    pub stream_id: u32,
}

impl FrameHeader {
    /// Serialize frame header to bytes.
    pub fn serialize<B: BufMut>(&self, buf: &mut B) {
        // Length (24 bits)
        buf.put_u8((self.length >> 16) as u8);
        buf.put_u8((self.length >> 8) as u8);
        buf.put_u8(self.length as u8);
        buf.put_u8(self.frame_type.into());
        buf.put_u8(self.flags);
        // Reserved bit is always cleared
        buf.put_u32(self.stream_id & MAX_STREAM_ID);
    }
}

/// Stream dependency information, sent either inside a HEADERS frame or as
/// a standalone PRIORITY frame (RFC 9113 Section 6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFrame {
    /// Stream that owns this priority information.
    pub stream_id: u32,
    /// Stream this one depends on. Must differ from `stream_id`.
    pub parent_stream_id: u32,
    /// Raw wire weight. No bias is applied when writing, so this must be
    /// at most 255.
    pub weight: u16,
    pub exclusive: bool,
}

impl PriorityFrame {
    /// Weight RFC 7540 assigns to streams without explicit priority, as
    /// carried on the wire (16 - 1).
    pub const DEFAULT_WEIGHT: u16 = 15;

    /// Create a new PRIORITY frame.
    pub fn new(stream_id: u32, parent_stream_id: u32, weight: u16, exclusive: bool) -> Self {
        Self {
            stream_id,
            parent_stream_id,
            weight,
            exclusive,
        }
    }

    /// The 32-bit dependency field: parent id with the exclusive bit on top.
    pub fn dependency(&self) -> u32 {
        let dep = self.parent_stream_id & MAX_STREAM_ID;
        if self.exclusive {
            dep | EXCLUSIVE_BIT
        } else {
            dep
        }
    }

    /// Write the 5-byte priority payload.
    pub fn serialize_payload<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.dependency());
        buf.put_u8((self.weight & 0xff) as u8);
    }
}

/// A request to send a header block on a stream.
///
/// The header collection is borrowed for the duration of generation only.
#[derive(Debug)]
pub struct HeadersFrame<'a, H: ?Sized> {
    pub stream_id: u32,
    pub headers: &'a H,
    pub priority: Option<PriorityFrame>,
    pub end_stream: bool,
}

impl<'a, H: ?Sized> HeadersFrame<'a, H> {
    /// Create a new HEADERS frame without priority that leaves the stream open.
    pub fn new(stream_id: u32, headers: &'a H) -> Self {
        Self {
            stream_id,
            headers,
            priority: None,
            end_stream: false,
        }
    }

    /// Set end_stream flag.
    pub fn end_stream(mut self, end: bool) -> Self {
        self.end_stream = end;
        self
    }

    /// Set priority data.
    pub fn with_priority(mut self, priority: PriorityFrame) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Frames accepted by [`crate::Generator::generate`].
#[derive(Debug)]
pub enum Frame<'a, H: ?Sized> {
    Headers(HeadersFrame<'a, H>),
    Priority(PriorityFrame),
}

impl<H: ?Sized> Frame<'_, H> {
    pub fn frame_type(&self) -> FrameType {
        match self {
            Frame::Headers(_) => FrameType::Headers,
            Frame::Priority(_) => FrameType::Priority,
        }
    }

    pub fn stream_id(&self) -> u32 {
        match self {
            Frame::Headers(f) => f.stream_id,
            Frame::Priority(f) => f.stream_id,
        }
    }
}

impl<'a, H: ?Sized> From<HeadersFrame<'a, H>> for Frame<'a, H> {
    fn from(frame: HeadersFrame<'a, H>) -> Self {
        Frame::Headers(frame)
    }
}

impl<H: ?Sized> From<PriorityFrame> for Frame<'_, H> {
    fn from(frame: PriorityFrame) -> Self {
        Frame::Priority(frame)
    }
}
