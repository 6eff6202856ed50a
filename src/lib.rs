//! # h2-headers-gen
//!
//! HTTP/2 HEADERS frame generation.
//!
//! Turns a "send these headers on this stream" request into wire-ready
//! HEADERS and CONTINUATION frames, with optional priority information,
//! using a caller-supplied header compression engine and buffer pool.
//! Nothing here performs I/O; output lands in a [`Lease`] the caller
//! flushes and recycles.

pub mod config;
pub mod error;
pub mod frame;
pub mod generator;
pub mod hpack;
pub mod pool;

// Re-exports
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use frame::{
    flags, Frame, FrameHeader, FrameType, HeadersFrame, PriorityFrame, DEFAULT_MAX_FRAME_SIZE,
    FRAME_HEADER_SIZE, MAX_ALLOWED_FRAME_SIZE, MAX_STREAM_ID, PRIORITY_LENGTH,
};
pub use generator::{Generator, HeaderGenerator, HeadersGenerator, PriorityGenerator};
pub use hpack::HeaderEncoder;
pub use pool::{BufferPool, HeapBufferPool, Lease};
