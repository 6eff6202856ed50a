//! Frame generators.
//!
//! [`Generator`] is the entry point: it owns one generator per frame kind,
//! shares the negotiated frame size between them and dispatches on the
//! [`Frame`] variant.
//!
//! ## Usage
//!
//! ```
//! use bytes::BytesMut;
//! use h2_headers_gen::{
//!     Generator, GeneratorConfig, HeaderEncoder, HeadersFrame, HeapBufferPool, Lease,
//! };
//!
//! struct Precompressed;
//!
//! impl HeaderEncoder for Precompressed {
//!     type Headers = [u8];
//!     type Error = std::convert::Infallible;
//!
//!     fn encode(&mut self, dst: &mut BytesMut, headers: &[u8]) -> Result<(), Self::Error> {
//!         dst.extend_from_slice(headers);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> h2_headers_gen::Result<()> {
//! let generator = Generator::new(GeneratorConfig::new().max_header_block_fragment(4))?;
//! let pool = HeapBufferPool::new();
//! let mut lease = Lease::new(&pool);
//!
//! let block = [0u8; 10];
//! let frame = HeadersFrame::new(5, &block[..]).end_stream(true);
//! generator.generate(&mut lease, &mut Precompressed, &frame.into())?;
//!
//! // HEADERS(4) + CONTINUATION(4) + CONTINUATION(2), each with its 9-byte header
//! assert_eq!(lease.total_length(), 3 * 9 + 10);
//! # Ok(())
//! # }
//! ```

mod header;
mod headers;
mod priority;

pub use header::HeaderGenerator;
pub use headers::HeadersGenerator;
pub use priority::PriorityGenerator;

use crate::config::{validate_max_frame_size, GeneratorConfig};
use crate::error::Result;
use crate::frame::Frame;
use crate::hpack::HeaderEncoder;
use crate::pool::Lease;

/// Dispatches frames to the generator for their kind.
#[derive(Debug, Clone)]
pub struct Generator {
    header: HeaderGenerator,
    headers: HeadersGenerator,
    priority: PriorityGenerator,
}

impl Generator {
    /// Create a generator after validating `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let headers = HeadersGenerator::from_config(&config)?;
        let header = HeaderGenerator::new(config.max_frame_size);
        Ok(Self {
            priority: PriorityGenerator::new(header.clone()),
            header,
            headers,
        })
    }

    /// Frame header emitter shared by all frame kinds.
    pub fn header_generator(&self) -> &HeaderGenerator {
        &self.header
    }

    pub fn headers_generator(&self) -> &HeadersGenerator {
        &self.headers
    }

    pub fn priority_generator(&self) -> &PriorityGenerator {
        &self.priority
    }

    pub fn max_frame_size(&self) -> u32 {
        self.header.max_frame_size()
    }

    /// Apply a SETTINGS_MAX_FRAME_SIZE received from the peer.
    pub fn set_max_frame_size(&mut self, size: u32) -> Result<()> {
        validate_max_frame_size(size)?;
        tracing::debug!(
            "H2 generator: max frame size {} -> {}",
            self.header.max_frame_size(),
            size
        );
        self.header.set_max_frame_size(size);
        self.headers.set_max_frame_size(size);
        self.priority.set_max_frame_size(size);
        Ok(())
    }

    /// Append the wire form of `frame` to the lease.
    ///
    /// The encoder is only used for HEADERS frames.
    pub fn generate<E: HeaderEncoder>(
        &self,
        lease: &mut Lease<'_>,
        encoder: &mut E,
        frame: &Frame<'_, E::Headers>,
    ) -> Result<()> {
        match frame {
            Frame::Headers(headers) => self.headers.generate(lease, encoder, headers),
            Frame::Priority(priority) => self.priority.generate_priority(lease, priority),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frame::{HeadersFrame, PriorityFrame};
    use crate::hpack::Precompressed;
    use crate::pool::HeapBufferPool;

    #[test]
    fn test_new_rejects_bad_frame_size() {
        let err = Generator::new(GeneratorConfig::new().max_frame_size(100)).unwrap_err();
        assert!(matches!(err, Error::InvalidMaxFrameSize(100)));
    }

    #[test]
    fn test_dispatch_headers_and_priority() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let pool = HeapBufferPool::new();
        let mut lease = Lease::new(&pool);
        let block = [0x82u8, 0x86, 0x84];

        generator
            .generate(&mut lease, &mut Precompressed, &PriorityFrame::new(3, 0, 200, false).into())
            .unwrap();
        generator
            .generate(&mut lease, &mut Precompressed, &HeadersFrame::new(3, &block[..]).into())
            .unwrap();

        let bytes = lease.to_bytes();
        assert_eq!(bytes.len(), 9 + 5 + 9 + 3);
        assert_eq!(bytes[3], 0x2);
        assert_eq!(bytes[14 + 3], 0x1);
        assert_eq!(&bytes[23..], &block);
    }

    #[test]
    fn test_set_max_frame_size_propagates() {
        let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
        let pool = HeapBufferPool::new();
        let block = vec![0u8; 20000];

        {
            let mut lease = Lease::new(&pool);
            let err = generator
                .generate(&mut lease, &mut Precompressed, &HeadersFrame::new(1, &block[..]).into())
                .unwrap_err();
            assert!(matches!(err, Error::FrameSize { length: 20000, .. }));
        }

        generator.set_max_frame_size(32768).unwrap();
        assert_eq!(generator.max_frame_size(), 32768);
        assert_eq!(generator.headers_generator().max_header_block_fragment(), 0);

        let mut lease = Lease::new(&pool);
        generator
            .generate(&mut lease, &mut Precompressed, &HeadersFrame::new(1, &block[..]).into())
            .unwrap();
        assert_eq!(lease.total_length(), 9 + 20000);
    }

    #[test]
    fn test_set_max_frame_size_rejects_out_of_range() {
        let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
        assert!(generator.set_max_frame_size(1 << 24).is_err());
        assert_eq!(generator.max_frame_size(), 16384);
    }
}
