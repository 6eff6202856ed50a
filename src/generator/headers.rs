//! HEADERS frame generation with CONTINUATION splitting.
//!
//! A compressed header block larger than the configured fragment size is
//! cut into a HEADERS frame followed by CONTINUATION frames (RFC 9113
//! Section 6.10). The block is compressed once and then sliced by position
//! only; the slices share the scratch buffer's memory.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::frame::{
    flags, FrameType, HeadersFrame, PriorityFrame, MAX_STREAM_ID, PRIORITY_LENGTH,
};
use crate::hpack::HeaderEncoder;
use crate::pool::Lease;

use super::header::HeaderGenerator;
use super::priority;

/// Generator for HEADERS frames and their CONTINUATION frames.
#[derive(Debug, Clone)]
pub struct HeadersGenerator {
    header: HeaderGenerator,
    max_header_block_fragment: usize,
}

impl HeadersGenerator {
    /// Create a generator that never fragments header blocks.
    pub fn new(header: HeaderGenerator) -> Self {
        Self::with_fragment(header, 0)
    }

    /// Create a generator that splits header blocks longer than
    /// `max_header_block_fragment` bytes. 0 disables splitting.
    pub fn with_fragment(header: HeaderGenerator, max_header_block_fragment: usize) -> Self {
        Self {
            header,
            max_header_block_fragment,
        }
    }

    /// Create a generator from a validated [`GeneratorConfig`].
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_fragment(
            HeaderGenerator::new(config.max_frame_size),
            config.max_header_block_fragment,
        ))
    }

    pub fn max_header_block_fragment(&self) -> usize {
        self.max_header_block_fragment
    }

    pub(crate) fn set_max_frame_size(&mut self, size: u32) {
        self.header.set_max_frame_size(size);
    }

    /// Generate the frames for a [`HeadersFrame`].
    pub fn generate<E: HeaderEncoder>(
        &self,
        lease: &mut Lease<'_>,
        encoder: &mut E,
        frame: &HeadersFrame<'_, E::Headers>,
    ) -> Result<()> {
        self.generate_headers(
            lease,
            encoder,
            frame.stream_id,
            frame.headers,
            frame.priority.as_ref(),
            frame.end_stream,
        )
    }

    /// Compress `headers` and append the resulting HEADERS frame, plus any
    /// CONTINUATION frames, to the lease in wire order.
    ///
    /// All argument checks run before a buffer is acquired, so a rejected
    /// call leaves the lease and the pool untouched. `priority.stream_id` is
    /// ignored; the dependency always belongs to `stream_id`.
    pub fn generate_headers<E: HeaderEncoder>(
        &self,
        lease: &mut Lease<'_>,
        encoder: &mut E,
        stream_id: u32,
        headers: &E::Headers,
        priority: Option<&PriorityFrame>,
        end_stream: bool,
    ) -> Result<()> {
        if stream_id > MAX_STREAM_ID {
            return Err(Error::InvalidStreamId(stream_id));
        }

        let mut frame_flags = flags::NONE;
        if let Some(priority) = priority {
            frame_flags = flags::PRIORITY;
            priority::validate(stream_id, priority)?;
        }
        let priority_length = if priority.is_some() { PRIORITY_LENGTH } else { 0 };

        let max_frame_size = self.header.max_frame_size();
        let mut hpacked = lease.acquire(max_frame_size as usize, false);
        if let Err(e) = encoder.encode(&mut hpacked, headers) {
            lease.release(hpacked);
            return Err(Error::compression(e));
        }
        let hpacked_length = hpacked.len();

        let fragment = self.max_header_block_fragment;
        let split = fragment > 0 && hpacked_length > fragment;

        // Refuse before anything reaches the lease. Continuations are never
        // longer than the first fragment, so checking the first frame is enough.
        let first_length = (if split { fragment } else { hpacked_length }) + priority_length;
        if first_length > max_frame_size as usize {
            lease.release(hpacked);
            return Err(Error::frame_size(first_length, max_frame_size));
        }

        if split {
            if end_stream {
                frame_flags |= flags::END_STREAM;
            }
            tracing::debug!(
                "H2 stream {}: splitting {}-byte header block into {}-byte fragments",
                stream_id,
                hpacked_length,
                fragment
            );

            let header = self.header.generate(
                lease,
                FrameType::Headers,
                first_length,
                frame_flags,
                stream_id,
            )?;
            lease.append(header, true);
            if let Some(priority) = priority {
                priority::append_payload(lease, priority);
            }
            lease.append(hpacked.split_to(fragment), false);

            let mut position = fragment;
            while position + fragment < hpacked_length {
                let header = self.header.generate(
                    lease,
                    FrameType::Continuation,
                    fragment,
                    flags::NONE,
                    stream_id,
                )?;
                lease.append(header, true);
                lease.append(hpacked.split_to(fragment), false);
                position += fragment;
            }

            // The loop stops while bytes remain, so the last CONTINUATION
            // is never empty.
            debug_assert!(!hpacked.is_empty() && hpacked.len() <= fragment);
            debug_assert_eq!(position + hpacked.len(), hpacked_length);
            let header = self.header.generate(
                lease,
                FrameType::Continuation,
                hpacked.len(),
                flags::END_HEADERS,
                stream_id,
            )?;
            lease.append(header, true);
            lease.append(hpacked, true);
        } else {
            frame_flags |= flags::END_HEADERS;
            if end_stream {
                frame_flags |= flags::END_STREAM;
            }

            let header = self.header.generate(
                lease,
                FrameType::Headers,
                first_length,
                frame_flags,
                stream_id,
            )?;
            lease.append(header, true);
            if let Some(priority) = priority {
                priority::append_payload(lease, priority);
            }
            lease.append(hpacked, true);
        }

        Ok(())
    }
}

impl Default for HeadersGenerator {
    fn default() -> Self {
        Self::new(HeaderGenerator::default())
    }
}
