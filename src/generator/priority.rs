//! PRIORITY payload encoding and standalone PRIORITY frames.

use crate::error::{Error, Result};
use crate::frame::{flags, FrameType, PriorityFrame, MAX_STREAM_ID, PRIORITY_LENGTH};
use crate::pool::Lease;

use super::header::HeaderGenerator;

/// Check priority fields for a stream before anything is written.
pub(crate) fn validate(stream_id: u32, priority: &PriorityFrame) -> Result<()> {
    let parent = priority.parent_stream_id;
    if parent > MAX_STREAM_ID {
        return Err(Error::InvalidParentStreamId(parent));
    }
    if parent == stream_id {
        return Err(Error::SelfDependency { stream_id });
    }
    if priority.weight > 255 {
        return Err(Error::InvalidWeight(priority.weight));
    }
    Ok(())
}

/// Append the 5-byte priority payload to the lease.
pub(crate) fn append_payload(lease: &mut Lease<'_>, priority: &PriorityFrame) {
    let mut buf = lease.acquire(PRIORITY_LENGTH, true);
    priority.serialize_payload(&mut buf);
    lease.append(buf, true);
}

/// Generator for standalone PRIORITY frames.
#[derive(Debug, Clone, Default)]
pub struct PriorityGenerator {
    header: HeaderGenerator,
}

impl PriorityGenerator {
    pub fn new(header: HeaderGenerator) -> Self {
        Self { header }
    }

    pub(crate) fn set_max_frame_size(&mut self, size: u32) {
        self.header.set_max_frame_size(size);
    }

    /// Append a PRIORITY frame for `priority.stream_id` to the lease.
    pub fn generate_priority(&self, lease: &mut Lease<'_>, priority: &PriorityFrame) -> Result<()> {
        let stream_id = priority.stream_id;
        if stream_id > MAX_STREAM_ID {
            return Err(Error::InvalidStreamId(stream_id));
        }
        validate(stream_id, priority)?;

        let header = self.header.generate(
            lease,
            FrameType::Priority,
            PRIORITY_LENGTH,
            flags::NONE,
            stream_id,
        )?;
        lease.append(header, true);
        append_payload(lease, priority);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::HeapBufferPool;

    #[test]
    fn test_validate_accepts_regular_priority() {
        assert!(validate(5, &PriorityFrame::new(5, 3, 255, true)).is_ok());
        assert!(validate(5, &PriorityFrame::new(5, 0, 0, false)).is_ok());
    }

    #[test]
    fn test_validate_rejections() {
        assert!(matches!(
            validate(5, &PriorityFrame::new(5, 5, 16, false)),
            Err(Error::SelfDependency { stream_id: 5 })
        ));
        assert!(matches!(
            validate(5, &PriorityFrame::new(5, 0x8000_0000, 16, false)),
            Err(Error::InvalidParentStreamId(0x8000_0000))
        ));
        assert!(matches!(
            validate(5, &PriorityFrame::new(5, 3, 256, false)),
            Err(Error::InvalidWeight(256))
        ));
    }

    #[test]
    fn test_standalone_priority_frame() {
        let pool = HeapBufferPool::new();
        let mut lease = Lease::new(&pool);
        PriorityGenerator::default()
            .generate_priority(&mut lease, &PriorityFrame::new(3, 0, 201, false))
            .unwrap();

        assert_eq!(lease.len(), 2);
        assert_eq!(
            &lease.to_bytes()[..],
            &[0, 0, 5, 0x2, 0, 0, 0, 0, 3, 0, 0, 0, 0, 201]
        );
    }

    #[test]
    fn test_standalone_priority_rejects_reserved_stream_id() {
        let pool = HeapBufferPool::new();
        let mut lease = Lease::new(&pool);
        let err = PriorityGenerator::default()
            .generate_priority(&mut lease, &PriorityFrame::new(0x8000_0003, 1, 16, false))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidStreamId(0x8000_0003)));
        assert!(lease.is_empty());
    }
}
