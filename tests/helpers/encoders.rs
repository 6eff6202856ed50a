use bytes::{BufMut, BytesMut};
use h2_headers_gen::HeaderEncoder;
use http::HeaderMap;

/// Copies the header collection verbatim, so the collection *is* the
/// compressed block. Gives tests exact control over the block length.
pub struct Precompressed;

impl HeaderEncoder for Precompressed {
    type Headers = [u8];
    type Error = std::convert::Infallible;

    fn encode(&mut self, dst: &mut BytesMut, headers: &[u8]) -> Result<(), Self::Error> {
        dst.extend_from_slice(headers);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LiteralError {
    #[error("header field too long: {0} bytes")]
    FieldTooLong(usize),
}

/// Stateful stand-in for an HPACK encoder over `http::HeaderMap`.
///
/// Writes each field as `len(name) name len(value) value` with one-byte
/// lengths and counts the blocks it produced, so tests can observe that
/// the same handle is used across calls.
#[derive(Default)]
pub struct LiteralEncoder {
    pub blocks: usize,
}

impl HeaderEncoder for LiteralEncoder {
    type Headers = HeaderMap;
    type Error = LiteralError;

    fn encode(&mut self, dst: &mut BytesMut, headers: &HeaderMap) -> Result<(), Self::Error> {
        for (name, value) in headers {
            for field in [name.as_str().as_bytes(), value.as_bytes()] {
                let len = u8::try_from(field.len())
                    .map_err(|_| LiteralError::FieldTooLong(field.len()))?;
                dst.put_u8(len);
                dst.put_slice(field);
            }
        }
        self.blocks += 1;
        Ok(())
    }
}
