//! Header compression engine contract.
//!
//! The HPACK algorithm itself lives outside this crate. Generators only need
//! something that turns a logical header collection into a compressed block.
//! An encoder typically carries per-connection dynamic table state, so it is
//! passed into every generation call as `&mut` and the caller keeps
//! compression order identical to wire order.

use bytes::BytesMut;

/// A header compression engine such as an HPACK encoder.
pub trait HeaderEncoder {
    /// Logical header collection this encoder understands.
    type Headers: ?Sized;

    /// Error raised by the engine. Surfaced unchanged as the source of
    /// [`crate::Error::Compression`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append the compressed form of `headers` to `dst`.
    ///
    /// The number of bytes written is the growth of `dst`.
    fn encode(&mut self, dst: &mut BytesMut, headers: &Self::Headers) -> Result<(), Self::Error>;
}

impl<E: HeaderEncoder + ?Sized> HeaderEncoder for &mut E {
    type Headers = E::Headers;
    type Error = E::Error;

    fn encode(&mut self, dst: &mut BytesMut, headers: &Self::Headers) -> Result<(), Self::Error> {
        (**self).encode(dst, headers)
    }
}

/// Treats the header collection as an already compressed block.
#[cfg(test)]
pub(crate) struct Precompressed;

#[cfg(test)]
impl HeaderEncoder for Precompressed {
    type Headers = [u8];
    type Error = std::convert::Infallible;

    fn encode(&mut self, dst: &mut BytesMut, headers: &[u8]) -> Result<(), Self::Error> {
        dst.extend_from_slice(headers);
        Ok(())
    }
}
