//! Data series encodings.

pub mod codec;

/// An encoding of one data series.
///
/// The type parameter is the codec family: [`codec::Byte`],
/// [`codec::Integer`], or [`codec::ByteArray`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Encoding<C>(C);

impl<C> Encoding<C> {
    /// Wraps a codec as an encoding.
    pub fn new(codec: C) -> Self {
        Self(codec)
    }

    /// Returns the wrapped codec.
    pub fn get(&self) -> &C {
        &self.0
    }
}
