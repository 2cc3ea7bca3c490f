//! Byte sinks for encoding
//!
//! Encoding never fails because of where the bytes go: a value either has a
//! wire form, in which case every byte of it is accepted by the sink, or it
//! does not (an unset [`Outcome`](crate::outcome::Outcome)), in which case the
//! failure is raised by the value before or while it writes. The methods of
//! [`Target`] are therefore infallible, and report only how many bytes they
//! appended, so that `write_to` can return the encoded length without a
//! second pass.
//!
//! Two sinks are provided. `Vec<u8>` collects the encoding, and
//! [`ByteCounter`] discards it, which turns any `write_to` into an exact
//! length measurement; this is how [`EncodeLength::enc_len`](super::EncodeLength::enc_len)
//! works unless `enc_len_estimable_override` is enabled.

/// Append-only sink for encoded bytes
pub trait Target {
    /// Hints that `extra` more bytes are about to be appended.
    ///
    /// Used ahead of the magnitude bytes of a big-integer compact, whose count
    /// is known from the length prefix.
    fn anticipate(&mut self, extra: usize);

    /// Appends one byte and returns `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the little-endian bytes of a fixed-width value and returns `N`.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;
}

/// Sink that keeps no bytes, only the count that `write_to` returns
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend_from_slice(&arr);
        N
    }
}
