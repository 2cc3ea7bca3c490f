//! Variable-length "compact" encoding for unsigned integers
//!
//! The two low bits of the first byte select one of four modes:
//!
//! | mode | range                | layout                                          |
//! |------|----------------------|-------------------------------------------------|
//! | `00` | `0 ..= 63`           | 1 byte, `v << 2`                                 |
//! | `01` | `64 ..= 16383`       | 2 bytes LE, `(v << 2) \| 1`                      |
//! | `10` | `16384 ..= 2^30 - 1` | 4 bytes LE, `(v << 2) \| 2`                      |
//! | `11` | `2^30 ..`            | `((n - 4) << 2) \| 3`, then `n` magnitude bytes LE |
//!
//! In the last mode `n` is the minimal byte-length of the value, so that
//! `4 <= n <= 16` for anything an encoder produces.
//!
//! Decoding yields the exact magnitude as a [`U128`], whatever the length
//! prefix. Narrowing into a smaller integer (via [`Compact<T>`]) is a
//! separate, checked step that fails with [`WidthError`] instead of truncating.
//! Encodings that use a wider mode than necessary are accepted on decode.

use num_bigint::BigUint;

use crate::conv::error::{EncodeError, EncodeResult};
use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::error::WidthError;
use crate::parse::{ParseResult, Parser};
use crate::wide::U128;

const MODE_SINGLE: u8 = 0b00;
const MODE_DOUBLE: u8 = 0b01;
const MODE_QUAD: u8 = 0b10;
const MODE_BIG: u8 = 0b11;

const MAX_SINGLE: u64 = (1 << 6) - 1;
const MAX_DOUBLE: u64 = (1 << 14) - 1;
const MAX_QUAD: u64 = (1 << 30) - 1;

/// Largest magnitude byte-length accepted in big-integer mode
pub const MAX_BIG_BYTES: usize = 16;

/// Number of bytes in the compact encoding of `v`
#[must_use]
pub const fn compact_len(v: U128) -> usize {
    if v.hi == 0 && v.lo <= MAX_SINGLE {
        1
    } else if v.hi == 0 && v.lo <= MAX_DOUBLE {
        2
    } else if v.hi == 0 && v.lo <= MAX_QUAD {
        4
    } else {
        1 + v.byte_len()
    }
}

/// Appends the compact encoding of `v` to `buf`, returning the number of bytes written.
pub fn write_compact<U: Target>(v: U128, buf: &mut U) -> usize {
    if v <= MAX_SINGLE {
        buf.push_one(((v.lo as u8) << 2) | MODE_SINGLE)
    } else if v <= MAX_DOUBLE {
        buf.push_many((((v.lo as u16) << 2) | MODE_DOUBLE as u16).to_le_bytes())
    } else if v <= MAX_QUAD {
        buf.push_many((((v.lo as u32) << 2) | MODE_QUAD as u32).to_le_bytes())
    } else {
        let n = v.byte_len();
        buf.anticipate(1 + n);
        let mut written = buf.push_one((((n - 4) as u8) << 2) | MODE_BIG);
        let mut rest = v;
        while !rest.is_zero() {
            written += buf.push_one(rest.low_byte());
            rest = rest.shift_right_byte();
        }
        written
    }
}

/// Consumes a compact encoding from `p` and returns its exact magnitude.
///
/// # Errors
///
/// Returns `ShortRead` if the input ends before the announced number of bytes,
/// and a `WidthViolation` if the big-integer length prefix announces more than
/// [`MAX_BIG_BYTES`] magnitude bytes.
pub fn parse_compact<P: Parser>(p: &mut P) -> ParseResult<U128> {
    let first = p.take_u8()?;
    match first & 0b11 {
        MODE_SINGLE => Ok(U128::from(first >> 2)),
        MODE_DOUBLE => {
            let second = p.take_u8()?;
            Ok(U128::from(u16::from_le_bytes([first, second]) >> 2))
        }
        MODE_QUAD => {
            let [b1, b2, b3] = p.consume_arr::<3>()?;
            Ok(U128::from(u32::from_le_bytes([first, b1, b2, b3]) >> 2))
        }
        _ => {
            let n = (first >> 2) as usize + 4;
            if n > MAX_BIG_BYTES {
                tracing::debug!(
                    offset = p.offset(),
                    announced = n,
                    "compact length prefix exceeds 128 bits"
                );
                return Err(WidthError::TooWide {
                    limit: MAX_BIG_BYTES,
                    actual: n,
                }
                .into());
            }
            let mut bytes = [0u8; 16];
            bytes[..n].copy_from_slice(p.consume(n)?);
            Ok(U128::from_le_bytes(bytes))
        }
    }
}

/// Integer types that may be carried in compact form
pub trait CompactMagnitude: Sized {
    /// Widens `self` into the magnitude that is actually encoded
    ///
    /// # Errors
    ///
    /// Fails only for arbitrary-precision values that need more than 128 bits.
    fn to_wide(&self) -> EncodeResult<U128>;

    /// Narrows a decoded magnitude into `Self`
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] if `wide` does not fit.
    fn from_wide(wide: U128) -> Result<Self, WidthError>;
}

macro_rules! impl_magnitude_prim {
    ($($t:ty),+) => {
        $(
            impl CompactMagnitude for $t {
                #[inline]
                fn to_wide(&self) -> EncodeResult<U128> {
                    Ok(U128::from(*self))
                }

                fn from_wide(wide: U128) -> Result<Self, WidthError> {
                    <$t>::try_from(wide.to_u128()).map_err(|_| WidthError::TooWide {
                        limit: std::mem::size_of::<$t>(),
                        actual: wide.byte_len(),
                    })
                }
            }
        )+
    };
}

impl_magnitude_prim!(u8, u16, u32, u64, u128);

impl CompactMagnitude for U128 {
    #[inline]
    fn to_wide(&self) -> EncodeResult<U128> {
        Ok(*self)
    }

    #[inline]
    fn from_wide(wide: U128) -> Result<Self, WidthError> {
        Ok(wide)
    }
}

impl CompactMagnitude for BigUint {
    fn to_wide(&self) -> EncodeResult<U128> {
        U128::try_from(self).map_err(EncodeError::from)
    }

    fn from_wide(wide: U128) -> Result<Self, WidthError> {
        Ok(wide.to_big())
    }
}

/// Wrapper selecting the compact encoding for an unsigned integer
///
/// A bare `u32` is always four bytes on the wire; `Compact<u32>` is between
/// one and five.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Compact<T>(pub T);

impl<T> Compact<T> {
    pub const fn new(val: T) -> Self {
        Self(val)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Compact<T> {
    fn from(val: T) -> Self {
        Self(val)
    }
}

impl<T> std::ops::Deref for Compact<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: CompactMagnitude> Encode for Compact<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(write_compact(self.0.to_wide()?, buf))
    }
}

impl<T: CompactMagnitude> Decode for Compact<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let wide = parse_compact(p)?;
        match T::from_wide(wide) {
            Ok(val) => Ok(Self(val)),
            Err(err) => {
                tracing::debug!(
                    target_type = std::any::type_name::<T>(),
                    value = %wide,
                    "compact magnitude does not fit target type"
                );
                Err(err.into())
            }
        }
    }
}

impl<T: CompactMagnitude> Estimable for Compact<T> {
    const KNOWN: Option<usize> = None;

    /// Values that cannot be encoded are measured as if saturated to [`U128::MAX`].
    fn unknown(&self) -> usize {
        compact_len(self.0.to_wide().unwrap_or(U128::MAX))
    }
}

#[cfg(feature = "serde_impls")]
impl<T: serde::Serialize> serde::Serialize for Compact<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde_impls")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Compact<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self)
    }
}
