//! Unsigned 128-bit integer held as two 64-bit words
//!
//! [`U128`] is a plain value type: it is `Copy`, carries no heap state, and
//! is written on the wire as sixteen bytes, the low word first, each word
//! little-endian. This is byte-for-byte the same as the little-endian form
//! of the equivalent `u128`, and the conversions in both directions are lossless.
//!
//! Conversions from [`BigUint`] are the only place a magnitude can exceed
//! the representable range. The strict conversion ([`TryFrom<&BigUint>`])
//! fails with [`WidthError::TooWide`]; saturation is available only through
//! the explicitly named [`U128::from_big_saturating`].

use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use num_bigint::BigUint;
use num_integer::Integer;

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::error::WidthError;
use crate::parse::{ParseResult, Parser};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U128 {
    pub lo: u64,
    pub hi: u64,
}

impl U128 {
    pub const ZERO: Self = Self { lo: 0, hi: 0 };
    pub const MAX: Self = Self {
        lo: u64::MAX,
        hi: u64::MAX,
    };

    #[must_use]
    pub const fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub const fn from_u128(val: u128) -> Self {
        Self {
            lo: val as u64,
            hi: (val >> 64) as u64,
        }
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Number of leading zero bits across both words
    #[must_use]
    pub const fn leading_zeros(&self) -> u32 {
        if self.hi == 0 {
            64 + self.lo.leading_zeros()
        } else {
            self.hi.leading_zeros()
        }
    }

    /// Minimal number of bytes needed to hold the magnitude (`0` for zero)
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        (128 - self.leading_zeros() as usize + 7) / 8
    }

    /// Least significant byte of the low word
    #[must_use]
    pub const fn low_byte(&self) -> u8 {
        self.lo as u8
    }

    /// Shifts the value right by eight bits, carrying from `hi` into `lo`
    #[must_use]
    pub const fn shift_right_byte(self) -> Self {
        Self {
            lo: (self.lo >> 8) | (self.hi << 56),
            hi: self.hi >> 8,
        }
    }

    /// Little-endian byte form, identical to the wire form
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.to_u128().to_le_bytes()
    }

    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self::from_u128(u128::from_le_bytes(bytes))
    }

    /// Converts an arbitrary-precision integer, clamping to [`U128::MAX`]
    /// when the magnitude needs more than 128 bits.
    #[must_use]
    pub fn from_big_saturating(big: &BigUint) -> Self {
        Self::try_from(big).unwrap_or(Self::MAX)
    }

    #[must_use]
    pub fn to_big(&self) -> BigUint {
        BigUint::from(self.to_u128())
    }
}

impl Debug for U128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U128({:#x})", self.to_u128())
    }
}

impl Display for U128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_u128(), f)
    }
}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialEq<u64> for U128 {
    fn eq(&self, other: &u64) -> bool {
        self.hi == 0 && self.lo == *other
    }
}

impl PartialOrd<u64> for U128 {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        if self.hi != 0 {
            Some(Ordering::Greater)
        } else {
            self.lo.partial_cmp(other)
        }
    }
}

impl From<u128> for U128 {
    fn from(val: u128) -> Self {
        Self::from_u128(val)
    }
}

impl From<U128> for u128 {
    fn from(val: U128) -> Self {
        val.to_u128()
    }
}

macro_rules! impl_from_narrow {
    ($($t:ty),+) => {
        $(
            impl From<$t> for U128 {
                fn from(val: $t) -> Self {
                    Self { lo: u64::from(val), hi: 0 }
                }
            }
        )+
    };
}

impl_from_narrow!(u8, u16, u32, u64);

impl TryFrom<U128> for u64 {
    type Error = WidthError;

    fn try_from(val: U128) -> Result<Self, Self::Error> {
        if val.hi == 0 {
            Ok(val.lo)
        } else {
            Err(WidthError::TooWide {
                limit: 8,
                actual: val.byte_len(),
            })
        }
    }
}

impl TryFrom<&BigUint> for U128 {
    type Error = WidthError;

    fn try_from(big: &BigUint) -> Result<Self, Self::Error> {
        if big.bits() > 128 {
            return Err(WidthError::TooWide {
                limit: 16,
                actual: big_byte_len(big),
            });
        }
        let mut words = big.iter_u64_digits();
        let lo = words.next().unwrap_or(0);
        let hi = words.next().unwrap_or(0);
        Ok(Self { lo, hi })
    }
}

/// Number of bytes needed to hold `big` in little-endian form
#[must_use]
pub fn big_byte_len(big: &BigUint) -> usize {
    Integer::div_ceil(&big.bits(), &8) as usize
}

impl From<U128> for BigUint {
    fn from(val: U128) -> Self {
        val.to_big()
    }
}

impl Encode for U128 {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_many(self.lo.to_le_bytes()) + buf.push_many(self.hi.to_le_bytes()))
    }
}

impl Decode for U128 {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let lo = p.take_u64()?;
        let hi = p.take_u64()?;
        Ok(Self { lo, hi })
    }
}

crate::conv::len::fix_length!(16, U128);

#[cfg(feature = "serde_impls")]
impl serde::Serialize for U128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u128(self.to_u128())
    }
}

#[cfg(feature = "serde_impls")]
impl<'de> serde::Deserialize<'de> for U128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <u128 as serde::Deserialize>::deserialize(deserializer).map(Self::from_u128)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire_form_matches_u128() {
        let v: u128 = 0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10;
        let w = U128::from(v);
        assert_eq!(w.lo, 0x090a_0b0c_0d0e_0f10);
        assert_eq!(w.hi, 0x0102_0304_0506_0708);
        assert_eq!(w.to_bytes().unwrap(), v.to_le_bytes().to_vec());
        assert_eq!(U128::from_bytes(&v.to_le_bytes()).unwrap(), w);
    }

    #[test]
    fn byte_len_boundaries() {
        assert_eq!(U128::ZERO.byte_len(), 0);
        assert_eq!(U128::from(0xffu8).byte_len(), 1);
        assert_eq!(U128::from(0x100u16).byte_len(), 2);
        assert_eq!(U128::from(u64::MAX).byte_len(), 8);
        assert_eq!(U128::new(0, 1).byte_len(), 9);
        assert_eq!(U128::MAX.byte_len(), 16);
    }

    #[test]
    fn shift_carries_between_words() {
        let v = U128::new(0x00, 0xab);
        let shifted = v.shift_right_byte();
        assert_eq!(shifted, U128::new(0xab << 56, 0));
        assert_eq!(U128::from(0x1234u16).shift_right_byte().low_byte(), 0x12);
    }

    #[test]
    fn ordering_against_u64() {
        assert!(U128::new(0, 1) > u64::MAX);
        assert!(U128::from(5u8) < 6u64);
        assert!(U128::from(63u8) == 63u64);
        assert!(U128::new(u64::MAX, 0) < U128::new(0, 1));
    }

    #[test]
    fn big_conversion_strict_and_saturating() {
        let fits = BigUint::from(u128::MAX);
        assert_eq!(U128::try_from(&fits).unwrap(), U128::MAX);

        let over = BigUint::from(u128::MAX) + 1u8;
        assert_eq!(
            U128::try_from(&over),
            Err(WidthError::TooWide {
                limit: 16,
                actual: 17
            })
        );
        assert_eq!(U128::from_big_saturating(&over), U128::MAX);
        assert_eq!(U128::from(77u8).to_big(), BigUint::from(77u8));
    }

    #[test]
    fn truncated_input_is_short_read() {
        let bytes = [0xffu8; 16];
        for len in [0, 8, 15] {
            match U128::from_bytes(&bytes[..len]) {
                Err(crate::DecodeError::Parse(err)) => assert!(err.is_short_read()),
                other => panic!("unexpected result for {} bytes: {:?}", len, other),
            }
        }
        assert_eq!(U128::from_bytes(&bytes).unwrap(), U128::MAX);
    }

    #[test]
    fn narrow_to_u64() {
        assert_eq!(u64::try_from(U128::from(9u8)), Ok(9));
        assert!(u64::try_from(U128::MAX).is_err());
    }

    #[cfg(feature = "serde_impls")]
    #[test]
    fn serde_as_u128() {
        use serde::de::IntoDeserializer;
        use serde::Deserialize;

        let de: serde::de::value::U128Deserializer<serde::de::value::Error> =
            u128::MAX.into_deserializer();
        assert_eq!(U128::deserialize(de).unwrap(), U128::MAX);
    }
}
