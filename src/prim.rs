//! Primitive codecs: unit, booleans, fixed-width integers, and optional booleans
//!
//! Fixed-width integers are written as exactly as many bytes as their width,
//! least-significant byte first, using two's complement for signed types.
//! Signedness affects only the interpretation of the bytes, never their layout.

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::error::{TagError, TokenError};
use crate::parse::{ParseResult, Parser};

impl Encode for () {
    #[inline(always)]
    fn write_to<U: Target>(&self, _: &mut U) -> EncodeResult<usize> {
        Ok(0)
    }

    #[inline(always)]
    fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl Decode for () {
    #[inline]
    fn parse<P: Parser>(_: &mut P) -> ParseResult<()> {
        Ok(())
    }
}

impl Encode for bool {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_one(u8::from(*self)))
    }
}

impl Decode for bool {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_bool()
    }
}

macro_rules! impl_fixed_int {
    ( $( $t:ty => $take:ident ),+ $(,)? ) => {
        $(
            impl Encode for $t {
                #[inline]
                fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
                    Ok(buf.push_many(self.to_le_bytes()))
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    p.$take()
                }
            }
        )+
    };
}

impl_fixed_int!(
    u8 => take_u8,
    i8 => take_i8,
    u16 => take_u16,
    i16 => take_i16,
    u32 => take_u32,
    i32 => take_i32,
    u64 => take_u64,
    i64 => take_i64,
);

/// Three-state boolean packed into a single byte
///
/// This is a specialized encoding of `Option<bool>` that avoids a separate
/// option tag: `None` is `0x00`, `Some(true)` is `0x01`, and `Some(false)` is `0x02`.
/// Plain `Option<bool>` retains the generic two-byte encoding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct OptionBool(pub Option<bool>);

impl OptionBool {
    pub const NONE: Self = Self(None);

    /// Decoded value for each tag byte, indexed by tag
    const BY_TAG: [Option<bool>; 3] = [None, Some(true), Some(false)];

    #[must_use]
    pub const fn new(val: Option<bool>) -> Self {
        Self(val)
    }

    #[must_use]
    pub const fn into_inner(self) -> Option<bool> {
        self.0
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    const fn tag(self) -> u8 {
        match self.0 {
            None => 0x00,
            Some(true) => 0x01,
            Some(false) => 0x02,
        }
    }
}

impl From<Option<bool>> for OptionBool {
    fn from(val: Option<bool>) -> Self {
        Self(val)
    }
}

impl From<OptionBool> for Option<bool> {
    fn from(val: OptionBool) -> Self {
        val.0
    }
}

impl Encode for OptionBool {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_one(self.tag()))
    }
}

impl Decode for OptionBool {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let tag = p.take_u8()?;
        match Self::BY_TAG.get(usize::from(tag)) {
            Some(&val) => Ok(Self(val)),
            None => Err(TokenError::InvalidTag(TagError::with_type::<Self>(
                tag,
                Some(vec![0x00, 0x01, 0x02]),
            ))
            .into()),
        }
    }
}

crate::conv::len::fix_length!(1, OptionBool);
