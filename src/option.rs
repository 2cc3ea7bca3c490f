//! Optional values: a presence byte followed by the payload when present
//!
//! `None` is the single byte `0x00`; `Some(v)` is `0x01` followed by the
//! encoding of `v`. Any other leading byte is rejected.

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

const TAG_NONE: u8 = 0x00;
const TAG_SOME: u8 = 0x01;

impl<T: Encode> Encode for Option<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        match self {
            Some(val) => Ok(buf.push_one(TAG_SOME) + val.write_to(buf)?),
            None => Ok(buf.push_one(TAG_NONE)),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        parse_option_with(p, T::parse)
    }

    /// Reuses an already-populated payload slot when the input is also `Some`.
    fn parse_into<P: Parser>(&mut self, p: &mut P) -> ParseResult<()> {
        if take_presence::<T, P>(p)? {
            match self {
                Some(slot) => slot.parse_into(p)?,
                None => *self = Some(T::parse(p)?),
            }
        } else {
            *self = None;
        }
        Ok(())
    }
}

fn take_presence<T, P: Parser>(p: &mut P) -> ParseResult<bool> {
    Ok(p.take_tagword::<Option<T>, _>([TAG_NONE, TAG_SOME])? == TAG_SOME)
}

/// Decodes an optional value whose payload is read by a caller-supplied function.
///
/// The payload decoder is invoked only when the presence byte is `0x01`.
///
/// ```
/// use scale_model::option::parse_option_with;
/// use scale_model::{ByteParser, Parser};
///
/// let mut p = ByteParser::new(vec![0x01, 0x2a, 0x00]);
/// let v = parse_option_with(&mut p, |p| p.take_u16()).unwrap();
/// assert_eq!(v, Some(42));
/// ```
pub fn parse_option_with<T, P, F>(p: &mut P, payload: F) -> ParseResult<Option<T>>
where
    P: Parser,
    F: FnOnce(&mut P) -> ParseResult<T>,
{
    if take_presence::<T, P>(p)? {
        Ok(Some(payload(p)?))
    } else {
        Ok(None)
    }
}
