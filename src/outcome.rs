//! Two-branch success/failure values
//!
//! On the wire, a success is `0x00` followed by the success payload and a
//! failure is `0x01` followed by the failure payload.
//!
//! [`Outcome`] is the slot type for values that are assembled incrementally and
//! may not yet hold either branch; encoding an [`Outcome::Unset`] fails with
//! [`EncodeError::EmptyValue`]. The standard [`Result`] shares the same wire form
//! and, having no empty state, always encodes.

use crate::conv::error::{EncodeError, EncodeResult};
use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

const TAG_OK: u8 = 0x00;
const TAG_ERR: u8 = 0x01;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Outcome<T, E> {
    Ok(T),
    Err(E),
    Unset,
}

impl<T, E> Default for Outcome<T, E> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T, E> Outcome<T, E> {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(v) => Some(v),
            _ => None,
        }
    }

    pub fn err(self) -> Option<E> {
        match self {
            Self::Err(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(v) => Outcome::Ok(v),
            Self::Err(e) => Outcome::Err(e),
            Self::Unset => Outcome::Unset,
        }
    }

    /// Converts into a standard [`Result`], or `None` if neither branch is set.
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Self::Ok(v) => Some(Ok(v)),
            Self::Err(e) => Some(Err(e)),
            Self::Unset => None,
        }
    }

    /// Returns the success payload.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a failure or is unset.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(_) => panic!("called `Outcome::unwrap()` on an `Err` value"),
            Self::Unset => panic!("called `Outcome::unwrap()` on an `Unset` value"),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

impl<T: Encode, E: Encode> Encode for Outcome<T, E> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        match self {
            Self::Ok(v) => Ok(buf.push_one(TAG_OK) + v.write_to(buf)?),
            Self::Err(e) => Ok(buf.push_one(TAG_ERR) + e.write_to(buf)?),
            Self::Unset => Err(EncodeError::empty::<Self>()),
        }
    }
}

impl<T: Decode, E: Decode> Decode for Outcome<T, E> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        parse_outcome_with(p, T::parse, E::parse).map(Self::from)
    }

    /// Reuses the payload slot when the decoded branch matches the current one.
    fn parse_into<P: Parser>(&mut self, p: &mut P) -> ParseResult<()> {
        match (take_branch::<Self, P>(p)?, self) {
            (TAG_OK, Self::Ok(slot)) => slot.parse_into(p),
            (TAG_OK, this) => {
                *this = Self::Ok(T::parse(p)?);
                Ok(())
            }
            (_, Self::Err(slot)) => slot.parse_into(p),
            (_, this) => {
                *this = Self::Err(E::parse(p)?);
                Ok(())
            }
        }
    }
}

impl<T: Estimable, E: Estimable> Estimable for Outcome<T, E> {
    const KNOWN: Option<usize> = None;

    /// An unset slot has no encoding and is measured as zero bytes.
    fn unknown(&self) -> usize {
        match self {
            Self::Ok(v) => 1 + v.estimate(),
            Self::Err(e) => 1 + e.estimate(),
            Self::Unset => 0,
        }
    }
}

impl<T: Encode, E: Encode> Encode for Result<T, E> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        match self {
            Ok(v) => Ok(buf.push_one(TAG_OK) + v.write_to(buf)?),
            Err(e) => Ok(buf.push_one(TAG_ERR) + e.write_to(buf)?),
        }
    }
}

impl<T: Decode, E: Decode> Decode for Result<T, E> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        parse_outcome_with(p, T::parse, E::parse)
    }
}

fn take_branch<S: ?Sized, P: Parser>(p: &mut P) -> ParseResult<u8> {
    p.take_tagword::<S, _>([TAG_OK, TAG_ERR])
}

/// Decodes a two-branch value whose payloads are read by caller-supplied functions.
///
/// Exactly one of `ok` and `err` is invoked, chosen by the leading tag byte.
pub fn parse_outcome_with<T, E, P, F, G>(p: &mut P, ok: F, err: G) -> ParseResult<Result<T, E>>
where
    P: Parser,
    F: FnOnce(&mut P) -> ParseResult<T>,
    G: FnOnce(&mut P) -> ParseResult<E>,
{
    match take_branch::<Result<T, E>, P>(p)? {
        TAG_OK => Ok(Ok(ok(p)?)),
        _ => Ok(Err(err(p)?)),
    }
}
