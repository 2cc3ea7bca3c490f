//! Core of the binary-conversion API
//!
//! This module contains definitions for the high-level transcoding traits
//! `Encode` and `Decode`, which together form the capability every value
//! participating in the format must have. They are motivationally equivalent
//! to the `Serialize` and `Deserialize` traits defined in `serde`, but are
//! tied to a single wire format and carry no data model of their own.
//!
//! Every combinator in this crate ([`Option`], [`Outcome`](crate::outcome::Outcome),
//! tuples, [`Compact`](crate::compact::Compact), and enums declared through
//! [`scale_enum!`](crate::scale_enum)) is written against these traits rather
//! than against concrete types, and therefore composes to arbitrary depth.
//!
//! The sub-module [`len`], which defines `Estimable` and its refinements, offers
//! an exact oracle for the serialized length of a value; it is a convenience and
//! may be ignored by consumers that only need `Encode` and `Decode`.
//!
//! An additional submodule, [`target`], offers an abstraction along the lines of
//! [`std::io::Write`], namely the [`target::Target`] trait. This is the dual to
//! [`crate::parse::Parser`], acting as the generic bound for serialization in the
//! [`Encode::write_to`] method.

use crate::parse::byteparser::SliceParser;
use crate::parse::{ParseResult, Parser, TryIntoParser};

use self::target::Target;

pub mod error;
pub mod len;
pub mod target;

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

/// Writes each expression in sequence into the target `$tgt`, short-circuiting
/// on the first failure, and evaluates to the total number of bytes written.
///
/// This is the field-by-field body of `write_to` for product types:
///
/// ```
/// use scale_model::{write_all_to, Encode, EncodeResult, Target};
///
/// struct Header {
///     version: u8,
///     flags: Option<bool>,
/// }
///
/// impl Encode for Header {
///     fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
///         write_all_to!(self.version, self.flags => buf)
///     }
/// }
///
/// let h = Header { version: 2, flags: None };
/// assert_eq!(h.to_bytes().unwrap(), vec![0x02, 0x00]);
/// ```
#[macro_export]
macro_rules! write_all_to {
    ($($x:expr),* $(,)? => $tgt:expr) => {
        (|| -> $crate::conv::EncodeResult<usize> {
            Ok(0usize $( + $crate::conv::Encode::write_to(&$x, &mut *$tgt)? )*)
        })()
    };
}

/// Trait for types that support serialization into the binary format
///
/// Implementing [`Encode`] can be as simple as providing a definition of the required
/// method [`write_to`](Encode::write_to). The natural definition of this method is
/// structurally inductive on the fields of the type in question.
///
/// # Errors
///
/// Encoding fails only when a value (or one of its nested payloads) has no
/// valid wire form, such as an [`Outcome::Unset`](crate::outcome::Outcome::Unset).
/// When `write_to` fails, the target may contain a partial prefix of the encoding;
/// methods that allocate their own buffer discard it.
pub trait Encode {
    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize>;

    /// Appends the serialized bytes of this value to a monomorphized [`Vec<u8>`] buffer.
    #[inline]
    fn write_to_vec(&self, buf: &mut Vec<u8>) -> EncodeResult<()> {
        self.write_to(buf).map(|_| ())
    }

    /// Creates a [`Vec<u8>`] and fills it with the serialized bytes of this value.
    #[inline]
    fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf)?;
        Ok(buf)
    }
}

/// Extension trait for `Encode` that makes use of serialization-length oracles
///
/// This trait defines additional methods on an `Encode` type, which can determine
/// the exact number of bytes in the serialized version of a value without requiring
/// allocations, as well as an optimization of [`Encode::to_bytes`] that
/// makes use of this prediction to avoid reallocation costs.
pub trait EncodeLength: Encode {
    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`.
    ///
    /// The default implementation invokes [`Encode::write_to`] over the
    /// zero-allocation target [`ByteCounter`](target::ByteCounter).
    ///
    /// If the feature flag `enc_len_estimable_override` is enabled, the
    /// [`Estimable::estimate`](len::Estimable::estimate) method is used instead.
    #[inline]
    fn enc_len(&self) -> EncodeResult<usize> {
        self.write_to(&mut std::io::sink())
    }

    /// Pre-determines the exact number of bytes required to serialize `self`,
    /// and returns a `Vec<u8>` initialized to that capacity, which contains
    /// the serialized bytes of `self`
    fn to_bytes_full(&self) -> EncodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.enc_len()?);
        self.write_to_vec(&mut buf)?;
        Ok(buf)
    }
}

impl<T: Encode + len::Estimable + ?Sized> EncodeLength for T {
    #[cfg(feature = "enc_len_estimable_override")]
    fn enc_len(&self) -> EncodeResult<usize> {
        Ok(self.estimate())
    }
}

/// Trait providing methods for deserializing binary data into values of a certain type
///
/// Implementations are defined by one required method, [`parse`](Decode::parse),
/// which attempts to consume exactly the number of bytes the type structurally
/// requires from a [`Parser`], returning either the value or the first error
/// encountered.
///
/// # Example
///
/// A typical hand-written implementation of `Decode` is provided below:
///
/// ```
/// use scale_model::{Decode, Encode, Parser, ParseResult};
///
/// #[derive(Debug, PartialEq)]
/// pub struct Account {
///     is_valid: bool,
///     id: u16,
/// }
///
/// impl Decode for Account {
///     fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
///         Ok(Self {
///             is_valid: bool::parse(p)?,
///             id: u16::parse(p)?,
///         })
///     }
/// }
///
/// assert_eq!(
///     Account::from_bytes(&[0x01, 0x2a, 0x00]).unwrap(),
///     Account { is_valid: true, id: 42 }
/// );
/// ```
pub trait Decode {
    /// Attempt to consume and interpret a value of type `Self` from an existing
    /// `Parser` object.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method will be propagated from
    /// calls made to [`Parser`] methods in the implementation logic.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Decodes a value into an existing, caller-owned slot.
    ///
    /// The default implementation overwrites `self` with a freshly parsed value.
    /// Composite types may override this to decode into their existing fields in
    /// place. If an error is returned, the contents of `self` are unspecified.
    fn parse_into<P: Parser>(&mut self, p: &mut P) -> ParseResult<()>
    where
        Self: Sized,
    {
        *self = Self::parse(p)?;
        Ok(())
    }

    /// Attempt to decode a value of the `Self` type from a value `input` of the
    /// generic type `U: TryIntoParser<P>`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by parser construction or by [`parse`](Decode::parse).
    ///
    /// In addition, if the feature-flag `check_complete_parse` is enabled,
    /// any bytes left unconsumed after parsing are reported as
    /// [`DecodeError::NonEmpty`].
    fn try_decode<U, P>(input: U) -> DecodeResult<Self>
    where
        Self: Sized,
        P: Parser,
        U: TryIntoParser<P>,
        DecodeError: From<U::Error>,
    {
        let mut p: P = input.try_into_parser()?;
        let ret = match Self::parse(&mut p) {
            Ok(ret) => ret,
            Err(err) => {
                tracing::debug!(
                    target_type = std::any::type_name::<Self>(),
                    offset = p.offset(),
                    error = %err,
                    "decode failed"
                );
                return Err(err.into());
            }
        };
        cfg_if::cfg_if! {
            if #[cfg(feature = "check_complete_parse")] {
                let rest = p.into_leftover()?;
                if !rest.is_empty() {
                    return Err(DecodeError::NonEmpty(rest));
                }
            }
        }
        Ok(ret)
    }

    /// Decodes a value of type `Self` from a borrowed byte slice, without copying it.
    fn from_bytes(bytes: &[u8]) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        Self::try_decode::<_, SliceParser<'_>>(bytes)
    }

    /// Decodes a value of type `Self` from a value `input` of the generic
    /// type `U: TryIntoParser`, using [`ByteParser`] as the `Parser` type internally.
    ///
    /// # Panics
    ///
    /// This method will panic if the interior call to [`try_decode`](Decode::try_decode)
    /// returns an `Err(_)` value.
    ///
    /// [`ByteParser`]: crate::parse::byteparser::ByteParser
    fn decode<U>(inp: U) -> Self
    where
        Self: Sized,
        U: TryIntoParser,
        DecodeError: From<U::Error>,
    {
        Self::try_decode(inp).unwrap_or_else(|err| {
            panic!(
                "<{} as Decode>::decode encountered error: {:?}",
                std::any::type_name::<Self>(),
                err
            )
        })
    }
}
