//! Tagged enumerations
//!
//! An enumerated value is written as a single discriminant byte, equal to the
//! zero-based declaration index of its variant, followed by the encoding of the
//! variant's payload (nothing, for unit variants).
//!
//! Decoding is table-driven: each enumerated type supplies one
//! [`VariantDecoder`] per variant, in declaration order, and the shared
//! [`dispatch`] routine reads the discriminant and hands the rest of the input
//! to the corresponding entry. Payload types are arbitrary [`Decode`] types, so
//! a variant may hold another enumeration, or (through `Box`) the enclosing
//! type itself.
//!
//! Most enumerations are declared through [`scale_enum!`](crate::scale_enum),
//! which generates the table along with the `Encode`, `Decode`, `Estimable`
//! and [`Enumerated`] implementations.
//!
//! ```
//! scale_model::scale_enum! {
//!     #[derive(Debug, PartialEq)]
//!     pub enum Expr {
//!         Zero,
//!         Lit(u32),
//!         Neg(Box<Expr>),
//!     }
//! }
//!
//! use scale_model::{Decode, Encode};
//!
//! let e = Expr::Neg(Box::new(Expr::Lit(3)));
//! let bytes = e.to_bytes().unwrap();
//! assert_eq!(bytes, vec![0x02, 0x01, 0x03, 0x00, 0x00, 0x00]);
//! assert_eq!(Expr::from_bytes(&bytes).unwrap(), e);
//! ```
//!
//! [`Decode`]: crate::conv::Decode

use crate::parse::error::{InternalError, ParseError, TagError, TokenError};
use crate::parse::{ParseResult, Parser};

/// Enumerated types with a declaration-order discriminant
pub trait Enumerated {
    /// Number of declared variants
    const VARIANT_COUNT: usize;

    /// Discriminant byte written ahead of the payload of `self`
    fn discriminant(&self) -> u8;
}

/// Decoder for the payload of one variant, producing the full enumerated value
pub type VariantDecoder<P, T> = fn(&mut P) -> ParseResult<T>;

/// Reads a discriminant byte and decodes the remainder with the matching table entry.
///
/// # Errors
///
/// A discriminant with no entry in `arms` yields [`TokenError::InvalidEnumTag`].
/// Errors from the selected decoder are returned unchanged.
pub fn dispatch<P, T>(p: &mut P, arms: &[VariantDecoder<P, T>]) -> ParseResult<T>
where
    P: Parser,
{
    if arms.is_empty() {
        return Err(InternalError::NoValidTags.into());
    }
    let offset = p.offset();
    let tag = p.take_u8()?;
    match arms.get(usize::from(tag)) {
        Some(arm) => arm(p),
        None => {
            tracing::debug!(
                target_type = std::any::type_name::<T>(),
                offset,
                discriminant = tag,
                variants = arms.len(),
                "unrecognized enum discriminant"
            );
            let expected = (0..arms.len()).map(|ix| ix as u8).collect();
            Err(ParseError::Token(TokenError::InvalidEnumTag(
                TagError::with_type::<T>(tag, Some(expected)),
            )))
        }
    }
}

/// Declares an enumeration whose variants are either unit or hold a single payload,
/// and implements the wire format for it.
///
/// Variants are numbered from zero in declaration order; at most 256 variants
/// are supported. Every payload type must implement `Encode`, `Decode` and `Estimable`.
#[macro_export]
macro_rules! scale_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $vname:ident $( ( $ty:ty ) )? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $vname $( ( $ty ) )? ),+
        }

        impl $crate::adt::Enumerated for $name {
            const VARIANT_COUNT: usize = [$( stringify!($vname) ),+].len();

            fn discriminant(&self) -> u8 {
                #[repr(u8)]
                enum Tag {
                    $( $vname ),+
                }

                match self {
                    $(
                        $crate::__scale_enum_pat!($name::$vname, _inner $(, $ty)?) => Tag::$vname as u8,
                    )+
                }
            }
        }

        impl $crate::conv::Encode for $name {
            fn write_to<U: $crate::conv::target::Target>(
                &self,
                buf: &mut U,
            ) -> $crate::conv::error::EncodeResult<usize> {
                let tag = $crate::adt::Enumerated::discriminant(self);
                match self {
                    $(
                        $crate::__scale_enum_pat!($name::$vname, inner $(, $ty)?) =>
                            $crate::__scale_enum_write!(buf, tag, inner $(, $ty)?),
                    )+
                }
            }
        }

        impl $crate::conv::Decode for $name {
            fn parse<P: $crate::parse::Parser>(p: &mut P) -> $crate::parse::ParseResult<Self> {
                let arms: &[$crate::adt::VariantDecoder<P, Self>] = &[
                    $( $crate::__scale_enum_arm!($name::$vname $(, $ty)?) ),+
                ];
                $crate::adt::dispatch(p, arms)
            }
        }

        impl $crate::conv::len::Estimable for $name {
            const KNOWN: ::core::option::Option<usize> = ::core::option::Option::None;

            fn unknown(&self) -> usize {
                match self {
                    $(
                        $crate::__scale_enum_pat!($name::$vname, inner $(, $ty)?) =>
                            1 + $crate::__scale_enum_len!(inner $(, $ty)?),
                    )+
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scale_enum_pat {
    ($name:ident :: $vname:ident, $bind:ident) => {
        $name::$vname
    };
    ($name:ident :: $vname:ident, $bind:ident, $ty:ty) => {
        $name::$vname($bind)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scale_enum_write {
    ($buf:ident, $tag:ident, $bind:ident) => {
        ::core::result::Result::Ok($crate::conv::target::Target::push_one(&mut *$buf, $tag))
    };
    ($buf:ident, $tag:ident, $bind:ident, $ty:ty) => {
        ::core::result::Result::Ok(
            $crate::conv::target::Target::push_one(&mut *$buf, $tag)
                + $crate::conv::Encode::write_to($bind, &mut *$buf)?,
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scale_enum_arm {
    ($name:ident :: $vname:ident) => {
        |_| ::core::result::Result::Ok($name::$vname)
    };
    ($name:ident :: $vname:ident, $ty:ty) => {
        |p| {
            ::core::result::Result::Ok($name::$vname(
                <$ty as $crate::conv::Decode>::parse(p)?,
            ))
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scale_enum_len {
    ($bind:ident) => {
        0
    };
    ($bind:ident, $ty:ty) => {
        $crate::conv::len::Estimable::estimate($bind)
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::len::Estimable;
    use crate::conv::{Decode, Encode};
    use crate::outcome::Outcome;
    use crate::parse::byteparser::SliceParser;
    use crate::DecodeError;

    crate::scale_enum! {
        #[derive(Debug, PartialEq, Clone)]
        pub(crate) enum Shape {
            Dot,
            Square(u16),
            Pair((u8, bool)),
            Maybe(Option<u32>),
        }
    }

    crate::scale_enum! {
        #[derive(Debug, PartialEq)]
        pub(crate) enum Chain {
            End,
            Link(Option<Box<Chain>>),
            Fallible(Outcome<u8, Shape>),
        }
    }

    #[test]
    fn discriminants_follow_declaration_order() {
        assert_eq!(Shape::Dot.discriminant(), 0);
        assert_eq!(Shape::Square(1).discriminant(), 1);
        assert_eq!(Shape::Pair((0, false)).discriminant(), 2);
        assert_eq!(Shape::Maybe(None).discriminant(), 3);
        assert_eq!(Shape::VARIANT_COUNT, 4);
    }

    #[test]
    fn unit_and_payload_bytes() {
        assert_eq!(Shape::Dot.to_bytes().unwrap(), vec![0x00]);
        assert_eq!(
            Shape::Square(0x0102).to_bytes().unwrap(),
            vec![0x01, 0x02, 0x01]
        );
        assert_eq!(
            Shape::Pair((9, true)).to_bytes().unwrap(),
            vec![0x02, 0x09, 0x01]
        );
        assert_eq!(Shape::Maybe(None).to_bytes().unwrap(), vec![0x03, 0x00]);
    }

    #[test]
    fn decode_every_variant() {
        for v in [
            Shape::Dot,
            Shape::Square(500),
            Shape::Pair((3, false)),
            Shape::Maybe(Some(7)),
        ] {
            let bytes = v.to_bytes().unwrap();
            assert_eq!(Shape::from_bytes(&bytes).unwrap(), v);
            assert_eq!(v.estimate(), bytes.len());
        }
    }

    #[test]
    fn unknown_discriminant() {
        match Shape::from_bytes(&[0x04]) {
            Err(DecodeError::Parse(err)) => {
                assert!(err.is_unrecognized_tag());
                match err {
                    ParseError::Token(TokenError::InvalidEnumTag(tag)) => {
                        assert_eq!(tag.actual(), 0x04);
                        assert_eq!(tag.expected(), Some(&[0u8, 1, 2, 3][..]));
                    }
                    other => panic!("unexpected error {:?}", other),
                }
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn recursive_chain() {
        let chain = Chain::Link(Some(Box::new(Chain::Link(Some(Box::new(Chain::Link(
            None,
        )))))));
        let bytes = chain.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x01, 0x01, 0x01, 0x01, 0x01, 0x00]);
        assert_eq!(Chain::from_bytes(&bytes).unwrap(), chain);
    }

    #[test]
    fn unset_payload_fails_encode() {
        assert!(Chain::Fallible(Outcome::Unset).to_bytes().is_err());
        assert_eq!(
            Chain::Fallible(Outcome::Err(Shape::Square(1)))
                .to_bytes()
                .unwrap(),
            vec![0x02, 0x01, 0x01, 0x01, 0x00]
        );
    }

    #[test]
    fn hand_written_table() {
        type Src = SliceParser<'static>;

        fn lhs(p: &mut Src) -> ParseResult<i16> {
            p.take_i16()
        }
        fn rhs(p: &mut Src) -> ParseResult<i16> {
            p.take_i8().map(i16::from)
        }
        const INPUT: &[u8] = &[0x01, 0xff, 0x00, 0x02, 0x01];
        let arms: [VariantDecoder<Src, i16>; 2] = [lhs, rhs];
        let mut p = SliceParser::new(INPUT);
        assert_eq!(dispatch(&mut p, &arms).unwrap(), -1);
        assert_eq!(dispatch(&mut p, &arms).unwrap(), 0x0102);
    }

    #[test]
    fn empty_table_is_internal_error() {
        let mut p = SliceParser::new(&[0x00]);
        let arms: [VariantDecoder<SliceParser<'_>, ()>; 0] = [];
        assert!(matches!(
            dispatch(&mut p, &arms),
            Err(ParseError::Internal(InternalError::NoValidTags))
        ));
    }
}
