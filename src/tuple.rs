//! Fixed-arity products
//!
//! A tuple is encoded as the concatenation of its fields in positional order,
//! with no length prefix or separator; decoding reads each field in the same order.
//! Implementations are provided for arities 1 through 12.
//!
//! The [`TupleAccess`] trait offers positional, type-erased access to the fields
//! of a tuple through the object-safe [`DynEncode`].

use crate::conv::error::EncodeResult;
use crate::conv::len::{sum_known, Estimable};
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

/// Object-safe view of an [`Encode`] value
pub trait DynEncode {
    /// Appends the encoding of `self` to `buf`
    fn dyn_write(&self, buf: &mut Vec<u8>) -> EncodeResult<usize>;

    /// Exact length of the encoding of `self`, without allocating
    fn dyn_len(&self) -> EncodeResult<usize>;

    fn type_name(&self) -> &'static str;
}

impl<T: Encode> DynEncode for T {
    fn dyn_write(&self, buf: &mut Vec<u8>) -> EncodeResult<usize> {
        self.write_to(buf)
    }

    fn dyn_len(&self) -> EncodeResult<usize> {
        self.write_to(&mut std::io::sink())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl std::fmt::Debug for dyn DynEncode + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.type_name())
    }
}

/// Positional access to the fields of a tuple
pub trait TupleAccess {
    /// Number of fields
    fn arity(&self) -> usize;

    /// Returns the field at position `ix`, or `None` if `ix >= self.arity()`
    fn get(&self, ix: usize) -> Option<&dyn DynEncode>;

    /// Returns the field at position `ix`.
    ///
    /// # Panics
    ///
    /// Panics if `ix` is not less than [`arity`](TupleAccess::arity).
    #[track_caller]
    fn field(&self, ix: usize) -> &dyn DynEncode {
        match self.get(ix) {
            Some(field) => field,
            None => panic!(
                "field index {} out of range for tuple of arity {}",
                ix,
                self.arity()
            ),
        }
    }
}

macro_rules! impl_tuple {
    ($n:literal; $($t:ident $ix:tt),+) => {
        impl<$($t: Encode),+> Encode for ($($t,)+) {
            fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
                crate::write_all_to!($(self.$ix),+ => buf)
            }
        }

        impl<$($t: Decode),+> Decode for ($($t,)+) {
            fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                Ok(($($t::parse(p)?,)+))
            }

            fn parse_into<P: Parser>(&mut self, p: &mut P) -> ParseResult<()> {
                $( self.$ix.parse_into(p)?; )+
                Ok(())
            }
        }

        impl<$($t: Estimable),+> Estimable for ($($t,)+) {
            const KNOWN: Option<usize> = sum_known(&[$($t::KNOWN),+]);

            fn unknown(&self) -> usize {
                0 $(+ self.$ix.estimate())+
            }
        }

        impl<$($t: Encode),+> TupleAccess for ($($t,)+) {
            #[inline]
            fn arity(&self) -> usize {
                $n
            }

            fn get(&self, ix: usize) -> Option<&dyn DynEncode> {
                match ix {
                    $( $ix => Some(&self.$ix as &dyn DynEncode), )+
                    _ => None,
                }
            }
        }
    };
}

impl_tuple!(1; T0 0);
impl_tuple!(2; T0 0, T1 1);
impl_tuple!(3; T0 0, T1 1, T2 2);
impl_tuple!(4; T0 0, T1 1, T2 2, T3 3);
impl_tuple!(5; T0 0, T1 1, T2 2, T3 3, T4 4);
impl_tuple!(6; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
impl_tuple!(7; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6);
impl_tuple!(8; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7);
impl_tuple!(9; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8);
impl_tuple!(10; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9);
impl_tuple!(11; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10);
impl_tuple!(12; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7, T8 8, T9 9, T10 10, T11 11);

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::byteparser::SliceParser;

    #[test]
    fn concatenation_without_prefix() {
        let v = (0x01u8, 0x0302u16, true);
        assert_eq!(v.to_bytes().unwrap(), vec![0x01, 0x02, 0x03, 0x01]);
        assert_eq!(<(u8, u16, bool)>::from_bytes(&[0x01, 0x02, 0x03, 0x01]).unwrap(), v);
    }

    #[test]
    fn single_field() {
        assert_eq!((7u32,).to_bytes().unwrap(), 7u32.to_bytes().unwrap());
    }

    #[test]
    fn known_length_sums_fields() {
        assert_eq!(<(u8, u64, bool) as Estimable>::KNOWN, Some(10));
        assert_eq!(<(u8, Option<u8>) as Estimable>::KNOWN, None);
        assert_eq!((1u8, Some(2u8)).estimate(), 3);
    }

    #[test]
    fn field_access() {
        let v = (5u16, Some(false), -1i8);
        assert_eq!(v.arity(), 3);
        assert_eq!(v.field(0).dyn_len().unwrap(), 2);
        assert_eq!(v.field(2).type_name(), "i8");
        let mut buf = Vec::new();
        v.field(1).dyn_write(&mut buf).unwrap();
        assert_eq!(buf, vec![0x01, 0x00]);
        assert!(v.get(3).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn field_out_of_range_panics() {
        let v = (1u8, 2u8);
        let _ = v.field(2);
    }

    #[test]
    fn twelve_fields() {
        let v = (0u8, 1u8, 2u8, 3u8, 4u8, 5u8, 6u8, 7u8, 8u8, 9u8, 10u8, 11u8);
        let bytes = v.to_bytes().unwrap();
        assert_eq!(bytes, (0u8..12).collect::<Vec<_>>());
        assert_eq!(v.arity(), 12);
    }

    #[test]
    fn parse_into_fills_each_slot() {
        let mut slot = (0u8, Some(0u16));
        let mut p = SliceParser::new(&[0x04, 0x01, 0x05, 0x00]);
        slot.parse_into(&mut p).unwrap();
        assert_eq!(slot, (4, Some(5)));
    }
}
