//! Transparent boxing for recursive types
//!
//! A `Box<T>` has exactly the wire form of `T`. Boxing is what allows an
//! enumerated type to hold itself, most commonly as `Option<Box<Self>>`.
//!
//! Every recursive type nests through a box, so decoding a box is where the
//! parser counts nesting levels. Input that nests more deeply than
//! [`Parser::depth_limit`] fails with [`ParseError::DepthLimit`] instead of
//! exhausting the stack.
//!
//! [`ParseError::DepthLimit`]: crate::parse::error::ParseError::DepthLimit

use crate::conv::error::EncodeResult;
use crate::conv::len::Estimable;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        (**self).write_to(buf)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.descend()?;
        let inner = T::parse(p)?;
        p.ascend();
        Ok(Box::new(inner))
    }

    /// Decodes into the existing allocation rather than replacing it.
    fn parse_into<P: Parser>(&mut self, p: &mut P) -> ParseResult<()> {
        p.descend()?;
        (**self).parse_into(p)?;
        p.ascend();
        Ok(())
    }
}

impl<T: Estimable + ?Sized> Estimable for Box<T> {
    const KNOWN: Option<usize> = T::KNOWN;

    fn unknown(&self) -> usize {
        (**self).estimate()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse::byteparser::SliceParser;
    use crate::parse::error::ParseError;

    #[test]
    fn same_bytes_as_inner() {
        assert_eq!(
            Box::new(0x1234u16).to_bytes().unwrap(),
            0x1234u16.to_bytes().unwrap()
        );
        assert_eq!(Box::<u16>::from_bytes(&[0x34, 0x12]).unwrap(), Box::new(0x1234));
    }

    #[test]
    fn known_length_passes_through() {
        assert_eq!(<Box<u32> as Estimable>::KNOWN, Some(4));
        assert_eq!(Box::new(Some(1u8)).estimate(), 2);
    }

    #[test]
    fn parse_into_keeps_allocation() {
        let mut slot = Box::new(0u32);
        let before: *const u32 = &*slot;
        let mut p = SliceParser::new(&[0x05, 0x00, 0x00, 0x00]);
        slot.parse_into(&mut p).unwrap();
        assert_eq!(*slot, 5);
        assert_eq!(before, &*slot as *const u32);
    }

    #[test]
    fn nesting_beyond_limit_fails() {
        type Nest = Option<Box<Option<Box<Option<Box<u8>>>>>>;
        let bytes = [0x01, 0x01, 0x01, 0x2a];
        let mut p = SliceParser::new(&bytes).with_depth_limit(3);
        assert_eq!(
            Nest::parse(&mut p).unwrap(),
            Some(Box::new(Some(Box::new(Some(Box::new(0x2a))))))
        );

        let mut p = SliceParser::new(&bytes).with_depth_limit(2);
        match Nest::parse(&mut p) {
            Err(ParseError::DepthLimit { limit, offset }) => assert_eq!((limit, offset), (2, 3)),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn sibling_boxes_do_not_accumulate_depth() {
        let bytes = [0x01, 0x02, 0x03];
        let mut p = SliceParser::new(&bytes).with_depth_limit(1);
        let v = <(Box<u8>, Box<u8>, Box<u8>)>::parse(&mut p).unwrap();
        assert_eq!((*v.0, *v.1, *v.2), (1, 2, 3));
    }
}
