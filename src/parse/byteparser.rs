//! Buffer-backed `Parser` implementations
//!
//! [`ByteParser`] owns its buffer and is the default parser type used by
//! [`Decode::try_decode`](crate::conv::Decode::try_decode); [`SliceParser`]
//! borrows an existing slice and never copies it.
//!
//! Both follow the buffer-with-offset model: the buffer itself is never
//! mutated, and consuming bytes only advances a monotonically increasing offset.

use std::convert::Infallible;

use super::error::{ParseError, ParseResult};
use super::{Parser, TryIntoParser, DEFAULT_DEPTH_LIMIT};

/// Advances `offset` by `n` unless this would exceed `lim`, returning
/// the original offset on success.
#[inline]
fn advance(offset: &mut usize, n: usize, lim: usize) -> ParseResult<usize> {
    let cur = *offset;
    match cur.checked_add(n) {
        Some(tgt) if tgt <= lim => {
            *offset = tgt;
            Ok(cur)
        }
        _ => Err(ParseError::ShortRead {
            offset: cur,
            requested: n,
            available: lim - cur,
        }),
    }
}

/// Parser over an owned, immutable `Vec<u8>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteParser {
    buf: Vec<u8>,
    offset: usize,
    depth: usize,
    depth_limit: usize,
}

impl ByteParser {
    /// Constructs a `ByteParser` positioned at the start of `buf`
    #[must_use]
    pub fn new(buf: Vec<u8>) -> Self {
        Self {
            buf,
            offset: 0,
            depth: 0,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Replaces the maximum nesting depth of boxed values
    #[must_use]
    pub fn with_depth_limit(self, depth_limit: usize) -> Self {
        Self {
            depth_limit,
            ..self
        }
    }

    /// Number of bytes that have not yet been consumed
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.buf.len() - self.offset
    }
}

impl Parser for ByteParser {
    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        let ix = advance(&mut self.offset, 1, self.buf.len())?;
        Ok(self.buf[ix])
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let ix = advance(&mut self.offset, nbytes, self.buf.len())?;
        Ok(&self.buf[ix..ix + nbytes])
    }

    fn into_leftover(mut self) -> ParseResult<Vec<u8>> {
        Ok(self.buf.split_off(self.offset))
    }

    fn depth_mut(&mut self) -> &mut usize {
        &mut self.depth
    }

    fn depth_limit(&self) -> usize {
        self.depth_limit
    }
}

/// Parser over a borrowed slice `&'a [u8]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
    depth: usize,
    depth_limit: usize,
}

impl<'a> SliceParser<'a> {
    /// Constructs a `SliceParser` positioned at the start of `buf`
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            depth: 0,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Replaces the maximum nesting depth of boxed values
    #[must_use]
    pub const fn with_depth_limit(self, depth_limit: usize) -> Self {
        Self {
            depth_limit,
            ..self
        }
    }

    /// Number of bytes that have not yet been consumed
    #[must_use]
    pub const fn remainder(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Returns the unconsumed tail of the underlying slice, without consuming it
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }
}

impl Parser for SliceParser<'_> {
    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        let ix = advance(&mut self.offset, 1, self.buf.len())?;
        Ok(self.buf[ix])
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let ix = advance(&mut self.offset, nbytes, self.buf.len())?;
        Ok(&self.buf[ix..ix + nbytes])
    }

    fn into_leftover(self) -> ParseResult<Vec<u8>> {
        Ok(self.rest().to_vec())
    }

    fn depth_mut(&mut self) -> &mut usize {
        &mut self.depth
    }

    fn depth_limit(&self) -> usize {
        self.depth_limit
    }
}

macro_rules! owned_into_parser {
    ( $( $src:ty ),+ ) => {
        $(
            impl TryIntoParser<ByteParser> for $src {
                type Error = Infallible;

                fn try_into_parser(self) -> Result<ByteParser, Infallible> {
                    Ok(ByteParser::new(self.to_vec()))
                }
            }
        )+
    };
}

owned_into_parser!(&'_ [u8], &'_ Vec<u8>);

impl TryIntoParser<ByteParser> for Vec<u8> {
    type Error = Infallible;

    fn try_into_parser(self) -> Result<ByteParser, Infallible> {
        Ok(ByteParser::new(self))
    }
}

impl<const N: usize> TryIntoParser<ByteParser> for [u8; N] {
    type Error = Infallible;

    fn try_into_parser(self) -> Result<ByteParser, Infallible> {
        Ok(ByteParser::new(self.to_vec()))
    }
}

impl<const N: usize> TryIntoParser<ByteParser> for &'_ [u8; N] {
    type Error = Infallible;

    fn try_into_parser(self) -> Result<ByteParser, Infallible> {
        Ok(ByteParser::new(self.to_vec()))
    }
}

impl<'a> TryIntoParser<SliceParser<'a>> for &'a [u8] {
    type Error = Infallible;

    fn try_into_parser(self) -> Result<SliceParser<'a>, Infallible> {
        Ok(SliceParser::new(self))
    }
}

impl<'a, const N: usize> TryIntoParser<SliceParser<'a>> for &'a [u8; N] {
    type Error = Infallible;

    fn try_into_parser(self) -> Result<SliceParser<'a>, Infallible> {
        Ok(SliceParser::new(self))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_read_reports_position() {
        let mut p = ByteParser::new(vec![0x01, 0x02, 0x03]);
        assert_eq!(p.consume(2).unwrap(), &[0x01, 0x02]);
        match p.consume(4) {
            Err(ParseError::ShortRead {
                offset,
                requested,
                available,
            }) => {
                assert_eq!((offset, requested, available), (2, 4, 1));
            }
            other => panic!("expected short read, got {:?}", other),
        }
    }

    #[test]
    fn empty_consume_succeeds_at_end() {
        let mut p = SliceParser::new(&[0xaa]);
        assert_eq!(p.consume_byte().unwrap(), 0xaa);
        assert_eq!(p.consume(0).unwrap(), &[] as &[u8]);
        assert!(p.consume_byte().unwrap_err().is_short_read());
    }

    #[test]
    fn leftover_is_unconsumed_tail() {
        let mut p: ByteParser = [1u8, 2, 3, 4].try_into_parser().unwrap();
        p.consume(1).unwrap();
        assert_eq!(p.into_leftover().unwrap(), vec![2, 3, 4]);

        let mut s: SliceParser<'_> = (&[9u8, 8][..]).try_into_parser().unwrap();
        s.consume_byte().unwrap();
        assert_eq!(s.rest(), &[8]);
        assert_eq!(s.remainder(), 1);
    }
}
