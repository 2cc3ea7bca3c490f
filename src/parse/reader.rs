//! Streaming `Parser` over an arbitrary [`std::io::Read`] source
//!
//! Unlike the buffer-backed parsers, a [`ReaderParser`] does not know how
//! many bytes remain until it tries to read them. Exhaustion of the source
//! partway through a request is reported as `ShortRead`; every other error
//! reported by the source is propagated verbatim as [`ParseError::Io`].

use std::io::{ErrorKind, Read};

use super::error::{ParseError, ParseResult};
use super::{Parser, DEFAULT_DEPTH_LIMIT};

#[derive(Debug)]
pub struct ReaderParser<R> {
    reader: R,
    offset: usize,
    scratch: Vec<u8>,
    depth: usize,
    depth_limit: usize,
}

impl<R: Read> ReaderParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            scratch: Vec::new(),
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

    /// Returns the wrapped reader, discarding the parser state
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Fills the first `n` bytes of the scratch buffer from the reader.
    fn fill(&mut self, n: usize) -> ParseResult<()> {
        if self.scratch.len() < n {
            self.scratch.resize(n, 0);
        }
        let mut filled = 0;
        while filled < n {
            let exhausted = match self.reader.read(&mut self.scratch[filled..n]) {
                Ok(0) => true,
                Ok(k) => {
                    filled += k;
                    false
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => false,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => true,
                Err(e) => return Err(ParseError::Io(e)),
            };
            if exhausted {
                tracing::trace!(
                    offset = self.offset,
                    requested = n,
                    available = filled,
                    "byte source exhausted"
                );
                return Err(ParseError::ShortRead {
                    offset: self.offset,
                    requested: n,
                    available: filled,
                });
            }
        }
        self.offset += n;
        Ok(())
    }
}

impl<R: Read> Parser for ReaderParser<R> {
    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        self.fill(1)?;
        Ok(self.scratch[0])
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        self.fill(nbytes)?;
        Ok(&self.scratch[..nbytes])
    }

    fn into_leftover(mut self) -> ParseResult<Vec<u8>> {
        let mut rest = Vec::new();
        self.reader.read_to_end(&mut rest)?;
        Ok(rest)
    }

    fn depth_mut(&mut self) -> &mut usize {
        &mut self.depth
    }

    fn depth_limit(&self) -> usize {
        self.depth_limit
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io;

    /// Reader that yields its bytes one at a time, then fails.
    struct Trickle {
        bytes: Vec<u8>,
        pos: usize,
        fail_with: Option<ErrorKind>,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.bytes.len() {
                buf[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            } else if let Some(kind) = self.fail_with {
                Err(io::Error::new(kind, "trickle failed"))
            } else {
                Ok(0)
            }
        }
    }

    #[test]
    fn reassembles_partial_reads() {
        let src = Trickle {
            bytes: vec![0x78, 0x56, 0x34, 0x12],
            pos: 0,
            fail_with: None,
        };
        let mut p = ReaderParser::new(src);
        assert_eq!(p.take_u32().unwrap(), 0x1234_5678);
        assert_eq!(p.offset(), 4);
    }

    #[test]
    fn exhaustion_is_short_read() {
        let mut p = ReaderParser::new(&[0x01u8, 0x02][..]);
        match p.take_u32() {
            Err(ParseError::ShortRead {
                requested,
                available,
                ..
            }) => assert_eq!((requested, available), (4, 2)),
            other => panic!("expected short read, got {:?}", other),
        }
    }

    #[test]
    fn source_failure_is_propagated() {
        let src = Trickle {
            bytes: vec![0x00],
            pos: 0,
            fail_with: Some(ErrorKind::PermissionDenied),
        };
        let mut p = ReaderParser::new(src);
        match p.take_u16() {
            Err(ParseError::Io(e)) => assert_eq!(e.kind(), ErrorKind::PermissionDenied),
            other => panic!("expected io failure, got {:?}", other),
        }
    }

    #[test]
    fn unexpected_eof_is_short_read() {
        let src = Trickle {
            bytes: vec![0x01],
            pos: 0,
            fail_with: Some(ErrorKind::UnexpectedEof),
        };
        let mut p = ReaderParser::new(src);
        assert!(p.take_u16().unwrap_err().is_short_read());
    }

    #[test]
    fn leftover_drains_reader() {
        let mut p = ReaderParser::new(io::Cursor::new(vec![1u8, 2, 3]));
        p.consume_byte().unwrap();
        assert_eq!(p.into_leftover().unwrap(), vec![2, 3]);
    }
}
