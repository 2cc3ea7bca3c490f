//! Custom parsing model with byte-level precision
//!
//! This module, along with its submodules, provides the fundamental
//! definitions related to the abstract task of processing raw sequences
//! of binary data into the low-level fragments at the leaf nodes of
//! an arbitrarily complex user-defined type.
//!
//! For type-aware parsing, in other words, parsing user-defined types
//! directly rather than as an unstructured sequence of primitives,
//! see the [`Decode`](crate::conv::Decode) trait, which is a
//! high-level interface built almost entirely around the definitions
//! contained within this module.
//!
//! # Layout
//!
//! The top-level of this module defines the [`Parser`] trait, along with
//! the utility trait [`TryIntoParser<P>`] which facilitates the generic instantiation
//! of various parser-types from a variety of source types.
//!
//!   * `error` defines the hierachy of error cases that can be encountered and returned
//!     when something goes wrong during a call to a `Parser` method.
//!   * `byteparser` defines [`ByteParser`](byteparser::ByteParser), over an owned buffer,
//!     and [`SliceParser`](byteparser::SliceParser), over a borrowed one.
//!   * `reader` defines [`ReaderParser`](reader::ReaderParser), which pulls bytes on
//!     demand from any [`std::io::Read`] source.

pub mod byteparser;
pub mod error;
pub mod reader;

pub use error::ParseResult;
use error::{InternalError, ParseError, TagError, TokenError};

/// Nesting depth at which a parser stops entering boxed values, unless
/// configured otherwise.
///
/// Recursive types can only nest through `Box`, and each nested level costs
/// stack space during decoding, so well-formed but deeply nested input is
/// rejected once this many boxes are open at the same time.
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

/// # Parser
///
/// This trait is an abstraction over types representing a stateful,
/// forward-only cursor over a source of bytes, with default implementations
/// for the monomorphic `take_*` functions used by the primitive codecs.
///
/// ## Model
///
/// * All parsing is done in a non-backtracking, zero-lookahead fashion; a byte
///   can only be viewed by consuming it, and only after all preceding bytes
///   have been consumed; after a byte is consumed, it cannot be consumed again.
/// * A failed consume operation leaves the parser in an unspecified (but memory-safe)
///   state, and the decode chain that issued it must be abandoned.
/// * A single parser must never be shared between concurrent decodes; independent
///   parsers share no state and may be used in parallel.
///
/// All multi-byte numeric `take_X` methods interpret their bytes as little-endian.
pub trait Parser {
    /// Computes the current value of the offset into the byte source,
    /// which is the total number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Consumes and returns a single byte from the current offset position.
    ///
    /// This method should be functionally equivalent to a [`consume`](Parser::consume)
    /// call of length `1`, aside from the different return types.
    fn consume_byte(&mut self) -> ParseResult<u8>;

    /// Attempt to consume and return a slice of length `nbytes`,
    /// starting from the first unconsumed byte.
    ///
    /// # Invariants
    ///
    /// This method **MUST** return `Ok(s)` when and only when `nbytes`
    /// bytes were available, and in such cases, `s.len()` must be equal to the
    /// requested length `nbytes`. Otherwise it must return `ShortRead`, or `Io`
    /// if the underlying source failed for a reason other than exhaustion.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes and returns every byte that has not yet been consumed.
    ///
    /// Used to report leftover input when the `check_complete_parse`
    /// feature is enabled.
    fn into_leftover(self) -> ParseResult<Vec<u8>>
    where
        Self: Sized;

    /// Consumes `N` bytes and returns them in array-form
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        error::coerce_slice(self.consume(N)?)
    }

    /// Consumes one byte and returns it as a `u8` value
    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        self.consume_byte()
    }

    /// Consumes one byte and returns it as an `i8` value
    #[inline]
    fn take_i8(&mut self) -> ParseResult<i8> {
        Ok(self.consume_byte()? as i8)
    }

    /// Consumes two bytes and returns the corresponding `u16` value
    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_le_bytes)
    }

    /// Consumes two bytes and returns the corresponding `i16` value
    #[inline]
    fn take_i16(&mut self) -> ParseResult<i16> {
        self.consume_arr::<2>().map(i16::from_le_bytes)
    }

    /// Consumes four bytes and returns the corresponding `u32` value
    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_le_bytes)
    }

    /// Consumes four bytes and returns the corresponding `i32` value
    #[inline]
    fn take_i32(&mut self) -> ParseResult<i32> {
        self.consume_arr::<4>().map(i32::from_le_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `u64` value
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_le_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `i64` value
    #[inline]
    fn take_i64(&mut self) -> ParseResult<i64> {
        self.consume_arr::<8>().map(i64::from_le_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents
    ///
    /// The only valid boolean encodings are `0x01` for `true`
    /// and `0x00` for `false`.
    ///
    /// # Errors
    ///
    /// If the consume operation itself fails, returns the original errors.
    ///
    /// Otherwise, returns `InvalidBoolean` containing the invalid byte,
    /// wrapped suitably as a `ParseError`
    #[inline]
    fn take_bool(&mut self) -> ParseResult<bool> {
        match self.consume_byte()? {
            0x01 => Ok(true),
            0x00 => Ok(false),
            byte => Err(TokenError::InvalidBoolean(byte).into()),
        }
    }

    /// Parses a single tag byte and verifies that it is valid for the
    /// intended type `T`, before returning it.
    ///
    /// # Invariants
    ///
    /// All implementations must uphold the contract that the only possible return values
    /// are `Err(_)`, and `Ok(val)` for some `val` accepted by `v`.
    fn take_tagword<T: ?Sized, V>(&mut self, v: V) -> ParseResult<u8>
    where
        V: error::TagValidator,
    {
        let actual = self.consume_byte()?;
        if v.is_valid(actual) {
            Ok(actual)
        } else if v.has_valid() {
            Err(TokenError::InvalidTag(TagError::with_type::<T>(
                actual,
                Some(v.into_valid()),
            ))
            .into())
        } else {
            Err(ParseError::Internal(InternalError::NoValidTags))
        }
    }

    /// Mutable handle on the number of nesting levels currently entered
    /// through [`descend`](Parser::descend).
    fn depth_mut(&mut self) -> &mut usize;

    /// Maximum number of nesting levels this parser will enter
    #[inline]
    fn depth_limit(&self) -> usize {
        DEFAULT_DEPTH_LIMIT
    }

    /// Enters one level of nesting, ahead of decoding a boxed value.
    ///
    /// Every successful call must be paired with a call to [`ascend`](Parser::ascend)
    /// once the nested value has been decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DepthLimit`] if [`depth_limit`](Parser::depth_limit)
    /// levels have already been entered.
    fn descend(&mut self) -> ParseResult<()> {
        let limit = self.depth_limit();
        let offset = self.offset();
        let depth = self.depth_mut();
        if *depth >= limit {
            return Err(ParseError::DepthLimit { offset, limit });
        }
        *depth += 1;
        Ok(())
    }

    /// Leaves the nesting level most recently entered through [`descend`](Parser::descend).
    fn ascend(&mut self) {
        let depth = self.depth_mut();
        *depth = depth.saturating_sub(1);
    }
}

impl<P: Parser + ?Sized> Parser for &'_ mut P {
    fn offset(&self) -> usize {
        (**self).offset()
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        (**self).consume_byte()
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        (**self).consume(nbytes)
    }

    fn depth_mut(&mut self) -> &mut usize {
        (**self).depth_mut()
    }

    fn depth_limit(&self) -> usize {
        (**self).depth_limit()
    }

    /// A borrowed parser cannot be drained through the borrow; the
    /// leftover of the underlying parser is left for its owner to inspect.
    fn into_leftover(self) -> ParseResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Conversion from a source value into a fresh `Parser` over its contents.
///
/// The default parser type is [`ByteParser`](byteparser::ByteParser), which
/// takes ownership of a copy of the bytes it is constructed from.
pub trait TryIntoParser<P = byteparser::ByteParser>
where
    P: Parser,
{
    type Error;

    fn try_into_parser(self) -> Result<P, Self::Error>;
}
