//! Model for representing and transcoding values in the SCALE binary format
//!
//! # Overview
//!
//! This library provides a compact, little-endian binary codec for a small,
//! closed vocabulary of types: booleans, fixed-width integers, a two-word
//! 128-bit integer, variable-length "compact" unsigned integers, and the
//! combinators that build larger values out of them (optional values,
//! two-branch results, fixed-arity tuples and tagged enumerations).
//!
//! The format is not self-describing. Neither field names nor type information
//! appear on the wire, and a value can only be decoded by a reader that already
//! knows its structure. In exchange, every encoding is as short as the
//! structure allows, and decoding never needs lookahead or backtracking.
//!
//! The high-level traits [`Encode`] and [`Decode`] are the keystones of the library.
//! Every combinator is written against these traits rather than against concrete
//! types, so that (for example) an `Option<Outcome<Compact<u64>, Box<MyEnum>>>` is
//! supported without any further code. Hand-written implementations for
//! record-like types are typically a few lines long, and enumerations are
//! declared through the [`scale_enum!`] macro.
//!
//! # Wire format
//!
//! | Type                 | Encoding                                                      |
//! |----------------------|---------------------------------------------------------------|
//! | `bool`               | `0x01` / `0x00`                                                |
//! | [`OptionBool`]       | `0x00` none, `0x01` true, `0x02` false                         |
//! | `uN` / `iN`          | `N / 8` bytes, little-endian, two's complement                 |
//! | [`U128`]             | low word then high word, each 8 bytes little-endian            |
//! | [`Compact<T>`]       | 1, 2, 4, or `1 + n` bytes (see [`compact`])                    |
//! | `Option<T>`          | `0x00`, or `0x01` followed by the payload                      |
//! | [`Outcome<T, E>`]    | `0x00` then success payload, or `0x01` then failure payload    |
//! | `(T1, .., Tn)`       | concatenation of the fields                                    |
//! | enumerations         | discriminant byte, then the payload of the variant            |
//!
//! # Decoding
//!
//! All decoding proceeds through a [`Parser`], a forward-only cursor over a
//! byte source. Three are provided: [`ByteParser`] over an owned buffer,
//! [`SliceParser`] over a borrowed slice, and [`ReaderParser`] over any
//! [`std::io::Read`]. A decode either produces a complete value, or fails on
//! the first error it encounters; there is no partial recovery.
//!
//! Recursive types nest through `Box`, and every parser bounds the number of
//! boxes open at once ([`DEFAULT_DEPTH_LIMIT`] unless set through
//! `with_depth_limit`). Deeper input fails with [`ParseError::DepthLimit`].
//!
//! # Feature flags
//!
//!   * `check_complete_parse`: [`Decode::try_decode`] fails if any input remains
//!     after the top-level value.
//!   * `enc_len_estimable_override`: [`EncodeLength::enc_len`] is computed through
//!     [`Estimable`] rather than by a dry-run encode.
//!   * `serde_impls`: `serde` support for [`U128`] and [`Compact<T>`].
//!
//! # Diagnostics
//!
//! Failures at decode boundaries, rejected discriminants, and failed integer
//! narrowing are reported as `tracing` events at `debug` level. The library
//! never installs a subscriber.

pub mod adt;
pub mod autobox;
pub mod compact;
pub mod conv;
pub mod error;
pub mod option;
pub mod outcome;
pub mod parse;
pub mod prim;
pub mod tuple;
pub mod wide;

pub use crate::adt::{dispatch, Enumerated, VariantDecoder};
pub use crate::compact::{parse_compact, write_compact, Compact, CompactMagnitude};
pub use crate::conv::{
    error::{DecodeError, DecodeResult, EncodeError, EncodeResult},
    len::Estimable,
    target::{ByteCounter, Target},
    Decode, Encode, EncodeLength,
};
pub use crate::error::WidthError;
pub use crate::option::parse_option_with;
pub use crate::outcome::{parse_outcome_with, Outcome};
pub use crate::parse::{
    byteparser::{ByteParser, SliceParser},
    error::{ParseError, TagError, TokenError},
    reader::ReaderParser,
    ParseResult, Parser, TryIntoParser, DEFAULT_DEPTH_LIMIT,
};
pub use crate::prim::OptionBool;
pub use crate::tuple::{DynEncode, TupleAccess};
pub use crate::wide::U128;
