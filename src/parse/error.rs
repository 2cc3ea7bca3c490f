//! Error types used to report failure in low-level parsing
//!
//! This module contains a hierarchy of types representing specific
//! classes of error that may arise as a result of calls to
//! [`Parser`](crate::parse::Parser) methods, or of [`Decode`](crate::conv::Decode)
//! implementations built on top of them.
//!
//! # Layout
//!
//! This module defines the primary type `ParseError` and the alias
//! `ParseResult<T>`; it additionally defines various type-level refinements of
//! `ParseError`, grouped according to similar provenance or nature.
//!
//! Every failure is terminal for the decode chain it occurs in: no `Parser`
//! method attempts to recover, and a caller-supplied slot that was being
//! decoded into when the error occurred is left in an unspecified state.

use std::array::TryFromSliceError;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

use crate::error::WidthError;

/// Enumeration type over all errors that may be encountered when calling
/// methods on `Parser` types, or when decoding values through them.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// Fewer bytes were available than the type being decoded structurally requires.
    ShortRead {
        offset: usize,
        requested: usize,
        available: usize,
    },
    /// Error class encountered when low-level parsing is unsuccessful due
    /// to a byte that lies outside of the domain of the token being read.
    ///
    /// This includes booleans, option and result tags, and enum discriminants.
    Token(TokenError),
    /// Error class encountered when low-level parsing is successful but
    /// the resultant raw value cannot be converted into a legal value of
    /// the post-parse type.
    External(ExternalError),
    /// The underlying byte source reported an error, which is preserved verbatim.
    Io(std::io::Error),
    /// Boxed values were nested more deeply than the parser permits.
    DepthLimit { offset: usize, limit: usize },
    /// Error class encountered when internal invariants or preconditions are violated
    Internal(InternalError),
}

impl ParseError {
    /// Returns `true` if this error was caused by the byte source running dry.
    #[must_use]
    pub fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortRead { .. })
    }

    /// Returns `true` if this error was caused by a byte outside of the domain of
    /// a boolean, tag, or discriminant.
    #[must_use]
    pub fn is_unrecognized_tag(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParseError::ShortRead {
                offset,
                requested,
                available,
            } => {
                if *available == 0 {
                    write!(
                        f,
                        "cannot read {} bytes at offset {}: byte source has been fully consumed",
                        requested, offset
                    )
                } else {
                    write!(
                        f,
                        "cannot read {} bytes at offset {}: only {} bytes remaining",
                        requested, offset, available
                    )
                }
            }
            ParseError::Token(err) => Display::fmt(err, f),
            ParseError::External(err) => Display::fmt(err, f),
            ParseError::Io(err) => write!(f, "byte source failed: {}", err),
            ParseError::DepthLimit { offset, limit } => write!(
                f,
                "nesting depth exceeded limit of {} at offset {}",
                limit, offset
            ),
            ParseError::Internal(err) => Display::fmt(err, f),
        }
    }
}

impl From<Infallible> for ParseError {
    fn from(void: Infallible) -> Self {
        match void {}
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::ShortRead { .. } | ParseError::DepthLimit { .. } => None,
            ParseError::Token(err) => Some(err),
            ParseError::External(err) => Some(err),
            ParseError::Io(err) => Some(err),
            ParseError::Internal(err) => Some(err),
        }
    }
}

/// Type alias for Result with an error type of [`ParseError`]
///
/// Most `Parser` methods, and all `Decode` methods, have a return
/// type of `ParseResult<T>` for various `T`
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors arising from unexpected tokens in the buffer
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenError {
    /// Byte parsed as a boolean was neither `0x00` nor `0x01`
    InvalidBoolean(u8),
    /// Byte parsed as the tag of an option, result or optional boolean was
    /// not within the set of valid tags for that type
    InvalidTag(TagError),
    /// Byte parsed as the discriminant of an enumerated type did not
    /// correspond to any of its variants
    InvalidEnumTag(TagError),
}

impl From<TokenError> for ParseError {
    fn from(tok_e: TokenError) -> Self {
        Self::Token(tok_e)
    }
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidBoolean(byte) => {
                write!(f, "invalid boolean encoding 0x{byte:02x}")
            }
            Self::InvalidTag(err) => {
                write!(f, "invalid tag: {}", err)
            }
            Self::InvalidEnumTag(err) => {
                write!(f, "invalid enum tag: {}", err)
            }
        }
    }
}

impl Error for TokenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TokenError::InvalidBoolean(_) => None,
            TokenError::InvalidTag(err) | TokenError::InvalidEnumTag(err) => Some(err),
        }
    }
}

/// Implementation-internal errors
///
/// This error class represents certain 'impossible' cases, which signify
/// an implementation bug in a `Parser` type, or a violation of a
/// precondition for calling certain `Parser` methods.
#[derive(Debug, Clone, Copy)]
pub enum InternalError {
    SliceCoerceFailure(TryFromSliceError),
    NoValidTags,
}

impl From<TryFromSliceError> for InternalError {
    fn from(err: TryFromSliceError) -> Self {
        Self::SliceCoerceFailure(err)
    }
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            InternalError::SliceCoerceFailure(_err) => {
                write!(f, "failed to coerce from byte-slice to fixed-length array")
            }
            InternalError::NoValidTags => {
                write!(f, "cannot parse enum with no known-valid discriminants")
            }
        }
    }
}

impl Error for InternalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InternalError::SliceCoerceFailure(err) => Some(err),
            InternalError::NoValidTags => None,
        }
    }
}

/// Converts a borrowed byte-slice into an owned byte-array
///
/// Returns a [`ParseError`] corresponding to the reason for
/// failure if this conversion cannot be performed for any reason.
///
/// This error is guaranteed to be an `InternalError`.
pub(crate) fn coerce_slice<const N: usize>(bytes: &'_ [u8]) -> ParseResult<[u8; N]> {
    match <[u8; N] as TryFrom<&'_ [u8]>>::try_from(bytes) {
        Ok(array) => Ok(array),
        Err(err) => Err(ParseError::from(InternalError::from(err))),
    }
}

/// Enumerated type representing contextually invalid results obtained from otherwise
/// succesfully executed method calls to a Parser object.
#[derive(Debug)]
pub enum ExternalError {
    /// A decoded magnitude did not fit the byte-width of the target type.
    WidthViolation(WidthError),
}

impl<T> From<T> for ParseError
where
    ExternalError: From<T>,
{
    fn from(err: T) -> Self {
        ParseError::External(ExternalError::from(err))
    }
}

impl From<WidthError> for ExternalError {
    fn from(err: WidthError) -> Self {
        Self::WidthViolation(err)
    }
}

impl Display for ExternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ExternalError::WidthViolation(x) => write!(f, "{}", x),
        }
    }
}

impl Error for ExternalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExternalError::WidthViolation(err) => Some(err),
        }
    }
}

/// Scaffolding alias to allow for quick global changes of
/// what type is used to hold the set of valid tags.
pub(crate) type Tags = Vec<u8>;

/// General-purpose trait for abstracting tag-value validation
///
/// This is used to allow for a more flexible API for the
/// `Parser` method [`take_tagword`](crate::parse::Parser::take_tagword).
///
/// This trait encapsulates the common behavior of determining whether
/// a given byte is a member of the closed set of valid tags for
/// an option, result, optional boolean, or enumerated type.
pub trait TagValidator {
    /// Returns `true` if and only if `raw` is a valid tag.
    fn is_valid(&self, raw: u8) -> bool;

    /// Returns `true` if and only if there is at least one valid tag.
    ///
    /// A validator with no valid tags is never the desired state, and
    /// this is used only for accurate error-reporting upon rejection.
    fn has_valid(&self) -> bool;

    /// Consumes `self` and returns a vector containing all of the
    /// values that are considered valid.
    ///
    /// This method is called only to provide more informative error
    /// values upon rejection of a parsed candidate tag-value.
    fn into_valid(self) -> Tags;
}

impl<const N: usize> TagValidator for [u8; N] {
    fn is_valid(&self, raw: u8) -> bool {
        self.contains(&raw)
    }

    fn has_valid(&self) -> bool {
        N > 0
    }

    fn into_valid(self) -> Tags {
        self.to_vec()
    }
}

/// Error representing invalid tag or discriminant values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    actual: u8,
    for_type: &'static str,
    expected: Option<Tags>,
}

impl TagError {
    /// Constructs a `TagError` from the invalid tag value and a list of valid tag-values,
    /// using an inferred type-name via [`std::any::type_name`]
    pub fn with_type<U: ?Sized>(actual: u8, expected: Option<Tags>) -> Self {
        Self {
            actual,
            for_type: std::any::type_name::<U>(),
            expected,
        }
    }

    /// The rejected byte
    #[must_use]
    pub fn actual(&self) -> u8 {
        self.actual
    }

    /// Name of the type whose tag was being parsed
    #[must_use]
    pub fn for_type(&self) -> &'static str {
        self.for_type
    }

    /// The set of tags that would have been accepted, if known
    #[must_use]
    pub fn expected(&self) -> Option<&[u8]> {
        self.expected.as_deref()
    }
}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "unexpected discriminant {:#04x} for type {}",
            self.actual, self.for_type,
        )?;
        match &self.expected {
            Some(valid) if !valid.is_empty() => write!(f, " (expected one of {:02x?})", valid),
            _ => Ok(()),
        }
    }
}

impl Error for TagError {}
