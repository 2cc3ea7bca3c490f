use crate::error::WidthError;
use crate::parse::error::ParseError;

/// Errors that can arise while serializing a value.
///
/// Encoding is infallible for every primitive; it fails only for a
/// two-branch result slot that holds neither branch, or for an
/// arbitrary-precision magnitude that does not fit in 128 bits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Attempted to encode a value that has no populated state
    EmptyValue { for_type: &'static str },
    /// Attempted to encode a magnitude that exceeds the widest representation
    Width(WidthError),
}

impl EncodeError {
    /// Constructs an `EmptyValue` error naming the type `T`
    pub fn empty<T: ?Sized>() -> Self {
        Self::EmptyValue {
            for_type: std::any::type_name::<T>(),
        }
    }
}

impl From<WidthError> for EncodeError {
    fn from(err: WidthError) -> Self {
        Self::Width(err)
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::EmptyValue { for_type } => {
                write!(f, "cannot encode empty value of type {}", for_type)
            }
            EncodeError::Width(err) => {
                write!(f, "value cannot be represented: {}", err)
            }
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::EmptyValue { .. } => None,
            EncodeError::Width(err) => Some(err),
        }
    }
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    Parse(ParseError),
    NonEmpty(Vec<u8>),
}

impl From<std::convert::Infallible> for DecodeError {
    fn from(void: std::convert::Infallible) -> Self {
        match void {}
    }
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Parse(err) => {
                write!(f, "parser encountered error: {}", err)
            }
            DecodeError::NonEmpty(rest) => {
                write!(
                    f,
                    "parser had {} unconsumed bytes after decoding: {:02x?}",
                    rest.len(),
                    rest
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Parse(err) => Some(err),
            DecodeError::NonEmpty(_) => None,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
