//! General error types
//!
//! This module contains error types that are shared between the
//! encoding and decoding halves of the library, and which therefore
//! cannot live under either [`conv::error`](crate::conv::error) or
//! [`parse::error`](crate::parse::error) without introducing a
//! circular dependency between the two.

use std::error::Error;
use std::fmt::Display;

/// Enumerated error type for failures related to numeric values
/// whose magnitude requires more bytes than the target representation
/// can hold.
///
/// This is raised when narrowing a decoded compact magnitude into a
/// smaller integer type, when a compact length-prefix announces more
/// than sixteen magnitude bytes, and when a `BigUint` is converted
/// (non-saturatingly) into a [`U128`](crate::wide::U128).
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    TooWide { limit: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthError::TooWide { limit, actual } => {
                write!(f, "{actual}-byte value exceeded limit of {limit} bytes")
            }
        }
    }
}

impl Error for WidthError {}
