//! Oracle for the exact byte-length of the serialized form of a value
//!
//! The [`Estimable`] trait measures the precise number of bytes in the
//! serialized form of an encodable type, with an associated constant
//! [`KNOWN`](Estimable::KNOWN) that short-circuits the computation for types
//! whose every value has the same length.
//!
//! `KNOWN` is `Some` for the following:
//!   * `()` (`0`)
//!   * `bool` and [`OptionBool`](crate::prim::OptionBool) (`1`)
//!   * Fixed-width integers `uX/iX` (`X / 8`)
//!   * [`U128`](crate::wide::U128) (`16`)
//!   * Tuples whose every field is known-length, and `Result`s whose branches
//!     have equal known lengths
//!
//! # Usage
//!
//! For the most part, this trait should not be hand-implemented without
//! precise knowledge of the codec format. Enumerated types declared with
//! [`scale_enum!`](crate::scale_enum) receive a generated implementation.

/// Trait used to provide efficient and precise length-predictions for the binary serialization
/// of a type, to be used when pre-allocating a large-enough buffer to write
/// the entire serialized form of a value without reallocation.
pub trait Estimable {
    /// Optional override indicating that the length is a constant value for all possible values of `Self`.
    ///
    /// It is left to the implementor to provide an explicit `None`, so that the determination that a type
    /// is not known-length is as deliberate a process as possible.
    const KNOWN: Option<usize>;

    /// Infallible fallback that is used to determine the byte-length of the serialized form of a value on a case-by-case basis.
    fn unknown(&self) -> usize;

    /// Short-circuiting length function that returns the value of `Self::KNOWN`,
    /// or the evaluation of `self.unknown()` if the former is `None`.
    fn estimate(&self) -> usize {
        Self::KNOWN.unwrap_or_else(|| self.unknown())
    }
}

/// Sums a list of component lengths, yielding `None` if any is unknown.
///
/// Used in constant context to compute `KNOWN` for product types.
#[must_use]
pub const fn sum_known(parts: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut ix = 0;
    while ix < parts.len() {
        match parts[ix] {
            Some(n) => total += n,
            None => return None,
        }
        ix += 1;
    }
    Some(total)
}

/// Implements `Estimable` with a constant length for each listed type
macro_rules! fix_length {
    ($n:expr, $($x:ty),+) => {
        $(
            impl $crate::conv::len::Estimable for $x {
                const KNOWN: Option<usize> = Some($n);

                fn unknown(&self) -> usize {
                    $n
                }
            }
        )+
    };
}

pub(crate) use fix_length;

fix_length!(0, ());
fix_length!(1, u8, i8, bool);
fix_length!(2, u16, i16);
fix_length!(4, u32, i32);
fix_length!(8, i64, u64);

impl<T> Estimable for Option<T>
where
    T: Estimable,
{
    const KNOWN: Option<usize> = {
        match <T as Estimable>::KNOWN {
            Some(0) => Some(1),
            _ => None,
        }
    };

    fn unknown(&self) -> usize {
        match self {
            None => 1,
            Some(x) => 1 + x.estimate(),
        }
    }
}

impl<T, E> Estimable for Result<T, E>
where
    T: Estimable,
    E: Estimable,
{
    const KNOWN: Option<usize> = {
        match (T::KNOWN, E::KNOWN) {
            (Some(a), Some(b)) if a == b => Some(1 + a),
            _ => None,
        }
    };

    fn unknown(&self) -> usize {
        match self {
            Ok(v) => 1 + v.estimate(),
            Err(e) => 1 + e.estimate(),
        }
    }
}
