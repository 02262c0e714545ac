//! Total orders over indexable column values.
//!
//! Every indexed column needs a total order so that sorted indices and
//! binary search agree. Rust's `Ord` does not cover floats, so columns use
//! [`IndexKey`] instead:
//!
//! - integers, `bool`, `char` and [`RowId`] use their natural order
//! - text compares Unicode scalar values one at a time, never locale
//!   collation and never the bytes of a particular encoding
//! - floats use the order on reals, so `-0.0` equals `0.0`; NaNs sort at
//!   the extremes by sign as in `total_cmp`
//! - `Option<K>` sorts `None` before every `Some`

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::id::RowId;

/// A column value with a total order, usable as an index key.
pub trait IndexKey: Clone + Debug {
    /// Compares two keys. Must be a total order.
    fn compare(&self, other: &Self) -> Ordering;

    /// Returns true if the two keys are equal under [`IndexKey::compare`].
    fn key_eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

macro_rules! ord_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexKey for $ty {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

ord_key!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, RowId,
);

macro_rules! float_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexKey for $ty {
                #[inline]
                #[allow(clippy::float_cmp)]
                fn compare(&self, other: &Self) -> Ordering {
                    // Signed zeros are one value; NaNs keep their total_cmp slots.
                    let fold = |x: $ty| if x == 0.0 { 0.0 } else { x };
                    fold(*self).total_cmp(&fold(*other))
                }
            }
        )*
    };
}

float_key!(f32, f64);

/// Compares two strings by Unicode scalar value.
#[must_use]
pub fn compare_scalars(a: &str, b: &str) -> Ordering {
    a.chars().cmp(b.chars())
}

impl IndexKey for &'static str {
    fn compare(&self, other: &Self) -> Ordering {
        compare_scalars(self, other)
    }
}

impl IndexKey for String {
    fn compare(&self, other: &Self) -> Ordering {
        compare_scalars(self, other)
    }
}

impl IndexKey for Box<str> {
    fn compare(&self, other: &Self) -> Ordering {
        compare_scalars(self, other)
    }
}

impl<K: IndexKey> IndexKey for Option<K> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.compare(b),
        }
    }
}

impl<A: IndexKey, B: IndexKey> IndexKey for (A, B) {
    fn compare(&self, other: &Self) -> Ordering {
        self.0
            .compare(&other.0)
            .then_with(|| self.1.compare(&other.1))
    }
}
