//! Total ordering over containers: absent sorts before present, present
//! values use their element's order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::optional::Optional;

/// Element types with a total order usable by [`compare`].
///
/// Floats order NaN below every other value and equal to itself, and treat
/// `-0.0` as equal to `0.0`.
pub trait Ordered {
    fn order(&self, other: &Self) -> Ordering;
}

macro_rules! ordered_by_ord {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Ordered for $ty {
                fn order(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )+
    };
}
ordered_by_ord!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    String, Vec<u8>, DateTime<Utc>,
);

impl Ordered for str {
    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

macro_rules! ordered_float {
    ($($ty:ty),+) => {
        $(
            impl Ordered for $ty {
                fn order(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (true, true) => Ordering::Equal,
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
                    }
                }
            }
        )+
    };
}
ordered_float!(f32, f64);

impl<T: Ordered> Ordered for Optional<T> {
    fn order(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

pub fn compare<T: Ordered>(x: &Optional<T>, y: &Optional<T>) -> Ordering {
    match (x.get(), y.get()) {
        ((_, false), (_, false)) => Ordering::Equal,
        ((_, false), (_, true)) => Ordering::Less,
        ((_, true), (_, false)) => Ordering::Greater,
        ((a, true), (b, true)) => a.order(b),
    }
}

/// Sorts ascending in place; stable.
pub fn sort<T: Ordered>(containers: &mut [Optional<T>]) {
    containers.sort_by(compare);
}

pub fn sort_desc<T: Ordered>(containers: &mut [Optional<T>]) {
    containers.sort_by(|x, y| compare(y, x));
}

pub fn is_sorted<T: Ordered>(containers: &[Optional<T>]) -> bool {
    containers
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

pub fn is_sorted_desc<T: Ordered>(containers: &[Optional<T>]) -> bool {
    containers
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Less)
}
