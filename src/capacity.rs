use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{CheckedAdd, Zero};

/// A trait representing an edge capacity, either an integer or a float.
///
/// Capacities only need a partial order so that floats qualify; validation rejects the values
/// (NaN, infinities, negatives) for which that order would misbehave.
pub trait Capacity:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + PartialOrd
    + AddAssign
    + SubAssign
    + Zero
    + Debug
    + Display
    + Default
{
    /// `false` for NaN and infinities.
    fn is_finite(self) -> bool {
        true
    }

    /// `None` when the sum is not representable.
    fn add_checked(self, other: Self) -> Option<Self>;

    /// Equality used when checking a computed flow.
    fn within_tolerance(self, other: Self) -> bool {
        self == other
    }
}

macro_rules! int_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                fn add_checked(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

macro_rules! float_capacity {
    ($($t:ty => $tolerance:expr),*) => {
        $(
            impl Capacity for $t {
                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }

                fn add_checked(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.is_finite().then_some(sum)
                }

                fn within_tolerance(self, other: Self) -> bool {
                    // capacities are non-negative, so the larger operand is the magnitude
                    let (lo, hi) = if self < other { (self, other) } else { (other, self) };
                    hi - lo <= <$t>::max(1.0, hi) * $tolerance
                }
            }
        )*
    };
}

int_capacity!(i32, i64, u32, u64, usize);
// relative, a few orders of magnitude above each type's epsilon
float_capacity!(f32 => 1e-4, f64 => 1e-9);

/// Sums capacities, returning `None` on overflow.
pub(crate) fn checked_sum<C: Capacity>(mut values: impl Iterator<Item = C>) -> Option<C> {
    values.try_fold(C::zero(), |acc, c| acc.add_checked(c))
}
