use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use num::Float;

/// A packed register of independent scalar lanes.
///
/// Every arithmetic operator works lane by lane; no operation on this trait
/// lets one lane observe another, which is what lets the steppers treat each
/// lane as its own trajectory.
pub trait SimdLanes:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Element type of a single lane.
    type Scalar: Float + Debug;

    /// Number of lanes in the register.
    const LANES: usize;

    /// Broadcasts `value` to every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Broadcasts an `f64` constant to every lane, rounding it to the lane
    /// precision. Formula coefficients are stored as `f64` and enter the
    /// registers through this.
    fn splat_f64(value: f64) -> Self;

    /// Loads the first `LANES` values of `slice`.
    ///
    /// Shorter slices are zero-padded; the padding lanes are still computed
    /// but carry no meaning.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the slice is empty.
    fn from_slice(slice: &[Self::Scalar]) -> Self;

    /// Stores the leading `min(out.len(), LANES)` lanes into `out`.
    fn store_at(&self, out: &mut [Self::Scalar]);

    /// Copies every lane out into a vector.
    fn to_vec(&self) -> Vec<Self::Scalar>;

    /// Lane-wise absolute value.
    fn abs(&self) -> Self;

    /// Indices of lanes holding NaN or an infinity.
    fn non_finite_lanes(&self) -> Vec<usize> {
        self.to_vec()
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_finite())
            .map(|(lane, _)| lane)
            .collect()
    }

    /// `true` when every lane is `<= bound`. NaN lanes never satisfy it.
    fn all_le(&self, bound: Self::Scalar) -> bool {
        self.to_vec().iter().all(|value| *value <= bound)
    }
}
