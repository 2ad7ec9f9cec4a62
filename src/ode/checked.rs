//! Opt-in validity check for stepper and extrapolator results.
//!
//! The kernels never inspect their lanes: NaN and infinities propagate and
//! come out as ordinary values. Wrapping a result in [`Checked`] is the
//! caller's way to ask whether that happened.

use num::Float;

use crate::error::{non_finite_error, Result};
use crate::simd::SimdLanes;

/// A lane vector together with the finiteness of its lanes.
#[derive(Debug, Clone, Copy)]
pub struct Checked<V> {
    value: V,
    valid: bool,
}

impl<V: SimdLanes> Checked<V> {
    /// Inspects every lane of `value`.
    pub fn new(value: V) -> Self {
        let valid = value.to_vec().iter().all(|lane| lane.is_finite());
        Self { value, valid }
    }

    /// The wrapped value, valid or not.
    pub fn value(&self) -> V {
        self.value
    }

    /// `true` when every lane is finite.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Indices of the lanes holding NaN or an infinity.
    pub fn invalid_lanes(&self) -> Vec<usize> {
        if self.valid {
            return Vec::new();
        }
        self.value.non_finite_lanes()
    }

    /// Converts into a `Result`, failing with the offending lanes.
    pub fn into_result(self) -> Result<V> {
        if self.valid {
            Ok(self.value)
        } else {
            Err(non_finite_error(
                self.value.non_finite_lanes(),
                "integration produced NaN or infinite lanes",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OdeError;
    use crate::simd::{F32x16, F64x4};

    fn invalid_after_check<V: SimdLanes>(value: V) -> Vec<usize> {
        Checked::new(value).invalid_lanes()
    }

    #[test]
    fn test_finite_value_is_valid() {
        let checked = Checked::new(F64x4::from_slice(&[1.0, -2.0, 0.0, 1e300]));
        assert!(checked.is_valid());
        assert!(checked.invalid_lanes().is_empty());
        assert!(checked.into_result().is_ok());
    }

    #[test]
    fn test_nan_and_infinite_lanes_are_reported() {
        let checked = Checked::new(F64x4::from_slice(&[1.0, f64::NAN, 3.0, f64::NEG_INFINITY]));
        assert!(!checked.is_valid());
        assert_eq!(checked.invalid_lanes(), vec![1, 3]);

        match checked.into_result() {
            Err(OdeError::NonFiniteError { lanes, .. }) => assert_eq!(lanes, vec![1, 3]),
            other => panic!("expected NonFiniteError, got {other:?}"),
        }
    }

    #[test]
    fn test_check_is_generic_over_lane_type() {
        let mut lanes = [0.5f32; 16];
        lanes[2] = f32::INFINITY;
        lanes[15] = f32::NAN;

        assert_eq!(invalid_after_check(F32x16::from_slice(&lanes)), vec![2, 15]);
        assert!(invalid_after_check(F64x4::splat(1.0)).is_empty());
    }
}
