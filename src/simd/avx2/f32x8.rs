//! AVX2 8-lane f32 SIMD vector implementation.
//!
//! This module provides `F32x8`, a lane vector that wraps Intel's AVX `__m256`
//! register so that 8 independent single-precision trajectories advance with
//! one instruction per arithmetic operation.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel processors with AVX2 support (Haswell and later)
//! - **Target Architecture**: x86_64 (and x86 with SSE compatibility)
//! - **Selection**: compiled only when `build.rs` emits `cfg(avx2)`
//!
//! # Supported Operations
//!
//! - `splat()`, `splat_f64()` - Broadcast a scalar to every lane
//! - `from_slice()` - Load with zero-padding for short slices
//! - `store_at()` - Store with automatic partial handling
//! - Element-wise `+`, `-`, `*`, `/` and `abs()`

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::SimdLanes;

/// Number of f32 elements that fit in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 lanes.
///
/// Each lane is an independent scalar value; none of the operations below
/// shuffle or reduce across lanes.
///
/// # Usage
///
/// ```rust
/// use simdode::simd::{F32x8, SimdLanes};
///
/// let y0 = F32x8::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// let h = F32x8::splat(0.5);
/// let half = y0 * h;
/// assert_eq!(half.to_vec()[7], 4.0);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX 256-bit register containing 8 packed f32 values
    pub elements: __m256,
}

impl F32x8 {
    /// Loads exactly 8 elements from unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Stores all 8 lanes to unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 writable f32 locations.
    #[inline(always)]
    pub unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_ps(ptr, self.elements)
    }
}

impl SimdLanes for F32x8 {
    type Scalar = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
        }
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self::splat(value as f32)
    }

    /// Loads up to 8 lanes from `slice`.
    ///
    /// Full slices are loaded directly; shorter slices go through a
    /// zero-initialised stack buffer so no memory past the slice is read.
    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => {
                let mut buffer = [0.0f32; LANE_COUNT];
                buffer[..slice.len()].copy_from_slice(slice);
                unsafe { Self::load_unaligned(buffer.as_ptr()) }
            }
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load_unaligned(slice.as_ptr())
            },
        }
    }

    #[inline(always)]
    fn store_at(&self, out: &mut [f32]) {
        match out.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => {
                let mut buffer = [0.0f32; LANE_COUNT];
                unsafe { self.store_unaligned_at(buffer.as_mut_ptr()) };
                let size = out.len();
                out.copy_from_slice(&buffer[..size]);
            }
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                self.store_unaligned_at(out.as_mut_ptr())
            },
        }
    }

    fn to_vec(&self) -> Vec<f32> {
        let mut out = vec![0.0f32; LANE_COUNT];
        self.store_at(&mut out);
        out
    }

    /// Clears the sign bit of every lane.
    #[inline(always)]
    fn abs(&self) -> Self {
        Self {
            elements: unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.elements) },
        }
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod simd_load_tests {
        use super::*;

        #[test]
        fn test_from_slice_full() {
            let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
            let vec = F32x8::from_slice(&data);
            assert_eq!(vec.to_vec(), data);
        }

        #[test]
        fn test_from_slice_oversized() {
            let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
            let vec = F32x8::from_slice(&data);
            assert_eq!(vec.to_vec(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        }

        #[test]
        fn test_from_slice_partial() {
            let data = [1.0, 2.0, 3.0, 4.0, 5.0];
            let vec = F32x8::from_slice(&data);
            assert_eq!(vec.to_vec(), [1.0, 2.0, 3.0, 4.0, 5.0, 0.0, 0.0, 0.0]);
        }

        #[test]
        fn test_store_partial_seven_elements() {
            let vec = F32x8::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
            let mut out = [0.0f32; 7];
            vec.store_at(&mut out);
            assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_operators() {
            let a = F32x8::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
            let b = F32x8::splat(2.0);

            assert_eq!((a + b).to_vec(), [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
            assert_eq!((a - b).to_vec(), [-1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
            assert_eq!((a * b).to_vec(), [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
            assert_eq!((a / b).to_vec(), [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]);
        }

        #[test]
        fn test_abs_special_values() {
            let a = F32x8::from_slice(&[-1.0, 0.0, -0.0, f32::NEG_INFINITY, 2.5, -2.5, 1e-30, -7.0]);
            let abs = a.abs().to_vec();
            assert_eq!(abs[0], 1.0);
            assert!(abs[2].is_sign_positive());
            assert_eq!(abs[3], f32::INFINITY);
            assert_eq!(abs[5], 2.5);
            assert_eq!(abs[7], 7.0);
        }
    }
}
