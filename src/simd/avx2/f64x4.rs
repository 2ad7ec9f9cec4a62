//! AVX2 4-lane f64 SIMD vector implementation.
//!
//! `F64x4` wraps the `__m256d` register: 4 double-precision lanes per
//! instruction. It is the narrowest double-precision width the steppers are
//! instantiated for.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::SimdLanes;

/// Number of f64 elements that fit in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 4;

/// AVX2 SIMD vector containing 4 packed f64 lanes.
#[derive(Copy, Clone, Debug)]
pub struct F64x4 {
    /// AVX 256-bit register containing 4 packed f64 values
    pub elements: __m256d,
}

impl F64x4 {
    /// Loads exactly 4 elements from unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 4 valid f64 values.
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_pd(ptr),
        }
    }

    /// Stores all 4 lanes to unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 4 writable f64 locations.
    #[inline(always)]
    pub unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_pd(ptr, self.elements)
    }
}

impl SimdLanes for F64x4 {
    type Scalar = f64;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self {
            elements: unsafe { _mm256_set1_pd(value) },
        }
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[f64]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => {
                let mut buffer = [0.0f64; LANE_COUNT];
                buffer[..slice.len()].copy_from_slice(slice);
                unsafe { Self::load_unaligned(buffer.as_ptr()) }
            }
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load_unaligned(slice.as_ptr())
            },
        }
    }

    #[inline(always)]
    fn store_at(&self, out: &mut [f64]) {
        match out.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => {
                let mut buffer = [0.0f64; LANE_COUNT];
                unsafe { self.store_unaligned_at(buffer.as_mut_ptr()) };
                let size = out.len();
                out.copy_from_slice(&buffer[..size]);
            }
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                self.store_unaligned_at(out.as_mut_ptr())
            },
        }
    }

    fn to_vec(&self) -> Vec<f64> {
        let mut out = vec![0.0f64; LANE_COUNT];
        self.store_at(&mut out);
        out
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self {
            elements: unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.elements) },
        }
    }
}

impl Add for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_sub_pd(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_pd(self.elements, rhs.elements) },
        }
    }
}

impl Div for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_div_pd(self.elements, rhs.elements) },
        }
    }
}
