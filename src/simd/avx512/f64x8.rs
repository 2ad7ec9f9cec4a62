#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::SimdLanes;

/// The number of f64 lanes in an AVX-512 vector.
pub const LANE_COUNT: usize = 8;

/// An 8-lane, 64-bit floating-point SIMD vector using AVX-512F intrinsics.
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct F64x8 {
    pub elements: __m512d,
}

impl SimdLanes for F64x8 {
    type Scalar = f64;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self {
            elements: unsafe { _mm512_set1_pd(value) },
        }
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[f64]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        let size = slice.len().min(LANE_COUNT);
        let mask: __mmask8 = if size == LANE_COUNT {
            0xFF
        } else {
            (1u8 << size) - 1
        };

        Self {
            elements: unsafe { _mm512_maskz_loadu_pd(mask, slice.as_ptr()) },
        }
    }

    #[inline(always)]
    fn store_at(&self, out: &mut [f64]) {
        let size = out.len().min(LANE_COUNT);
        let mask: __mmask8 = if size == LANE_COUNT {
            0xFF
        } else {
            (1u8 << size) - 1
        };

        unsafe { _mm512_mask_storeu_pd(out.as_mut_ptr(), mask, self.elements) }
    }

    fn to_vec(&self) -> Vec<f64> {
        let mut out = vec![0.0f64; LANE_COUNT];
        self.store_at(&mut out);
        out
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self {
            elements: unsafe { _mm512_abs_pd(self.elements) },
        }
    }
}

impl Add for F64x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_add_pd(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F64x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_sub_pd(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_mul_pd(self.elements, rhs.elements) },
        }
    }
}

impl Div for F64x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_div_pd(self.elements, rhs.elements) },
        }
    }
}
