#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::SimdLanes;

/// The number of f32 lanes in an AVX-512 vector.
pub const LANE_COUNT: usize = 16;

/// A 16-lane, 32-bit floating-point SIMD vector using AVX-512F intrinsics.
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct F32x16 {
    pub elements: __m512,
}

impl SimdLanes for F32x16 {
    type Scalar = f32;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            // SAFETY: AVX-512F is present whenever this module is compiled.
            elements: unsafe { _mm512_set1_ps(value) },
        }
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self::splat(value as f32)
    }

    /// Loads up to 16 lanes, zeroing lanes past the end of `slice` with a
    /// masked load.
    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        let size = slice.len().min(LANE_COUNT);
        let mask: __mmask16 = if size == LANE_COUNT {
            0xFFFF
        } else {
            (1u16 << size) - 1
        };

        Self {
            elements: unsafe { _mm512_maskz_loadu_ps(mask, slice.as_ptr()) },
        }
    }

    /// Stores the leading `min(out.len(), 16)` lanes with a masked store.
    #[inline(always)]
    fn store_at(&self, out: &mut [f32]) {
        let size = out.len().min(LANE_COUNT);
        let mask: __mmask16 = if size == LANE_COUNT {
            0xFFFF
        } else {
            (1u16 << size) - 1
        };

        unsafe { _mm512_mask_storeu_ps(out.as_mut_ptr(), mask, self.elements) }
    }

    fn to_vec(&self) -> Vec<f32> {
        let mut out = vec![0.0f32; LANE_COUNT];
        self.store_at(&mut out);
        out
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self {
            elements: unsafe { _mm512_abs_ps(self.elements) },
        }
    }
}

impl Add for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm512_div_ps(self.elements, rhs.elements) },
        }
    }
}
