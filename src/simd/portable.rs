//! Portable lane vectors.
//!
//! `Packed<T, N>` is a plain aligned array that implements [`SimdLanes`] with
//! lane-wise loops. It stands in for any width whose intrinsic backend was not
//! compiled in (see `build.rs`), so every width is always available with the
//! same semantics. The loops have constant trip counts and are left to the
//! auto-vectorizer.

use std::ops::{Add, Div, Mul, Sub};

use num::Float;

use crate::simd::SimdLanes;

/// Array-backed vector of `N` lanes of `T`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(64))]
pub struct Packed<T, const N: usize>(pub [T; N]);

/// 8 lanes of `f32` without intrinsics.
pub type F32x8 = Packed<f32, 8>;

/// 16 lanes of `f32` without intrinsics.
pub type F32x16 = Packed<f32, 16>;

/// 4 lanes of `f64` without intrinsics.
pub type F64x4 = Packed<f64, 4>;

/// 8 lanes of `f64` without intrinsics.
pub type F64x8 = Packed<f64, 8>;

impl<T: Float, const N: usize> Packed<T, N> {
    #[inline(always)]
    fn zip_with(self, rhs: Self, op: impl Fn(T, T) -> T) -> Self {
        Self(std::array::from_fn(|lane| op(self.0[lane], rhs.0[lane])))
    }

    #[inline(always)]
    fn load(slice: &[T]) -> Self {
        debug_assert!(!slice.is_empty(), "Size can't be empty (size zero)");

        let mut lanes = [T::zero(); N];
        let size = slice.len().min(N);
        lanes[..size].copy_from_slice(&slice[..size]);
        Self(lanes)
    }

    #[inline(always)]
    fn store(&self, out: &mut [T]) {
        let size = out.len().min(N);
        out[..size].copy_from_slice(&self.0[..size]);
    }
}

impl<T: Float, const N: usize> Add for Packed<T, N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Float, const N: usize> Sub for Packed<T, N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: Float, const N: usize> Mul for Packed<T, N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl<T: Float, const N: usize> Div for Packed<T, N> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl<const N: usize> SimdLanes for Packed<f32, N> {
    type Scalar = f32;

    const LANES: usize = N;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self([value as f32; N])
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        Self::load(slice)
    }

    #[inline(always)]
    fn store_at(&self, out: &mut [f32]) {
        self.store(out)
    }

    fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self(self.0.map(f32::abs))
    }
}

impl<const N: usize> SimdLanes for Packed<f64, N> {
    type Scalar = f64;

    const LANES: usize = N;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn splat_f64(value: f64) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn from_slice(slice: &[f64]) -> Self {
        Self::load(slice)
    }

    #[inline(always)]
    fn store_at(&self, out: &mut [f64]) {
        self.store(out)
    }

    fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self(self.0.map(f64::abs))
    }
}
