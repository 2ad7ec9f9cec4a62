//! Lane vectors the steppers are instantiated over.
//!
//! Four widths are always exported: [`F32x8`], [`F32x16`], [`F64x4`] and
//! [`F64x8`]. Each resolves to an intrinsic backend when `build.rs` enabled
//! one for the host, and to the portable [`portable::Packed`] vector
//! otherwise. Code written against [`SimdLanes`] does not see the difference.

#[cfg(avx2)]
pub mod avx2;

#[cfg(avx512)]
pub mod avx512;

pub mod portable;

pub mod traits;

pub use traits::SimdLanes;

#[cfg(avx2)]
pub use avx2::{f32x8::F32x8, f64x4::F64x4};

#[cfg(not(avx2))]
pub use portable::{F32x8, F64x4};

#[cfg(avx512)]
pub use avx512::{f32x16::F32x16, f64x8::F64x8};

#[cfg(not(avx512))]
pub use portable::{F32x16, F64x8};
