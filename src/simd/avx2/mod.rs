//! AVX2 lane vectors for 256-bit registers.
//!
//! AVX2 is available on Intel processors since Haswell (2013) and AMD
//! processors since Excavator (2015). The build script probes the host and
//! emits `cfg(avx2)` when it is present; otherwise the portable vectors in
//! [`crate::simd::portable`] provide the same widths.
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 8 packed single-precision lanes (`__m256`)
//! - [`f64x4::F64x4`]: 4 packed double-precision lanes (`__m256d`)
//!
//! Only the arithmetic the steppers need is implemented: broadcast, load,
//! store, the four lane-wise operators and `abs`.

pub mod f32x8;

pub mod f64x4;
