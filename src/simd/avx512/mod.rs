//! AVX-512 lane vectors for 512-bit registers.
//!
//! Compiled only on rustc 1.89+ (or nightly) running on an AVX-512F host, where
//! `build.rs` emits `cfg(avx512)`. Other builds use the portable 16-lane f32
//! and 8-lane f64 vectors instead.

pub mod f32x16;

pub mod f64x8;
