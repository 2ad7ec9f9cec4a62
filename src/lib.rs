//! Vectorized fixed-step ODE integration.
//!
//! `simdode` integrates many independent scalar initial value problems
//! `dy/dx = f(x, y)` at once, one per SIMD lane. Three explicit formulas are
//! provided (classical Runge-Kutta, Runge-Kutta-Gill and a six-stage Nyström
//! formula), each usable on its own or under Richardson extrapolation.
//!
//! ```rust
//! use simdode::ode::{richardson, stepper, Rk4};
//! use simdode::simd::{F64x4, SimdLanes};
//!
//! let f = |_x: F64x4, y: F64x4| y;
//! let y0 = F64x4::splat(1.0);
//! let x0 = F64x4::splat(0.0);
//!
//! let plain = stepper::<Rk4, _, _>(&f, y0, x0, 0.1, 10);
//! let refined = richardson::<Rk4, _, _>(&f, y0, x0, 0.1, 10, 3);
//!
//! let e = std::f64::consts::E;
//! assert!((plain.to_vec()[0] - e).abs() < 1e-4);
//! assert!((refined.to_vec()[0] - e).abs() < 1e-8);
//! ```
#![cfg_attr(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        rustc_channel = "nightly",
        not(avx512_stable)
    ),
    feature(avx512_target_feature, stdarch_x86_avx512)
)]

pub mod error;
pub mod ode;
pub mod simd;

pub use error::{OdeError, Result};
