//! Per-width entry points.
//!
//! Every lane width gets the same six functions (`rk4_stepper`,
//! `rk4_richardson`, `gill_stepper`, `gill_richardson`, `nystrom_stepper`,
//! `nystrom_richardson`), each a direct instantiation of the generic
//! [`stepper`] or [`richardson`] for that register type:
//!
//! ```rust
//! use simdode::ode::dispatch::f32x16;
//! use simdode::simd::{F32x16, SimdLanes};
//!
//! let y = f32x16::gill_stepper(|_x, y| y, F32x16::splat(1.0), F32x16::splat(0.0), 0.1, 10);
//! assert!(y.to_vec().iter().all(|lane| (lane - std::f32::consts::E).abs() < 1e-4));
//! ```

use crate::ode::richardson::richardson;
use crate::ode::stepper::stepper;
use crate::ode::tableau::{Gill, Nystrom, Rk4};

macro_rules! lane_entry_points {
    ($(#[$attr:meta])* $module:ident, $lanes:ident, $scalar:ty) => {
        $(#[$attr])*
        pub mod $module {
            use super::*;
            use crate::simd::$lanes;

            /// Classical RK4, `n` steps of size `h`.
            #[inline]
            pub fn rk4_stepper<F>(f: F, y0: $lanes, x0: $lanes, h: $scalar, n: usize) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                stepper::<Rk4, $lanes, F>(&f, y0, x0, h, n)
            }

            /// RK4 with `n_cols` Richardson columns.
            #[inline]
            pub fn rk4_richardson<F>(
                f: F,
                y0: $lanes,
                x0: $lanes,
                h: $scalar,
                n: usize,
                n_cols: usize,
            ) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                richardson::<Rk4, $lanes, F>(&f, y0, x0, h, n, n_cols)
            }

            /// Runge-Kutta-Gill, `n` steps of size `h`.
            #[inline]
            pub fn gill_stepper<F>(f: F, y0: $lanes, x0: $lanes, h: $scalar, n: usize) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                stepper::<Gill, $lanes, F>(&f, y0, x0, h, n)
            }

            /// Runge-Kutta-Gill with `n_cols` Richardson columns.
            #[inline]
            pub fn gill_richardson<F>(
                f: F,
                y0: $lanes,
                x0: $lanes,
                h: $scalar,
                n: usize,
                n_cols: usize,
            ) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                richardson::<Gill, $lanes, F>(&f, y0, x0, h, n, n_cols)
            }

            /// Nyström, `n` steps of size `h`.
            #[inline]
            pub fn nystrom_stepper<F>(f: F, y0: $lanes, x0: $lanes, h: $scalar, n: usize) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                stepper::<Nystrom, $lanes, F>(&f, y0, x0, h, n)
            }

            /// Nyström with `n_cols` Richardson columns.
            #[inline]
            pub fn nystrom_richardson<F>(
                f: F,
                y0: $lanes,
                x0: $lanes,
                h: $scalar,
                n: usize,
                n_cols: usize,
            ) -> $lanes
            where
                F: Fn($lanes, $lanes) -> $lanes,
            {
                richardson::<Nystrom, $lanes, F>(&f, y0, x0, h, n, n_cols)
            }
        }
    };
}

lane_entry_points!(
    /// 8 lanes of `f32`.
    f32x8, F32x8, f32
);

lane_entry_points!(
    /// 16 lanes of `f32`.
    f32x16, F32x16, f32
);

lane_entry_points!(
    /// 4 lanes of `f64`.
    f64x4, F64x4, f64
);

lane_entry_points!(
    /// 8 lanes of `f64`.
    f64x8, F64x8, f64
);
