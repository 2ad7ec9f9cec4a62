//! Fixed-step explicit integrators and Richardson extrapolation.
//!
//! Every function here is generic over a [`StepFormula`] marker
//! ([`Rk4`], [`Gill`], [`Nystrom`]) and a [`crate::simd::SimdLanes`] register.
//! Each lane of the register is an independent trajectory `dy/dx = f(x, y)`;
//! all lanes share the step size and step count.
//!
//! [`dispatch`] has the concrete per-width entry points, and [`integrate_slice`]
//! and [`extrapolate_slice`] run the same kernels over plain slices.

pub mod checked;
pub mod derivative;
pub mod dispatch;
pub mod richardson;
pub mod slice;
pub mod stepper;
pub mod tableau;

pub use checked::Checked;
pub use derivative::Derivative;
pub use richardson::{
    richardson, Extrapolation, ExtrapolationSchedule, Richardson, MAX_COLUMNS,
};
pub use slice::{extrapolate_slice, integrate_slice};
pub use stepper::{step, stepper, stepper_checked};
pub use tableau::{ButcherTableau, Gill, Nystrom, Rk4, StepFormula, MAX_STAGES};
