//! Coefficient tables for the explicit single-step formulas.
//!
//! Each formula is an explicit Runge-Kutta scheme written as a Butcher
//! tableau: stage `s` evaluates
//!
//! ```text
//! k_s = f(x + c_s h, y + h * sum_{j<s} a_sj k_j)
//! ```
//!
//! and the step returns `y + h * sum_s b_s k_s`. Tables are padded to
//! [`MAX_STAGES`] so that every formula shares one type and one generic
//! evaluator; only the first `stages` rows are used.
//!
//! # References
//! - Kutta, W. (1901). "Beitrag zur näherungsweisen Integration totaler
//!   Differentialgleichungen". Zeitschrift für Mathematik und Physik, 46.
//! - Gill, S. (1951). "A process for the step-by-step integration of
//!   differential equations in an automatic digital computing machine".
//!   Proc. Cambridge Philos. Soc., 47, 96-108.
//! - Butcher, J. C. (2016). "Numerical Methods for Ordinary Differential
//!   Equations". John Wiley & Sons, 3rd Edition (Nyström's fifth-order
//!   six-stage method).

use std::f64::consts::FRAC_1_SQRT_2;

/// Largest stage count among the supported formulas.
pub const MAX_STAGES: usize = 6;

/// Explicit Runge-Kutta coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButcherTableau {
    /// Human-readable name used in logs.
    pub name: &'static str,
    /// Local truncation order `p` of the formula over a fixed interval.
    pub order: u32,
    /// Number of derivative evaluations per step.
    pub stages: usize,
    /// Coupling coefficients, strictly lower triangular.
    pub a: [[f64; MAX_STAGES]; MAX_STAGES],
    /// Quadrature weights.
    pub b: [f64; MAX_STAGES],
    /// Nodes: fraction of `h` at which each stage is evaluated.
    pub c: [f64; MAX_STAGES],
}

impl ButcherTableau {
    /// Classical four-stage Runge-Kutta.
    pub const RK4: Self = Self {
        name: "rk4",
        order: 4,
        stages: 4,
        a: [
            [0., 0., 0., 0., 0., 0.],
            [1. / 2., 0., 0., 0., 0., 0.],
            [0., 1. / 2., 0., 0., 0., 0.],
            [0., 0., 1., 0., 0., 0.],
            [0.; MAX_STAGES],
            [0.; MAX_STAGES],
        ],
        b: [1. / 6., 1. / 3., 1. / 3., 1. / 6., 0., 0.],
        c: [0., 1. / 2., 1. / 2., 1., 0., 0.],
    };

    /// Gill's variant of RK4. The `1 ± 1/sqrt(2)` couplings keep the
    /// rounding error accumulated in the stage sums smaller than the
    /// classical weights do.
    pub const GILL: Self = Self {
        name: "gill",
        order: 4,
        stages: 4,
        a: [
            [0., 0., 0., 0., 0., 0.],
            [1. / 2., 0., 0., 0., 0., 0.],
            [-0.5 + FRAC_1_SQRT_2, 1. - FRAC_1_SQRT_2, 0., 0., 0., 0.],
            [0., -FRAC_1_SQRT_2, 1. + FRAC_1_SQRT_2, 0., 0., 0.],
            [0.; MAX_STAGES],
            [0.; MAX_STAGES],
        ],
        b: [
            1. / 6.,
            (1. - FRAC_1_SQRT_2) / 3.,
            (1. + FRAC_1_SQRT_2) / 3.,
            1. / 6.,
            0.,
            0.,
        ],
        c: [0., 1. / 2., 1. / 2., 1., 0., 0.],
    };

    /// Nyström's six-stage method.
    ///
    /// Fifth order. It is sometimes listed with `p = 2`, which does not
    /// match its measured error ratio (`test_local_error_ratio_matches_order`
    /// in the stepper tests).
    pub const NYSTROM: Self = Self {
        name: "nystrom",
        order: 5,
        stages: 6,
        a: [
            [0., 0., 0., 0., 0., 0.],
            [1. / 3., 0., 0., 0., 0., 0.],
            [4. / 25., 6. / 25., 0., 0., 0., 0.],
            [1. / 4., -3., 15. / 4., 0., 0., 0.],
            [6. / 81., 90. / 81., -50. / 81., 8. / 81., 0., 0.],
            [6. / 75., 36. / 75., 10. / 75., 8. / 75., 0., 0.],
        ],
        b: [23. / 192., 0., 125. / 192., 0., -81. / 192., 125. / 192.],
        c: [0., 1. / 3., 2. / 5., 1., 2. / 3., 4. / 5.],
    };
}

/// A single-step formula the steppers can be instantiated with.
///
/// Implementors are zero-sized markers; the coefficients live in a constant
/// table so each instantiation is monomorphised with its coefficients known
/// at compile time.
pub trait StepFormula {
    /// Coefficients of the formula.
    const TABLEAU: ButcherTableau;

    /// Local truncation order `p` used by Richardson extrapolation.
    const ORDER: u32 = Self::TABLEAU.order;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

/// Runge-Kutta-Gill, fourth order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gill;

/// Nyström's six-stage formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nystrom;

impl StepFormula for Rk4 {
    const TABLEAU: ButcherTableau = ButcherTableau::RK4;
}

impl StepFormula for Gill {
    const TABLEAU: ButcherTableau = ButcherTableau::GILL;
}

impl StepFormula for Nystrom {
    const TABLEAU: ButcherTableau = ButcherTableau::NYSTROM;
}
