//! Richardson extrapolation over halved step sizes.
//!
//! Row `i` of the table integrates the same interval `[x0, x0 + n h]` with
//! step `h / 2^i` (`n 2^i` steps). Column 0 holds the raw stepper results and
//! column `j` removes one more term of the error expansion:
//!
//! ```text
//! T[i][j] = T[i][j-1] + (T[i][j-1] - T[i-1][j-1]) / (2^q - 1)
//! ```
//!
//! where `q = p j` for the default [`ExtrapolationSchedule::Geometric`]
//! schedule and `q = p + j - 1` for [`ExtrapolationSchedule::Successive`].
//! The diagonal entry of the last row is the answer.
//!
//! Only the previous row is needed to build the next one, so the table is
//! kept as two rolling rows of at most `columns` lane vectors. It is built
//! fresh on every call and dropped on return.

use num::{Float, One, Zero};
use tracing::{debug, trace, warn};

use crate::error::{config_error, Result};
use crate::ode::checked::Checked;
use crate::ode::derivative::Derivative;
use crate::ode::stepper::stepper;
use crate::ode::tableau::StepFormula;
use crate::simd::SimdLanes;

/// Hard cap on extrapolation columns. Row `i` takes `n 2^i` steps, so this
/// also keeps the step count of the finest row representable.
pub const MAX_COLUMNS: usize = 24;

/// How the column denominators grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrapolationSchedule {
    /// Error expansion in powers of `h^p`: column `j` divides by `2^(p j) - 1`.
    #[default]
    Geometric,
    /// Error expansion in consecutive powers `h^p, h^(p+1), ...`: column `j`
    /// divides by `2^(p + j - 1) - 1`.
    Successive,
}

impl ExtrapolationSchedule {
    /// Exponent `q` of the `2^q - 1` denominator for column `column`.
    pub fn exponent(&self, order: u32, column: usize) -> u32 {
        debug_assert!(column >= 1, "column 0 is not extrapolated");

        match self {
            ExtrapolationSchedule::Geometric => order * column as u32,
            ExtrapolationSchedule::Successive => order + column as u32 - 1,
        }
    }

    /// `2^q - 1` for column `column`.
    pub fn denominator(&self, order: u32, column: usize) -> f64 {
        2f64.powi(self.exponent(order, column) as i32) - 1.0
    }
}

/// Outcome of [`Richardson::extrapolate`].
#[derive(Debug, Clone, Copy)]
pub struct Extrapolation<V> {
    /// Most extrapolated estimate, `T[c-1][c-1]` for `c = columns_used`.
    pub value: V,
    /// Number of table rows actually computed.
    pub columns_used: usize,
    /// `true` when a tolerance was configured and every lane met it.
    pub converged: bool,
    /// `T[c-1][c-1] - T[c-2][c-2]` per lane; zero when only one row was built.
    pub correction: V,
}

impl<V: SimdLanes> Extrapolation<V> {
    /// Wraps `value` with its finiteness flag.
    pub fn checked(&self) -> Checked<V> {
        Checked::new(self.value)
    }
}

/// Configurable Richardson extrapolator over the formula `S`.
///
/// # Examples
///
/// ```rust
/// use simdode::ode::{Richardson, Rk4};
/// use simdode::simd::{F64x4, SimdLanes};
///
/// let extrapolator = Richardson::<Rk4>::new(6)?.with_tolerance(1e-10)?;
/// let report = extrapolator.extrapolate(
///     &|_x: F64x4, y: F64x4| y,
///     F64x4::splat(1.0),
///     F64x4::splat(0.0),
///     0.1,
///     10,
/// );
///
/// assert!(report.converged);
/// assert!(report.columns_used <= 6);
/// # Ok::<(), simdode::OdeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Richardson<S> {
    columns: usize,
    schedule: ExtrapolationSchedule,
    tolerance: Option<f64>,
    formula: std::marker::PhantomData<S>,
}

impl<S: StepFormula> Richardson<S> {
    /// Creates an extrapolator that builds exactly `columns` rows.
    ///
    /// # Errors
    ///
    /// `ConfigError` when `columns` is 0 or above [`MAX_COLUMNS`].
    pub fn new(columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(config_error("columns", "at least one column is required"));
        }
        if columns > MAX_COLUMNS {
            return Err(config_error(
                "columns",
                format!("{columns} exceeds the maximum of {MAX_COLUMNS}"),
            ));
        }

        Ok(Self {
            columns,
            schedule: ExtrapolationSchedule::default(),
            tolerance: None,
            formula: std::marker::PhantomData,
        })
    }

    /// Selects the denominator schedule.
    pub fn with_schedule(mut self, schedule: ExtrapolationSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Stops as soon as `|T[i][i] - T[i-1][i-1]| <= tolerance` in every lane.
    ///
    /// # Errors
    ///
    /// `ConfigError` when `tolerance` is negative or NaN.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(config_error(
                "tolerance",
                format!("{tolerance} is not a non-negative number"),
            ));
        }

        self.tolerance = Some(tolerance);
        Ok(self)
    }

    /// Maximum number of rows.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Denominator schedule in use.
    pub fn schedule(&self) -> ExtrapolationSchedule {
        self.schedule
    }

    /// Convergence tolerance, if any.
    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    /// Integrates `n` coarse steps of size `h` and extrapolates.
    ///
    /// Without a tolerance exactly [`Self::columns`] rows are built, fewer only
    /// when the step count `n 2^row` of a row would overflow `usize`. With one,
    /// the table stops growing at the first row whose diagonal moved by no more
    /// than the tolerance in every lane.
    pub fn extrapolate<V, F>(&self, f: &F, y0: V, x0: V, h: V::Scalar, n: usize) -> Extrapolation<V>
    where
        V: SimdLanes,
        F: Derivative<V> + ?Sized,
    {
        let order = S::ORDER;
        let two = V::Scalar::one() + V::Scalar::one();
        let tolerance = self
            .tolerance
            .and_then(|tolerance| <V::Scalar as num::NumCast>::from(tolerance));

        let mut previous: Vec<V> = Vec::with_capacity(self.columns);
        let mut current: Vec<V> = Vec::with_capacity(self.columns);
        let mut correction = V::splat(V::Scalar::zero());
        let mut converged = false;
        let mut columns_used = 0;

        let rows = representable_rows(n, self.columns);
        if rows < self.columns {
            warn!(
                steps = n,
                requested = self.columns,
                used = rows,
                "richardson step count overflows usize, finest rows dropped"
            );
        }

        for row in 0..rows {
            let steps = n << row;
            let step_size = h / two.powi(row as i32);

            current.clear();
            current.push(stepper::<S, V, F>(f, y0, x0, step_size, steps));

            for column in 1..=row {
                let denominator = V::splat_f64(self.schedule.denominator(order, column));
                let refined = current[column - 1];
                let coarse = previous[column - 1];
                current.push(refined + (refined - coarse) / denominator);
            }

            columns_used = row + 1;

            if row > 0 {
                correction = current[row] - previous[row - 1];
            }

            trace!(
                formula = S::TABLEAU.name,
                row,
                steps,
                step_size = ?step_size,
                "richardson row complete"
            );

            std::mem::swap(&mut previous, &mut current);

            if let Some(tolerance) = tolerance {
                if row > 0 && correction.abs().all_le(tolerance) {
                    converged = true;
                    break;
                }
            }
        }

        debug!(
            formula = S::TABLEAU.name,
            columns_used,
            max_columns = self.columns,
            converged,
            "richardson extrapolation finished"
        );

        Extrapolation {
            value: previous[columns_used - 1],
            columns_used,
            converged,
            correction,
        }
    }
}

/// Leading rows, at most `columns`, whose step count `n 2^row` fits in `usize`.
fn representable_rows(n: usize, columns: usize) -> usize {
    (0..columns)
        .take_while(|&row| n.checked_mul(1usize << row).is_some())
        .count()
}

/// Integrates `n` coarse steps of size `h` and returns the `n_cols`-column
/// Richardson estimate of `y(x0 + n h)`.
///
/// Exactly `n_cols` rows are built; no convergence test is made. `n_cols = 1`
/// returns the plain [`stepper`] result bit for bit, and `n = 0` returns `y0`
/// from every row. A column count of 0 is raised to 1 and one above
/// [`MAX_COLUMNS`] is lowered to it.
///
/// # Examples
///
/// ```rust
/// use simdode::ode::{richardson, Rk4};
/// use simdode::simd::{F64x4, SimdLanes};
///
/// let grow = |_x: F64x4, y: F64x4| y;
/// let y = richardson::<Rk4, _, _>(&grow, F64x4::splat(1.0), F64x4::splat(0.0), 0.1, 10, 3);
///
/// for lane in y.to_vec() {
///     assert!((lane - std::f64::consts::E).abs() < 1e-8);
/// }
/// ```
pub fn richardson<S, V, F>(f: &F, y0: V, x0: V, h: V::Scalar, n: usize, n_cols: usize) -> V
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    let columns = n_cols.clamp(1, MAX_COLUMNS);
    if columns != n_cols {
        warn!(
            requested = n_cols,
            used = columns,
            "richardson column count out of range, clamped"
        );
    }

    let extrapolator = Richardson::<S> {
        columns,
        schedule: ExtrapolationSchedule::Geometric,
        tolerance: None,
        formula: std::marker::PhantomData,
    };

    extrapolator.extrapolate(f, y0, x0, h, n).value
}
