//! Batch integration of many trajectories stored in plain slices.
//!
//! The slices are walked one register at a time: complete blocks of
//! `V::LANES` trajectories are loaded directly, and the remainder is loaded
//! zero-padded into a final partial block whose padding lanes are computed and
//! discarded. Blocks are processed sequentially.

use num::Zero;
use tracing::debug;

use crate::error::{validation_error, Result};
use crate::ode::derivative::Derivative;
use crate::ode::richardson::richardson;
use crate::ode::stepper::stepper;
use crate::ode::tableau::StepFormula;
use crate::simd::SimdLanes;

fn validate<T>(y0: &[T], x0: &[T]) -> Result<()> {
    if y0.is_empty() {
        return Err(validation_error("initial state slice can't be empty"));
    }
    if y0.len() != x0.len() {
        return Err(validation_error(format!(
            "initial state and abscissa slices must have same length ({} != {})",
            y0.len(),
            x0.len()
        )));
    }
    Ok(())
}

fn for_each_block<V, K>(y0: &[V::Scalar], x0: &[V::Scalar], kernel: K) -> Vec<V::Scalar>
where
    V: SimdLanes,
    K: Fn(V, V) -> V,
{
    let size = y0.len();
    let step = V::LANES;

    let complete_lanes = size - (size % step);
    let remaining_lanes = size - complete_lanes;

    let mut out = vec![V::Scalar::zero(); size];

    for i in (0..complete_lanes).step_by(step) {
        let y = V::from_slice(&y0[i..i + step]);
        let x = V::from_slice(&x0[i..i + step]);
        kernel(y, x).store_at(&mut out[i..i + step]);
    }

    if remaining_lanes > 0 {
        let y = V::from_slice(&y0[complete_lanes..]);
        let x = V::from_slice(&x0[complete_lanes..]);
        kernel(y, x).store_at(&mut out[complete_lanes..]);
    }

    debug!(
        trajectories = size,
        lanes = step,
        full_blocks = complete_lanes / step,
        tail = remaining_lanes,
        "batch integration finished"
    );

    out
}

/// Runs [`stepper`] over every trajectory in `y0`/`x0`, `V::LANES` at a time.
///
/// # Errors
///
/// `ValidationError` when `y0` is empty or the slices differ in length.
///
/// # Examples
///
/// ```rust
/// use simdode::ode::{integrate_slice, Rk4};
/// use simdode::simd::F64x4;
///
/// let y0 = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let x0 = [0.0; 6];
/// let y = integrate_slice::<Rk4, F64x4, _>(&|_x: F64x4, y: F64x4| y, &y0, &x0, 0.1, 10)?;
///
/// assert_eq!(y.len(), 6);
/// assert!((y[5] - 6.0 * std::f64::consts::E).abs() < 1e-3);
/// # Ok::<(), simdode::OdeError>(())
/// ```
pub fn integrate_slice<S, V, F>(
    f: &F,
    y0: &[V::Scalar],
    x0: &[V::Scalar],
    h: V::Scalar,
    n: usize,
) -> Result<Vec<V::Scalar>>
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    validate(y0, x0)?;

    Ok(for_each_block::<V, _>(y0, x0, |y, x| {
        stepper::<S, V, F>(f, y, x, h, n)
    }))
}

/// Runs [`richardson`] over every trajectory in `y0`/`x0`, `V::LANES` at a time.
///
/// # Errors
///
/// `ValidationError` when `y0` is empty or the slices differ in length.
pub fn extrapolate_slice<S, V, F>(
    f: &F,
    y0: &[V::Scalar],
    x0: &[V::Scalar],
    h: V::Scalar,
    n: usize,
    n_cols: usize,
) -> Result<Vec<V::Scalar>>
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    validate(y0, x0)?;

    Ok(for_each_block::<V, _>(y0, x0, |y, x| {
        richardson::<S, V, F>(f, y, x, h, n, n_cols)
    }))
}
