//! Fixed-step explicit stepping.
//!
//! [`stepper`] advances every lane of a register by `n` steps of the same
//! broadcast size `h`, using one formula from [`crate::ode::tableau`]. The
//! loop body is the tableau evaluated stage by stage; with the coefficients
//! known at compile time the zero couplings fold away and each instantiation
//! reduces to the straight-line formula.

use num::Zero;

use crate::ode::checked::Checked;
use crate::ode::derivative::Derivative;
use crate::ode::tableau::{StepFormula, MAX_STAGES};
use crate::simd::SimdLanes;

/// Takes a single step of size `h` from `(x, y)`.
#[inline(always)]
pub fn step<S, V, F>(f: &F, x: V, y: V, h: V) -> V
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    let tableau = S::TABLEAU;
    let zero = V::splat(V::Scalar::zero());
    let mut k = [zero; MAX_STAGES];

    for s in 0..tableau.stages {
        let mut coupled: Option<V> = None;
        for (j, &a) in tableau.a[s][..s].iter().enumerate() {
            if a != 0.0 {
                let term = V::splat_f64(a) * k[j];
                coupled = Some(coupled.map_or(term, |acc| acc + term));
            }
        }

        let y_stage = match coupled {
            Some(acc) => y + h * acc,
            None => y,
        };
        let x_stage = match tableau.c[s] {
            c if c == 0.0 => x,
            c => x + h * V::splat_f64(c),
        };

        k[s] = f.eval(x_stage, y_stage);
    }

    let mut increment = zero;
    for (s, &b) in tableau.b[..tableau.stages].iter().enumerate() {
        if b != 0.0 {
            increment = increment + V::splat_f64(b) * k[s];
        }
    }

    y + h * increment
}

/// Advances `y0` at `x0` by `n` steps of size `h` and returns the final state.
///
/// All lanes move in lockstep and see the same `h`. The final abscissa is not
/// returned; it is `x0 + n * h`. With `n == 0` the loop never runs and `y0`
/// comes back unchanged. No sign check is made on `h` and non-finite values
/// are not detected; see [`stepper_checked`].
///
/// # Examples
///
/// ```rust
/// use simdode::ode::{stepper, Rk4};
/// use simdode::simd::{F64x4, SimdLanes};
///
/// let y0 = F64x4::splat(1.0);
/// let x0 = F64x4::splat(0.0);
/// let y = stepper::<Rk4, _, _>(&|_x: F64x4, y: F64x4| y, y0, x0, 0.1, 10);
///
/// for lane in y.to_vec() {
///     assert!((lane - std::f64::consts::E).abs() < 1e-4);
/// }
/// ```
pub fn stepper<S, V, F>(f: &F, y0: V, x0: V, h: V::Scalar, n: usize) -> V
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    let step_size = V::splat(h);
    let mut x = x0;
    let mut y = y0;

    for _ in 0..n {
        y = step::<S, V, F>(f, x, y, step_size);
        x = x + step_size;
    }

    y
}

/// [`stepper`] followed by a finiteness check of every lane.
pub fn stepper_checked<S, V, F>(f: &F, y0: V, x0: V, h: V::Scalar, n: usize) -> Checked<V>
where
    S: StepFormula,
    V: SimdLanes,
    F: Derivative<V> + ?Sized,
{
    Checked::new(stepper::<S, V, F>(f, y0, x0, h, n))
}
