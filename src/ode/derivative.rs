use crate::simd::SimdLanes;

/// Right-hand side `dy/dx = f(x, y)` of the equation being integrated.
///
/// `eval` receives one register of abscissae and one register of states and
/// returns the derivative in every lane. Implementations must be pure: the
/// extrapolator calls the same function at several step-size refinements and
/// gives no ordering guarantee in `x` across refinements, only within one.
///
/// Every `Fn(V, V) -> V` closure or function is a `Derivative<V>`.
pub trait Derivative<V: SimdLanes> {
    fn eval(&self, x: V, y: V) -> V;
}

impl<V, F> Derivative<V> for F
where
    V: SimdLanes,
    F: Fn(V, V) -> V + ?Sized,
{
    #[inline(always)]
    fn eval(&self, x: V, y: V) -> V {
        self(x, y)
    }
}
