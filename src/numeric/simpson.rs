use crate::ast::UnaryFn;
use crate::numeric::{BicubicInterpolator, ConstructionError};

/// Composite Simpson quadrature over a fixed number of subintervals.
///
/// Simpson's rule needs an even subinterval count, so an odd `n` is rounded
/// up at construction. There is no adaptive refinement and no error
/// estimate: one pass at the requested resolution.
pub struct SimpsonIntegrator<F: Fn(f64) -> f64> {
    function: F,
    n: i32,
}

impl<F: Fn(f64) -> f64> SimpsonIntegrator<F> {
    pub fn new(function: F, n: i32) -> Result<Self, ConstructionError> {
        let n = if n % 2 != 0 { n + 1 } else { n };
        if n <= 0 {
            return Err(ConstructionError::NonPositiveSubintervals { n });
        }
        Ok(Self { function, n })
    }

    /// Subinterval count after even normalization.
    pub fn subintervals(&self) -> i32 {
        self.n
    }

    /// Integrates over `[start, end]`.
    ///
    /// A zero-width interval returns `0.0` without evaluating the integrand.
    /// A reversed interval yields the negated integral, as the step `h`
    /// carries the sign.
    pub fn integrate(&self, start: f64, end: f64) -> f64 {
        if start == end {
            return 0.0;
        }

        let h = (end - start) / self.n as f64;
        let mut sum = (self.function)(start) + (self.function)(end);

        for i in (1..self.n).step_by(2) {
            sum += 4.0 * (self.function)(start + i as f64 * h);
        }
        for i in (2..self.n).step_by(2) {
            sum += 2.0 * (self.function)(start + i as f64 * h);
        }

        sum * h / 3.0
    }
}

/// Integrates grid values sampled along a parametric curve.
///
/// Holds a borrowed interpolator plus the two compiled coordinate functions
/// `x(t)` and `y(t)`; the integrand is `interpolate(x(t), y(t))`. All
/// clamping behavior of the interpolator and all leniency of the compiled
/// functions pass through unchanged — the only failure here is an invalid
/// subinterval count, delegated to [`SimpsonIntegrator`].
pub struct ParametricCurveIntegrator<'a> {
    interpolator: &'a BicubicInterpolator,
    x_func: UnaryFn,
    y_func: UnaryFn,
}

impl<'a> ParametricCurveIntegrator<'a> {
    pub fn new(
        interpolator: &'a BicubicInterpolator,
        x_func: UnaryFn,
        y_func: UnaryFn,
    ) -> Self {
        Self {
            interpolator,
            x_func,
            y_func,
        }
    }

    pub fn integrate(
        &self,
        t_start: f64,
        t_end: f64,
        n: i32,
    ) -> Result<f64, ConstructionError> {
        let curve = |t: f64| {
            let x = (self.x_func)(t);
            let y = (self.y_func)(t);
            self.interpolator.interpolate(x, y)
        };

        let integrator = SimpsonIntegrator::new(curve, n)?;
        Ok(integrator.integrate(t_start, t_end))
    }
}
