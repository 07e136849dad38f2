//! Problem formulation for area–Mach inversion.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use super::critical_area_term;

/// Model mapping a Mach number to `M²·(A/A*)²`.
///
/// Working with the squared, `M`-weighted form keeps the residual finite
/// at `M = 0`.
pub(super) struct CriticalAreaTerm {
    gamma: f64,
}

impl CriticalAreaTerm {
    pub(super) fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl Model for CriticalAreaTerm {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, mach: &f64) -> Result<f64, Infallible> {
        Ok(critical_area_term(*mach, self.gamma))
    }
}

/// Equation problem for a target area ratio.
///
/// Computes the residual as `M²·ratio² − M²·(A/A*)²`.
pub(super) struct AreaRatioResidual {
    ratio: f64,
}

impl AreaRatioResidual {
    pub(super) fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl EquationProblem<1> for AreaRatioResidual {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, mach: &f64, term: &f64) -> Result<[f64; 1], Infallible> {
        Ok([mach * mach * self.ratio * self.ratio - term])
    }
}
