//! Problem formulation for the normal shock position search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::Length, length::meter};

use crate::models::flow::nozzle::core::{NozzleError, regime::Duct};

use super::{ShockedFlow, shocked_flow};

/// Model adapter exposing the shock position as the sole input.
pub(super) struct ShockCandidate<'a> {
    duct: &'a Duct<'a>,
}

impl<'a> ShockCandidate<'a> {
    pub(super) fn new(duct: &'a Duct<'a>) -> Self {
        Self { duct }
    }
}

impl Model for ShockCandidate<'_> {
    type Input = Length;
    type Output = ShockedFlow;
    type Error = NozzleError;

    fn call(&self, x_shock: &Length) -> Result<ShockedFlow, NozzleError> {
        shocked_flow(self.duct, x_shock.get::<meter>())
    }
}

/// Equation problem matching the exit static pressure to the back pressure.
///
/// Computes the residual as `p_exit/p0 − pb/p0`.
pub(super) struct ExitPressureMismatch {
    pb_over_p0: f64,
    exit: usize,
}

impl ExitPressureMismatch {
    pub(super) fn new(pb_over_p0: f64, exit: usize) -> Self {
        Self { pb_over_p0, exit }
    }
}

impl EquationProblem<1> for ExitPressureMismatch {
    type Input = Length;
    type Output = ShockedFlow;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Length, Infallible> {
        Ok(Length::new::<meter>(x[0]))
    }

    fn residuals(&self, _input: &Length, flow: &ShockedFlow) -> Result<[f64; 1], Infallible> {
        Ok([flow.exit_pressure_ratio(self.exit) - self.pb_over_p0])
    }
}
