use thiserror::Error;
use twine_solvers::equation::bisection;

use super::Branch;

/// Errors that can occur while inverting the area–Mach relation.
#[derive(Debug, Error)]
pub enum MachInversionError {
    /// The area ratio is below one, so no Mach number on either branch has it.
    #[error("area ratio {ratio} is below one ({branch:?} branch)")]
    AreaRatioBelowOne { ratio: f64, branch: Branch },

    /// The area ratio is NaN or infinite.
    #[error("area ratio is not finite: {ratio}")]
    NotFinite { ratio: f64 },

    /// The bisection solver failed, for example because the bracket holds no sign change.
    #[error("bisection failed for area ratio {ratio} ({branch:?} branch)")]
    Bisection {
        ratio: f64,
        branch: Branch,
        #[source]
        source: bisection::Error,
    },

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit for area ratio {ratio} ({branch:?} branch): residual={residual}")]
    MaxIters {
        ratio: f64,
        branch: Branch,

        /// Best residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

impl MachInversionError {
    /// Returns `true` if the error comes from the input ratio rather than the solver.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::AreaRatioBelowOne { .. } | Self::NotFinite { .. })
    }
}
