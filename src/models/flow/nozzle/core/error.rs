use thiserror::Error;
use twine_solvers::{equation::bisection, optimization::golden_section};

use crate::support::{
    constraint::ConstraintError,
    gas_dynamics::{GasError, isentropic::MachInversionError},
};

/// Errors from building a nozzle or computing its flow profile.
///
/// Variants split into domain errors, caused by invalid inputs, and
/// numerical errors, caused by a solver that failed on valid inputs.
/// See [`NozzleError::is_domain`].
#[derive(Debug, Error)]
pub enum NozzleError {
    /// The back-pressure ratio is outside `(0, 1]`.
    #[error("back-pressure ratio must lie in (0, 1], got {value}")]
    BackPressureRatio {
        value: f64,
        #[source]
        source: ConstraintError,
    },

    /// The gas parameters are invalid.
    #[error("invalid gas")]
    Gas(#[from] GasError),

    /// A nozzle setting is invalid.
    #[error("invalid nozzle configuration: {context}")]
    Config { context: String },

    /// The domain or sampled areas are invalid.
    #[error("invalid nozzle geometry: {context}")]
    Geometry { context: String },

    /// The area minimum is not a single interior throat.
    #[error("degenerate throat: {context}")]
    DegenerateThroat { context: String },

    /// The critical pressure ratios could not be derived from the exit area ratio.
    #[error("critical pressure ratios failed for exit area ratio {exit_area_ratio}")]
    CriticalRatios {
        exit_area_ratio: f64,
        #[source]
        source: MachInversionError,
    },

    /// The throat search failed.
    #[error("throat search failed")]
    ThroatSearch(#[from] golden_section::Error),

    /// An area–Mach inversion failed at a station.
    #[error("area-Mach inversion failed at station {station}")]
    Inversion {
        station: usize,
        #[source]
        source: MachInversionError,
    },

    /// The exit pressure mismatch does not change sign over the diverging section.
    #[error(
        "normal shock not bracketed for pb/p0 = {pb_over_p0}: \
         mismatch is {throat_mismatch} at the throat and {exit_mismatch} at the exit"
    )]
    ShockNotBracketed {
        pb_over_p0: f64,
        throat_mismatch: f64,
        exit_mismatch: f64,
    },

    /// The bisection solver encountered an error during the shock search.
    #[error("normal shock search failed")]
    ShockSearch(#[from] bisection::Error),

    /// A solver reached its iteration limit without converging.
    #[error("{context} hit iteration limit: residual={residual}")]
    MaxIters {
        context: &'static str,

        /// Best residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

impl NozzleError {
    /// Returns `true` if the error was caused by invalid inputs rather than
    /// a numerical failure.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        match self {
            Self::BackPressureRatio { .. }
            | Self::Gas(_)
            | Self::Config { .. }
            | Self::Geometry { .. }
            | Self::DegenerateThroat { .. } => true,
            Self::CriticalRatios { source, .. } => source.is_domain(),
            Self::ThroatSearch(_)
            | Self::Inversion { .. }
            | Self::ShockNotBracketed { .. }
            | Self::ShockSearch(_)
            | Self::MaxIters { .. } => false,
        }
    }
}
