//! Isentropic relations for quasi-one-dimensional flow.
//!
//! The area–Mach relation
//!
//! ```text
//! A/A* = sqrt{ (2/(γ+1)·(1 + (γ−1)/2·M²))^((γ+1)/(γ−1)) / M² }
//! ```
//!
//! has a minimum of one at `M = 1` and two solutions for every ratio above
//! one: a subsonic and a supersonic [`Branch`].
//! [`mach_from_area_ratio`] recovers the Mach number on the requested branch
//! with a bracketed bisection solve.

mod error;
mod inversion;

pub use error::MachInversionError;

use twine_solvers::equation::bisection;

use inversion::{AreaRatioResidual, CriticalAreaTerm};

/// Round-off allowance for area ratios that should be exactly one.
///
/// Stations sampled next to a numerically located throat can land a hair
/// below `A*`. Ratios within this allowance are treated as sonic.
pub const SONIC_RATIO_TOLERANCE: f64 = 1e-9;

const SUBSONIC_BRACKET: [f64; 2] = [0.0, 1.0];
const SUPERSONIC_BRACKET: [f64; 2] = [1.0, 20.0];

/// Solution branch of the area–Mach relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// `0 < M ≤ 1`.
    Subsonic,
    /// `1 ≤ M ≤ 20`.
    Supersonic,
}

impl Branch {
    /// Mach number bracket searched on this branch.
    #[must_use]
    pub fn bracket(self) -> [f64; 2] {
        match self {
            Self::Subsonic => SUBSONIC_BRACKET,
            Self::Supersonic => SUPERSONIC_BRACKET,
        }
    }
}

/// Bisection settings for Mach number inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the Mach number.
    pub mach_abs_tol: f64,

    /// Relative tolerance on the Mach number.
    pub mach_rel_tol: f64,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            mach_abs_tol: 1e-7,
            mach_rel_tol: 1e-7,
        }
    }
}

impl InversionConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.mach_abs_tol,
            x_rel_tol: self.mach_rel_tol,
            residual_tol: 1e-12,
        }
    }
}

/// Area ratio `A/A*` for Mach number `mach`.
///
/// Defined for `mach > 0`; returns infinity at `mach = 0`.
#[must_use]
pub fn area_ratio(mach: f64, gamma: f64) -> f64 {
    (critical_area_term(mach, gamma) / (mach * mach)).sqrt()
}

/// Static-to-stagnation pressure ratio `p/p0` at Mach number `mach`.
#[must_use]
pub fn pressure_ratio(mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * mach * mach).powf(-gamma / (gamma - 1.0))
}

/// Stagnation-to-static pressure ratio `p0/p` at Mach number `mach`.
#[must_use]
pub fn stagnation_pressure_ratio(mach: f64, gamma: f64) -> f64 {
    (1.0 + 0.5 * (gamma - 1.0) * mach * mach).powf(gamma / (gamma - 1.0))
}

/// Mach number at which the isentropic static-to-stagnation ratio equals `p_over_p0`.
///
/// Returns zero for `p_over_p0 = 1`.
#[must_use]
pub fn mach_from_pressure_ratio(p_over_p0: f64, gamma: f64) -> f64 {
    let exponent = -(gamma - 1.0) / gamma;
    ((p_over_p0.powf(exponent) - 1.0) * 2.0 / (gamma - 1.0))
        .max(0.0)
        .sqrt()
}

/// Mach number with area ratio `ratio` on the given branch.
///
/// Uses the default [`InversionConfig`].
///
/// # Errors
///
/// Returns [`MachInversionError`] if `ratio` is below one or not finite,
/// or if the bisection solve fails.
pub fn mach_from_area_ratio(
    ratio: f64,
    gamma: f64,
    branch: Branch,
) -> Result<f64, MachInversionError> {
    mach_from_area_ratio_with(ratio, gamma, branch, &InversionConfig::default())
}

/// Mach number with area ratio `ratio` on the given branch and solver settings.
///
/// Solves `M²·ratio² − (2/(γ+1)·(1 + (γ−1)/2·M²))^((γ+1)/(γ−1)) = 0` over the
/// branch bracket. The residual is written without dividing by `M` so it
/// stays finite at the `M = 0` end of the subsonic bracket.
///
/// # Errors
///
/// Returns [`MachInversionError`] if `ratio` is below one or not finite,
/// or if the bisection solve fails.
pub fn mach_from_area_ratio_with(
    ratio: f64,
    gamma: f64,
    branch: Branch,
    config: &InversionConfig,
) -> Result<f64, MachInversionError> {
    if !ratio.is_finite() {
        return Err(MachInversionError::NotFinite { ratio });
    }
    if ratio < 1.0 - SONIC_RATIO_TOLERANCE {
        return Err(MachInversionError::AreaRatioBelowOne { ratio, branch });
    }
    if ratio <= 1.0 {
        return Ok(1.0);
    }

    let model = CriticalAreaTerm::new(gamma);
    let problem = AreaRatioResidual::new(ratio);

    let solution = bisection::solve(
        &model,
        &problem,
        branch.bracket(),
        &config.bisection(),
        |_: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )
    .map_err(|source| MachInversionError::Bisection {
        ratio,
        branch,
        source,
    })?;

    if solution.status != bisection::Status::Converged {
        return Err(MachInversionError::MaxIters {
            ratio,
            branch,
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.x)
}

/// `(2/(γ+1)·(1 + (γ−1)/2·M²))^((γ+1)/(γ−1))`, equal to `M²·(A/A*)²`.
pub(crate) fn critical_area_term(mach: f64, gamma: f64) -> f64 {
    (2.0 / (gamma + 1.0) * (1.0 + 0.5 * (gamma - 1.0) * mach * mach))
        .powf((gamma + 1.0) / (gamma - 1.0))
}
