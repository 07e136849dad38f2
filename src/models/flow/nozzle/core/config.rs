use twine_solvers::equation::bisection;
use uom::si::{f64::Length, length::meter};

use crate::support::gas_dynamics::isentropic::InversionConfig;

use super::NozzleError;

/// Discretization and solver settings for a [`super::Nozzle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleConfig {
    /// Number of interior stations sampled on `[xmin, xmax]`, endpoints included.
    pub stations: usize,

    /// Number of plume points on `[xmax, xmax + tail_length_factor·L]`.
    ///
    /// The first point coincides with the exit and is dropped, so the plume
    /// contributes `tail_stations − 1` stations.
    pub tail_stations: usize,

    /// Plume length as a multiple of the nozzle length `L = xmax − xmin`.
    pub tail_length_factor: f64,

    /// Number of representative characteristic rays in an expansion fan.
    pub fan_rays: usize,

    /// Maximum iteration count for the normal shock position search.
    pub shock_max_iters: usize,

    /// Absolute tolerance on the normal shock position.
    pub shock_position_tol: Length,

    /// Relative tolerance on the normal shock position.
    pub shock_position_rel_tol: f64,

    /// Minimum distance between the throat and either end of the domain,
    /// as a fraction of the nozzle length.
    pub throat_boundary_tol: f64,

    /// Settings for every area–Mach inversion.
    pub inversion: InversionConfig,
}

impl Default for NozzleConfig {
    fn default() -> Self {
        Self {
            stations: 1000,
            tail_stations: 100,
            tail_length_factor: 1.5,
            fan_rays: 7,
            shock_max_iters: 1000,
            shock_position_tol: Length::new::<meter>(1e-7),
            shock_position_rel_tol: 1e-7,
            throat_boundary_tol: 1e-6,
            inversion: InversionConfig::default(),
        }
    }
}

impl NozzleConfig {
    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`NozzleError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), NozzleError> {
        let invalid = |context: &str| {
            Err(NozzleError::Config {
                context: context.to_owned(),
            })
        };

        if self.stations < 2 {
            return invalid("at least two interior stations are required");
        }
        if self.tail_stations < 2 {
            return invalid("at least two plume points are required");
        }
        if !self.tail_length_factor.is_finite() || self.tail_length_factor <= 0.0 {
            return invalid("plume length factor must be finite and positive");
        }
        if self.fan_rays < 2 {
            return invalid("an expansion fan needs at least two rays");
        }
        if self.shock_max_iters == 0 || self.inversion.max_iters == 0 {
            return invalid("iteration limits must be positive");
        }

        let tolerances = [
            self.shock_position_tol.get::<meter>(),
            self.shock_position_rel_tol,
            self.inversion.mach_abs_tol,
            self.inversion.mach_rel_tol,
        ];
        if tolerances.iter().any(|tol| !tol.is_finite() || *tol < 0.0) {
            return invalid("solver tolerances must be finite and non-negative");
        }
        if !self.throat_boundary_tol.is_finite() || !(0.0..0.5).contains(&self.throat_boundary_tol)
        {
            return invalid("throat boundary tolerance must lie in [0, 0.5)");
        }

        Ok(())
    }

    /// Converts the shock search settings into a bisection solver configuration.
    pub(super) fn shock_bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.shock_max_iters,
            x_abs_tol: self.shock_position_tol.get::<meter>(),
            x_rel_tol: self.shock_position_rel_tol,
            residual_tol: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(NozzleConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_unusable_settings() {
        let cases = [
            NozzleConfig {
                stations: 1,
                ..NozzleConfig::default()
            },
            NozzleConfig {
                tail_stations: 0,
                ..NozzleConfig::default()
            },
            NozzleConfig {
                tail_length_factor: -1.0,
                ..NozzleConfig::default()
            },
            NozzleConfig {
                fan_rays: 1,
                ..NozzleConfig::default()
            },
            NozzleConfig {
                shock_position_tol: Length::new::<meter>(f64::NAN),
                ..NozzleConfig::default()
            },
            NozzleConfig {
                throat_boundary_tol: 0.5,
                ..NozzleConfig::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(NozzleError::Config { .. })),
                "{config:?}"
            );
        }
    }
}
