//! Throat location by golden section search on the area profile.

use std::convert::Infallible;

use twine_core::{Model, OptimizationProblem};
use twine_solvers::optimization::golden_section;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::gas_dynamics::isentropic::SONIC_RATIO_TOLERANCE;

use super::{AreaProfile, GeometrySample, NozzleConfig, NozzleError};

/// Position and area of the nozzle throat, the interior area minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throat {
    pub position: Length,
    pub area: Area,
}

impl Throat {
    pub(super) fn position_m(&self) -> f64 {
        self.position.get::<meter>()
    }

    pub(super) fn area_m2(&self) -> f64 {
        self.area.get::<square_meter>()
    }
}

/// Locates the throat of `profile` on the sampled domain.
///
/// # Errors
///
/// Returns [`NozzleError::DegenerateThroat`] if the minimum sits within the
/// boundary tolerance of either end, if a sampled station is narrower than
/// the located throat, or if the search does not converge.
pub(super) fn locate(
    profile: &impl AreaProfile,
    geometry: &GeometrySample,
    config: &NozzleConfig,
) -> Result<Throat, NozzleError> {
    let (xmin, xmax) = (geometry.x[0], geometry.exit_m());

    let solution = golden_section::minimize_unobserved(
        &AreaModel { profile },
        &MinimumArea,
        [xmin, xmax],
        &golden_section::Config::default(),
    )?;

    if solution.status != golden_section::Status::Converged {
        return Err(NozzleError::DegenerateThroat {
            context: format!("area minimum search stopped after {} iterations", solution.iters),
        });
    }

    let (position, area) = (solution.x, solution.objective);
    let margin = config.throat_boundary_tol * geometry.length_m();

    if position - xmin <= margin || xmax - position <= margin {
        return Err(NozzleError::DegenerateThroat {
            context: format!(
                "area minimum at x = {position} lies on the domain boundary [{xmin}, {xmax}]"
            ),
        });
    }

    if let Some((i, &narrowest)) = geometry
        .area
        .iter()
        .enumerate()
        .find(|&(_, &sampled)| sampled < area * (1.0 - SONIC_RATIO_TOLERANCE))
    {
        return Err(NozzleError::DegenerateThroat {
            context: format!(
                "station {i} has area {narrowest} below the located throat area {area}; \
                 the profile must have a single interior minimum"
            ),
        });
    }

    Ok(Throat {
        position: Length::new::<meter>(position),
        area: Area::new::<square_meter>(area),
    })
}

/// Model evaluating the area profile at a position.
struct AreaModel<'a, P> {
    profile: &'a P,
}

impl<P: AreaProfile> Model for AreaModel<'_, P> {
    type Input = Length;
    type Output = Area;
    type Error = Infallible;

    fn call(&self, x: &Length) -> Result<Area, Infallible> {
        Ok(self.profile.area(*x))
    }
}

/// Optimization problem minimizing the cross-sectional area.
struct MinimumArea;

impl OptimizationProblem<1> for MinimumArea {
    type Input = Length;
    type Output = Area;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Length, Infallible> {
        Ok(Length::new::<meter>(x[0]))
    }

    fn objective(&self, _input: &Length, area: &Area) -> Result<f64, Infallible> {
        Ok(area.get::<square_meter>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::flow::nozzle::core::test_support::{ParabolicProfile, m};

    fn locate_profile(profile: &impl AreaProfile) -> Result<Throat, NozzleError> {
        let config = NozzleConfig::default();
        let geometry = GeometrySample::sample(profile, m(0.0), m(1.0), &config)?;
        locate(profile, &geometry, &config)
    }

    #[test]
    fn finds_parabola_vertex() {
        let throat = locate_profile(&ParabolicProfile::default()).unwrap();
        assert_relative_eq!(throat.position_m(), 0.6, epsilon = 1e-6);
        assert_relative_eq!(throat.area_m2(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn finds_off_center_throat() {
        let profile = ParabolicProfile {
            a: 4.0,
            x0: 0.25,
            b: 0.1,
        };
        let throat = locate_profile(&profile).unwrap();
        assert_relative_eq!(throat.position_m(), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn rejects_minimum_at_either_end() {
        let converging = |x: Length| Area::new::<square_meter>(2.0 - x.get::<meter>());
        let diverging = |x: Length| Area::new::<square_meter>(1.0 + x.get::<meter>());

        assert!(matches!(
            locate_profile(&converging),
            Err(NozzleError::DegenerateThroat { .. })
        ));
        assert!(matches!(
            locate_profile(&diverging),
            Err(NozzleError::DegenerateThroat { .. })
        ));
    }

    #[test]
    fn rejects_second_local_minimum() {
        // Broad minimum at 0.3 and a narrow, deeper notch at 0.9. The search
        // settles in the broad one; stations inside the notch are narrower.
        let notched = |x: Length| {
            let x = x.get::<meter>();
            let notch = 0.5 * (-((x - 0.9) / 0.03).powi(2)).exp();
            Area::new::<square_meter>(0.6 + (x - 0.3).powi(2) - notch)
        };

        let result = locate_profile(&notched);
        assert!(
            matches!(result, Err(NozzleError::DegenerateThroat { .. })),
            "{result:?}"
        );
    }
}
