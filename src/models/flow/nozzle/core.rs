//! Quasi-one-dimensional converging-diverging nozzle flow.
//!
//! A [`Nozzle`] samples an [`AreaProfile`] once at construction, locates the
//! throat, and derives the three [`CriticalPressureRatios`] that partition
//! the back-pressure range into flow regimes. Each query then classifies the
//! back-pressure ratio and computes the Mach number and static-to-stagnation
//! pressure ratio at every sampled station:
//!
//! - Subsonic throat: isentropic subsonic flow fixed by the exit pressure.
//! - Normal shock inside: choked flow with a shock in the diverging section,
//!   located by bisection so that the exit pressure matches the back pressure.
//! - Oblique shock at exit: fully supersonic interior, compressed to the
//!   back pressure by an attached oblique shock.
//! - Expansion fan at exit: fully supersonic interior, expanded to the back
//!   pressure by a centered Prandtl–Meyer fan.
//!
//! Stations past the exit form the plume region. Its values are a
//! visualization aid; only the interior solution is physically rigorous.

mod area_profile;
mod config;
mod critical;
mod error;
mod geometry;
mod profile;
mod regime;
mod throat;

#[cfg(test)]
pub(super) mod test_support;

pub use area_profile::AreaProfile;
pub use config::NozzleConfig;
pub use critical::CriticalPressureRatios;
pub use error::NozzleError;
pub use geometry::GeometrySample;
pub use profile::{Discontinuity, FlowProfile, Regime};
pub use throat::Throat;

use std::fmt;

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::{
    constraint::{Constrained, UnitIntervalLowerOpen},
    gas_dynamics::PerfectGas,
    units::SpecificGasConstant,
};

use regime::Duct;

/// A converging-diverging nozzle with a sampled area profile.
///
/// Construction does all geometry work; queries are pure functions of the
/// back-pressure ratio and leave the nozzle unchanged.
#[derive(Clone)]
pub struct Nozzle<P> {
    profile: P,
    gas: PerfectGas,
    geometry: GeometrySample,
    throat: Throat,
    critical: CriticalPressureRatios,
    config: NozzleConfig,
}

/// The area profile is usually a closure, so it is left out.
impl<P> fmt::Debug for Nozzle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nozzle")
            .field("gas", &self.gas)
            .field("geometry", &self.geometry)
            .field("throat", &self.throat)
            .field("critical", &self.critical)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: AreaProfile> Nozzle<P> {
    /// Creates a nozzle over `[xmin, xmax]` with default settings.
    ///
    /// # Errors
    ///
    /// See [`Nozzle::with_config`].
    pub fn new(
        profile: P,
        xmin: Length,
        xmax: Length,
        gamma: f64,
        gas_constant: SpecificGasConstant,
    ) -> Result<Self, NozzleError> {
        Self::with_config(
            profile,
            xmin,
            xmax,
            gamma,
            gas_constant,
            NozzleConfig::default(),
        )
    }

    /// Creates a nozzle over `[xmin, xmax]` with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns a domain [`NozzleError`] if the gas parameters or settings are
    /// invalid, if `xmin >= xmax`, if the profile yields a non-finite or
    /// non-positive area, or if the area minimum is not an interior throat.
    /// Returns a numerical [`NozzleError`] if the throat search fails.
    pub fn with_config(
        profile: P,
        xmin: Length,
        xmax: Length,
        gamma: f64,
        gas_constant: SpecificGasConstant,
        config: NozzleConfig,
    ) -> Result<Self, NozzleError> {
        config.validate()?;
        let gas = PerfectGas::new(gamma, gas_constant)?;

        let geometry = GeometrySample::sample(&profile, xmin, xmax, &config)?;
        let throat = throat::locate(&profile, &geometry, &config)?;

        debug!(
            x_throat = throat.position.get::<meter>(),
            area_throat = throat.area.get::<square_meter>(),
            "located nozzle throat"
        );

        let exit_area_ratio = geometry.exit_area_m2() / throat.area_m2();
        let critical = CriticalPressureRatios::from_exit_area_ratio_with(
            exit_area_ratio,
            gamma,
            &config.inversion,
        )
        .map_err(|source| NozzleError::CriticalRatios {
            exit_area_ratio,
            source,
        })?;

        debug!(
            exit_area_ratio,
            r1 = critical.r1(),
            r2 = critical.r2(),
            r3 = critical.r3(),
            "computed critical pressure ratios"
        );

        Ok(Self {
            profile,
            gas,
            geometry,
            throat,
            critical,
            config,
        })
    }

    /// Computes the flow profile for back-pressure ratio `pb_over_p0`.
    ///
    /// The returned arrays cover the interior stations followed by the plume
    /// stations, matching [`GeometrySample::evaluation_positions`].
    ///
    /// # Errors
    ///
    /// Returns [`NozzleError::BackPressureRatio`] if `pb_over_p0` is not in
    /// `(0, 1]`, or a numerical [`NozzleError`] if a Mach inversion or the
    /// shock search fails.
    pub fn compute_profile(&self, pb_over_p0: f64) -> Result<FlowProfile, NozzleError> {
        let pb_over_p0 = check_back_pressure(pb_over_p0)?;
        let regime = self.critical.classify(pb_over_p0);

        debug!(pb_over_p0, %regime, "selected flow regime");

        let duct = self.duct();
        match regime {
            Regime::SubsonicThroat => regime::subsonic::solve(&duct, pb_over_p0),
            Regime::NormalShockInside => regime::normal_shock::solve(&duct, pb_over_p0),
            Regime::ObliqueShockAtExit => regime::oblique_shock::solve(&duct, pb_over_p0),
            Regime::ExpansionFanAtExit => regime::expansion_fan::solve(&duct, pb_over_p0),
        }
    }

    /// Flow regime selected for back-pressure ratio `pb_over_p0`.
    ///
    /// # Errors
    ///
    /// Returns [`NozzleError::BackPressureRatio`] if `pb_over_p0` is not in `(0, 1]`.
    pub fn regime(&self, pb_over_p0: f64) -> Result<Regime, NozzleError> {
        let pb_over_p0 = check_back_pressure(pb_over_p0)?;
        Ok(self.critical.classify(pb_over_p0))
    }

    /// Local area ratio `A(x)/A_throat`, evaluated from the profile.
    #[must_use]
    pub fn area_ratio_at(&self, x: Length) -> f64 {
        self.profile.area(x).get::<square_meter>() / self.throat.area_m2()
    }

    /// Critical back-pressure ratios separating the flow regimes.
    #[must_use]
    pub fn critical_ratios(&self) -> CriticalPressureRatios {
        self.critical
    }

    /// Located throat.
    #[must_use]
    pub fn throat(&self) -> Throat {
        self.throat
    }

    /// Axial position of the throat.
    #[must_use]
    pub fn x_throat(&self) -> Length {
        self.throat.position
    }

    /// Cross-sectional area at the throat.
    #[must_use]
    pub fn area_throat(&self) -> Area {
        self.throat.area
    }

    /// Cross-sectional area at the exit, `A(xmax)`.
    #[must_use]
    pub fn area_exit(&self) -> Area {
        Area::new::<square_meter>(self.geometry.exit_area_m2())
    }

    /// Exit-to-throat area ratio.
    #[must_use]
    pub fn exit_area_ratio(&self) -> f64 {
        self.geometry.exit_area_m2() / self.throat.area_m2()
    }

    /// Working gas.
    #[must_use]
    pub fn gas(&self) -> PerfectGas {
        self.gas
    }

    /// Sampled geometry.
    #[must_use]
    pub fn geometry(&self) -> &GeometrySample {
        &self.geometry
    }

    /// Settings used at construction and for every query.
    #[must_use]
    pub fn config(&self) -> &NozzleConfig {
        &self.config
    }

    /// The area profile this nozzle was built from.
    #[must_use]
    pub fn profile(&self) -> &P {
        &self.profile
    }

    fn duct(&self) -> Duct<'_> {
        Duct {
            geometry: &self.geometry,
            throat: self.throat,
            gas: self.gas,
            config: &self.config,
        }
    }
}

fn check_back_pressure(pb_over_p0: f64) -> Result<f64, NozzleError> {
    UnitIntervalLowerOpen::new(pb_over_p0)
        .map(Constrained::into_inner)
        .map_err(|source| NozzleError::BackPressureRatio {
            value: pb_over_p0,
            source,
        })
}
