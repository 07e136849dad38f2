//! Per-regime flow solutions.
//!
//! Every solver fills one Mach number and pressure ratio per evaluation
//! position, interior stations first. Stations strictly upstream of the
//! throat always use the subsonic branch of the area–Mach relation.

pub(super) mod expansion_fan;
pub(super) mod normal_shock;
pub(super) mod oblique_shock;
pub(super) mod subsonic;

use crate::support::gas_dynamics::{
    PerfectGas,
    isentropic::{self, Branch},
};

use super::{GeometrySample, NozzleConfig, NozzleError, Throat};

/// Borrowed view of a constructed nozzle, shared by the regime solvers.
pub(crate) struct Duct<'a> {
    pub(super) geometry: &'a GeometrySample,
    pub(super) throat: Throat,
    pub(super) gas: PerfectGas,
    pub(super) config: &'a NozzleConfig,
}

impl Duct<'_> {
    /// Mach number at interior station `station` for area ratio `ratio`.
    fn mach(&self, station: usize, ratio: f64, branch: Branch) -> Result<f64, NozzleError> {
        isentropic::mach_from_area_ratio_with(
            ratio,
            self.gas.gamma(),
            branch,
            &self.config.inversion,
        )
        .map_err(|source| NozzleError::Inversion { station, source })
    }

    /// Area ratio `A/A_throat` at interior station `station`.
    fn throat_ratio(&self, station: usize) -> f64 {
        self.geometry.area[station] / self.throat.area_m2()
    }

    fn pressure_ratio(&self, mach: f64) -> f64 {
        isentropic::pressure_ratio(mach, self.gas.gamma())
    }
}

/// Mach number and pressure ratio arrays under construction.
#[derive(Debug, Clone)]
pub(super) struct Stations {
    pub(super) mach: Vec<f64>,
    pub(super) pressure_ratio: Vec<f64>,
}

impl Stations {
    fn with_capacity(geometry: &GeometrySample) -> Self {
        let n = geometry.evaluation_count();
        Self {
            mach: Vec::with_capacity(n),
            pressure_ratio: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, mach: f64, pressure_ratio: f64) {
        self.mach.push(mach);
        self.pressure_ratio.push(pressure_ratio);
    }

    /// The most recently pushed state.
    fn last(&self) -> (f64, f64) {
        (
            self.mach.last().copied().unwrap_or_default(),
            self.pressure_ratio.last().copied().unwrap_or(1.0),
        )
    }
}

/// Choked isentropic interior: subsonic before the throat, supersonic after.
///
/// Only the interior stations are filled.
pub(super) fn choked_interior(duct: &Duct<'_>) -> Result<Stations, NozzleError> {
    let mut stations = Stations::with_capacity(duct.geometry);
    let x_throat = duct.throat.position_m();

    for (i, &x) in duct.geometry.x.iter().enumerate() {
        let branch = if x < x_throat {
            Branch::Subsonic
        } else {
            Branch::Supersonic
        };
        let mach = duct.mach(i, duct.throat_ratio(i), branch)?;
        stations.push(mach, duct.pressure_ratio(mach));
    }

    Ok(stations)
}
