//! Unchoked nozzle: subsonic isentropic flow matched to the back pressure.

use crate::{
    models::flow::nozzle::core::{Discontinuity, FlowProfile, NozzleError, Regime},
    support::gas_dynamics::isentropic::{self, Branch},
};

use super::{Duct, Stations};

/// Subsonic flow with the exit static pressure equal to `pb_over_p0`.
///
/// The exit Mach number follows from the back pressure, which fixes a
/// virtual sonic area `A*` no larger than the throat. Every station is then
/// on the subsonic branch of `A/A*`. A back-pressure ratio of exactly one
/// gives quiescent flow.
pub(crate) fn solve(duct: &Duct<'_>, pb_over_p0: f64) -> Result<FlowProfile, NozzleError> {
    let gamma = duct.gas.gamma();
    let geometry = duct.geometry;
    let mut stations = Stations::with_capacity(geometry);

    let m_exit = isentropic::mach_from_pressure_ratio(pb_over_p0, gamma);

    if m_exit == 0.0 {
        for _ in 0..geometry.evaluation_count() {
            stations.push(0.0, 1.0);
        }
    } else {
        // Just above `r1` round-off can put `A*` a hair past the throat.
        let sonic_area = (geometry.exit_area_m2() / isentropic::area_ratio(m_exit, gamma))
            .min(duct.throat.area_m2());

        for (i, &area) in geometry.area.iter().enumerate() {
            let mach = duct.mach(i, area / sonic_area, Branch::Subsonic)?;
            stations.push(mach, duct.pressure_ratio(mach));
        }

        let (mach, p) = stations.last();
        for _ in &geometry.tail {
            stations.push(mach, p);
        }
    }

    Ok(FlowProfile {
        regime: Regime::SubsonicThroat,
        mach: stations.mach,
        pressure_ratio: stations.pressure_ratio,
        discontinuity: Discontinuity::None,
    })
}
