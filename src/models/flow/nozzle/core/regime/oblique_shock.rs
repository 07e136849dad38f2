//! Overexpanded nozzle: supersonic exit compressed by an oblique shock.

use uom::si::{angle::radian, f64::Length, length::meter};

use crate::{
    models::flow::nozzle::core::{Discontinuity, FlowProfile, NozzleError, Regime},
    support::gas_dynamics::oblique_shock::ObliqueShock,
};

use super::{Duct, choked_interior};

/// Choked isentropic interior with an attached oblique shock at the exit lip.
///
/// The shock raises the exit pressure to `pb_over_p0`. It is drawn as a
/// straight line from the lip to the centerline; plume stations upstream of
/// the crossing keep the exit state and those at or past it take the
/// post-shock state. The first plume station always keeps the exit state.
pub(crate) fn solve(duct: &Duct<'_>, pb_over_p0: f64) -> Result<FlowProfile, NozzleError> {
    let geometry = duct.geometry;
    let mut stations = choked_interior(duct)?;
    let (m_exit, p_exit) = stations.last();

    let shock =
        ObliqueShock::from_pressure_ratio(m_exit, pb_over_p0 / p_exit, duct.gas.gamma());
    let crossing =
        geometry.exit_m() + geometry.exit_radius_m() / shock.shock_angle.get::<radian>().tan();

    for (j, &x) in geometry.tail.iter().enumerate() {
        if j > 0 && x >= crossing {
            stations.push(shock.downstream_mach, pb_over_p0);
        } else {
            stations.push(m_exit, p_exit);
        }
    }

    Ok(FlowProfile {
        regime: Regime::ObliqueShockAtExit,
        mach: stations.mach,
        pressure_ratio: stations.pressure_ratio,
        discontinuity: Discontinuity::ObliqueShock {
            shock_angle: shock.shock_angle,
            deflection_angle: shock.deflection_angle,
            centerline_crossing: Length::new::<meter>(crossing),
            downstream_mach: shock.downstream_mach,
        },
    })
}
