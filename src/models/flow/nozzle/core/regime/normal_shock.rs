//! Choked nozzle with a normal shock standing in the diverging section.
//!
//! For a trial shock position `x_s` the interior is isentropic and choked up
//! to the last station before `x_s`. The shock jump at that station's Mach
//! number lowers the stagnation pressure and fixes a new sonic area for the
//! subsonic recovery downstream. The shock position is then found by
//! bisection on `x_s ∈ [x_throat, xmax]` so that the exit static pressure
//! equals the back pressure.

mod problem;

use tracing::trace;
use twine_solvers::equation::bisection;
use uom::si::{f64::Length, length::meter};

use crate::{
    models::flow::nozzle::core::{Discontinuity, FlowProfile, NozzleError, Regime},
    support::gas_dynamics::{
        isentropic::{self, Branch},
        normal_shock,
    },
};

use super::{Duct, Stations};

use problem::{ExitPressureMismatch, ShockCandidate};

/// Flow for one trial shock position.
#[derive(Debug, Clone)]
pub(crate) struct ShockedFlow {
    stations: Stations,
    position: f64,
    upstream_mach: f64,
    downstream_mach: f64,
    stagnation_pressure_ratio: f64,
}

impl ShockedFlow {
    fn exit_pressure_ratio(&self, exit: usize) -> f64 {
        self.stations.pressure_ratio[exit]
    }

    fn into_profile(self) -> FlowProfile {
        FlowProfile {
            regime: Regime::NormalShockInside,
            mach: self.stations.mach,
            pressure_ratio: self.stations.pressure_ratio,
            discontinuity: Discontinuity::NormalShock {
                position: Length::new::<meter>(self.position),
                upstream_mach: self.upstream_mach,
                downstream_mach: self.downstream_mach,
                stagnation_pressure_ratio: self.stagnation_pressure_ratio,
            },
        }
    }
}

/// Locates the normal shock and returns the matching flow.
///
/// # Errors
///
/// Returns [`NozzleError::ShockNotBracketed`] if the exit pressure mismatch
/// has the same sign with the shock at the throat and at the exit, or a
/// numerical [`NozzleError`] if the bisection or an inversion fails.
pub(crate) fn solve(duct: &Duct<'_>, pb_over_p0: f64) -> Result<FlowProfile, NozzleError> {
    let exit = duct.geometry.station_count() - 1;
    let bracket = [duct.throat.position_m(), duct.geometry.exit_m()];

    let at_throat = shocked_flow(duct, bracket[0])?;
    let at_exit = shocked_flow(duct, bracket[1])?;
    let throat_mismatch = at_throat.exit_pressure_ratio(exit) - pb_over_p0;
    let exit_mismatch = at_exit.exit_pressure_ratio(exit) - pb_over_p0;

    if throat_mismatch == 0.0 {
        return Ok(at_throat.into_profile());
    }
    if exit_mismatch == 0.0 {
        return Ok(at_exit.into_profile());
    }
    if bracket[0] >= bracket[1] || throat_mismatch.signum() == exit_mismatch.signum() {
        return Err(NozzleError::ShockNotBracketed {
            pb_over_p0,
            throat_mismatch,
            exit_mismatch,
        });
    }

    let model = ShockCandidate::new(duct);
    let problem = ExitPressureMismatch::new(pb_over_p0, exit);

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &duct.config.shock_bisection(),
        |_: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(NozzleError::MaxIters {
            context: "normal shock search",
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    trace!(
        x_shock = solution.x,
        iters = solution.iters,
        residual = solution.residual,
        "located normal shock"
    );

    // The exit pressure steps between stations, so a bracket end can match
    // the back pressure better than the converged interior position.
    let mut best = (solution.residual.abs(), solution.snapshot.output);
    for (mismatch, flow) in [(throat_mismatch, at_throat), (exit_mismatch, at_exit)] {
        if mismatch.abs() < best.0 {
            best = (mismatch.abs(), flow);
        }
    }

    Ok(best.1.into_profile())
}

/// Computes the flow with a normal shock at `x_shock` (meters).
///
/// A shock at or past the exit sits on the exit station itself, so the exit
/// pressure is `r2`. A shock with no supersonic station upstream has zero
/// strength and leaves the choked subsonic flow whose exit pressure is `r1`.
pub(crate) fn shocked_flow(duct: &Duct<'_>, x_shock: f64) -> Result<ShockedFlow, NozzleError> {
    let geometry = duct.geometry;
    let gamma = duct.gas.gamma();
    let x_throat = duct.throat.position_m();
    let exit = geometry.station_count() - 1;

    let last_before = if x_shock >= geometry.exit_m() {
        exit
    } else {
        geometry
            .x
            .iter()
            .rposition(|&x| x < x_shock)
            .ok_or_else(|| NozzleError::Geometry {
                context: format!("no station lies upstream of the shock at x = {x_shock}"),
            })?
    };

    let mut stations = Stations::with_capacity(geometry);

    for (i, &x) in geometry.x[..=last_before].iter().enumerate() {
        let branch = if x < x_throat {
            Branch::Subsonic
        } else {
            Branch::Supersonic
        };
        let mach = duct.mach(i, duct.throat_ratio(i), branch)?;
        stations.push(mach, duct.pressure_ratio(mach));
    }

    let (m1, p1) = stations.last();

    let (m2, p0_ratio) = if m1 > 1.0 {
        (
            normal_shock::downstream_mach(m1, gamma),
            normal_shock::stagnation_pressure_ratio(m1, &duct.gas),
        )
    } else {
        (m1, 1.0)
    };

    if last_before == exit {
        if m1 > 1.0 {
            stations.mach[exit] = m2;
            stations.pressure_ratio[exit] = p1 * normal_shock::pressure_ratio(m1, gamma);
        }
    } else {
        // Downstream of the shock `A*` grows so that the first station after
        // the shock sits at `A/A* = area_ratio(M2)`. Without a shock it stays
        // at the throat area.
        let sonic_area = if m1 > 1.0 {
            geometry.area[last_before + 1] / isentropic::area_ratio(m2, gamma)
        } else {
            duct.throat.area_m2()
        };

        for (offset, &area) in geometry.area[last_before + 1..].iter().enumerate() {
            let mach = duct.mach(last_before + 1 + offset, area / sonic_area, Branch::Subsonic)?;
            stations.push(mach, p0_ratio * duct.pressure_ratio(mach));
        }
    }

    let (mach, p) = stations.last();
    for _ in &geometry.tail {
        stations.push(mach, p);
    }

    Ok(ShockedFlow {
        stations,
        position: x_shock.min(geometry.exit_m()),
        upstream_mach: m1,
        downstream_mach: m2,
        stagnation_pressure_ratio: p0_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::flow::nozzle::core::test_support::parabolic_nozzle;

    #[test]
    fn exit_pressure_falls_as_shock_moves_downstream() {
        let nozzle = parabolic_nozzle(1.4);
        let duct = nozzle.duct();
        let exit = nozzle.geometry().station_count() - 1;

        let mut previous = f64::INFINITY;
        for x_shock in [0.61, 0.7, 0.8, 0.9, 1.0] {
            let p_exit = shocked_flow(&duct, x_shock).unwrap().exit_pressure_ratio(exit);
            assert!(p_exit < previous, "x_shock = {x_shock}");
            previous = p_exit;
        }
    }

    #[test]
    fn shock_bracket_spans_regime() {
        let nozzle = parabolic_nozzle(1.4);
        let duct = nozzle.duct();
        let critical = nozzle.critical_ratios();
        let exit = nozzle.geometry().station_count() - 1;

        let at_throat = shocked_flow(&duct, duct.throat.position_m()).unwrap();
        let at_exit = shocked_flow(&duct, 1.0).unwrap();

        assert_eq!(at_throat.exit_pressure_ratio(exit), critical.r1());
        assert_eq!(at_exit.exit_pressure_ratio(exit), critical.r2());
    }

    #[test]
    fn shock_at_exit_uses_exit_station() {
        let nozzle = parabolic_nozzle(1.4);
        let duct = nozzle.duct();
        let exit = nozzle.geometry().station_count() - 1;
        let choked = super::super::choked_interior(&duct).unwrap();

        let flow = shocked_flow(&duct, 1.0).unwrap();

        assert_eq!(flow.upstream_mach, choked.mach[exit]);
        assert_relative_eq!(flow.stations.mach[exit], flow.downstream_mach);
        assert_eq!(flow.stations.mach[..exit], choked.mach[..exit]);
        assert_relative_eq!(flow.position, 1.0);
    }

    #[test]
    fn shock_upstream_of_throat_has_no_strength() {
        let nozzle = parabolic_nozzle(1.4);
        let flow = shocked_flow(&nozzle.duct(), 0.3).unwrap();

        assert!(flow.upstream_mach < 1.0);
        assert_eq!(flow.downstream_mach, flow.upstream_mach);
        assert_eq!(flow.stagnation_pressure_ratio, 1.0);
        assert!(flow.stations.mach.iter().all(|&m| m <= 1.0));
    }

    #[test]
    fn flow_is_subsonic_behind_shock() {
        let nozzle = parabolic_nozzle(1.4);
        let flow = shocked_flow(&nozzle.duct(), 0.8).unwrap();

        assert!(flow.upstream_mach > 1.0);
        assert!(flow.downstream_mach < 1.0);
        assert!(flow.stagnation_pressure_ratio < 1.0);

        let downstream = nozzle
            .geometry()
            .positions()
            .iter()
            .position(|x| x.get::<meter>() >= 0.8)
            .unwrap();
        assert_relative_eq!(flow.stations.mach[downstream], flow.downstream_mach, epsilon = 1e-6);
        assert!(flow.stations.mach[downstream..].iter().all(|&m| m < 1.0));
    }

    #[test]
    fn unbracketed_back_pressure_is_reported() {
        let nozzle = parabolic_nozzle(1.4);

        let err = solve(&nozzle.duct(), 0.3).unwrap_err();
        assert!(matches!(err, NozzleError::ShockNotBracketed { .. }), "{err:?}");
        assert!(!err.is_domain());
    }
}
