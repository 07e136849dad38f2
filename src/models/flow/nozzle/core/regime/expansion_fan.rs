//! Underexpanded nozzle: supersonic exit expanded by a centered fan.

use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::{
    models::flow::nozzle::core::{Discontinuity, FlowProfile, NozzleError, Regime},
    support::gas_dynamics::{isentropic, prandtl_meyer::mach_angle},
};

use super::{Duct, choked_interior};

/// Smallest axial distance from the exit used for the centerline ray angle.
const MIN_RAY_RUN: f64 = 1e-12;

/// Choked isentropic interior with a Prandtl–Meyer fan centered at the exit lip.
///
/// The head characteristic leaves the lip at the exit Mach angle and the tail
/// at the Mach angle of the fully expanded flow. On the centerline between
/// the two crossings the local Mach number is `1/sin μ`, where `μ` is the
/// angle of the ray from the lip. Upstream of the head the exit state holds;
/// past the tail the flow is fully expanded to `pb_over_p0`. If the tail
/// crossing lies beyond the plume, the last plume station stays inside the fan.
pub(crate) fn solve(duct: &Duct<'_>, pb_over_p0: f64) -> Result<FlowProfile, NozzleError> {
    let geometry = duct.geometry;
    let gamma = duct.gas.gamma();
    let mut stations = choked_interior(duct)?;
    let (m_exit, p_exit) = stations.last();

    let m_far = isentropic::mach_from_pressure_ratio(pb_over_p0, gamma);
    let mu_exit = mach_angle(m_exit).get::<radian>();
    let mu_far = mach_angle(m_far).get::<radian>();

    let x_exit = geometry.exit_m();
    let r_exit = geometry.exit_radius_m();
    let x_head = x_exit + r_exit / mu_exit.tan();
    let x_tail = x_exit + r_exit / mu_far.tan();

    let x_end = geometry.tail.last().copied().unwrap_or(x_exit);
    let tail_in_plume = x_tail <= x_end;
    let x_tail_eff = x_tail.min(x_end);

    for &x in &geometry.tail {
        let (mach, p) = if x < x_head {
            (m_exit, p_exit)
        } else if x <= x_tail_eff {
            let mu = (r_exit / (x - x_exit).max(MIN_RAY_RUN))
                .atan()
                .max(mu_far)
                .min(mu_exit);
            let mach = (1.0 / mu.sin()).max(m_exit).min(m_far);
            (mach, isentropic::pressure_ratio(mach, gamma))
        } else if tail_in_plume {
            (m_far, pb_over_p0)
        } else {
            stations.last()
        };
        stations.push(mach, p);
    }

    if tail_in_plume {
        let last = stations.mach.len() - 1;
        stations.mach[last] = m_far;
        stations.pressure_ratio[last] = pb_over_p0;
    }

    let rays = fan_rays(mu_far, mu_exit, duct.config.fan_rays);

    Ok(FlowProfile {
        regime: Regime::ExpansionFanAtExit,
        mach: stations.mach,
        pressure_ratio: stations.pressure_ratio,
        discontinuity: Discontinuity::ExpansionFan {
            rays,
            head_crossing: Length::new::<meter>(x_head),
            tail_crossing: Length::new::<meter>(x_tail),
            far_field_mach: m_far,
        },
    })
}

/// `count` evenly spaced ray angles from `tail` to `head` (radians).
fn fan_rays(tail: f64, head: f64, count: usize) -> Vec<Angle> {
    let step = (head - tail) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            let alpha = if i + 1 == count {
                head
            } else {
                tail + step * i as f64
            };
            Angle::new::<radian>(alpha)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::flow::nozzle::core::test_support::parabolic_nozzle;

    #[test]
    fn rays_run_from_tail_to_head() {
        let rays = fan_rays(0.3, 0.5, 5);
        assert_eq!(rays.len(), 5);
        assert_relative_eq!(rays[0].get::<radian>(), 0.3);
        assert_relative_eq!(rays[2].get::<radian>(), 0.4, epsilon = 1e-15);
        assert_relative_eq!(rays[4].get::<radian>(), 0.5);
    }

    #[test]
    fn centerline_mach_rises_through_fan() {
        let nozzle = parabolic_nozzle(1.4);
        let flow = nozzle.compute_profile(0.02).unwrap();
        let n = nozzle.geometry().station_count();

        let Discontinuity::ExpansionFan {
            ref rays,
            head_crossing,
            far_field_mach,
            ..
        } = flow.discontinuity
        else {
            panic!("expected an expansion fan");
        };

        let exit_mach = flow.mach[n - 1];
        assert_relative_eq!(
            rays.last().unwrap().get::<radian>(),
            (1.0 / exit_mach).asin(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rays[0].get::<radian>(),
            (1.0 / far_field_mach).asin(),
            epsilon = 1e-12
        );

        let plume = &flow.mach[n..];
        for pair in plume.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        for (x, &mach) in nozzle.geometry().plume_positions().iter().zip(plume) {
            assert!(mach >= exit_mach && mach <= far_field_mach);
            if *x < head_crossing {
                assert_relative_eq!(mach, exit_mach);
            }
        }
    }

    #[test]
    fn design_pressure_has_no_fan_width() {
        let nozzle = parabolic_nozzle(1.4);
        let design = nozzle.critical_ratios().r3();
        let flow = nozzle.compute_profile(design).unwrap();
        let n = nozzle.geometry().station_count();

        assert_eq!(flow.regime, Regime::ExpansionFanAtExit);
        for &mach in &flow.mach[n..] {
            assert_relative_eq!(mach, flow.mach[n - 1], epsilon = 1e-5);
        }
    }
}
