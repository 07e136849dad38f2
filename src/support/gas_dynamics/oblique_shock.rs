//! Oblique shock relations for a prescribed static pressure jump.

use uom::si::{angle::radian, f64::Angle};

use super::normal_shock;

/// An attached oblique shock resolved from its upstream Mach number and pressure jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueShock {
    /// Shock wave angle `β` measured from the upstream flow direction.
    pub shock_angle: Angle,

    /// Flow deflection angle `θ`.
    pub deflection_angle: Angle,

    /// Upstream Mach number component normal to the shock, `Mn1`.
    pub upstream_normal_mach: f64,

    /// Downstream Mach number component normal to the shock, `Mn2`.
    pub downstream_normal_mach: f64,

    /// Downstream Mach number, `M2 = Mn2 / sin(β − θ)`.
    pub downstream_mach: f64,
}

impl ObliqueShock {
    /// Resolves the oblique shock that raises the static pressure by `p2_over_p1`.
    ///
    /// The normal Mach component follows from the normal-shock pressure jump,
    /// `Mn1 = sqrt{1 + (p2/p1 − 1)(γ+1)/(2γ)}`, and the wave angle from
    /// `β = asin(Mn1/M1)`. The `asin` argument is clamped to `[0, 1]`, so a
    /// jump at or beyond the normal-shock limit yields `β = 90°`.
    /// The deflection angle comes from the θ–β–M relation.
    #[must_use]
    pub fn from_pressure_ratio(m1: f64, p2_over_p1: f64, gamma: f64) -> Self {
        let mn1 = (1.0 + (p2_over_p1 - 1.0) * (gamma + 1.0) / (2.0 * gamma))
            .max(0.0)
            .sqrt();
        let mn2 = normal_shock::downstream_mach(mn1, gamma);

        let beta = (mn1 / m1).clamp(0.0, 1.0).asin();
        let theta = deflection_angle(m1, beta, gamma);

        Self {
            shock_angle: Angle::new::<radian>(beta),
            deflection_angle: Angle::new::<radian>(theta),
            upstream_normal_mach: mn1,
            downstream_normal_mach: mn2,
            downstream_mach: mn2 / (beta - theta).sin(),
        }
    }
}

/// Flow deflection `θ` (radians) for wave angle `beta` (radians) from the θ–β–M relation.
///
/// `tan θ = 2 cot β · (M1² sin²β − 1) / (M1² (γ + cos 2β) + 2)`.
fn deflection_angle(m1: f64, beta: f64, gamma: f64) -> f64 {
    let m1_sq = m1 * m1;
    let tan_theta = 2.0 / beta.tan() * (m1_sq * beta.sin().powi(2) - 1.0)
        / (m1_sq * (gamma + (2.0 * beta).cos()) + 2.0);
    tan_theta.atan()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    #[test]
    fn normal_shock_limit() {
        let m1 = 2.0;
        let jump = normal_shock::pressure_ratio(m1, 1.4);
        let shock = ObliqueShock::from_pressure_ratio(m1, jump, 1.4);

        assert_relative_eq!(shock.shock_angle.get::<degree>(), 90.0, epsilon = 1e-6);
        assert_relative_eq!(shock.deflection_angle.get::<degree>(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(shock.downstream_mach, 0.5774, epsilon = 1e-4);
    }

    #[test]
    fn mach_wave_limit() {
        let shock = ObliqueShock::from_pressure_ratio(2.0, 1.0, 1.4);

        assert_relative_eq!(shock.shock_angle.get::<degree>(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(shock.deflection_angle.get::<degree>(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(shock.downstream_mach, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn weak_shock_matches_charts() {
        // M1 = 2, β = 40° gives θ ≈ 10.62° and p2/p1 = 1 + 2.8/2.4·(4 sin²40° − 1).
        let beta = 40.0_f64.to_radians();
        let jump = normal_shock::pressure_ratio(2.0 * beta.sin(), 1.4);
        let shock = ObliqueShock::from_pressure_ratio(2.0, jump, 1.4);

        assert_relative_eq!(shock.shock_angle.get::<degree>(), 40.0, epsilon = 1e-9);
        assert_relative_eq!(shock.deflection_angle.get::<degree>(), 10.62, epsilon = 1e-2);
        assert!(shock.downstream_mach > 1.0 && shock.downstream_mach < 2.0);
    }
}
