//! Prandtl–Meyer expansion and Mach wave geometry.

use uom::si::{angle::radian, f64::Angle};

/// Prandtl–Meyer function `ν(M)`.
///
/// `ν = sqrt((γ+1)/(γ−1))·atan(sqrt((γ−1)/(γ+1)·(M²−1))) − atan(sqrt(M²−1))`.
///
/// The relation is undefined for subsonic flow; by convention this returns
/// zero for `mach < 1`.
#[must_use]
pub fn prandtl_meyer(mach: f64, gamma: f64) -> Angle {
    if mach < 1.0 || mach.is_nan() {
        return Angle::new::<radian>(0.0);
    }

    let m_sq_minus_one = mach * mach - 1.0;
    let a = ((gamma + 1.0) / (gamma - 1.0)).sqrt();
    let b = ((gamma - 1.0) / (gamma + 1.0) * m_sq_minus_one).sqrt();

    Angle::new::<radian>(a * b.atan() - m_sq_minus_one.sqrt().atan())
}

/// Mach angle `μ = asin(1/M)`, with the argument clamped to `[0, 1]`.
///
/// Subsonic and sonic Mach numbers give `μ = 90°`.
#[must_use]
pub fn mach_angle(mach: f64) -> Angle {
    Angle::new::<radian>((1.0 / mach).clamp(0.0, 1.0).asin())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    #[test]
    fn sonic_flow_has_no_turning() {
        assert_relative_eq!(prandtl_meyer(1.0, 1.4).get::<radian>(), 0.0);
    }

    #[test]
    fn subsonic_flow_returns_zero() {
        for mach in [0.0, 0.3, 0.999] {
            assert_relative_eq!(prandtl_meyer(mach, 1.4).get::<radian>(), 0.0);
        }
    }

    #[test]
    fn matches_tables() {
        // Anderson, Modern Compressible Flow, Table A.5 (γ = 1.4).
        assert_relative_eq!(prandtl_meyer(2.0, 1.4).get::<degree>(), 26.38, epsilon = 1e-2);
        assert_relative_eq!(prandtl_meyer(3.0, 1.4).get::<degree>(), 49.76, epsilon = 1e-2);
    }

    #[test]
    fn hypersonic_limit() {
        let nu_max = (6.0_f64.sqrt() - 1.0) * 90.0;
        let nu = prandtl_meyer(1e6, 1.4).get::<degree>();
        assert!(nu < nu_max);
        assert_relative_eq!(nu, nu_max, epsilon = 1e-3);
    }

    #[test]
    fn mach_angles() {
        assert_relative_eq!(mach_angle(2.0).get::<degree>(), 30.0, epsilon = 1e-12);
        assert_relative_eq!(mach_angle(1.0).get::<degree>(), 90.0, epsilon = 1e-12);
        assert_relative_eq!(mach_angle(0.5).get::<degree>(), 90.0, epsilon = 1e-12);
    }
}
