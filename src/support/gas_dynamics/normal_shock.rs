//! Stationary normal shock jump relations.
//!
//! All relations take the upstream Mach number `M1 ≥ 1`. They are evaluated
//! as written for `M1 < 1` too, which yields the (non-physical) expansion
//! shock; nozzle solvers rely on that continuity while bracketing the shock
//! position next to the throat.

use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

use crate::support::units::SpecificEntropy;

use super::PerfectGas;

/// Static pressure ratio `p2/p1 = 1 + 2γ/(γ+1)·(M1² − 1)`.
#[must_use]
pub fn pressure_ratio(m1: f64, gamma: f64) -> f64 {
    1.0 + 2.0 * gamma / (gamma + 1.0) * (m1 * m1 - 1.0)
}

/// Static temperature ratio `T2/T1`.
#[must_use]
pub fn temperature_ratio(m1: f64, gamma: f64) -> f64 {
    let m1_sq = m1 * m1;
    pressure_ratio(m1, gamma) * (2.0 + (gamma - 1.0) * m1_sq) / ((gamma + 1.0) * m1_sq)
}

/// Downstream Mach number `M2 = sqrt{(1 + (γ−1)/2·M1²) / (γM1² − (γ−1)/2)}`.
#[must_use]
pub fn downstream_mach(m1: f64, gamma: f64) -> f64 {
    let m1_sq = m1 * m1;
    ((1.0 + 0.5 * (gamma - 1.0) * m1_sq) / (gamma * m1_sq - 0.5 * (gamma - 1.0))).sqrt()
}

/// Entropy rise across the shock, `Δs = cp·ln(T2/T1) − R·ln(p2/p1)`.
#[must_use]
pub fn entropy_rise(m1: f64, gas: &PerfectGas) -> SpecificEntropy {
    let gamma = gas.gamma();
    let cp = gas.cp().get::<joule_per_kilogram_kelvin>();
    let r = gas.gas_constant().get::<joule_per_kilogram_kelvin>();

    let delta_s =
        cp * temperature_ratio(m1, gamma).ln() - r * pressure_ratio(m1, gamma).ln();

    SpecificEntropy::new::<joule_per_kilogram_kelvin>(delta_s)
}

/// Stagnation pressure ratio across the shock, `p02/p01 = exp(−Δs/R)`.
#[must_use]
pub fn stagnation_pressure_ratio(m1: f64, gas: &PerfectGas) -> f64 {
    let delta_s = entropy_rise(m1, gas).get::<joule_per_kilogram_kelvin>();
    let r = gas.gas_constant().get::<joule_per_kilogram_kelvin>();
    (-delta_s / r).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::units::SpecificGasConstant;

    fn air() -> PerfectGas {
        PerfectGas::new(
            1.4,
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
        )
        .unwrap()
    }

    #[test]
    fn sonic_shock_is_vanishing() {
        let gas = air();
        assert_relative_eq!(pressure_ratio(1.0, 1.4), 1.0);
        assert_relative_eq!(temperature_ratio(1.0, 1.4), 1.0);
        assert_relative_eq!(downstream_mach(1.0, 1.4), 1.0);
        assert_relative_eq!(
            entropy_rise(1.0, &gas).get::<joule_per_kilogram_kelvin>(),
            0.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(stagnation_pressure_ratio(1.0, &gas), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mach_two_matches_tables() {
        // Anderson, Modern Compressible Flow, Table A.2 (γ = 1.4).
        let gas = air();
        assert_relative_eq!(pressure_ratio(2.0, 1.4), 4.5, epsilon = 1e-12);
        assert_relative_eq!(temperature_ratio(2.0, 1.4), 1.687, epsilon = 1e-3);
        assert_relative_eq!(downstream_mach(2.0, 1.4), 0.5774, epsilon = 1e-4);
        assert_relative_eq!(stagnation_pressure_ratio(2.0, &gas), 0.7209, epsilon = 1e-4);
    }

    #[test]
    fn entropy_rises_for_supersonic_upstream() {
        let gas = air();
        let mut previous = 0.0;
        for m1 in [1.2, 1.5, 2.0, 3.0, 5.0] {
            let delta_s = entropy_rise(m1, &gas).get::<joule_per_kilogram_kelvin>();
            assert!(delta_s > previous);
            previous = delta_s;
        }
    }

    #[test]
    fn stagnation_loss_is_independent_of_gas_constant() {
        let heavy = PerfectGas::new(
            1.4,
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(188.9),
        )
        .unwrap();
        assert_relative_eq!(
            stagnation_pressure_ratio(2.5, &heavy),
            stagnation_pressure_ratio(2.5, &air()),
            epsilon = 1e-12
        );
    }
}
