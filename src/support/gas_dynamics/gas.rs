use thiserror::Error;
use uom::si::{f64::SpecificHeatCapacity, specific_heat_capacity::joule_per_kilogram_kelvin};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    units::SpecificGasConstant,
};

/// Errors from invalid perfect gas parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GasError {
    #[error("ratio of specific heats must be finite and greater than one, got {gamma}")]
    HeatCapacityRatio { gamma: f64 },
    #[error("invalid gas constant R: {r:?}")]
    GasConstant { r: SpecificGasConstant },
}

/// A calorically perfect gas described by `γ = cp/cv` and `R`.
///
/// Both parameters are validated at construction, so every relation that
/// takes a `PerfectGas` can rely on `γ > 1` and `R > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGas {
    gamma: f64,
    gas_constant: SpecificGasConstant,
}

impl PerfectGas {
    /// Creates a perfect gas from its ratio of specific heats and gas constant.
    ///
    /// # Errors
    ///
    /// Returns [`GasError`] if `gamma` is not a finite value greater than one,
    /// or if the gas constant is not finite and strictly positive.
    pub fn new(gamma: f64, gas_constant: SpecificGasConstant) -> Result<Self, GasError> {
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(GasError::HeatCapacityRatio { gamma });
        }

        let r = gas_constant.get::<joule_per_kilogram_kelvin>();
        if !r.is_finite() || StrictlyPositive::check(&r).is_err() {
            return Err(GasError::GasConstant { r: gas_constant });
        }

        Ok(Self {
            gamma,
            gas_constant,
        })
    }

    /// Ratio of specific heats, `γ`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Specific gas constant, `R`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        self.gas_constant
    }

    /// Constant-pressure specific heat, `cp = γR/(γ − 1)`.
    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        self.gas_constant * (self.gamma / (self.gamma - 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn r(value: f64) -> SpecificGasConstant {
        SpecificGasConstant::new::<joule_per_kilogram_kelvin>(value)
    }

    #[test]
    fn air_cp() {
        let air = PerfectGas::new(1.4, r(287.0)).unwrap();
        assert_relative_eq!(air.cp().get::<joule_per_kilogram_kelvin>(), 1004.5);
    }

    #[test]
    fn rejects_gamma_at_or_below_one() {
        for gamma in [1.0, 0.9, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PerfectGas::new(gamma, r(287.0)),
                Err(GasError::HeatCapacityRatio { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_gas_constant() {
        for value in [0.0, -287.0, f64::NAN] {
            assert!(matches!(
                PerfectGas::new(1.4, r(value)),
                Err(GasError::GasConstant { .. })
            ));
        }
    }
}
