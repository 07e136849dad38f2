use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::units::SpecificGasConstant;

use super::{AreaProfile, Nozzle};

/// Parabolic profile `A(x) = a·(x − x0)² + b`, in meters and square meters.
///
/// The default has its throat at `x0 = 0.6` with `A* = 0.25` and an exit
/// area ratio of 1.96 at `x = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParabolicProfile {
    pub(crate) a: f64,
    pub(crate) x0: f64,
    pub(crate) b: f64,
}

impl Default for ParabolicProfile {
    fn default() -> Self {
        Self {
            a: 1.5,
            x0: 0.6,
            b: 0.25,
        }
    }
}

impl AreaProfile for ParabolicProfile {
    fn area(&self, x: Length) -> Area {
        let x = x.get::<meter>();
        Area::new::<square_meter>(self.a * (x - self.x0).powi(2) + self.b)
    }
}

pub(crate) fn m(value: f64) -> Length {
    Length::new::<meter>(value)
}

pub(crate) fn air() -> SpecificGasConstant {
    SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0)
}

/// Default parabolic nozzle on `[0, 1]` m.
pub(crate) fn parabolic_nozzle(gamma: f64) -> Nozzle<ParabolicProfile> {
    Nozzle::new(ParabolicProfile::default(), m(0.0), m(1.0), gamma, air())
        .expect("parabolic nozzle should be valid")
}

/// Parabolic nozzle on `[0, 0.999]` m, which puts a station on the throat.
pub(crate) fn station_throat_nozzle() -> Nozzle<ParabolicProfile> {
    Nozzle::new(ParabolicProfile::default(), m(0.0), m(0.999), 1.4, air())
        .expect("parabolic nozzle should be valid")
}

/// `value` advanced by `steps` units in the last place.
pub(crate) fn ulps_above(value: f64, steps: u64) -> f64 {
    f64::from_bits(value.to_bits() + steps)
}
