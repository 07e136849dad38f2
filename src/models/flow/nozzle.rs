//! Converging-diverging nozzle models.
//!
//! This module provides a [`twine_core::Model`] implementation for steady,
//! inviscid, quasi-one-dimensional flow of a perfect gas through a nozzle.
//! The computational core is in the internal `core` module.
//!
//! The model input is the back-pressure ratio `pb/p0` and the output is the
//! [`FlowProfile`] along the nozzle and a short plume region past the exit.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_nozzle::{
//!     models::flow::nozzle::{Nozzle, Regime},
//!     support::units::SpecificGasConstant,
//! };
//! use uom::si::{
//!     area::square_meter,
//!     f64::{Area, Length},
//!     length::meter,
//!     specific_heat_capacity::joule_per_kilogram_kelvin,
//! };
//!
//! let profile = |x: Length| {
//!     let x = x.get::<meter>();
//!     Area::new::<square_meter>(1.5 * (x - 0.6).powi(2) + 0.25)
//! };
//!
//! let nozzle = Nozzle::new(
//!     profile,
//!     Length::new::<meter>(0.0),
//!     Length::new::<meter>(1.0),
//!     1.4,
//!     SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
//! )?;
//!
//! let flow = nozzle.call(&0.8)?;
//! assert_eq!(flow.regime, Regime::NormalShockInside);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;

pub use self::core::{
    AreaProfile, CriticalPressureRatios, Discontinuity, FlowProfile, GeometrySample, Nozzle,
    NozzleConfig, NozzleError, Regime, Throat,
};

use twine_core::Model;

impl<P: AreaProfile> Model for Nozzle<P> {
    type Input = f64;
    type Output = FlowProfile;
    type Error = NozzleError;

    fn call(&self, pb_over_p0: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.compute_profile(*pb_over_p0)
    }
}
