//! # Twine Nozzle
//!
//! Quasi-one-dimensional compressible flow through converging-diverging ducts,
//! built for [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given an area profile `A(x)` and a calorically perfect gas, the
//! [`Nozzle`](models::flow::nozzle::Nozzle) model computes the Mach number and
//! static-to-stagnation pressure ratio along the duct for a prescribed
//! back-pressure ratio, and classifies the flow into one of four regimes:
//!
//! 1. subsonic throat,
//! 2. normal shock inside the diverging section,
//! 3. oblique shock at the exit,
//! 4. expansion fan at the exit.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models, including the
//!   isentropic, shock and expansion relations in [`support::gas_dynamics`].
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Model-specific utility code starts in a model's internal `core` module and
//! only moves to [`support`] once it is useful outside that model.

pub mod models;
pub mod support;
