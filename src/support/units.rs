//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for physical quantities at its API boundaries
//! (positions, areas, angles, gas constants, entropy changes). Mach numbers
//! and pressure ratios are dimensionless and are carried as plain `f64`.
//!
//! This module provides quantity aliases that are useful for modeling but
//! aren't named in [`uom`].

mod quantities;

pub use quantities::{SpecificEntropy, SpecificGasConstant};
