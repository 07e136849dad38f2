//! Compressible internal flow models.
//!
//! This module contains quasi-one-dimensional duct flow models, starting
//! with the converging-diverging nozzle.

pub mod nozzle;
