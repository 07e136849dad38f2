//! Supporting utilities used by models.
//!
//! These modules are public but unstable; see the crate-level docs.

pub mod constraint;
pub mod gas_dynamics;
pub mod units;
