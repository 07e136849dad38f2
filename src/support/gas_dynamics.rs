//! Gas dynamics relations for quasi-one-dimensional flow of a perfect gas.
//!
//! These are the building blocks of the nozzle model: the isentropic
//! area–Mach relation and its inversion, the normal- and oblique-shock jump
//! relations, and the Prandtl–Meyer function.
//!
//! All relations are stateless functions of scalar Mach numbers and the
//! ratio of specific heats `γ`. Callers map them over station arrays.
//!
//! # Example
//!
//! ```
//! use approx::assert_relative_eq;
//! use twine_nozzle::support::gas_dynamics::isentropic::{
//!     Branch, area_ratio, mach_from_area_ratio,
//! };
//!
//! let gamma = 1.4;
//! let ratio = area_ratio(2.0, gamma);
//! let mach = mach_from_area_ratio(ratio, gamma, Branch::Supersonic).unwrap();
//! assert_relative_eq!(mach, 2.0, epsilon = 1e-6);
//! ```

mod gas;

pub mod isentropic;
pub mod normal_shock;
pub mod oblique_shock;
pub mod prandtl_meyer;

pub use gas::{GasError, PerfectGas};
