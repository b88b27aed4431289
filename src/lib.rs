//! driftlab library
//!
//! Fixed-step integrators, a Newton-equation driver and energy diagnostics
//! for one-particle dynamics, exposed as a library to enable integration
//! testing and benchmarking.

pub mod cli;
pub mod config;
pub mod physics;
pub mod prelude;
