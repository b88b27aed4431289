//! driftlab prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! to reduce import boilerplate.

// External crate re-exports
pub use bevy::math::{DVec2, DVec3};

// Internal re-exports - Config
pub use crate::config::{ForceConfig, SimulationConfig};

// Internal re-exports - Physics
pub use crate::physics::driver::{
    CancellationToken, IntegrationError, TimeGrid, Trajectory, integrate_newton,
    integrate_newton_cancellable,
};
pub use crate::physics::energy::{
    EnergySeries, MACHINE_PRECISION, energy_conservation, energy_precision,
    energy_precision_with, kinetic_energy,
};
pub use crate::physics::field::{StandardForm, VectorField};
pub use crate::physics::forces::{
    Anharmonic, FnForce, ForceField, Harmonic, Potential, Power, potential_energy,
};
pub use crate::physics::integrators::{
    ExplicitEuler, Integrator, IntegratorRegistry, RungeKuttaFourthOrder,
    RungeKuttaSecondOrderMidpoint, Scheme, VelocityVerlet,
};
pub use crate::physics::math::{Coordinate, Scalar};
pub use crate::physics::state::State;
