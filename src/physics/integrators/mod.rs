//! Fixed-step integration schemes for the standard-form Newton equations

use crate::physics::field::VectorField;
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;

pub mod explicit_euler;
pub mod registry;
pub mod runge_kutta;
pub mod velocity_verlet;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use runge_kutta::{RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint};
pub use velocity_verlet::VelocityVerlet;

/// Descriptive metadata shared by every integration scheme
///
/// Kept separate from [`Integrator`] so that metadata can be queried on a
/// scheme without naming the coordinate type it will be used with.
pub trait Scheme: Send + Sync {
    /// Canonical name used by the registry
    fn name(&self) -> &'static str;

    /// Alternative names the registry also resolves
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Global order of accuracy
    fn convergence_order(&self) -> usize;

    /// Whether the scheme preserves phase-space volume
    fn is_symplectic(&self) -> bool {
        false
    }
}

/// A single-step advance rule `y(t+h) = step(y(t), f, t, h)`
///
/// Implementations take the state by value and return a new one. They keep no
/// state between calls and do not validate their inputs: NaN produced by the
/// field propagates into the returned state. A step of `h = 0` returns `y`
/// unchanged.
pub trait Integrator<C: Coordinate>: Scheme {
    fn step(&self, y: State<C>, field: &dyn VectorField<C>, t: Scalar, h: Scalar) -> State<C>;
}
