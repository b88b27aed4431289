//! Explicit Euler integration method (forward Euler)
//!
//! WARNING: This integrator is provided primarily for educational and comparison purposes.
//! It does not conserve energy in conservative systems; on a harmonic oscillator
//! the total energy grows every step.

use super::{Integrator, Scheme};
use crate::physics::field::VectorField;
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;

/// Explicit Euler integrator (forward Euler method)
///
/// The simplest possible numerical integration method: the whole state is
/// advanced along the derivative evaluated at the start of the step.
///
/// # Algorithm
///
/// ```text
/// y(t+h) = y(t) + h * f(t, y(t))
/// ```
///
/// For the standard form this moves the position with the OLD velocity and
/// the velocity with the acceleration at the OLD position.
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(h²) local, O(h) global truncation error
/// - **Field evaluations**: 1 per step
/// - **Symplectic**: No
///
/// # Energy Behavior
///
/// For the harmonic oscillator each step multiplies the energy by exactly
/// `1 + (h ω)²`, so the drift grows monotonically and without bound.
///
/// | Property      | Explicit Euler | RK2 Midpoint | RK4     | Velocity Verlet |
/// |---------------|----------------|--------------|---------|-----------------|
/// | Order         | 1              | 2            | 4       | 2               |
/// | Field evals   | 1              | 2            | 4       | 2               |
/// | Symplectic    | No             | No           | No      | Yes             |
/// | Energy drift  | Exponential    | Secular      | Tiny    | Bounded         |
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Scheme for ExplicitEuler {
    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "forward_euler"]
    }

    fn convergence_order(&self) -> usize {
        1
    }
}

impl<C: Coordinate> Integrator<C> for ExplicitEuler {
    fn step(&self, y: State<C>, field: &dyn VectorField<C>, t: Scalar, h: Scalar) -> State<C> {
        y.add_scaled(&field.derivative(t, &y), h)
    }
}
