//! Velocity Verlet integration method

use super::{Integrator, Scheme};
use crate::physics::field::VectorField;
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;

/// Velocity Verlet integrator
///
/// A second-order symplectic integrator with bounded long-time energy error
/// for Hamiltonian systems. It is specialized to the standard form: the
/// field must return `(v, a)`, and only the acceleration half is used.
///
/// The algorithm (kick, drift, kick):
/// 1. v(t+h/2) = v(t) + a(x(t)) * h/2
/// 2. x(t+h) = x(t) + v(t+h/2) * h
/// 3. v(t+h) = v(t+h/2) + a(x(t+h)) * h/2
///
/// The field is evaluated twice per step. The second evaluation equals the
/// first one of the next step, so a caching variant could halve the cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl Scheme for VelocityVerlet {
    fn name(&self) -> &'static str {
        "velocity_verlet"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["verlet"]
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn is_symplectic(&self) -> bool {
        true
    }
}

impl<C: Coordinate> Integrator<C> for VelocityVerlet {
    fn step(&self, y: State<C>, field: &dyn VectorField<C>, t: Scalar, h: Scalar) -> State<C> {
        let half_h = 0.5 * h;

        // Kick: half-step velocity from the acceleration at the current position
        let a_old = field.derivative(t, &y).velocity;
        let v_half = y.velocity.add_scaled(a_old, half_h);

        // Drift: full-step position with the half-updated velocity
        let position = y.position.add_scaled(v_half, h);

        // Kick: finish the velocity with the acceleration at the new position
        let a_new = field.derivative(t + h, &State::new(position, v_half)).velocity;
        let velocity = v_half.add_scaled(a_new, half_h);

        State::new(position, velocity)
    }
}
