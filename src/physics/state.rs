//! Phase-space state of the particle in standard ODE form

use crate::physics::math::{Coordinate, Scalar};

/// State vector `y = (position, velocity)`
///
/// The same type carries the derivative `dy/dt = (velocity, acceleration)`
/// returned by a vector field, so integrators can combine states and
/// derivatives with [`State::add_scaled`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<C> {
    pub position: C,
    pub velocity: C,
}

impl<C: Coordinate> State<C> {
    pub fn new(position: C, velocity: C) -> Self {
        Self { position, velocity }
    }

    pub fn zero() -> Self {
        Self::new(C::zero(), C::zero())
    }

    /// Returns `self + derivative * scale` on both halves of the state
    pub fn add_scaled(&self, derivative: &Self, scale: Scalar) -> Self {
        Self {
            position: self.position.add_scaled(derivative.position, scale),
            velocity: self.velocity.add_scaled(derivative.velocity, scale),
        }
    }
}
