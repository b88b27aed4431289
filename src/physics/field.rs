//! Vector fields for the first-order (standard) form of Newton's equations

use crate::physics::forces::ForceField;
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;

/// Right-hand side `f(t, y)` of the first-order ODE system `dy/dt = f(t, y)`
///
/// Integrators only ever see a field through this trait. Any closure
/// `Fn(Scalar, &State<C>) -> State<C>` is a vector field as well.
pub trait VectorField<C: Coordinate> {
    fn derivative(&self, t: Scalar, y: &State<C>) -> State<C>;
}

impl<C, G> VectorField<C> for G
where
    C: Coordinate,
    G: Fn(Scalar, &State<C>) -> State<C>,
{
    fn derivative(&self, t: Scalar, y: &State<C>) -> State<C> {
        self(t, y)
    }
}

/// Newton's second law in standard form: `f(t, (x, v)) = (v, F(x) / m)`
///
/// Binds a force law and the particle mass by value. The time argument is
/// accepted for symmetry with time-dependent fields and ignored, which means
/// velocity-dependent forces cannot be expressed here.
#[derive(Debug, Clone, Copy)]
pub struct StandardForm<F> {
    force: F,
    mass: Scalar,
}

impl<F> StandardForm<F> {
    pub fn new(force: F, mass: Scalar) -> Self {
        Self { force, mass }
    }

    pub fn force(&self) -> &F {
        &self.force
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }
}

impl<C, F> VectorField<C> for StandardForm<F>
where
    C: Coordinate,
    F: ForceField<C>,
{
    fn derivative(&self, _t: Scalar, y: &State<C>) -> State<C> {
        let acceleration = self.force.force_at(y.position).map(|f| f / self.mass);
        State::new(y.velocity, acceleration)
    }
}
