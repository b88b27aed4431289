//! Runge-Kutta integration methods

use super::{Integrator, Scheme};
use crate::physics::field::VectorField;
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;

/// Second-order Runge-Kutta method (Midpoint method)
///
/// This is a 2-stage, 2nd order accurate integrator that evaluates
/// the derivative at the midpoint of the timestep.
///
/// Algorithm:
/// - k1 = f(t, y)
/// - k2 = f(t + h/2, y + k1*h/2)
/// - y_new = y + k2*h
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaSecondOrderMidpoint;

impl Scheme for RungeKuttaSecondOrderMidpoint {
    fn name(&self) -> &'static str {
        "runge_kutta_second_order_midpoint"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk2", "midpoint"]
    }

    fn convergence_order(&self) -> usize {
        2
    }
}

impl<C: Coordinate> Integrator<C> for RungeKuttaSecondOrderMidpoint {
    fn step(&self, y: State<C>, field: &dyn VectorField<C>, t: Scalar, h: Scalar) -> State<C> {
        let half_h = 0.5 * h;

        // Stage 1: estimate the state at the midpoint
        let k1 = field.derivative(t, &y);
        let y_mid = y.add_scaled(&k1, half_h);

        // Stage 2: advance the full step with the midpoint derivative only
        let k2 = field.derivative(t + half_h, &y_mid);
        y.add_scaled(&k2, h)
    }
}

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// A classic multi-stage integrator that provides fourth-order accuracy
/// by combining four intermediate evaluations of the derivative.
///
/// The RK4 algorithm:
/// 1. k1 = f(t, y)
/// 2. k2 = f(t + h/2, y + k1*h/2)
/// 3. k3 = f(t + h/2, y + k2*h/2)
/// 4. k4 = f(t + h, y + k3*h)
/// 5. y(t+h) = y(t) + h/6 * (k1 + 2*k2 + 2*k3 + k4)
///
/// Not symplectic: on conservative systems the energy error grows slowly
/// but without bound, though it stays far below Euler's for the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Scheme for RungeKuttaFourthOrder {
    fn name(&self) -> &'static str {
        "runge_kutta_fourth_order"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk4"]
    }

    fn convergence_order(&self) -> usize {
        4
    }
}

impl<C: Coordinate> Integrator<C> for RungeKuttaFourthOrder {
    fn step(&self, y: State<C>, field: &dyn VectorField<C>, t: Scalar, h: Scalar) -> State<C> {
        let half_h = 0.5 * h;

        let k1 = field.derivative(t, &y);
        let k2 = field.derivative(t + half_h, &y.add_scaled(&k1, half_h));
        let k3 = field.derivative(t + half_h, &y.add_scaled(&k2, half_h));
        let k4 = field.derivative(t + h, &y.add_scaled(&k3, h));

        // Combine stages using RK4 weights: y_n+1 = y_n + h/6 * (k1 + 2*k2 + 2*k3 + k4)
        let weighted = k1
            .add_scaled(&k2, 2.0)
            .add_scaled(&k3, 2.0)
            .add_scaled(&k4, 1.0);
        y.add_scaled(&weighted, h / 6.0)
    }
}
