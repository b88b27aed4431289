//! Force laws and their paired potentials
//!
//! Every law is written for a scalar position and broadcast component-wise
//! over vector positions, so the same `Harmonic` drives a 1D spring and a
//! separable 2D oscillator. Forces obey `F = -dU/dx`. Out-of-domain input
//! (a negative base raised to a fractional power) yields NaN, which is
//! returned as-is.

use crate::physics::math::{Coordinate, Scalar};

/// A scalar force law paired with its potential energy
pub trait Potential: Send + Sync {
    /// Force at position `x`
    fn force(&self, x: Scalar) -> Scalar;

    /// Potential energy at position `x`
    fn potential(&self, x: Scalar) -> Scalar;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}

impl<P: Potential + ?Sized> Potential for Box<P> {
    fn force(&self, x: Scalar) -> Scalar {
        (**self).force(x)
    }

    fn potential(&self, x: Scalar) -> Scalar {
        (**self).potential(x)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: Potential + ?Sized> Potential for &P {
    fn force(&self, x: Scalar) -> Scalar {
        (**self).force(x)
    }

    fn potential(&self, x: Scalar) -> Scalar {
        (**self).potential(x)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Maps a position to the force acting on the particle
///
/// Every [`Potential`] is a force field through component-wise broadcast.
/// Non-separable vector forces can be supplied as closures via [`FnForce`].
pub trait ForceField<C: Coordinate>: Send + Sync {
    fn force_at(&self, x: C) -> C;
}

impl<C: Coordinate, P: Potential + ?Sized> ForceField<C> for P {
    fn force_at(&self, x: C) -> C {
        x.map(|xi| self.force(xi))
    }
}

/// Adapter turning a closure `Fn(C) -> C` into a [`ForceField`]
pub struct FnForce<F>(pub F);

impl<C, F> ForceField<C> for FnForce<F>
where
    C: Coordinate,
    F: Fn(C) -> C + Send + Sync,
{
    fn force_at(&self, x: C) -> C {
        (self.0)(x)
    }
}

/// Potential energy of a (possibly vector) position, summed over components
pub fn potential_energy<C: Coordinate, P: Potential + ?Sized>(potential: &P, x: C) -> Scalar {
    x.sum_of(|xi| potential.potential(xi))
}

/// Harmonic spring: `F = -k x`, `U = k x² / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub k: Scalar,
}

impl Default for Harmonic {
    fn default() -> Self {
        Self { k: 1.0 }
    }
}

impl Potential for Harmonic {
    fn force(&self, x: Scalar) -> Scalar {
        -self.k * x
    }

    fn potential(&self, x: Scalar) -> Scalar {
        0.5 * self.k * x * x
    }

    fn name(&self) -> &'static str {
        "harmonic"
    }
}

/// Cubic anharmonic well: `F = -k x (1 - αx)`, `U = k x² (1 - 2αx/3) / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anharmonic {
    pub k: Scalar,
    pub alpha: Scalar,
}

impl Default for Anharmonic {
    fn default() -> Self {
        Self { k: 1.0, alpha: 0.5 }
    }
}

impl Potential for Anharmonic {
    fn force(&self, x: Scalar) -> Scalar {
        -self.k * x * (1.0 - self.alpha * x)
    }

    fn potential(&self, x: Scalar) -> Scalar {
        0.5 * self.k * x * x * (1.0 - 2.0 / 3.0 * self.alpha * x)
    }

    fn name(&self) -> &'static str {
        "anharmonic"
    }
}

/// Power-law well: `F = -k x^(p-1)`, `U = (k/p) x^p`
///
/// Uses `libm::pow` so results are identical across platforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Power {
    pub k: Scalar,
    pub p: Scalar,
}

impl Default for Power {
    fn default() -> Self {
        Self { k: 1.0, p: 6.0 }
    }
}

impl Potential for Power {
    fn force(&self, x: Scalar) -> Scalar {
        -self.k * libm::pow(x, self.p - 1.0)
    }

    fn potential(&self, x: Scalar) -> Scalar {
        self.k / self.p * libm::pow(x, self.p)
    }

    fn name(&self) -> &'static str {
        "power"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;

    /// Central-difference derivative of the potential
    fn numerical_force(law: &dyn Potential, x: Scalar) -> Scalar {
        let dx = 1e-6;
        -(law.potential(x + dx) - law.potential(x - dx)) / (2.0 * dx)
    }

    #[test]
    fn test_closed_forms() {
        let harmonic = Harmonic { k: 2.0 };
        assert_eq!(harmonic.force(1.5), -3.0);
        assert_eq!(harmonic.potential(1.5), 2.25);

        let anharmonic = Anharmonic { k: 1.0, alpha: 0.5 };
        assert_eq!(anharmonic.force(2.0), 0.0);
        assert!((anharmonic.potential(3.0) - 0.0).abs() < 1e-12);

        let power = Power { k: 1.0, p: 6.0 };
        assert_eq!(power.force(2.0), -32.0);
        assert!((power.potential(2.0) - 64.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_is_negative_gradient() {
        let laws: Vec<Box<dyn Potential>> = vec![
            Box::new(Harmonic::default()),
            Box::new(Anharmonic::default()),
            Box::new(Power::default()),
        ];

        for law in &laws {
            for i in -20..=20 {
                let x = i as Scalar * 0.1;
                let expected = numerical_force(&**law, x);
                assert!(
                    (law.force(x) - expected).abs() < 1e-6 * (1.0 + expected.abs()),
                    "{} force mismatch at x = {}: {} vs {}",
                    law.name(),
                    x,
                    law.force(x),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_broadcast_over_vector_positions() {
        let law = Anharmonic { k: 2.0, alpha: 0.25 };
        let x = DVec2::new(0.5, -1.0);

        let force: DVec2 = law.force_at(x);
        assert_eq!(force, DVec2::new(law.force(0.5), law.force(-1.0)));
        assert_eq!(
            potential_energy(&law, x),
            law.potential(0.5) + law.potential(-1.0)
        );
    }

    #[test]
    fn test_fractional_power_of_negative_base_is_nan() {
        let law = Power { k: 1.0, p: 2.5 };
        assert!(law.force(-1.0).is_nan());
        assert!(law.potential(-1.0).is_nan());
    }

    #[test]
    fn test_closure_force() {
        let central = FnForce(|x: DVec2| -x * x.length_squared());
        assert_eq!(central.force_at(DVec2::new(1.0, 1.0)), DVec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_boxed_potential_is_a_force_field() {
        let boxed: Box<dyn Potential> = Box::new(Harmonic { k: 4.0 });
        let force: Scalar = boxed.force_at(0.5);
        assert_eq!(force, -2.0);
        assert_eq!(boxed.name(), "harmonic");
    }
}
