use bevy::math::{DVec2, DVec3};
use std::fmt::Debug;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// Position or velocity of the particle
///
/// A coordinate is a fixed-length bundle of scalars: a bare `Scalar` for
/// one-dimensional motion, Bevy's `DVec2`/`DVec3`, or a `[Scalar; N]` array
/// for any other dimension. All operations act component-wise, which is what
/// lets a scalar force law broadcast over every axis of a vector position.
pub trait Coordinate: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Number of components
    const DIM: usize;

    /// The coordinate with every component set to zero
    fn zero() -> Self;

    /// Returns `self + other * scale`
    fn add_scaled(self, other: Self, scale: Scalar) -> Self;

    /// Applies `f` to each component
    fn map(self, f: impl Fn(Scalar) -> Scalar) -> Self;

    /// Applies `f` to each component and sums the results
    fn sum_of(self, f: impl Fn(Scalar) -> Scalar) -> Scalar;

    /// Components in axis order
    fn components(self) -> Vec<Scalar>;

    fn length_squared(self) -> Scalar {
        self.sum_of(|c| c * c)
    }
}

impl Coordinate for Scalar {
    const DIM: usize = 1;

    fn zero() -> Self {
        0.0
    }

    fn add_scaled(self, other: Self, scale: Scalar) -> Self {
        self + other * scale
    }

    fn map(self, f: impl Fn(Scalar) -> Scalar) -> Self {
        f(self)
    }

    fn sum_of(self, f: impl Fn(Scalar) -> Scalar) -> Scalar {
        f(self)
    }

    fn components(self) -> Vec<Scalar> {
        vec![self]
    }
}

impl Coordinate for DVec2 {
    const DIM: usize = 2;

    fn zero() -> Self {
        DVec2::ZERO
    }

    fn add_scaled(self, other: Self, scale: Scalar) -> Self {
        self + other * scale
    }

    fn map(self, f: impl Fn(Scalar) -> Scalar) -> Self {
        DVec2::new(f(self.x), f(self.y))
    }

    fn sum_of(self, f: impl Fn(Scalar) -> Scalar) -> Scalar {
        f(self.x) + f(self.y)
    }

    fn components(self) -> Vec<Scalar> {
        vec![self.x, self.y]
    }
}

impl Coordinate for DVec3 {
    const DIM: usize = 3;

    fn zero() -> Self {
        DVec3::ZERO
    }

    fn add_scaled(self, other: Self, scale: Scalar) -> Self {
        self + other * scale
    }

    fn map(self, f: impl Fn(Scalar) -> Scalar) -> Self {
        DVec3::new(f(self.x), f(self.y), f(self.z))
    }

    fn sum_of(self, f: impl Fn(Scalar) -> Scalar) -> Scalar {
        f(self.x) + f(self.y) + f(self.z)
    }

    fn components(self) -> Vec<Scalar> {
        vec![self.x, self.y, self.z]
    }
}

impl<const N: usize> Coordinate for [Scalar; N] {
    const DIM: usize = N;

    fn zero() -> Self {
        [0.0; N]
    }

    fn add_scaled(self, other: Self, scale: Scalar) -> Self {
        std::array::from_fn(|i| self[i] + other[i] * scale)
    }

    fn map(self, f: impl Fn(Scalar) -> Scalar) -> Self {
        std::array::from_fn(|i| f(self[i]))
    }

    fn sum_of(self, f: impl Fn(Scalar) -> Scalar) -> Scalar {
        self.iter().map(|&c| f(c)).sum()
    }

    fn components(self) -> Vec<Scalar> {
        self.to_vec()
    }
}

#[cfg(test)]
mod math_tests {
    use super::*;

    #[test]
    fn test_add_scaled_matches_across_representations() {
        let scalar = 1.5_f64.add_scaled(2.0, 0.25);
        let planar = DVec2::new(1.5, -1.0).add_scaled(DVec2::new(2.0, 4.0), 0.25);
        let array = [1.5_f64, -1.0, 3.0].add_scaled([2.0, 4.0, -4.0], 0.25);

        assert_eq!(scalar, 2.0);
        assert_eq!(planar, DVec2::new(2.0, 0.0));
        assert_eq!(array, [2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_map_and_sum_are_component_wise() {
        let v = DVec3::new(1.0, -2.0, 3.0);

        assert_eq!(v.map(|c| c * c), DVec3::new(1.0, 4.0, 9.0));
        assert_eq!(v.sum_of(|c| c.abs()), 6.0);
        assert_eq!(v.length_squared(), 14.0);
        assert_eq!(v.components(), vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(<Scalar as Coordinate>::DIM, 1);
        assert_eq!(<DVec2 as Coordinate>::DIM, 2);
        assert_eq!(<DVec3 as Coordinate>::DIM, 3);
        assert_eq!(<[Scalar; 5] as Coordinate>::DIM, 5);
        assert_eq!(<[Scalar; 5] as Coordinate>::zero(), [0.0; 5]);
    }

    #[test]
    fn test_nan_propagates_through_arithmetic() {
        let v = DVec2::new(Scalar::NAN, 1.0).add_scaled(DVec2::ONE, 0.5);

        assert!(v.x.is_nan());
        assert_eq!(v.y, 1.5);
        assert!(v.length_squared().is_nan());
    }
}
