//! Energy bookkeeping along a trajectory

use crate::physics::driver::Trajectory;
use crate::physics::math::{Coordinate, Scalar};
use bevy::log::debug;

/// Floor substituted for zero or near-zero energies and deviations
///
/// Drift series never go below `log10(MACHINE_PRECISION)`, about `-15`.
pub const MACHINE_PRECISION: Scalar = 1e-15;

/// `m |v|² / 2`
pub fn kinetic_energy<C: Coordinate>(velocity: C, mass: Scalar) -> Scalar {
    0.5 * mass * velocity.length_squared()
}

/// Kinetic, potential and total energy at every trajectory sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergySeries {
    pub kinetic: Vec<Scalar>,
    pub potential: Vec<Scalar>,
    pub total: Vec<Scalar>,
}

impl EnergySeries {
    /// Evaluates the energies of every state; `potential` maps a position to
    /// its potential energy.
    pub fn from_trajectory<C, U>(trajectory: &Trajectory<C>, potential: U, mass: Scalar) -> Self
    where
        C: Coordinate,
        U: Fn(C) -> Scalar,
    {
        let kinetic: Vec<Scalar> = trajectory
            .velocities()
            .map(|v| kinetic_energy(v, mass))
            .collect();
        let potential: Vec<Scalar> = trajectory.positions().map(potential).collect();
        let total = kinetic
            .iter()
            .zip(&potential)
            .map(|(k, u)| k + u)
            .collect();

        Self {
            kinetic,
            potential,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Per-sample `log10 |E / E0 - 1|` of the total energy
    pub fn drift(&self) -> Vec<Scalar> {
        energy_precision(&self.total)
    }

    /// Mean of `|E / E0 - 1|` over the total energy
    pub fn mean_relative_drift(&self) -> Scalar {
        mean_relative_deviation(&self.total)
    }

    /// Keeps every `stride`-th sample, starting with the first
    ///
    /// A stride of zero is treated as one.
    pub fn subsample(&self, stride: usize) -> Self {
        let stride = stride.max(1);
        let pick = |series: &[Scalar]| -> Vec<Scalar> { series.iter().step_by(stride).copied().collect() };

        Self {
            kinetic: pick(&self.kinetic),
            potential: pick(&self.potential),
            total: pick(&self.total),
        }
    }
}

/// Mean absolute relative deviation of the total energy from its first value
///
/// Returns NaN for an empty trajectory. An initial energy within
/// [`MACHINE_PRECISION`] of zero is replaced by the floor before dividing.
pub fn energy_conservation<C, U>(trajectory: &Trajectory<C>, potential: U, mass: Scalar) -> Scalar
where
    C: Coordinate,
    U: Fn(C) -> Scalar,
{
    EnergySeries::from_trajectory(trajectory, potential, mass).mean_relative_drift()
}

/// Per-sample `log10 |E / E0 - 1|` with the default floor
pub fn energy_precision(energy: &[Scalar]) -> Vec<Scalar> {
    energy_precision_with(energy, MACHINE_PRECISION)
}

/// Per-sample `log10 |E / E0 - 1|`, with deviations at or below `floor`
/// raised to `floor`
///
/// The first sample is therefore always `log10(floor)`. NaN energies give
/// NaN entries. The input is never modified.
pub fn energy_precision_with(energy: &[Scalar], floor: Scalar) -> Vec<Scalar> {
    let Some(&first) = energy.first() else {
        return Vec::new();
    };
    let reference = guarded_reference(first, floor);

    energy
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            // The guarded sample is compared against itself
            let e = if i == 0 { reference } else { e };
            let deviation = (e / reference - 1.0).abs();
            let deviation = if deviation <= floor { floor } else { deviation };
            libm::log10(deviation)
        })
        .collect()
}

fn mean_relative_deviation(energy: &[Scalar]) -> Scalar {
    let Some(&first) = energy.first() else {
        return Scalar::NAN;
    };
    let reference = guarded_reference(first, MACHINE_PRECISION);

    let sum: Scalar = energy
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let e = if i == 0 { reference } else { e };
            (e / reference - 1.0).abs()
        })
        .sum();
    sum / energy.len() as Scalar
}

fn guarded_reference(first: Scalar, floor: Scalar) -> Scalar {
    if first.abs() <= floor {
        debug!(
            "Initial energy {} within {} of zero, using the floor as reference",
            first, floor
        );
        floor
    } else {
        first
    }
}
