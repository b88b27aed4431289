//! Tests for the fixed-grid Newton driver

use bevy::math::{DVec2, DVec3};
use driftlab::physics::driver::{
    CancellationToken, IntegrationError, integrate_newton, integrate_newton_cancellable,
};
use driftlab::physics::forces::{Anharmonic, FnForce, Harmonic, Power};
use driftlab::physics::integrators::{
    ExplicitEuler, RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint, VelocityVerlet,
};
use driftlab::physics::math::Scalar;
use driftlab::physics::state::State;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_harmonic_euler_sample_count() {
    let traj =
        integrate_newton(0.0_f64, 1.0, 0.5, 0.1, 1.0, Harmonic::default(), &ExplicitEuler).unwrap();

    assert_eq!(traj.len(), 5);
    assert_eq!(traj.times().len(), 5);
    assert_eq!(traj.states()[0], State::new(0.0, 1.0));

    // Each sample follows the Euler update of the one before it
    for i in 1..traj.len() {
        let prev = traj.states()[i - 1];
        let expected = State::new(
            prev.position + 0.1 * prev.velocity,
            prev.velocity - 0.1 * prev.position,
        );
        assert_eq!(traj.states()[i], expected);
    }
}

#[test]
fn test_times_start_at_zero_with_fixed_spacing() {
    let traj =
        integrate_newton(1.0_f64, 0.0, 2.0, 0.25, 1.0, Harmonic::default(), &VelocityVerlet).unwrap();

    assert_eq!(traj.times(), &[0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
}

#[test]
fn test_short_interval_gives_empty_trajectory() {
    let traj =
        integrate_newton(1.0_f64, 0.0, 0.05, 0.1, 1.0, Harmonic::default(), &RungeKuttaFourthOrder)
            .unwrap();

    assert!(traj.is_empty());
    assert!(traj.times().is_empty());
    assert!(traj.final_state().is_none());
}

#[test]
fn test_single_sample_is_initial_condition() {
    let traj =
        integrate_newton(2.0_f64, -1.0, 0.15, 0.1, 1.0, Harmonic::default(), &VelocityVerlet).unwrap();

    assert_eq!(traj.len(), 1);
    assert_eq!(traj.final_state(), Some(&State::new(2.0, -1.0)));
}

#[test]
fn test_mismatched_signs_give_empty_grid() {
    let traj =
        integrate_newton(1.0_f64, 0.0, 1.0, -0.1, 1.0, Harmonic::default(), &ExplicitEuler).unwrap();
    assert!(traj.is_empty());
}

#[test]
fn test_backward_integration_retraces_forward_run() {
    let force = Anharmonic::default();
    let forward =
        integrate_newton(0.5_f64, 0.25, 1.0, 0.0625, 1.0, force, &RungeKuttaFourthOrder).unwrap();
    let end = *forward.final_state().unwrap();

    let backward =
        integrate_newton(end.position, end.velocity, -1.0, -0.0625, 1.0, force, &RungeKuttaFourthOrder)
            .unwrap();

    assert_eq!(backward.times()[1], -0.0625);
    assert!(backward.times().windows(2).all(|w| w[1] < w[0]));

    let back_to_start = backward.final_state().unwrap();
    let start = forward.states()[0];
    assert!((back_to_start.position - start.position).abs() < 1e-5);
    assert!((back_to_start.velocity - start.velocity).abs() < 1e-5);
}

#[test]
fn test_unbounded_grid_is_an_error() {
    let result = integrate_newton(1.0_f64, 0.0, 1.0, 0.0, 1.0, Harmonic::default(), &ExplicitEuler);
    assert_eq!(
        result,
        Err(IntegrationError::UnboundedGrid {
            t_max: 1.0,
            step_size: 0.0
        })
    );
}

#[test]
fn test_two_dimensional_run_is_separable() {
    let force = Power { k: 1.0, p: 4.0 };
    let x0 = DVec2::new(0.8, -0.3);
    let v0 = DVec2::new(0.0, 0.5);

    let planar =
        integrate_newton(x0, v0, 3.0, 0.01, 2.0, force, &RungeKuttaSecondOrderMidpoint).unwrap();
    let along_x =
        integrate_newton(x0.x, v0.x, 3.0, 0.01, 2.0, force, &RungeKuttaSecondOrderMidpoint).unwrap();
    let along_y =
        integrate_newton(x0.y, v0.y, 3.0, 0.01, 2.0, force, &RungeKuttaSecondOrderMidpoint).unwrap();

    assert_eq!(planar.len(), along_x.len());
    for ((p, x), y) in planar.states().iter().zip(along_x.states()).zip(along_y.states()) {
        assert_eq!(p.position, DVec2::new(x.position, y.position));
        assert_eq!(p.velocity, DVec2::new(x.velocity, y.velocity));
    }
}

#[test]
fn test_array_coordinates_match_vector_coordinates() {
    let force = Harmonic { k: 3.0 };
    let as_vector = integrate_newton(
        DVec3::new(1.0, 0.0, -1.0),
        DVec3::new(0.0, 1.0, 0.0),
        1.0,
        0.05,
        1.0,
        force,
        &VelocityVerlet,
    )
    .unwrap();
    let as_array = integrate_newton(
        [1.0_f64, 0.0, -1.0],
        [0.0, 1.0, 0.0],
        1.0,
        0.05,
        1.0,
        force,
        &VelocityVerlet,
    )
    .unwrap();

    for (v, a) in as_vector.positions().zip(as_array.positions()) {
        assert_eq!(v.to_array(), a);
    }
}

#[test]
fn test_non_separable_vector_force() {
    // Central 1/r² attraction on a circular orbit keeps its radius
    let gravity = FnForce(|x: DVec2| -x / x.length().powi(3));
    let traj = integrate_newton(
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        10.0,
        0.001,
        1.0,
        gravity,
        &VelocityVerlet,
    )
    .unwrap();

    for x in traj.positions() {
        assert!((x.length() - 1.0).abs() < 1e-4, "radius drifted to {}", x.length());
    }
}

#[test]
fn test_nan_force_propagates_without_panicking() {
    // Fractional power of a negative position is out of domain
    let force = Power { k: 1.0, p: 2.5 };
    let traj = integrate_newton(-1.0_f64, 0.0, 1.0, 0.1, 1.0, force, &RungeKuttaFourthOrder).unwrap();

    assert_eq!(traj.states()[0], State::new(-1.0, 0.0));
    assert!(traj.final_state().unwrap().velocity.is_nan());
}

#[test]
fn test_cancellation_stops_between_steps() {
    let token = CancellationToken::new();
    let calls = AtomicUsize::new(0);

    // Cancels from inside the force evaluation once a few steps have run
    let force = FnForce(|x: Scalar| {
        if calls.fetch_add(1, Ordering::Relaxed) == 10 {
            token.cancel();
        }
        -x
    });

    let result = integrate_newton_cancellable(
        1.0_f64,
        0.0,
        10.0,
        0.1,
        1.0,
        force,
        &ExplicitEuler,
        &token,
    );

    assert_eq!(result, Err(IntegrationError::Cancelled { completed_steps: 11 }));
    assert!(token.is_cancelled());
}

#[test]
fn test_independent_runs_on_separate_threads() {
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            std::thread::spawn(move || {
                let x0 = i as Scalar * 0.1;
                integrate_newton(x0, 0.0, 1.0, 0.01, 1.0, Harmonic::default(), &VelocityVerlet)
                    .map(|traj| traj.final_state().copied())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let final_state = handle.join().unwrap().unwrap().unwrap();
        let x0 = (i + 1) as Scalar * 0.1;
        let serial = integrate_newton(x0, 0.0, 1.0, 0.01, 1.0, Harmonic::default(), &VelocityVerlet)
            .unwrap();
        assert_eq!(Some(&final_state), serial.final_state());
    }
}
