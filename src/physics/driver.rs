//! Fixed-grid driver for Newton's equations of motion

use crate::physics::field::StandardForm;
use crate::physics::forces::ForceField;
use crate::physics::integrators::{Integrator, Scheme};
use crate::physics::math::{Coordinate, Scalar};
use crate::physics::state::State;
use bevy::log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrationError {
    /// `t_max / h` is not a finite number of steps
    UnboundedGrid { t_max: Scalar, step_size: Scalar },
    /// The trajectory buffers for `samples` samples could not be allocated
    GridTooLarge { samples: usize },
    /// The run was cancelled after `completed_steps` steps
    Cancelled { completed_steps: usize },
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegrationError::UnboundedGrid { t_max, step_size } => write!(
                f,
                "Cannot build a time grid for t_max = {} with step size {}",
                t_max, step_size
            ),
            IntegrationError::GridTooLarge { samples } => {
                write!(f, "Cannot allocate a trajectory of {} samples", samples)
            }
            IntegrationError::Cancelled { completed_steps } => {
                write!(f, "Integration cancelled after {} steps", completed_steps)
            }
        }
    }
}

impl std::error::Error for IntegrationError {}

/// `floor(t_max / h)` sample times starting at zero with spacing `h`
///
/// A grid whose step count is zero or negative is empty. Negative `h`
/// paired with negative `t_max` yields a decreasing grid. Step counts past
/// `usize::MAX` saturate; the driver rejects grids it cannot allocate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    step_size: Scalar,
    len: usize,
}

impl TimeGrid {
    pub fn new(t_max: Scalar, step_size: Scalar) -> Result<Self, IntegrationError> {
        let steps = libm::floor(t_max / step_size);
        if !steps.is_finite() {
            return Err(IntegrationError::UnboundedGrid { t_max, step_size });
        }

        let len = if steps > 0.0 { steps as usize } else { 0 };
        Ok(Self { step_size, len })
    }

    pub fn step_size(&self) -> Scalar {
        self.step_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn time(&self, index: usize) -> Scalar {
        self.step_size * index as Scalar
    }

    pub fn times(&self) -> Vec<Scalar> {
        (0..self.len).map(|i| self.time(i)).collect()
    }
}

/// Sample times and the states integrated at them
///
/// `states()[0]` is always the initial condition. Built only by the driver
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<C> {
    times: Vec<Scalar>,
    states: Vec<State<C>>,
}

impl<C: Coordinate> Trajectory<C> {
    /// Samples a known solution on `grid`, for comparing against integrated runs
    pub fn from_solution(grid: &TimeGrid, solution: impl Fn(Scalar) -> State<C>) -> Self {
        let times = grid.times();
        let states = times.iter().map(|&t| solution(t)).collect();
        Self { times, states }
    }

    pub fn times(&self) -> &[Scalar] {
        &self.times
    }

    pub fn states(&self) -> &[State<C>] {
        &self.states
    }

    pub fn positions(&self) -> impl Iterator<Item = C> + '_ {
        self.states.iter().map(|s| s.position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = C> + '_ {
        self.states.iter().map(|s| s.velocity)
    }

    pub fn final_state(&self) -> Option<&State<C>> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Scalar>, Vec<State<C>>) {
        (self.times, self.states)
    }
}

/// Shared flag for stopping a running integration between steps
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Integrates `m x'' = F(x)` from `(x0, v0)` over `floor(t_max / h)` samples
///
/// The same driver serves one-dimensional (`C = f64`) and vector positions.
/// Each state is computed strictly from the previous one.
pub fn integrate_newton<C, F>(
    x0: C,
    v0: C,
    t_max: Scalar,
    h: Scalar,
    mass: Scalar,
    force: F,
    integrator: &dyn Integrator<C>,
) -> Result<Trajectory<C>, IntegrationError>
where
    C: Coordinate,
    F: ForceField<C>,
{
    integrate_newton_cancellable(
        x0,
        v0,
        t_max,
        h,
        mass,
        force,
        integrator,
        &CancellationToken::new(),
    )
}

/// [`integrate_newton`] that checks `cancel` before every step
#[allow(clippy::too_many_arguments)]
pub fn integrate_newton_cancellable<C, F>(
    x0: C,
    v0: C,
    t_max: Scalar,
    h: Scalar,
    mass: Scalar,
    force: F,
    integrator: &dyn Integrator<C>,
    cancel: &CancellationToken,
) -> Result<Trajectory<C>, IntegrationError>
where
    C: Coordinate,
    F: ForceField<C>,
{
    let grid = TimeGrid::new(t_max, h)?;
    let len = grid.len();

    let mut times: Vec<Scalar> = Vec::new();
    let mut states: Vec<State<C>> = Vec::new();
    times
        .try_reserve_exact(len)
        .and_then(|_| states.try_reserve_exact(len))
        .map_err(|_| IntegrationError::GridTooLarge { samples: len })?;

    if len == 0 {
        debug!("Empty time grid for t_max = {}, h = {}", t_max, h);
        return Ok(Trajectory { times, states });
    }

    debug!(
        "Integrating {} samples with {} (h = {}, mass = {})",
        len,
        integrator.name(),
        h,
        mass
    );

    let field = StandardForm::new(force, mass);
    times.extend((0..len).map(|i| grid.time(i)));
    states.push(State::new(x0, v0));

    for i in 0..len - 1 {
        if cancel.is_cancelled() {
            warn!(
                "Integration with {} cancelled at t = {}",
                integrator.name(),
                grid.time(i)
            );
            return Err(IntegrationError::Cancelled { completed_steps: i });
        }
        let next = integrator.step(states[i], &field, times[i], grid.step_size());
        states.push(next);
    }

    debug!("Integration with {} finished", integrator.name());

    Ok(Trajectory { times, states })
}
