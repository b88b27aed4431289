//! Command line interface for driftlab

use bevy::log::info;
use bevy::math::{DVec2, DVec3};
use clap::{Parser, ValueEnum};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::{ForceConfig, SimulationConfig};
use crate::physics::driver::{IntegrationError, Trajectory, integrate_newton};
use crate::physics::energy::{EnergySeries, energy_precision};
use crate::physics::forces::{Potential, potential_energy};
use crate::physics::integrators::Scheme;
use crate::physics::integrators::registry::IntegratorRegistry;
use crate::physics::math::{Coordinate, Scalar};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// Initial position and velocity do not describe a supported dimension
    InvalidDimension(String),
    /// The driver could not complete the run
    Integration(IntegrationError),
    /// Trajectory output could not be written
    Output(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidDimension(msg) => write!(f, "Invalid initial conditions: {msg}"),
            CliError::Integration(err) => write!(f, "Integration failed: {err}"),
            CliError::Output(err) => write!(f, "Failed to write output: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<IntegrationError> for CliError {
    fn from(err: IntegrationError) -> Self {
        CliError::Integration(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err)
    }
}

/// Force law selectable from the command line, with default constants
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceKind {
    Harmonic,
    Anharmonic,
    Power,
}

impl From<ForceKind> for ForceConfig {
    fn from(kind: ForceKind) -> Self {
        match kind {
            ForceKind::Harmonic => ForceConfig::default(),
            ForceKind::Anharmonic => {
                let law = crate::physics::forces::Anharmonic::default();
                ForceConfig::Anharmonic {
                    k: law.k,
                    alpha: law.alpha,
                }
            }
            ForceKind::Power => {
                let law = crate::physics::forces::Power::default();
                ForceConfig::Power { k: law.k, p: law.p }
            }
        }
    }
}

/// driftlab - compare time-stepping schemes on one-particle Newtonian dynamics
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Integrator type (e.g., velocity_verlet, rk4, euler)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Length of the simulated interval (overrides config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub t_max: Option<f64>,

    /// Fixed step size (overrides config file)
    #[arg(short = 's', long, value_name = "SECONDS")]
    pub step_size: Option<f64>,

    /// Particle mass (overrides config file)
    #[arg(short = 'm', long, value_name = "MASS")]
    pub mass: Option<f64>,

    /// Force law with default constants (overrides config file)
    #[arg(short = 'f', long, value_name = "KIND")]
    pub force: Option<ForceKind>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Write the trajectory and energies as CSV
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Run every integrator on the same problem and print a comparison
    #[arg(long, conflicts_with = "output")]
    pub compare: bool,
}

/// Handles the --list-integrators flag by printing available integrators and exiting
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        if !std::path::Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!(
                "{config_path} does not exist"
            )));
        }
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    // Apply command-line overrides
    if let Some(t_max) = args.t_max {
        println!("Overriding t_max to: {t_max}");
        config.integration.t_max = t_max;
    }

    if let Some(step_size) = args.step_size {
        println!("Overriding step size to: {step_size}");
        config.integration.step_size = step_size;
    }

    if let Some(mass) = args.mass {
        println!("Overriding mass to: {mass}");
        config.physics.mass = mass;
    }

    if let Some(force) = args.force {
        println!("Using force: {force:?}");
        config.physics.force = force.into();
    }

    if let Some(integrator_type) = &args.integrator {
        println!("Using integrator: {integrator_type}");
        config.integration.integrator = integrator_type.clone();
    }

    // Validate integrator name against registry
    IntegratorRegistry::new()
        .create::<Scalar>(&config.integration.integrator)
        .map_err(CliError::InvalidIntegrator)?;

    Ok(config)
}

/// Energy summary of one integrator run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub integrator: String,
    pub samples: usize,
    pub initial_energy: Scalar,
    pub final_energy: Scalar,
    /// Mean relative energy deviation
    pub energy_conservation: Scalar,
    /// Largest per-sample `log10` drift
    pub worst_drift: Scalar,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<34} samples={:<8} E0={:<+12.6e} E={:<+12.6e} conservation={:.3e} worst_log10_drift={:.2}",
            self.integrator,
            self.samples,
            self.initial_energy,
            self.final_energy,
            self.energy_conservation,
            self.worst_drift
        )
    }
}

/// Runs the configured problem with `integrator`, optionally writing CSV output
pub fn run_simulation(
    config: &SimulationConfig,
    integrator: &str,
    output: Option<&str>,
) -> Result<RunSummary, CliError> {
    let physics = &config.physics;
    if physics.initial_position.len() != physics.initial_velocity.len() {
        return Err(CliError::InvalidDimension(format!(
            "initial_position has {} components but initial_velocity has {}",
            physics.initial_position.len(),
            physics.initial_velocity.len()
        )));
    }

    match physics.initial_position.len() {
        1 => run_in::<Scalar>(config, integrator, output, |c| c[0]),
        2 => run_in::<DVec2>(config, integrator, output, DVec2::from_slice),
        3 => run_in::<DVec3>(config, integrator, output, DVec3::from_slice),
        n => Err(CliError::InvalidDimension(format!(
            "{n} components given, expected 1, 2 or 3"
        ))),
    }
}

fn run_in<C: Coordinate>(
    config: &SimulationConfig,
    name: &str,
    output: Option<&str>,
    coordinate: impl Fn(&[Scalar]) -> C,
) -> Result<RunSummary, CliError> {
    let integrator = IntegratorRegistry::new()
        .create::<C>(name)
        .map_err(CliError::InvalidIntegrator)?;
    let potential = config.physics.force.into_potential();
    let mass = config.physics.mass;

    let trajectory = integrate_newton(
        coordinate(config.physics.initial_position.as_slice()),
        coordinate(config.physics.initial_velocity.as_slice()),
        config.integration.t_max,
        config.integration.step_size,
        mass,
        &potential,
        integrator.as_ref(),
    )?;

    let energies =
        EnergySeries::from_trajectory(&trajectory, |x| potential_energy(&potential, x), mass);

    if let Some(path) = output {
        write_csv(
            path,
            &trajectory,
            &energies,
            config.diagnostics.sample_stride,
        )?;
        info!("Wrote {} to {}", integrator.name(), path);
    }

    Ok(RunSummary {
        integrator: integrator.name().to_string(),
        samples: trajectory.len(),
        initial_energy: energies.total.first().copied().unwrap_or(Scalar::NAN),
        final_energy: energies.total.last().copied().unwrap_or(Scalar::NAN),
        energy_conservation: energies.mean_relative_drift(),
        worst_drift: energies
            .drift()
            .into_iter()
            .fold(Scalar::NEG_INFINITY, Scalar::max),
    })
}

/// Writes `t,x...,v...,kinetic,potential,total,log10_drift` rows
///
/// The drift column is computed over the full series before subsampling.
fn write_csv<C: Coordinate>(
    path: &str,
    trajectory: &Trajectory<C>,
    energies: &EnergySeries,
    stride: usize,
) -> Result<(), std::io::Error> {
    let mut out = BufWriter::new(File::create(path)?);
    let drift = energy_precision(&energies.total);

    let mut header = vec!["t".to_string()];
    header.extend(axis_labels("x", C::DIM));
    header.extend(axis_labels("v", C::DIM));
    header.extend(
        ["kinetic", "potential", "total", "log10_drift"]
            .iter()
            .map(|s| s.to_string()),
    );
    writeln!(out, "{}", header.join(","))?;

    for i in (0..trajectory.len()).step_by(stride.max(1)) {
        let state = &trajectory.states()[i];
        let mut row = vec![trajectory.times()[i]];
        row.extend(state.position.components());
        row.extend(state.velocity.components());
        row.extend([
            energies.kinetic[i],
            energies.potential[i],
            energies.total[i],
            drift[i],
        ]);

        let row: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", row.join(","))?;
    }

    out.flush()
}

fn axis_labels(prefix: &str, dim: usize) -> Vec<String> {
    if dim == 1 {
        vec![prefix.to_string()]
    } else {
        (0..dim).map(|i| format!("{prefix}{i}")).collect()
    }
}

/// Runs the configured integrator, or all of them with --compare, and prints summaries
pub fn run(args: &Args, config: &SimulationConfig) -> Result<(), CliError> {
    if args.compare {
        println!(
            "Comparing integrators over t_max = {} with h = {}:",
            config.integration.t_max, config.integration.step_size
        );
        for name in IntegratorRegistry::new().list_available() {
            let summary = run_simulation(config, &name, None)?;
            println!("  {summary}");
        }
        return Ok(());
    }

    let summary = run_simulation(
        config,
        &config.integration.integrator,
        args.output.as_deref(),
    )?;
    println!("{summary}");
    Ok(())
}

/// Force law and constants, as printed in the run header
pub fn describe_force(config: &SimulationConfig) -> String {
    let potential: Box<dyn Potential> = config.physics.force.into_potential();
    format!("{} {:?}", potential.name(), config.physics.force)
}
