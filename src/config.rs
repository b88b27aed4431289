use crate::physics::forces::{Anharmonic, Harmonic, Potential, Power};
use crate::physics::math::Scalar;
use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub integration: IntegrationConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub mass: Scalar,
    /// One component per spatial dimension
    pub initial_position: Vec<Scalar>,
    pub initial_velocity: Vec<Scalar>,
    pub force: ForceConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            initial_position: vec![1.0],
            initial_velocity: vec![0.0],
            force: ForceConfig::default(),
        }
    }
}

/// Force law and its constants
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceConfig {
    Harmonic {
        #[serde(default = "default_stiffness")]
        k: Scalar,
    },
    Anharmonic {
        #[serde(default = "default_stiffness")]
        k: Scalar,
        #[serde(default = "default_alpha")]
        alpha: Scalar,
    },
    Power {
        #[serde(default = "default_stiffness")]
        k: Scalar,
        #[serde(default = "default_exponent")]
        p: Scalar,
    },
}

fn default_stiffness() -> Scalar {
    Harmonic::default().k
}

fn default_alpha() -> Scalar {
    Anharmonic::default().alpha
}

fn default_exponent() -> Scalar {
    Power::default().p
}

impl Default for ForceConfig {
    fn default() -> Self {
        ForceConfig::Harmonic {
            k: default_stiffness(),
        }
    }
}

impl ForceConfig {
    pub fn into_potential(self) -> Box<dyn Potential> {
        match self {
            ForceConfig::Harmonic { k } => Box::new(Harmonic { k }),
            ForceConfig::Anharmonic { k, alpha } => Box::new(Anharmonic { k, alpha }),
            ForceConfig::Power { k, p } => Box::new(Power { k, p }),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Canonical integrator name or alias
    pub integrator: String,
    pub t_max: Scalar,
    pub step_size: Scalar,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            integrator: "velocity_verlet".to_string(),
            t_max: 100.0,
            step_size: 0.001,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Keep every n-th sample in written output
    pub sample_stride: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { sample_stride: 1 }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Load `config.toml` from the per-user configuration directory
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(&path.to_string_lossy()),
            None => {
                info!("No user configuration directory available. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "driftlab")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
