// config.rs - Run configuration
//
// Loaded from YAML; every field has a default, so a partial file is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::{NeighborBucket, Rgb};

/// Immutable settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side of one cell in pixels
    pub cell_size: f32,
    /// Delay between generations while running
    pub frame_delay_ms: u64,
    /// Chance that a cell starts alive (0.0 - 1.0)
    pub alive_probability: f64,
    /// Cell colours by live-neighbour count
    pub palette: Palette,
    /// Colour behind the cells
    pub background: Rgb,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Stop once a generation repeats one from recent history
    pub stop_on_cycle: bool,
    /// How many recent generations cycle detection remembers
    pub cycle_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            frame_delay_ms: 100,
            alive_probability: 0.3,
            palette: Palette::default(),
            background: Rgb(24, 24, 28),
            seed: None,
            stop_on_cycle: false,
            cycle_history: 10,
        }
    }
}

impl Config {
    /// Load and validate a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size < 1.0 {
            return Err(ConfigError::invalid(
                "cell_size",
                format!("must be at least 1 pixel, got {}", self.cell_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::invalid(
                "alive_probability",
                format!("must be within [0, 1], got {}", self.alive_probability),
            ));
        }
        if self.cycle_history == 0 && self.stop_on_cycle {
            return Err(ConfigError::invalid(
                "cycle_history",
                "must be > 0 when stop_on_cycle is set",
            ));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Colour per neighbour bucket: 0, 1, 2 and 3 or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [Rgb; 4]);

impl Default for Palette {
    fn default() -> Self {
        Self([
            Rgb(90, 90, 110),
            Rgb(70, 140, 230),
            Rgb(0, 200, 0),
            Rgb(240, 170, 40),
        ])
    }
}

impl Palette {
    pub fn color(&self, bucket: NeighborBucket) -> Rgb {
        self.0[bucket.index()]
    }
}
