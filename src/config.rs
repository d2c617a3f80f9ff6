//! Tunable constants and the run-time simulation configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tile selection works on an integer probability range instead of percentages:
/// every candidate tile is assigned a slice of this range.
pub const PROBABILITY_RANGE: u64 = 10_000_000;

/// The probability range is divided by this factor for recently visited tiles.
pub const RECENTLY_VISITED_PENALTY: u64 = 1_000_000;

/// Effective zero for pheromone strength. Tiles without pheromone report this
/// value, which puts them on par with a tile whose pheromone has evaporated.
///
/// Must never be negative.
pub const PHEROMONE_MIN: f64 = 0.01;

/// Hazard pheromones are held at this strength for the whole run.
pub const HAZARD_PHEROMONE_STRENGTH: f64 = 1.0;

/// Side length of one square tile, in world units.
pub const DEFAULT_TILE_SIZE: f64 = 20.0;

/// Size of an ant's recency window.
pub const DEFAULT_MAX_NODES_REMEMBERED: usize = 5;

/// Global settings applied by the [`World`](crate::world::World).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fraction of pheromone strength lost per tick (0.0 to 1.0)
    pub evaporation_rate: f64,
    /// Allow ants to lay trail (`Found`) pheromone
    pub pheromones_enabled: bool,
    /// Allow dying ants to mark hazards with `Hazard` pheromone
    pub smart_pheromones_enabled: bool,
    /// Recency window used to penalise backtracking
    pub max_nodes_remembered: usize,
    /// Side length of one tile; neighbours are this far apart
    pub tile_size: f64,
    /// Seed for the world's random source, `None` for entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            evaporation_rate: 0.0,
            pheromones_enabled: true,
            smart_pheromones_enabled: true,
            max_nodes_remembered: DEFAULT_MAX_NODES_REMEMBERED,
            tile_size: DEFAULT_TILE_SIZE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(ConfigError::InvalidEvaporationRate(self.evaporation_rate));
        }
        if self.max_nodes_remembered == 0 {
            return Err(ConfigError::InvalidMaxNodesRemembered);
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// Random source for a world built from this configuration
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
