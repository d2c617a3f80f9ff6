use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::simulation::RunOptions;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the ant simulation
#[derive(Parser, Debug)]
#[command(name = "antsim", about = "🐜 Ant colony path-finding simulator")]
pub struct Args {
    /// Path to the tile layout file
    #[arg(short = 'm', long = "map")]
    pub map: PathBuf,

    /// Number of ants to spawn, one per tick
    #[arg(short = 'n', long = "ants", default_value_t = 50)]
    pub ants: usize,

    /// Number of ticks to run
    #[arg(short = 't', long = "ticks", default_value_t = 1_000)]
    pub ticks: u64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML configuration file; flags below override its values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Fraction of pheromone strength lost per tick
    #[arg(long)]
    pub evaporation_rate: Option<f64>,

    /// Do not lay trail pheromones
    #[arg(long, default_value_t = false)]
    pub no_pheromones: bool,

    /// Do not mark hazards with pheromone
    #[arg(long, default_value_t = false)]
    pub no_smart_pheromones: bool,

    /// Size of each ant's recency window
    #[arg(long)]
    pub max_nodes_remembered: Option<usize>,

    /// Stop once every live ant has found the target
    #[arg(long, default_value_t = false)]
    pub stop_when_settled: bool,

    /// Print the tile layout after the run
    #[arg(long, default_value_t = false)]
    pub print_layout: bool,

    /// Debug-level logging
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Suppress event lines (for benchmarks)
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,
}

impl Args {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rate) = self.evaporation_rate {
            config.evaporation_rate = rate;
        }
        if let Some(n) = self.max_nodes_remembered {
            config.max_nodes_remembered = n;
        }
        if self.no_pheromones {
            config.pheromones_enabled = false;
        }
        if self.no_smart_pheromones {
            config.smart_pheromones_enabled = false;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            target_ants: self.ants,
            max_ticks: self.ticks,
            stop_when_settled: self.stop_when_settled,
            suppress_events: self.suppress_events,
        }
    }
}
