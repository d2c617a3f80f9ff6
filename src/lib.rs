//! # antsim
//!
//! Ant colony optimisation on a tile grid.
//!
//! Ants wander a grid of tiles looking for food. An ant that finds it walks
//! its loop-free route back home laying pheromone, and stronger trails draw
//! later ants, so shorter routes get reinforced over time. Ants that step next
//! to a hazard die and (optionally) mark the spot so others steer clear.
//!
//! [`World`] owns every ant, pheromone and tile and advances them one
//! [`tick`](World::tick) at a time; [`SimulationEngine`] drives a world from a
//! layout file for the `antsim` binary.

pub mod ant;
pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod graph;
pub mod observer;
pub mod pheromone;
pub mod position;
pub mod simulation;
pub mod world;

pub use ant::{AntBot, AntId, AntState};
pub use cli::Args;
pub use config::SimConfig;
pub use direction::Direction;
pub use error::{ConfigError, Error, LayoutError, Result};
pub use pheromone::{Pheromone, PheromoneType};
pub use position::Position;
pub use simulation::{RunOptions, RunSummary, SimulationEngine};
pub use world::{TileType, World};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        AntBot, AntId, AntState, Args, Direction, Error, PheromoneType, Position, Result,
        RunOptions, RunSummary, SimConfig, SimulationEngine, TileType, World,
    };
}
