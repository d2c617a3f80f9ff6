pub mod engine;

pub use engine::{RunOptions, RunSummary, SimulationEngine};
