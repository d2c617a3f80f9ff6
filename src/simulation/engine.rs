use crate::world::World;
use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long and how densely to run a world
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Population to build up to, one spawn per tick
    pub target_ants: usize,
    pub max_ticks: u64,
    /// End early once every live ant has found the target
    pub stop_when_settled: bool,
    /// Skip the per-event console lines (for benchmarks)
    pub suppress_events: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            target_ants: 100,
            max_ticks: 1_000,
            stop_when_settled: false,
            suppress_events: false,
        }
    }
}

/// Statistics of a finished run
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub spawned: usize,
    pub live_ants: usize,
    pub foraging_ants: usize,
    pub gathering_ants: usize,
    pub dead_ants: usize,
    /// `None` when no ant ever reached the target
    pub shortest_path_length: Option<usize>,
    pub pheromones: usize,
    pub settled: bool,
    pub elapsed: Duration,
}

/// Drives a [`World`]: spawns ants, ticks, and reports what happened
pub struct SimulationEngine {
    options: RunOptions,
}

impl SimulationEngine {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run the world for at most `max_ticks` ticks
    pub fn run_simulation(&mut self, world: &mut World) -> RunSummary {
        let start = Instant::now();
        let mut spawned = 0;
        let mut settled = false;
        let mut best = world.shortest_path_length();
        let mut dead = world.dead_ants();

        info!(
            target_ants = self.options.target_ants,
            max_ticks = self.options.max_ticks,
            spawn_points = world.spawn_points().len(),
            "simulation started"
        );

        for _ in 0..self.options.max_ticks {
            if world.ant_count() + world.dead_ants() < self.options.target_ants
                && world.spawn_ant().is_some()
            {
                spawned += 1;
            }

            world.tick();

            if world.shortest_path_length() != best {
                self.log_path(world, best);
                best = world.shortest_path_length();
            }
            if world.dead_ants() != dead {
                self.log_deaths(world, world.dead_ants() - dead);
                dead = world.dead_ants();
            }

            if self.options.stop_when_settled && Self::is_settled(world, self.options.target_ants) {
                settled = true;
                debug!(tick = world.ticks(), "every ant is gathering");
                break;
            }
        }

        let summary = RunSummary {
            ticks: world.ticks(),
            spawned,
            live_ants: world.ant_count(),
            foraging_ants: world.foraging_ants(),
            gathering_ants: world.gathering_ants(),
            dead_ants: world.dead_ants(),
            shortest_path_length: world.shortest_path_length(),
            pheromones: world.pheromone_count(),
            settled,
            elapsed: start.elapsed(),
        };
        info!(
            ticks = summary.ticks,
            live = summary.live_ants,
            dead = summary.dead_ants,
            shortest = ?summary.shortest_path_length,
            "simulation finished"
        );
        summary
    }

    /// Full population reached and nobody left searching for the first time
    fn is_settled(world: &World, target_ants: usize) -> bool {
        world.ant_count() > 0
            && world.ant_count() + world.dead_ants() >= target_ants
            && world.gathering_ants() == world.ant_count()
    }

    fn log_path(&self, world: &World, previous: Option<usize>) {
        let Some(length) = world.shortest_path_length() else {
            return;
        };
        match previous {
            None => info!(tick = world.ticks(), length, "first path found"),
            Some(previous) => info!(tick = world.ticks(), length, previous, "path improved"),
        }

        if self.options.suppress_events {
            return;
        }
        println!(
            "{} {} {}",
            "🐜".green(),
            format!("tick {}:", world.ticks()).dimmed(),
            format!("shortest path is now {} moves", length).bright_green()
        );
    }

    fn log_deaths(&self, world: &World, died: usize) {
        if self.options.suppress_events {
            return;
        }
        println!(
            "{} {} {}",
            "💀".red(),
            format!("tick {}:", world.ticks()).dimmed(),
            format!("{} ant(s) walked into a hazard", died).bright_red()
        );
    }

    /// Print the run summary
    pub fn print_summary(&self, summary: &RunSummary) {
        let shortest = summary
            .shortest_path_length
            .map_or_else(|| "none".to_string(), |length| length.to_string());

        println!(
            "\n{}\n{} {:.3} ms {} {} {} {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            summary.elapsed.as_secs_f64() * 1000.0,
            format!("({} ticks)", summary.ticks).dimmed(),
            "|".dimmed(),
            format!("ants={}", summary.live_ants).cyan(),
            format!("foraging={}", summary.foraging_ants).cyan(),
            format!("gathering={}", summary.gathering_ants).cyan(),
            format!("dead={}", summary.dead_ants).cyan(),
            format!("shortest={}", shortest).cyan(),
        );
        if summary.settled {
            println!("{}", "settled: every ant is gathering".green());
        }
    }
}
