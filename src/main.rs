use antsim::observer::TracingObserver;
use antsim::prelude::*;
use antsim::world::parse_layout;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration and layout
    let config = args.sim_config()?;
    let layout = parse_layout(&args.map)?;
    let mut world = World::new(config, Box::new(TracingObserver));
    world.load_layout(&layout);
    if world.spawn_points().is_empty() {
        warn!(map = %args.map.display(), "layout has no spawn tiles; no ants will be spawned");
    }

    // Run simulation
    let mut engine = SimulationEngine::new(args.run_options());
    let summary = engine.run_simulation(&mut world);

    // Print results
    if args.print_layout {
        print!("{}", world.render_layout());
    }
    engine.print_summary(&summary);

    Ok(())
}
