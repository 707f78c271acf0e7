use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use log::info;

use traffic_unblock::host::{
    build_demo_world, log_summary, DemoConfig, DemoHostPlugin, DemoStats, SimClock,
};
use traffic_unblock::simulation::{UnblockPlugin, UnblockSettings};

#[derive(Parser)]
#[command(name = "traffic_unblock")]
#[command(about = "Headless ring-road simulation with blocker clearing")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Number of cars on the ring
    #[arg(long, default_value = "24")]
    vehicles: usize,

    /// Number of bicycles on the ring
    #[arg(long, default_value = "3")]
    bicycles: usize,

    /// Number of pedestrians standing in lanes
    #[arg(long, default_value = "2")]
    pedestrians: usize,

    /// Seed for the scenario layout and route choice
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Simulated seconds between progress summaries
    #[arg(long, default_value = "10.0")]
    report_every: f32,

    /// Run with blocker clearing switched off
    #[arg(long)]
    disable_unblock: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,traffic_unblock=info"),
    )
    .init();

    let cli = Cli::parse();
    if cli.delta <= 0.0 {
        anyhow::bail!("--delta must be positive, got {}", cli.delta);
    }

    run_headless(&cli)
}

/// Run the simulation in headless mode
fn run_headless(cli: &Cli) -> Result<()> {
    info!("Running traffic_unblock in headless mode...");
    info!(
        "Ticks: {}, Delta: {}s, blocker clearing {}",
        cli.ticks,
        cli.delta,
        if cli.disable_unblock { "off" } else { "on" }
    );

    let mut app = App::new();
    app.insert_resource(UnblockSettings {
        enabled: !cli.disable_unblock,
    })
    .insert_resource(SimClock::new(cli.delta))
    .add_plugins((UnblockPlugin, DemoHostPlugin));

    let config = DemoConfig {
        vehicles: cli.vehicles,
        bicycles: cli.bicycles,
        pedestrians: cli.pedestrians,
        seed: cli.seed,
    };
    build_demo_world(app.world_mut(), &config).context("Failed to build demo world")?;

    info!("Initial state:");
    log_summary(app.world_mut());

    // Ticks per summary, at least one
    let report_ticks = ((cli.report_every / cli.delta).round() as u32).max(1);

    for tick in 1..=cli.ticks {
        app.world_mut().run_schedule(FixedUpdate);

        if tick % report_ticks == 0 && tick < cli.ticks {
            log_summary(app.world_mut());
        }
    }

    let stats = app.world().resource::<DemoStats>().clone();
    info!("=== SIMULATION COMPLETE ===");
    log_summary(app.world_mut());
    info!("Ticks run: {}", stats.ticks);
    info!("Blockers cleared: {}", stats.total_cleared);
    info!("Blockers kept: {}", stats.total_kept());
    info!("Peak cleared in one tick: {}", stats.peak_cleared);

    Ok(())
}
