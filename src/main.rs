use std::{process::ExitCode, time::Instant};

use checkout_sim::{Simulation, SimulationConfig, SimulationReporter};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Store checkout queue simulation.
///
/// Give all four positional arguments or none at all to use the defaults.
#[derive(Parser, Debug)]
#[command(name = "checkout-sim", version, about, allow_negative_numbers = true)]
struct Args {
    /// Number of checkouts.
    checkouts: Option<usize>,

    /// Simulated duration in minutes.
    duration_minutes: Option<u32>,

    /// Mean time between customer arrivals, in seconds.
    arrival_interval_secs: Option<f64>,

    /// Mean number of items in a cart.
    items_in_cart: Option<f64>,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Log level filter (e.g. "info", "checkout_sim=debug").
    #[arg(long, default_value = "warn")]
    log_level: String,
}

const WARN_AFTER_SECS: f64 = 5.0;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    println!("===== Store Checkout Queue Simulation =====\n");

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(%config, seed = ?args.seed, "Starting simulation");

    let mut simulation = Simulation::from_seed(config, args.seed);

    let start = Instant::now();
    let statistics = match simulation.run() {
        Ok(statistics) => statistics,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    SimulationReporter::new(&statistics)
        .with_config(&config)
        .print_summary();

    println!();
    if elapsed.as_secs_f64() < 1.0 {
        println!("Execution time: {:.2} milliseconds", elapsed.as_secs_f64() * 1000.0);
    } else {
        println!("Execution time: {:.2} seconds", elapsed.as_secs_f64());
    }

    if elapsed.as_secs_f64() > WARN_AFTER_SECS {
        warn!(elapsed_secs = elapsed.as_secs_f64(), "Simulation was slow");
        println!(
            "\nWarning: Simulation took {:.2} seconds (exceeded {WARN_AFTER_SECS}s threshold).",
            elapsed.as_secs_f64()
        );
        println!("Consider reducing simulation duration.");
    }

    ExitCode::SUCCESS
}

fn build_config(args: &Args) -> Result<SimulationConfig, checkout_sim::ConfigError> {
    let builder = SimulationConfig::builder();

    match (
        args.checkouts,
        args.duration_minutes,
        args.arrival_interval_secs,
        args.items_in_cart,
    ) {
        (Some(checkouts), Some(minutes), Some(interval), Some(items)) => builder
            .checkouts(checkouts)
            .horizon_secs(f64::from(minutes) * 60.0)
            .mean_inter_arrival_secs(interval)
            .mean_items_per_cart(items)
            .build(),
        (None, None, None, None) => {
            println!("Using default parameters.\n");
            builder.build()
        }
        _ => {
            println!("Error: Expected all 4 positional arguments or none. Using defaults.\n");
            builder.build()
        }
    }
}
