//! Encrypted Forest scan bench
//!
//! Command-line consumer of the world-generation core: bulk region scans,
//! spawn-candidate searches, and difficulty sweeps against the remote
//! verification budget.

use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use encrypted_forest::{
    cost,
    game::params::GAME_SPEED_ONE,
    scan::find_first_match,
    CelestialBodyType, Coordinate, GameParameters, ScanCoordinator, ScanError, ScanRegion,
    VERSION,
};

/// Encrypted Forest - deterministic world scanning
#[derive(Parser, Debug)]
#[command(name = "forest-scan")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a centered square region and report discovered bodies
    Scan {
        /// Region radius around the origin
        #[arg(short, long, default_value = "100")]
        radius: i64,

        /// Iterated-hash difficulty
        #[arg(long, default_value = "1")]
        rounds: u32,

        /// Game identifier
        #[arg(short, long, default_value = "1")]
        game_id: u64,

        /// Dead space threshold override (byte 0 of the property hash)
        #[arg(short, long)]
        dead_space: Option<u8>,

        /// Worker task count (default: one per logical CPU)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Search for the first valid spawn planet (Miniscule Planet)
    Find {
        /// Map diameter
        #[arg(long, default_value = "10000")]
        diameter: u64,

        /// Iterated-hash difficulty
        #[arg(long, default_value = "1")]
        rounds: u32,

        /// Game identifier
        #[arg(short, long, default_value = "1")]
        game_id: u64,

        /// Dead space threshold override
        #[arg(short, long)]
        dead_space: Option<u8>,

        /// Attempt budget
        #[arg(short, long, default_value = "1000000")]
        max_attempts: u64,

        /// Raster offset, x component
        #[arg(long, default_value = "0")]
        offset_x: i64,

        /// Raster offset, y component
        #[arg(long, default_value = "0")]
        offset_y: i64,
    },

    /// Sweep candidate rounds values against the verification budget
    Sweep {
        /// Compute units reserved for the rest of the verifying transaction
        #[arg(long, default_value = "200000")]
        reserve: u64,

        /// Largest candidate rounds value
        #[arg(long, default_value = "1024")]
        max_rounds: u32,
    },
}

/// Output format for scan results
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full result as JSON
    Json,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Encrypted Forest core v{}", VERSION);

    match Args::parse().command {
        Commands::Scan {
            radius,
            rounds,
            game_id,
            dead_space,
            workers,
            format,
        } => run_scan(radius, rounds, game_id, dead_space, workers, format),
        Commands::Find {
            diameter,
            rounds,
            game_id,
            dead_space,
            max_attempts,
            offset_x,
            offset_y,
        } => run_find(
            diameter,
            rounds,
            game_id,
            dead_space,
            max_attempts,
            Coordinate::new(offset_x, offset_y),
        ),
        Commands::Sweep {
            reserve,
            max_rounds,
        } => {
            run_sweep(reserve, max_rounds);
            Ok(())
        }
    }
}

fn build_params(game_id: u64, rounds: u32, map_diameter: u64, dead_space: Option<u8>) -> GameParameters {
    let mut params = GameParameters::new(game_id, rounds, map_diameter, GAME_SPEED_ONE);
    if let Some(threshold) = dead_space {
        params.thresholds.dead_space_threshold = threshold;
    }
    params
}

fn run_scan(
    radius: i64,
    rounds: u32,
    game_id: u64,
    dead_space: Option<u8>,
    workers: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let region = ScanRegion::centered(radius);
    // The map must cover the scanned region.
    let diameter = (4 * radius.unsigned_abs()).max(1);
    let params = build_params(game_id, rounds, diameter, dead_space);
    params.validate()?;

    let workers = workers.unwrap_or_else(rayon::current_num_threads);
    let mut coordinator = ScanCoordinator::new(workers);

    info!(
        coordinates = region.coordinate_count(),
        workers, rounds, "starting scan"
    );

    let start = Instant::now();
    let result = coordinator.scan(region, &params)?;
    let elapsed = start.elapsed();

    let rate = result.processed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    info!(
        processed = result.processed,
        found = result.found,
        elapsed_ms = elapsed.as_millis() as u64,
        rate_per_sec = rate as u64,
        "scan finished"
    );

    match format {
        OutputFormat::Text => {
            for discovery in &result.discoveries {
                println!(
                    "{:>12}  {:?} size {}  comets {}  {}",
                    discovery.coordinate.to_string(),
                    discovery.properties.body_type,
                    discovery.properties.size,
                    discovery.properties.comets.len(),
                    hex::encode(discovery.commitment),
                );
            }
            println!(
                "{} bodies in {} coordinates ({:.1} coords/s)",
                result.found, result.processed, rate
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn run_find(
    diameter: u64,
    rounds: u32,
    game_id: u64,
    dead_space: Option<u8>,
    max_attempts: u64,
    offset: Coordinate,
) -> anyhow::Result<()> {
    let params = build_params(game_id, rounds, diameter, dead_space);

    let start = Instant::now();
    let outcome = find_first_match(
        &params,
        |props| props.body_type == CelestialBodyType::Planet && props.size == 1,
        offset,
        max_attempts,
    );
    let elapsed = start.elapsed();

    match outcome {
        Ok(discovery) => {
            info!(elapsed_ms = elapsed.as_millis() as u64, "spawn candidate found");
            println!(
                "spawn candidate at {}  commitment {}",
                discovery.coordinate,
                hex::encode(discovery.commitment),
            );
            Ok(())
        }
        Err(ScanError::SearchExhausted { attempts }) => {
            warn!(attempts, "no spawn candidate within budget");
            println!("no spawn candidate within {attempts} attempts");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

fn run_sweep(reserve: u64, max_rounds: u32) {
    // Doubling candidates up to the cap, plus the exact feasibility boundary.
    let mut candidates = Vec::new();
    let mut rounds = 1u32;
    while rounds <= max_rounds {
        candidates.push(rounds);
        match rounds.checked_mul(2) {
            Some(next) => rounds = next,
            None => break,
        }
    }
    let boundary = cost::max_safe_rounds(reserve);
    if boundary <= max_rounds && !candidates.contains(&boundary) {
        candidates.push(boundary);
        candidates.sort_unstable();
    }

    println!("{:>10} {:>12} {:>12}  verdict", "rounds", "units", "budget");
    for report in cost::sweep(candidates, reserve) {
        println!(
            "{:>10} {:>12} {:>12}  {}",
            report.rounds,
            report.units,
            report.budget,
            if report.fits { "ok" } else { "over budget" },
        );
    }
}
