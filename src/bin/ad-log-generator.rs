//! IPTV Ad Log Generator Binary
//!
//! Produces the synthetic ad-impression CSV files that feed the analytics
//! pipeline. Run a single batch with `--once`, or let it keep producing
//! files on the configured schedule:
//!
//!   cargo run --bin ad-log-generator -- --once --count 500
//!   cargo run --bin ad-log-generator -- --config my_config.json

use ad_analytics::adlog::{self, GeneratorConfig};
use clap::Parser;
use rand::thread_rng;
use std::path::PathBuf;
use tokio::time::{interval, MissedTickBehavior};

/// IPTV ad impression CSV generator
#[derive(Parser, Debug)]
#[command(about = "Generates IPTV ad impression CSV files on a schedule")]
struct Cli {
    /// Path of the JSON config file (created with defaults if missing)
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Generate one batch and exit instead of running the scheduler
    #[arg(long)]
    once: bool,

    /// Number of impressions per batch
    #[arg(long, default_value_t = 10_000)]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig::load_or_init(&cli.config)?;

    if cli.once {
        generate_batch(&config, cli.count);
        return Ok(());
    }

    println!("🎬 Starting ad log generation {}", config.schedule_interval.describe());
    println!("   Output: {}", config.output_directory.display());
    println!("   Batch size: {} impressions", cli.count);
    println!();

    let mut ticker = interval(config.schedule_interval.period());
    // Skip missed ticks: catching up after a long pause would dump a burst
    // of near-identical files
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // The first tick fires immediately, which doubles as the
        // generate-on-startup batch
        ticker.tick().await;
        generate_batch(&config, cli.count);
    }
}

/// Generates one batch, writes it, and rotates old files.
///
/// Failures are reported and swallowed so one bad tick does not stop the
/// schedule.
fn generate_batch(config: &GeneratorConfig, count: usize) {
    let mut rng = thread_rng();
    let result = adlog::generate_sample_logs(config, count, &mut rng)
        .and_then(|logs| adlog::write_csv(config, &logs))
        .and_then(|_| adlog::cleanup_old_files(config));

    match result {
        Ok(deleted) if deleted > 0 => println!("🧹 Rotated out {} old file(s)", deleted),
        Ok(_) => {}
        Err(e) => eprintln!("Log generation failed: {}", e),
    }
}
