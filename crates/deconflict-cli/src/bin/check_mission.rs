//! Pre-flight deconfliction check for a mission file.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use deconflict_cli::{loader, report};
use deconflict_core::{find_conflicts, SafetyConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Check a drone mission for spatio-temporal conflicts", long_about = None)]
struct Args {
    /// Path to the mission JSON file
    mission_file: PathBuf,

    /// Safety buffer distance in flight-plan units
    #[arg(short, long, default_value_t = 5.0)]
    buffer: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = SafetyConfig::new(args.buffer);
    let errors = config.validate();
    if !errors.is_empty() {
        bail!("invalid safety configuration: {}", errors.join("; "));
    }

    println!("Checking mission file: {}", args.mission_file.display());
    println!("Using safety buffer: {}", config.safety_buffer);
    println!("---");

    let (primary, simulated) = loader::load_missions(&args.mission_file)?;
    tracing::debug!(
        primary = %primary.drone_id,
        simulated = simulated.len(),
        "missions loaded"
    );

    let result = find_conflicts(&primary, &simulated, &config);

    println!("Mission Status: {}", result.status);
    if !result.records.is_empty() {
        println!("Conflict Details:");
        for line in report::describe_report(&result) {
            println!("- {line}");
        }
    }
    println!("---");

    Ok(())
}
