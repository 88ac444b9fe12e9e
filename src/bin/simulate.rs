//! Lootbox simulator CLI.
//!
//! Run Monte Carlo simulations over the draw table.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs x 1000 lootboxes
//!   cargo run --bin simulate -- -n 10 -b 500   # 10 runs x 500 lootboxes
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use ember_exchange::logging;
use ember_exchange::persistence::json::{ember_dir, save_json};
use ember_exchange::simulator::{run_simulation, SimConfig};
use std::env;
use tracing::{info, warn};

/// Largest final-pick drift `--check` accepts before failing
const DRIFT_TOLERANCE: f64 = 0.01;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    logging::init_stderr(if config.verbosity >= 2 {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    });

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              EMBER EXCHANGE LOOTBOX SIMULATOR                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Lootboxes/Run:  {}", config.strips_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    info!(strips = report.total_strips, "Simulation finished");

    if config.verbosity > 0 {
        println!("{}", report.to_text());
    }

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let saved = ember_dir().and_then(|dir| save_json(&dir, &filename, &report));
        match saved {
            Ok(path) => println!("JSON report saved to: {}", path.display()),
            Err(e) => {
                warn!(error = %e, "Could not save JSON report");
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }

    if report.invariant_violations > 0 {
        eprintln!("{} strips broke the final-slot rule", report.invariant_violations);
        std::process::exit(1);
    }
    if args.iter().any(|a| a == "--check") && report.max_deviation() > DRIFT_TOLERANCE {
        eprintln!(
            "Final picks drifted {:.2}% from table weights (limit {:.2}%)",
            report.max_deviation() * 100.0,
            DRIFT_TOLERANCE * 100.0
        );
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-b" | "--boxes" => {
                if i + 1 < args.len() {
                    config.strips_per_run = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--quick" => {
                apply_preset(&mut config, SimConfig::quick());
            }
            "--check" => {
                apply_preset(&mut config, SimConfig::distribution_check(100_000));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

/// Takes the preset's run sizes; seed and verbosity stay as given.
fn apply_preset(config: &mut SimConfig, preset: SimConfig) {
    config.num_runs = preset.num_runs;
    config.strips_per_run = preset.strips_per_run;
}

fn print_help() {
    println!("Ember Exchange Lootbox Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -b, --boxes <B>     Lootboxes opened per run (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -v, --verbose       Per-run output");
    println!("    -q, --quiet         Skip the text report");
    println!("    --json              Save JSON report to ~/.ember-exchange/");
    println!("    --quick             Quick check (10 runs x 1000)");
    println!("    --check             One run of 100,000 lootboxes");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 10 -b 500   # Smaller run");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --check --json # Long run, saved");
}
