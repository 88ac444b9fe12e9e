//! Main simulation runner over the real draw engine.

use super::config::SimConfig;
use super::draw_sim::{simulate_draws, DrawStats};
use super::report::SimReport;
use crate::lootbox::DropTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation against the standard table and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    run_simulation_with_table(config, &DropTable::standard())
}

pub fn run_simulation_with_table(config: &SimConfig, table: &DropTable) -> SimReport {
    let mut all_runs: Vec<DrawStats> = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_draws(table, config.strips_per_run, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} openings, {} legendary, longest drought {}",
                run_idx + 1,
                config.num_runs,
                stats.strips_built,
                stats.final_counts[crate::lootbox::Rarity::Legendary as usize],
                stats.longest_legendary_drought
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(&all_runs, table)
}
