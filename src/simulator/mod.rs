//! Lootbox simulator for Monte Carlo analysis.
//!
//! Opens thousands of lootboxes to check:
//! - Final-pick frequency against the table weights
//! - Strip composition and the final-slot invariant
//! - How long players wait between Legendary pulls
//!
//! Every opening goes through `lootbox::build_strip`, so results match what
//! players see.

mod config;
mod draw_sim;
mod report;
mod runner;

pub use config::SimConfig;
pub use draw_sim::{simulate_draws, DrawStats};
pub use report::{SimReport, TierSummary};
pub use runner::{run_simulation, run_simulation_with_table};
