//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent simulation runs
    pub num_runs: u32,

    /// Lootboxes opened per run
    pub strips_per_run: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            strips_per_run: 1000,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a smoke check of the draw table
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            strips_per_run: 1000,
            ..Default::default()
        }
    }

    /// Single long run, for checking final-pick frequencies
    pub fn distribution_check(num_strips: u32) -> Self {
        Self {
            num_runs: 1,
            strips_per_run: num_strips,
            ..Default::default()
        }
    }

    pub fn total_strips(&self) -> u64 {
        self.num_runs as u64 * self.strips_per_run as u64
    }
}
