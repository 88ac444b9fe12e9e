//! Simulation report generation.

use super::draw_sim::DrawStats;
use crate::lootbox::{DropTable, Rarity};
use serde::Serialize;

/// Expected vs observed frequency for one rarity tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierSummary {
    pub rarity: Rarity,
    pub expected: f64,
    pub observed_final: f64,
    pub observed_strip: f64,
    pub final_count: u64,
}

impl TierSummary {
    /// Absolute gap between expected and observed final-pick frequency.
    pub fn final_deviation(&self) -> f64 {
        (self.observed_final - self.expected).abs()
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub total_strips: u64,
    pub total_strip_picks: u64,
    pub invariant_violations: u64,
    pub tiers: Vec<TierSummary>,
    pub avg_longest_drought: f64,
    pub worst_drought: u64,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: &[DrawStats], table: &DropTable) -> Self {
        let num_runs = runs.len() as u32;
        let total_strips: u64 = runs.iter().map(|r| r.strips_built).sum();
        let total_strip_picks: u64 = runs.iter().map(|r| r.total_strip_picks()).sum();
        let invariant_violations = runs.iter().map(|r| r.invariant_violations).sum();

        let tiers = Rarity::ALL
            .iter()
            .map(|&rarity| {
                let idx = rarity as usize;
                let final_count: u64 = runs.iter().map(|r| r.final_counts[idx]).sum();
                let strip_count: u64 = runs.iter().map(|r| r.strip_counts[idx]).sum();
                TierSummary {
                    rarity,
                    expected: table.probability(rarity),
                    observed_final: final_count as f64 / total_strips.max(1) as f64,
                    observed_strip: strip_count as f64 / total_strip_picks.max(1) as f64,
                    final_count,
                }
            })
            .collect();

        let avg_longest_drought = runs
            .iter()
            .map(|r| r.longest_legendary_drought as f64)
            .sum::<f64>()
            / num_runs.max(1) as f64;
        let worst_drought = runs
            .iter()
            .map(|r| r.longest_legendary_drought)
            .max()
            .unwrap_or(0);

        Self {
            num_runs,
            total_strips,
            total_strip_picks,
            invariant_violations,
            tiers,
            avg_longest_drought,
            worst_drought,
        }
    }

    /// Largest final-pick deviation across all tiers.
    pub fn max_deviation(&self) -> f64 {
        self.tiers
            .iter()
            .map(TierSummary::final_deviation)
            .fold(0.0, f64::max)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  LOOTBOX SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}   Lootboxes opened: {}   Strip picks: {}\n\n",
            self.num_runs, self.total_strips, self.total_strip_picks
        ));

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        report.push_str("  Tier        Expected   Final     Strip     Count\n");
        report.push_str("  ─────────   ────────   ───────   ───────   ─────────\n");
        for tier in &self.tiers {
            report.push_str(&format!(
                "  {:<10}  {:>6.2}%   {:>6.2}%   {:>6.2}%   {:>9}\n",
                tier.rarity.name(),
                tier.expected * 100.0,
                tier.observed_final * 100.0,
                tier.observed_strip * 100.0,
                tier.final_count
            ));
        }
        report.push('\n');

        report.push_str("── FINAL PICK FREQUENCY ─────────────────────────────────────────\n");
        for tier in &self.tiers {
            let bar_len = (tier.observed_final * 100.0 / 2.0) as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!("  {:<10} {}\n", tier.rarity.name(), bar));
        }
        report.push('\n');

        report.push_str("── LEGENDARY DROUGHT ────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Longest Drought: {:.1} openings\n",
            self.avg_longest_drought
        ));
        report.push_str(&format!(
            "  Worst Drought:       {} openings\n\n",
            self.worst_drought
        ));

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Max Deviation:       {:.2} points\n",
            self.max_deviation() * 100.0
        ));
        if self.invariant_violations > 0 {
            report.push_str(&format!(
                "  ⚠️  {} strips did not land on the final pick\n",
                self.invariant_violations
            ));
        }
        if self.total_strips < 10_000 {
            report.push_str("  ⚠️  Fewer than 10k openings - frequencies are noisy\n");
        } else if self.max_deviation() > 0.02 {
            report.push_str("  ⚠️  Observed frequencies drift from the table weights\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
