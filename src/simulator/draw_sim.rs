//! Per-run draw statistics using the real strip builder.

use crate::lootbox::{build_strip, DropTable, Rarity, FINAL_SLOT, STRIP_LEN};
use rand::Rng;

/// Statistics about the lootboxes opened in one run.
#[derive(Debug, Clone, Default)]
pub struct DrawStats {
    pub strips_built: u64,
    /// Picks across every strip slot, indexed by `Rarity as usize`
    pub strip_counts: [u64; 5],
    /// Final picks only
    pub final_counts: [u64; 5],
    pub invariant_violations: u64,
    /// Most consecutive openings without a Legendary final pick
    pub longest_legendary_drought: u64,
    current_drought: u64,
}

impl DrawStats {
    pub fn record_strip(&mut self, items: &[Rarity], final_pick: Rarity) {
        self.strips_built += 1;

        if items.len() != STRIP_LEN || items.get(FINAL_SLOT) != Some(&final_pick) {
            self.invariant_violations += 1;
        }

        for rarity in items {
            self.strip_counts[*rarity as usize] += 1;
        }
        self.final_counts[final_pick as usize] += 1;

        if final_pick == Rarity::Legendary {
            self.current_drought = 0;
        } else {
            self.current_drought += 1;
            self.longest_legendary_drought = self.longest_legendary_drought.max(self.current_drought);
        }
    }

    pub fn total_strip_picks(&self) -> u64 {
        self.strip_counts.iter().sum()
    }
}

/// Opens `strips` lootboxes against `table` and tallies the results.
pub fn simulate_draws(table: &DropTable, strips: u32, rng: &mut impl Rng) -> DrawStats {
    let mut stats = DrawStats::default();
    for _ in 0..strips {
        let strip = build_strip(table, rng);
        let items: Vec<Rarity> = strip.items().iter().map(|c| c.rarity).collect();
        stats.record_strip(&items, strip.final_item().rarity);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_strip_counts() {
        let mut stats = DrawStats::default();
        let items = vec![Rarity::Common; STRIP_LEN];
        stats.record_strip(&items, Rarity::Common);

        assert_eq!(stats.strips_built, 1);
        assert_eq!(stats.strip_counts[Rarity::Common as usize], STRIP_LEN as u64);
        assert_eq!(stats.final_counts[Rarity::Common as usize], 1);
        assert_eq!(stats.invariant_violations, 0);
        assert_eq!(stats.longest_legendary_drought, 1);
    }

    #[test]
    fn test_record_strip_flags_mismatched_final_slot() {
        let mut stats = DrawStats::default();
        let items = vec![Rarity::Common; STRIP_LEN];
        stats.record_strip(&items, Rarity::Epic);
        stats.record_strip(&items[..10], Rarity::Common);
        assert_eq!(stats.invariant_violations, 2);
    }

    #[test]
    fn test_drought_resets_on_legendary() {
        let mut stats = DrawStats::default();
        let mut items = vec![Rarity::Common; STRIP_LEN];
        for _ in 0..3 {
            stats.record_strip(&items, Rarity::Common);
        }
        items[FINAL_SLOT] = Rarity::Legendary;
        stats.record_strip(&items, Rarity::Legendary);
        items[FINAL_SLOT] = Rarity::Common;
        stats.record_strip(&items, Rarity::Common);

        assert_eq!(stats.longest_legendary_drought, 3);
    }

    #[test]
    fn test_simulate_draws_has_no_violations() {
        let stats = simulate_draws(&DropTable::standard(), 500, &mut rand::thread_rng());
        assert_eq!(stats.strips_built, 500);
        assert_eq!(stats.total_strip_picks(), 500 * STRIP_LEN as u64);
        assert_eq!(stats.invariant_violations, 0);
    }
}
