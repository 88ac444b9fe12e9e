use super::json::{load_json_or_default, save_json};
use crate::lootbox::Rarity;
use crate::market::{Opening, StoveId};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const HISTORY_FILENAME: &str = "draw_history.json";

/// Oldest records are dropped past this many.
pub const MAX_HISTORY: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub rarity: Rarity,
    /// None when the draw happened but the mint failed.
    pub stove_id: Option<StoveId>,
    pub opened_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawHistory {
    pub records: Vec<DrawRecord>,
}

impl DrawHistory {
    pub fn load(dir: &Path) -> Self {
        load_json_or_default(dir, HISTORY_FILENAME)
    }

    pub fn save(&self, dir: &Path) -> io::Result<()> {
        save_json(dir, HISTORY_FILENAME, self).map(|_| ())
    }

    pub fn record(&mut self, opening: &Opening, opened_at: i64) {
        self.records.push(DrawRecord {
            rarity: opening.strip.final_item().rarity,
            stove_id: opening.stove_id(),
            opened_at,
        });
        if self.records.len() > MAX_HISTORY {
            let excess = self.records.len() - MAX_HISTORY;
            self.records.drain(..excess);
        }
    }

    /// Draw count per tier, in table order.
    pub fn counts(&self) -> [(Rarity, usize); 5] {
        Rarity::ALL.map(|rarity| {
            let n = self.records.iter().filter(|r| r.rarity == rarity).count();
            (rarity, n)
        })
    }

    /// Draws since the last Legendary, or all draws if none yet.
    pub fn draws_since_legendary(&self) -> usize {
        self.records
            .iter()
            .rev()
            .take_while(|r| r.rarity != Rarity::Legendary)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lootbox::DropTable;
    use crate::market::{open_lootbox, Ledger};
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_record_and_counts() {
        let mut ledger = Ledger::default();
        let mut history = DrawHistory::default();
        let mut rng = StepRng::new(0, 0);

        for ts in 0..3 {
            let opening = open_lootbox(&DropTable::standard(), &mut ledger, 1, &mut rng);
            history.record(&opening, ts);
        }

        assert_eq!(history.records.len(), 3);
        assert_eq!(history.counts()[0], (Rarity::Common, 3));
        assert_eq!(history.records[2].stove_id, Some(StoveId(3)));
        assert_eq!(history.draws_since_legendary(), 3);
    }

    #[test]
    fn test_history_is_capped() {
        let mut ledger = Ledger::default();
        let mut history = DrawHistory::default();
        let mut rng = StepRng::new(0, 0);
        for ts in 0..(MAX_HISTORY as i64 + 10) {
            let opening = open_lootbox(&DropTable::standard(), &mut ledger, 1, &mut rng);
            history.record(&opening, ts);
        }
        assert_eq!(history.records.len(), MAX_HISTORY);
        assert_eq!(history.records[0].opened_at, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("ember-history-{}", std::process::id()));
        let mut history = DrawHistory::default();
        history.records.push(DrawRecord {
            rarity: Rarity::Legendary,
            stove_id: None,
            opened_at: 99,
        });
        history.save(&dir).unwrap();
        assert_eq!(DrawHistory::load(&dir), history);
        assert_eq!(DrawHistory::load(&dir).draws_since_legendary(), 0);
        std::fs::remove_dir_all(dir).ok();
    }
}
