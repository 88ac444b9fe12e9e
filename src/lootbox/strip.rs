use super::table::DropTable;
use super::types::WeightedCategory;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of picks shown in one reveal strip.
pub const STRIP_LEN: usize = 60;

/// Slot the reveal animation stops on; always holds the final pick.
pub const FINAL_SLOT: usize = 40;

/// Result of opening one lootbox: the scrolling strip and the decided pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawStrip {
    items: Vec<WeightedCategory>,
    final_item: WeightedCategory,
}

impl DrawStrip {
    pub fn items(&self) -> &[WeightedCategory] {
        &self.items
    }

    pub fn final_item(&self) -> &WeightedCategory {
        &self.final_item
    }
}

/// Samples a fresh strip.
///
/// The final pick is drawn separately after the 60 strip picks and written
/// over [`FINAL_SLOT`], discarding whatever was sampled there.
pub fn build_strip(table: &DropTable, rng: &mut impl Rng) -> DrawStrip {
    let mut items: Vec<WeightedCategory> = (0..STRIP_LEN)
        .map(|_| table.weighted_pick(rng).clone())
        .collect();

    let final_item = table.weighted_pick(rng).clone();
    items[FINAL_SLOT] = final_item.clone();

    DrawStrip { items, final_item }
}
