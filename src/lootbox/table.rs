//! Fixed rarity table and the cumulative-weight sampler.

use super::types::{Rarity, WeightedCategory};
use rand::Rng;
use thiserror::Error;

/// Base distribution: 50% Common, 30% Uncommon, 15% Rare, 4% Epic, 1% Legendary.
pub const STANDARD_WEIGHTS: [(Rarity, &str, f64); 5] = [
    (Rarity::Common, "#9d9d9d", 50.0),
    (Rarity::Uncommon, "#1eff00", 30.0),
    (Rarity::Rare, "#0070dd", 15.0),
    (Rarity::Epic, "#a335ee", 4.0),
    (Rarity::Legendary, "#ff8000", 1.0),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropTableError {
    #[error("drop table has no categories")]
    Empty,
    #[error("category {name} has invalid weight {weight}")]
    InvalidWeight { name: &'static str, weight: f64 },
    #[error("drop table weights sum to zero")]
    ZeroTotal,
    #[error("drop table weights overflow to {0}")]
    TotalOverflow(f64),
}

/// An ordered, immutable list of weighted categories with a positive total.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    categories: Vec<WeightedCategory>,
    total_weight: f64,
}

impl DropTable {
    /// Validates and builds a table. Declaration order is the sampling order.
    pub fn new(categories: Vec<WeightedCategory>) -> Result<Self, DropTableError> {
        if categories.is_empty() {
            return Err(DropTableError::Empty);
        }

        for category in &categories {
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(DropTableError::InvalidWeight {
                    name: category.name(),
                    weight: category.weight,
                });
            }
        }

        let total_weight: f64 = categories.iter().map(|c| c.weight).sum();
        if !total_weight.is_finite() {
            return Err(DropTableError::TotalOverflow(total_weight));
        }
        if total_weight <= 0.0 {
            return Err(DropTableError::ZeroTotal);
        }

        Ok(Self {
            categories,
            total_weight,
        })
    }

    /// The compiled-in five tier table.
    pub fn standard() -> Self {
        let categories = STANDARD_WEIGHTS
            .iter()
            .map(|(rarity, color, weight)| WeightedCategory::new(*rarity, color, *weight))
            .collect();
        Self {
            categories,
            total_weight: STANDARD_WEIGHTS.iter().map(|(_, _, w)| w).sum(),
        }
    }

    pub fn categories(&self) -> &[WeightedCategory] {
        &self.categories
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Expected draw probability for a tier, 0.0 if the tier is absent.
    pub fn probability(&self, rarity: Rarity) -> f64 {
        self.categories
            .iter()
            .filter(|c| c.rarity == rarity)
            .map(|c| c.weight)
            .sum::<f64>()
            / self.total_weight
    }

    /// Walks the table with a roll already scaled to `[0, total_weight)`.
    ///
    /// Returns the first category whose weight brings the remainder to or
    /// below zero, falling back to the first category if the walk runs out.
    pub fn pick_at(&self, roll: f64) -> &WeightedCategory {
        let mut remainder = roll;
        for category in &self.categories {
            remainder -= category.weight;
            if remainder <= 0.0 {
                return category;
            }
        }
        &self.categories[0]
    }

    /// Draws one category with probability `weight / total_weight`.
    pub fn weighted_pick(&self, rng: &mut impl Rng) -> &WeightedCategory {
        let roll = rng.gen::<f64>() * self.total_weight;
        self.pick_at(roll)
    }
}

impl Default for DropTable {
    fn default() -> Self {
        Self::standard()
    }
}
