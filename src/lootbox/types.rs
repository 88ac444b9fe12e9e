use serde::{Deserialize, Serialize};

/// Identifier returned for any category name outside the closed rarity set.
pub const UNKNOWN_TYPE_ID: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Looks up a tier by its exact display name.
    pub fn from_name(name: &str) -> Option<Rarity> {
        Rarity::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Stove type identifier persisted for a stove of this tier (1..=5).
    pub fn type_id(&self) -> u32 {
        *self as u32 + 1
    }

    /// Inverse of [`Rarity::type_id`].
    pub fn from_type_id(type_id: u32) -> Option<Rarity> {
        match type_id {
            1 => Some(Rarity::Common),
            2 => Some(Rarity::Uncommon),
            3 => Some(Rarity::Rare),
            4 => Some(Rarity::Epic),
            5 => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// Maps a category display name to its stove type identifier.
///
/// Never fails: names outside the rarity set map to [`UNKNOWN_TYPE_ID`].
pub fn category_to_identifier(name: &str) -> i32 {
    Rarity::from_name(name)
        .map(|rarity| rarity.type_id() as i32)
        .unwrap_or(UNKNOWN_TYPE_ID)
}

/// One drop tier in a lootbox table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    pub rarity: Rarity,
    /// Cosmetic hex color, ignored by sampling.
    pub color: String,
    pub weight: f64,
}

impl WeightedCategory {
    pub fn new(rarity: Rarity, color: &str, weight: f64) -> Self {
        Self {
            rarity,
            color: color.to_string(),
            weight,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rarity.name()
    }

    pub fn type_id(&self) -> i32 {
        category_to_identifier(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_category_to_identifier_known_names() {
        assert_eq!(category_to_identifier("Common"), 1);
        assert_eq!(category_to_identifier("Uncommon"), 2);
        assert_eq!(category_to_identifier("Rare"), 3);
        assert_eq!(category_to_identifier("Epic"), 4);
        assert_eq!(category_to_identifier("Legendary"), 5);
    }

    #[test]
    fn test_category_to_identifier_unknown_names() {
        for name in ["", "common", "LEGENDARY", "Mythic", "Rare ", "Magic"] {
            assert_eq!(
                category_to_identifier(name),
                UNKNOWN_TYPE_ID,
                "{name:?} should map to the sentinel"
            );
        }
    }

    #[test]
    fn test_type_id_roundtrip_is_consistent() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::from_type_id(rarity.type_id()), Some(rarity));
            assert_eq!(category_to_identifier(rarity.name()), rarity.type_id() as i32);
        }
    }

    #[test]
    fn test_from_type_id_rejects_gaps_and_out_of_range() {
        assert_eq!(Rarity::from_type_id(0), None);
        assert_eq!(Rarity::from_type_id(6), None);
        assert_eq!(Rarity::from_type_id(7), None);
    }

    #[test]
    fn test_weighted_category_name_follows_rarity() {
        let category = WeightedCategory::new(Rarity::Epic, "#a335ee", 4.0);
        assert_eq!(category.name(), "Epic");
        assert_eq!(category.type_id(), 4);
    }
}
