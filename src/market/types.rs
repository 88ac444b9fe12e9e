use crate::lootbox::Rarity;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoveId(pub u32);

impl fmt::Display for StoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An owned, tradeable item minted from a lootbox draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stove {
    pub id: StoveId,
    pub type_id: u32,
    pub name: String,
    pub owner_id: PlayerId,
    /// Unix timestamp (UTC seconds)
    pub minted_at: i64,
}

impl Stove {
    pub fn rarity(&self) -> Option<Rarity> {
        Rarity::from_type_id(self.type_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub stove_id: StoveId,
    pub seller_id: PlayerId,
    pub price: u64,
    pub listed_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub balance: u64,
}

/// Receipt for a completed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub stove_id: StoveId,
    pub seller_id: PlayerId,
    pub buyer_id: PlayerId,
    pub price: u64,
    pub traded_at: i64,
}
