//! Joins a lootbox draw to the store that records the resulting stove.

use super::types::{PlayerId, StoveId};
use crate::lootbox::{build_strip, category_to_identifier, DrawStrip, DropTable};
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    #[error("unknown stove type id {0}")]
    UnknownType(i32),
    #[error("stove store rejected mint: {0}")]
    Rejected(String),
    #[error("stove store unavailable: {0}")]
    Storage(String),
}

/// Anything that can create a stove record of a given type for a player.
pub trait StoveMinter {
    fn create_stove(&mut self, type_id: u32, owner_id: PlayerId) -> Result<StoveId, MintError>;
}

/// A finished lootbox opening.
///
/// The strip is always present; `minted` carries the store's answer so a
/// failed write can be reported without losing the draw.
#[derive(Debug, Clone)]
pub struct Opening {
    pub strip: DrawStrip,
    pub minted: Result<StoveId, MintError>,
}

impl Opening {
    pub fn stove_id(&self) -> Option<StoveId> {
        self.minted.as_ref().ok().copied()
    }
}

/// Draws a strip and mints a stove of the final pick's type for `owner_id`.
pub fn open_lootbox<M: StoveMinter + ?Sized>(
    table: &DropTable,
    minter: &mut M,
    owner_id: PlayerId,
    rng: &mut impl Rng,
) -> Opening {
    let strip = build_strip(table, rng);
    let type_id = category_to_identifier(strip.final_item().name());

    let minted = if type_id > 0 {
        minter.create_stove(type_id as u32, owner_id)
    } else {
        Err(MintError::UnknownType(type_id))
    };

    match &minted {
        Ok(id) => info!(
            stove = %id,
            owner = owner_id,
            rarity = strip.final_item().name(),
            "Lootbox opened"
        ),
        Err(e) => warn!(owner = owner_id, error = %e, "Lootbox drawn but mint failed"),
    }

    Opening { strip, minted }
}
