//! In-process marketplace state: stoves, listings, balances, trade history.

use super::minter::{MintError, StoveMinter};
use super::names::generate_stove_name;
use super::types::{Listing, Player, PlayerId, Stove, StoveId, Trade};
use crate::lootbox::Rarity;
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_STARTING_BALANCE: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    #[error("unknown stove type id {0}")]
    UnknownStoveType(u32),
    #[error("stove {0} does not exist")]
    StoveNotFound(StoveId),
    #[error("player {player_id} does not own stove {stove_id}")]
    NotOwner { stove_id: StoveId, player_id: PlayerId },
    #[error("stove {0} is already listed")]
    AlreadyListed(StoveId),
    #[error("stove {0} is not listed")]
    NotListed(StoveId),
    #[error("listing price must be positive")]
    InvalidPrice,
    #[error("player {0} cannot trade with themselves")]
    SamePlayer(PlayerId),
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("balance of player {0} would overflow")]
    BalanceOverflow(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    next_stove_id: u32,
    starting_balance: u64,
    /// Stove names come from an RNG seeded with this plus the stove id.
    name_seed: u64,
    stoves: BTreeMap<StoveId, Stove>,
    listings: BTreeMap<StoveId, Listing>,
    players: BTreeMap<PlayerId, Player>,
    trades: Vec<Trade>,
}

impl Ledger {
    /// Creates an empty ledger; players appear with `starting_balance` coins
    /// the first time they mint or buy.
    pub fn new(starting_balance: u64) -> Self {
        Self {
            next_stove_id: 0,
            starting_balance,
            name_seed: rand::thread_rng().gen(),
            stoves: BTreeMap::new(),
            listings: BTreeMap::new(),
            players: BTreeMap::new(),
            trades: Vec::new(),
        }
    }

    /// Makes stove names reproducible from `seed`.
    pub fn set_name_seed(&mut self, seed: u64) {
        self.name_seed = seed;
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        let starting_balance = self.starting_balance;
        self.players.entry(id).or_insert_with(|| Player {
            id,
            balance: starting_balance,
        })
    }

    fn owned_stove(&self, stove_id: StoveId, player_id: PlayerId) -> Result<&Stove, MarketError> {
        let stove = self
            .stoves
            .get(&stove_id)
            .ok_or(MarketError::StoveNotFound(stove_id))?;
        if stove.owner_id != player_id {
            return Err(MarketError::NotOwner {
                stove_id,
                player_id,
            });
        }
        Ok(stove)
    }

    /// Records a new stove of `type_id` (1..=5) owned by `owner_id`.
    pub fn mint(&mut self, type_id: u32, owner_id: PlayerId) -> Result<StoveId, MarketError> {
        let rarity = Rarity::from_type_id(type_id).ok_or(MarketError::UnknownStoveType(type_id))?;

        self.player_mut(owner_id);
        self.next_stove_id += 1;
        let id = StoveId(self.next_stove_id);
        let mut name_rng = ChaCha8Rng::seed_from_u64(self.name_seed.wrapping_add(u64::from(id.0)));
        let stove = Stove {
            id,
            type_id,
            name: generate_stove_name(rarity, &mut name_rng),
            owner_id,
            minted_at: Utc::now().timestamp(),
        };

        info!(stove = %id, owner = owner_id, name = %stove.name, "Minted stove");
        self.stoves.insert(id, stove);
        Ok(id)
    }

    pub fn stove(&self, id: StoveId) -> Option<&Stove> {
        self.stoves.get(&id)
    }

    pub fn all_stoves(&self) -> impl Iterator<Item = &Stove> {
        self.stoves.values()
    }

    /// Stoves owned by a player, oldest first.
    pub fn stoves_owned_by(&self, owner_id: PlayerId) -> Vec<&Stove> {
        self.stoves
            .values()
            .filter(|s| s.owner_id == owner_id)
            .collect()
    }

    /// Highest-id stove the player owns that is not listed.
    pub fn newest_unlisted(&self, owner_id: PlayerId) -> Option<&Stove> {
        self.stoves
            .values()
            .rev()
            .find(|s| s.owner_id == owner_id && !self.listings.contains_key(&s.id))
    }

    pub fn balance(&self, player_id: PlayerId) -> u64 {
        self.players
            .get(&player_id)
            .map(|p| p.balance)
            .unwrap_or(self.starting_balance)
    }

    pub fn deposit(&mut self, player_id: PlayerId, amount: u64) -> u64 {
        let player = self.player_mut(player_id);
        player.balance = player.balance.saturating_add(amount);
        player.balance
    }

    pub fn list_for_sale(
        &mut self,
        stove_id: StoveId,
        seller_id: PlayerId,
        price: u64,
    ) -> Result<(), MarketError> {
        if price == 0 {
            return Err(MarketError::InvalidPrice);
        }
        self.owned_stove(stove_id, seller_id)?;
        if self.listings.contains_key(&stove_id) {
            return Err(MarketError::AlreadyListed(stove_id));
        }

        self.listings.insert(
            stove_id,
            Listing {
                stove_id,
                seller_id,
                price,
                listed_at: Utc::now().timestamp(),
            },
        );
        info!(stove = %stove_id, seller = seller_id, price, "Listed stove");
        Ok(())
    }

    pub fn cancel_listing(
        &mut self,
        stove_id: StoveId,
        seller_id: PlayerId,
    ) -> Result<(), MarketError> {
        let listing = self
            .listings
            .get(&stove_id)
            .ok_or(MarketError::NotListed(stove_id))?;
        if listing.seller_id != seller_id {
            return Err(MarketError::NotOwner {
                stove_id,
                player_id: seller_id,
            });
        }
        self.listings.remove(&stove_id);
        debug!(stove = %stove_id, "Listing cancelled");
        Ok(())
    }

    pub fn listing(&self, stove_id: StoveId) -> Option<&Listing> {
        self.listings.get(&stove_id)
    }

    /// Open listings, cheapest first (ties by stove id).
    pub fn active_listings(&self) -> Vec<&Listing> {
        let mut listings: Vec<_> = self.listings.values().collect();
        listings.sort_by_key(|l| (l.price, l.stove_id));
        listings
    }

    /// Buys a listed stove: coins move seller-ward, ownership moves buyer-ward.
    pub fn buy(&mut self, stove_id: StoveId, buyer_id: PlayerId) -> Result<Trade, MarketError> {
        let listing = self
            .listings
            .get(&stove_id)
            .cloned()
            .ok_or(MarketError::NotListed(stove_id))?;
        if listing.seller_id == buyer_id {
            return Err(MarketError::SamePlayer(buyer_id));
        }

        let available = self.balance(buyer_id);
        if available < listing.price {
            return Err(MarketError::InsufficientFunds {
                needed: listing.price,
                available,
            });
        }

        let seller_balance = self
            .balance(listing.seller_id)
            .checked_add(listing.price)
            .ok_or(MarketError::BalanceOverflow(listing.seller_id))?;

        self.player_mut(buyer_id).balance -= listing.price;
        self.player_mut(listing.seller_id).balance = seller_balance;

        if let Some(stove) = self.stoves.get_mut(&stove_id) {
            stove.owner_id = buyer_id;
        }
        self.listings.remove(&stove_id);

        let trade = Trade {
            id: Uuid::new_v4(),
            stove_id,
            seller_id: listing.seller_id,
            buyer_id,
            price: listing.price,
            traded_at: Utc::now().timestamp(),
        };
        info!(
            stove = %stove_id,
            seller = listing.seller_id,
            buyer = buyer_id,
            price = listing.price,
            "Stove sold"
        );
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Hands an unlisted stove to another player for free.
    pub fn transfer(
        &mut self,
        stove_id: StoveId,
        from: PlayerId,
        to: PlayerId,
    ) -> Result<(), MarketError> {
        if from == to {
            return Err(MarketError::SamePlayer(from));
        }
        self.owned_stove(stove_id, from)?;
        if self.listings.contains_key(&stove_id) {
            return Err(MarketError::AlreadyListed(stove_id));
        }

        self.player_mut(to);
        if let Some(stove) = self.stoves.get_mut(&stove_id) {
            stove.owner_id = to;
        }
        info!(stove = %stove_id, from, to, "Stove transferred");
        Ok(())
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn stove_count(&self) -> usize {
        self.stoves.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

impl StoveMinter for Ledger {
    fn create_stove(&mut self, type_id: u32, owner_id: PlayerId) -> Result<StoveId, MintError> {
        self.mint(type_id, owner_id).map_err(|e| match e {
            MarketError::UnknownStoveType(t) => MintError::UnknownType(t as i32),
            other => MintError::Rejected(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.mint(1, 10), Ok(StoveId(1)));
        assert_eq!(ledger.mint(5, 10), Ok(StoveId(2)));
        assert_eq!(ledger.stove_count(), 2);
        assert_eq!(ledger.stove(StoveId(2)).unwrap().rarity(), Some(Rarity::Legendary));
    }

    #[test]
    fn test_mint_rejects_unknown_type() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.mint(0, 1), Err(MarketError::UnknownStoveType(0)));
        assert_eq!(ledger.mint(7, 1), Err(MarketError::UnknownStoveType(7)));
        assert_eq!(ledger.stove_count(), 0);
    }

    #[test]
    fn test_minter_maps_unknown_type() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.create_stove(9, 1), Err(MintError::UnknownType(9)));
    }

    #[test]
    fn test_unknown_player_has_starting_balance() {
        let ledger = Ledger::new(250);
        assert_eq!(ledger.balance(42), 250);
    }

    #[test]
    fn test_list_requires_ownership_and_price() {
        let mut ledger = Ledger::default();
        let id = ledger.mint(2, 1).unwrap();

        assert_eq!(ledger.list_for_sale(id, 1, 0), Err(MarketError::InvalidPrice));
        assert_eq!(
            ledger.list_for_sale(id, 2, 50),
            Err(MarketError::NotOwner {
                stove_id: id,
                player_id: 2
            })
        );
        assert_eq!(ledger.list_for_sale(id, 1, 50), Ok(()));
        assert_eq!(ledger.list_for_sale(id, 1, 60), Err(MarketError::AlreadyListed(id)));
        assert_eq!(
            ledger.list_for_sale(StoveId(99), 1, 10),
            Err(MarketError::StoveNotFound(StoveId(99)))
        );
    }

    #[test]
    fn test_cancel_listing_only_by_seller() {
        let mut ledger = Ledger::default();
        let id = ledger.mint(1, 1).unwrap();
        ledger.list_for_sale(id, 1, 10).unwrap();

        assert!(ledger.cancel_listing(id, 2).is_err());
        assert_eq!(ledger.cancel_listing(id, 1), Ok(()));
        assert_eq!(ledger.cancel_listing(id, 1), Err(MarketError::NotListed(id)));
    }

    #[test]
    fn test_active_listings_sorted_by_price() {
        let mut ledger = Ledger::default();
        let a = ledger.mint(1, 1).unwrap();
        let b = ledger.mint(1, 1).unwrap();
        let c = ledger.mint(1, 1).unwrap();
        ledger.list_for_sale(a, 1, 30).unwrap();
        ledger.list_for_sale(b, 1, 10).unwrap();
        ledger.list_for_sale(c, 1, 10).unwrap();

        let order: Vec<_> = ledger.active_listings().iter().map(|l| l.stove_id).collect();
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn test_buy_rejects_self_purchase() {
        let mut ledger = Ledger::default();
        let id = ledger.mint(1, 1).unwrap();
        ledger.list_for_sale(id, 1, 10).unwrap();
        assert_eq!(ledger.buy(id, 1), Err(MarketError::SamePlayer(1)));
    }

    #[test]
    fn test_transfer_blocks_listed_stove() {
        let mut ledger = Ledger::default();
        let id = ledger.mint(3, 1).unwrap();
        ledger.list_for_sale(id, 1, 10).unwrap();
        assert_eq!(ledger.transfer(id, 1, 2), Err(MarketError::AlreadyListed(id)));

        ledger.cancel_listing(id, 1).unwrap();
        assert_eq!(ledger.transfer(id, 1, 2), Ok(()));
        assert_eq!(ledger.stove(id).unwrap().owner_id, 2);
        assert_eq!(ledger.transfer(id, 2, 2), Err(MarketError::SamePlayer(2)));
    }

    #[test]
    fn test_newest_unlisted_skips_listed() {
        let mut ledger = Ledger::default();
        let first = ledger.mint(1, 1).unwrap();
        let second = ledger.mint(1, 1).unwrap();
        assert_eq!(ledger.newest_unlisted(1).map(|s| s.id), Some(second));

        ledger.list_for_sale(second, 1, 5).unwrap();
        assert_eq!(ledger.newest_unlisted(1).map(|s| s.id), Some(first));
        assert!(ledger.newest_unlisted(2).is_none());
    }

    #[test]
    fn test_buy_rejects_seller_balance_overflow() {
        let mut ledger = Ledger::new(0);
        let id = ledger.mint(2, 1).unwrap();
        ledger.deposit(1, u64::MAX - 5);
        ledger.list_for_sale(id, 1, 10).unwrap();
        ledger.deposit(2, 10);
        let snapshot = ledger.clone();

        assert_eq!(ledger.buy(id, 2), Err(MarketError::BalanceOverflow(1)));
        assert_eq!(ledger, snapshot);
        assert_eq!(ledger.balance(2), 10);
        assert_eq!(ledger.balance(1), u64::MAX - 5);
    }

    #[test]
    fn test_name_seed_makes_names_reproducible() {
        let mint_names = |seed: u64| {
            let mut ledger = Ledger::default();
            ledger.set_name_seed(seed);
            (0..20)
                .map(|n| {
                    let id = ledger.mint(n % 5 + 1, 1).unwrap();
                    ledger.stove(id).unwrap().name.clone()
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(mint_names(42), mint_names(42));
        assert_ne!(mint_names(42), mint_names(43));
    }
}
