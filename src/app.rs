//! State behind the terminal UI: one player's view of the exchange.

use chrono::Utc;
use ember_exchange::lootbox::RevealAnimation;
use ember_exchange::persistence::{DrawHistory, LedgerStore};
use ember_exchange::{open_lootbox, Config, DropTable, Ledger, Opening};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Ledger and history are written at least this often while the UI runs.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

pub struct App {
    pub config: Config,
    pub table: DropTable,
    pub ledger: Ledger,
    pub history: DrawHistory,
    pub reveal: Option<RevealAnimation>,
    pub last_opening: Option<Opening>,
    pub status: String,
    store: LedgerStore,
    rng: StdRng,
    last_autosave: Instant,
}

impl App {
    pub fn new(config: Config) -> io::Result<Self> {
        let store = LedgerStore::in_dir(&config.data_dir)?;
        let mut ledger = store.load_or(Ledger::new(config.starting_balance))?;
        if let Some(seed) = config.seed {
            ledger.set_name_seed(seed);
        }
        let history = DrawHistory::load(&config.data_dir);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            player = config.player_id,
            stoves = ledger.stove_count(),
            "Exchange loaded"
        );

        Ok(Self {
            config,
            table: DropTable::standard(),
            ledger,
            history,
            reveal: None,
            last_opening: None,
            status: "Press [Space] to open a lootbox".to_string(),
            store,
            rng,
            last_autosave: Instant::now(),
        })
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.as_ref().is_some_and(|r| !r.is_finished())
    }

    /// Opens a lootbox unless a reveal is still spinning.
    pub fn open_lootbox(&mut self) {
        if self.is_revealing() {
            if let Some(reveal) = self.reveal.as_mut() {
                reveal.skip();
            }
            self.settle();
            return;
        }

        let opening = open_lootbox(
            &self.table,
            &mut self.ledger,
            self.config.player_id,
            &mut self.rng,
        );
        self.history.record(&opening, Utc::now().timestamp());
        self.reveal = Some(RevealAnimation::new(opening.strip.clone()));
        self.last_opening = Some(opening);
        self.status = "Opening...".to_string();
    }

    /// Advances the reveal by one frame.
    pub fn tick(&mut self) {
        let landed = match self.reveal.as_mut() {
            Some(reveal) if !reveal.is_finished() => reveal.tick(),
            _ => false,
        };
        if landed {
            self.settle();
        }
    }

    fn settle(&mut self) {
        let Some(opening) = &self.last_opening else {
            return;
        };
        let rarity = opening.strip.final_item().name();
        self.status = match &opening.minted {
            Ok(id) => match self.ledger.stove(*id) {
                Some(stove) => format!("{rarity}! Minted {} {}", stove.name, id),
                None => format!("{rarity}! Minted stove {id}"),
            },
            Err(e) => format!("{rarity} drawn, but the stove could not be minted: {e}"),
        };
    }

    /// Lists the newest unlisted stove at the configured price.
    pub fn list_newest(&mut self) {
        let player = self.config.player_id;
        let Some(stove_id) = self.ledger.newest_unlisted(player).map(|s| s.id) else {
            self.status = "No unlisted stoves to sell".to_string();
            return;
        };
        self.status = match self.ledger.list_for_sale(stove_id, player, self.config.list_price) {
            Ok(()) => format!("Listed {} for {} coins", stove_id, self.config.list_price),
            Err(e) => format!("Could not list {}: {}", stove_id, e),
        };
    }

    /// Cancels the cheapest listing this player owns.
    pub fn cancel_cheapest(&mut self) {
        let player = self.config.player_id;
        let Some(stove_id) = self
            .ledger
            .active_listings()
            .into_iter()
            .find(|l| l.seller_id == player)
            .map(|l| l.stove_id)
        else {
            self.status = "No listings to cancel".to_string();
            return;
        };
        self.status = match self.ledger.cancel_listing(stove_id, player) {
            Ok(()) => format!("Cancelled listing for {}", stove_id),
            Err(e) => format!("Could not cancel {}: {}", stove_id, e),
        };
    }

    /// Saves when `AUTOSAVE_INTERVAL` has passed since the last autosave.
    /// Returns whether a save was attempted.
    pub fn autosave_if_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_autosave) < AUTOSAVE_INTERVAL {
            return false;
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "Autosave failed");
        }
        self.last_autosave = now;
        true
    }

    pub fn save(&self) -> io::Result<()> {
        self.store.save(&self.ledger)?;
        if let Err(e) = self.history.save(&self.config.data_dir) {
            warn!(error = %e, "Could not save draw history");
        }
        Ok(())
    }
}
