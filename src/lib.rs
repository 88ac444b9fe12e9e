//! EmberExchange - lootbox draws and a marketplace for collectible stoves.
//!
//! This module exposes the draw engine, ledger and simulator for the
//! binaries and for testing.

pub mod config;
pub mod logging;
pub mod lootbox;
pub mod market;
pub mod persistence;
pub mod simulator;

pub use config::Config;
pub use lootbox::{build_strip, category_to_identifier, DrawStrip, DropTable, Rarity};
pub use market::{open_lootbox, Ledger, Opening, StoveMinter};
