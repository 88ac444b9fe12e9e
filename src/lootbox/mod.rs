//! Lootbox draw engine: rarity table, weighted sampler, reveal strip.
//!
//! Nothing here performs I/O. Randomness always comes in through a
//! caller-owned [`rand::Rng`], so draws are reproducible under a seeded
//! generator and stubbable in tests.

pub mod reveal;
pub mod strip;
pub mod table;
pub mod types;

pub use reveal::*;
pub use strip::*;
pub use table::*;
pub use types::*;
