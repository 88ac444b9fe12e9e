//! Stove marketplace: minting capability, ledger, naming.

pub mod ledger;
pub mod minter;
pub mod names;
pub mod types;

pub use ledger::*;
pub use minter::*;
pub use types::*;
