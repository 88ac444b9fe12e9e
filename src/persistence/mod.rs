//! On-disk state: checksummed ledger file and JSON side files.

pub mod history;
pub mod json;
pub mod ledger_store;

pub use history::{DrawHistory, DrawRecord};
pub use ledger_store::LedgerStore;
