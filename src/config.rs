//! Runtime configuration read from `EMBER_*` environment variables.

use crate::market::{PlayerId, DEFAULT_STARTING_BALANCE};
use crate::persistence::json::ember_dir;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_LIST_PRICE: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub player_id: PlayerId,
    pub starting_balance: u64,
    pub list_price: u64,
    /// Fixed seed for the draw RNG; None draws from entropy.
    pub seed: Option<u64>,
    pub log_level: tracing::Level,
    /// Values that were set but could not be parsed. Reading the config
    /// happens before logging is set up, so these are held until
    /// `log_warnings` runs.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("EMBER_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| ember_dir().ok())
            .unwrap_or_else(|| PathBuf::from(".ember-exchange"));

        let mut warnings = Vec::new();
        let player_id = try_load(&lookup, "EMBER_PLAYER_ID", 1, &mut warnings);
        let starting_balance = try_load(
            &lookup,
            "EMBER_STARTING_BALANCE",
            DEFAULT_STARTING_BALANCE,
            &mut warnings,
        );
        let list_price = try_load(&lookup, "EMBER_LIST_PRICE", DEFAULT_LIST_PRICE, &mut warnings);
        let seed = match lookup("EMBER_SEED") {
            Some(raw) => parse_or_note("EMBER_SEED", &raw, &mut warnings),
            None => None,
        };
        let log_level = try_load(&lookup, "EMBER_LOG", tracing::Level::INFO, &mut warnings);

        Self {
            data_dir,
            player_id,
            starting_balance,
            list_price,
            seed,
            log_level,
            warnings,
        }
    }

    /// Emits the held parse warnings. Call once a subscriber is installed.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{warning}");
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T, warnings: &mut Vec<String>) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse_or_note(key, &raw, warnings).unwrap_or_else(|| {
            warnings.push(format!("{key}: using default {default}"));
            default
        }),
        None => default,
    }
}

fn parse_or_note<T>(key: &str, raw: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warnings.push(format!("Invalid {key} value {raw:?}: {e}"));
            None
        }
    }
}
