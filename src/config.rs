use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::logic::{
    gesture::LONG_PRESS_THRESHOLD,
    grid::{DEFAULT_COLS, DEFAULT_ROWS},
};
use crate::models::Dimensions;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub const BIND_VAR: &str = "GRID_GARDEN_BIND";
pub const STORE_VAR: &str = "GRID_GARDEN_STORE";
pub const LONG_PRESS_VAR: &str = "GRID_GARDEN_LONG_PRESS_MS";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_STORE: &str = "grid-garden.json";
/// `GRID_GARDEN_STORE` value selecting the non-persistent store.
const MEMORY_STORE: &str = "memory";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    pub fn open(&self) -> Box<dyn KeyValueStore> {
        match self {
            StoreLocation::Memory => Box::new(MemoryStore::new()),
            StoreLocation::File(path) => Box::new(FileStore::open(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub store: StoreLocation,
    pub long_press: Duration,
    pub default_dims: Dimensions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.into(),
            store: StoreLocation::File(PathBuf::from(DEFAULT_STORE)),
            long_press: LONG_PRESS_THRESHOLD,
            default_dims: Dimensions::new(DEFAULT_ROWS, DEFAULT_COLS),
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(bind) = lookup(BIND_VAR) {
            config.bind_addr = bind;
        }
        if let Some(store) = lookup(STORE_VAR) {
            config.store = if store.eq_ignore_ascii_case(MEMORY_STORE) {
                StoreLocation::Memory
            } else {
                StoreLocation::File(PathBuf::from(store))
            };
        }
        if let Some(ms) = parse_var::<u64>(&lookup, LONG_PRESS_VAR) {
            config.long_press = Duration::from_millis(ms);
        }
        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
