//! Load/save of the three persisted editor entries.
//!
//! Values are wrapped in `{"version": N, "value": ...}`. Bare values written
//! before versioning existed are read as version 0 and upgraded on next save.

use log::{error, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::logic::{grid::Garden, zoom::Zoom};
use crate::models::{cell::Cell, Dimensions, Matrix};
use crate::storage::{KeyValueStore, StorageError};

pub const GRID_KEY: &str = "gardenData";
pub const DIMENSIONS_KEY: &str = "gridSize";
pub const ZOOM_KEY: &str = "gardenZoomLevel";

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u64,
    value: &'a T,
}

fn encode<T: Serialize>(value: &T) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        value,
    })?)
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    let json: Value = match serde_json::from_str(raw) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to parse saved {key}: {e}");
            return None;
        }
    };
    let payload = match json {
        Value::Object(mut obj) if obj.contains_key("version") && obj.contains_key("value") => {
            let version = obj.get("version").and_then(Value::as_u64);
            if version != Some(SCHEMA_VERSION) {
                warn!("Saved {key} has unsupported version {version:?}");
                return None;
            }
            obj.remove("value").unwrap_or(Value::Null)
        }
        legacy => legacy,
    };
    serde_json::from_value(payload)
        .map_err(|e| warn!("Saved {key} has an unexpected shape: {e}"))
        .ok()
}

fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    decode(key, &store.get(key)?)
}

/// Everything the editor restores at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub garden: Garden,
    pub zoom: Zoom,
}

/// Reads the saved document, falling back to an empty grid of the saved (or
/// default) dimensions and a default zoom.
///
/// A usable grid entry decides the dimensions; the dimensions entry only sizes
/// the fallback grid.
pub fn load_state(store: &dyn KeyValueStore, default_dims: Dimensions) -> PersistedState {
    let dims = load::<Dimensions>(store, DIMENSIONS_KEY).unwrap_or(default_dims);

    let garden = load::<Matrix<Cell>>(store, GRID_KEY)
        .and_then(|cells| {
            Garden::from_cells(cells)
                .map_err(|e| warn!("Saved {GRID_KEY} rejected: {e}"))
                .ok()
        })
        .unwrap_or_else(|| Garden::new(dims.rows, dims.cols));

    let zoom = load::<f64>(store, ZOOM_KEY)
        .and_then(|level| {
            let zoom = Zoom::from_stored(level);
            if zoom.is_none() {
                warn!("Saved {ZOOM_KEY} {level} is out of range");
            }
            zoom
        })
        .unwrap_or_default();

    PersistedState { garden, zoom }
}

fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = encode(value).and_then(|raw| store.set(key, raw)) {
        error!("Failed to save {key}: {e}");
    }
}

/// Best-effort write of all three entries. Failures are logged, never raised.
pub fn save_state(store: &mut dyn KeyValueStore, garden: &Garden, zoom: Zoom) {
    save(store, GRID_KEY, garden.cells());
    save(store, DIMENSIONS_KEY, &garden.dimensions());
    save(store, ZOOM_KEY, &zoom.level());
}
