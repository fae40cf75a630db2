//! Persistence of the last generated tree and display settings.
//!
//! The hosting shell provides storage through [`KeyValueStore`]; the session
//! is two JSON strings stored under [`DATA_KEY`] and [`SETTINGS_KEY`].

use indexmap::IndexMap;
use log::{debug, warn};

use arbor_core::{settings::Settings, tree::Tree};

use crate::ArborError;

/// Key of the tree JSON.
pub const DATA_KEY: &str = "mindMapData";

/// Key of the display settings JSON.
pub const SETTINGS_KEY: &str = "mindMapSettings";

/// String storage injected by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.shift_remove(key);
    }
}

/// Stores `tree` and `settings`, replacing any previous session.
///
/// # Errors
///
/// Returns an error if either value cannot be serialized.
pub fn save_session(
    store: &mut impl KeyValueStore,
    tree: &Tree,
    settings: &Settings,
) -> Result<(), ArborError> {
    let settings_json =
        serde_json::to_string(settings).map_err(|err| ArborError::Config(err.to_string()))?;
    store.set(DATA_KEY, tree.to_json()?);
    store.set(SETTINGS_KEY, settings_json);
    debug!(nodes = tree.len(); "Session saved");
    Ok(())
}

/// Restores the stored session, `None` when no tree was saved.
///
/// Missing or unreadable settings fall back to the defaults.
///
/// # Errors
///
/// Returns [`ArborError::Input`] if the stored tree is not a valid tree.
pub fn load_session(store: &impl KeyValueStore) -> Result<Option<(Tree, Settings)>, ArborError> {
    let Some(data) = store.get(DATA_KEY) else {
        return Ok(None);
    };
    let tree = Tree::from_json(&data)?;

    let settings = match store.get(SETTINGS_KEY) {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
            warn!(err:% = err; "Ignoring unreadable stored settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    debug!(nodes = tree.len(); "Session loaded");
    Ok(Some((tree, settings)))
}

/// Forgets the stored session.
pub fn clear_session(store: &mut impl KeyValueStore) {
    store.remove(DATA_KEY);
    store.remove(SETTINGS_KEY);
}
