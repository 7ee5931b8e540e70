//! Loading and saving a [`SessionState`] through a [`KeyValueStore`].
//!
//! Each part of the state lives under its own key. Loading never fails: a
//! missing or malformed value is replaced by its default and the rest of the
//! state is still restored. Overrides are the exception: they are only
//! restored next to the slot list they were written for.

use std::collections::{BTreeMap, BTreeSet};

use adforge_model::{DEFAULT_SEPARATOR, OverrideRecord, SessionState, Slot, default_slots};

use crate::error::{PersistenceError, Result};
use crate::store::KeyValueStore;

/// JSON list of slots.
pub const SLOTS_KEY: &str = "slots";
/// `"true"` or `"false"`.
pub const HEADINGS_KEY: &str = "headings";
/// Raw separator text.
pub const SEPARATOR_KEY: &str = "separator";
/// JSON object from stringified index to override record.
pub const OVERRIDES_KEY: &str = "overrides";

/// Session persistence over any key-value store.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Restore the last saved state, falling back per key.
    pub fn load(&self) -> SessionState {
        let (slots, stored_slots) = match self.load_slots() {
            Some(slots) => (slots, true),
            None => (default_slots(), false),
        };
        let mut overrides = self.load_overrides();
        if !stored_slots && !overrides.is_empty() {
            tracing::warn!(
                "Dropping {} stored ad edits written for a different slot list",
                overrides.len()
            );
            overrides.clear();
        }

        let state = SessionState {
            slots,
            include_headings: self.load_headings(),
            separator: self
                .store
                .get(SEPARATOR_KEY)
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            overrides,
        };
        tracing::debug!(
            slots = state.slots.len(),
            overrides = state.overrides.len(),
            "Loaded session state"
        );
        state
    }

    /// Write every part of `state`.
    ///
    /// Stored overrides are removed before a changed slot list is written, so
    /// a failed write never leaves edits next to slots they do not belong to.
    pub fn save(&mut self, state: &SessionState) -> Result<()> {
        let slots = encode(SLOTS_KEY, &state.slots)?;
        let overrides: BTreeMap<String, &OverrideRecord> = state
            .overrides
            .iter()
            .map(|(index, record)| (index.to_string(), record))
            .collect();
        let overrides = encode(OVERRIDES_KEY, &overrides)?;

        if self.store.get(SLOTS_KEY).as_deref() != Some(slots.as_str()) {
            self.store.remove(OVERRIDES_KEY)?;
        }
        self.store.set_many(vec![
            (SLOTS_KEY, slots),
            (HEADINGS_KEY, state.include_headings.to_string()),
            (SEPARATOR_KEY, state.separator.clone()),
            (OVERRIDES_KEY, overrides),
        ])?;

        tracing::debug!(
            slots = state.slots.len(),
            overrides = state.overrides.len(),
            "Saved session state"
        );
        Ok(())
    }

    /// The stored slot list, or `None` when it is missing or unusable.
    fn load_slots(&self) -> Option<Vec<Slot>> {
        let raw = self.store.get(SLOTS_KEY)?;
        let slots: Vec<Slot> = match serde_json::from_str(&raw) {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!("Stored slots are unreadable: {}, using defaults", e);
                return None;
            }
        };

        let mut seen = BTreeSet::new();
        if let Some(slot) = slots.iter().find(|slot| !seen.insert(&slot.id)) {
            tracing::warn!("Stored slots repeat the id {}, using defaults", slot.id);
            return None;
        }
        Some(slots)
    }

    fn load_headings(&self) -> bool {
        match self.store.get(HEADINGS_KEY).as_deref() {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                tracing::warn!("Stored headings flag {:?} is not a boolean, using off", other);
                false
            }
        }
    }

    fn load_overrides(&self) -> BTreeMap<u64, OverrideRecord> {
        let Some(raw) = self.store.get(OVERRIDES_KEY) else {
            return BTreeMap::new();
        };
        let stored: BTreeMap<String, OverrideRecord> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Stored overrides are unreadable: {}, dropping them", e);
                return BTreeMap::new();
            }
        };

        stored
            .into_iter()
            .filter_map(|(key, record)| match key.parse::<u64>() {
                Ok(index) => Some((index, record)),
                Err(_) => {
                    tracing::warn!("Dropping override with non-numeric key {:?}", key);
                    None
                }
            })
            .collect()
    }
}

fn encode<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Serialization {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn empty_store_loads_defaults() {
        let state = SessionStore::new(MemoryStore::new()).load();
        let names: Vec<&str> = state.slots.iter().map(|slot| slot.name.as_str()).collect();
        assert_eq!(names, ["Hook", "Body", "Call to action"]);
        assert!(!state.include_headings);
        assert_eq!(state.separator, DEFAULT_SEPARATOR);
        assert!(state.overrides.is_empty());
    }

    #[test]
    fn headings_flag_parses_strictly() {
        let mut inner = MemoryStore::new();
        inner.set(HEADINGS_KEY, "yes".to_string()).unwrap();
        assert!(!SessionStore::new(inner.clone()).load().include_headings);

        inner.set(HEADINGS_KEY, "true".to_string()).unwrap();
        assert!(SessionStore::new(inner).load().include_headings);
    }

    #[test]
    fn overrides_are_keyed_by_stringified_index() {
        let mut state = SessionState::default();
        state
            .overrides
            .insert(7, OverrideRecord::FullText("Custom".to_string()));

        let mut store = SessionStore::new(MemoryStore::new());
        store.save(&state).unwrap();

        let raw = store.store().get(OVERRIDES_KEY).unwrap();
        assert_eq!(raw, r#"{"7":{"full_text":"Custom"}}"#);
    }
}
