//! Integration tests for session persistence.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use adforge_model::{OverrideRecord, SessionState, Slot};
use adforge_persistence::{
    HEADINGS_KEY, JsonFileStore, KeyValueStore, MemoryStore, OVERRIDES_KEY, PersistenceError,
    SEPARATOR_KEY, SLOTS_KEY, SessionStore,
};
use tempfile::tempdir;

fn sample_state() -> SessionState {
    let hook = Slot::with_texts("Hook", ["Stop scrolling.", "Look here."]);
    let mut body = Slot::with_texts("Body", ["It works."]);
    body.enabled = false;
    let excluded = BTreeSet::from([hook.id.clone()]);

    SessionState {
        slots: vec![hook, body],
        include_headings: true,
        separator: " | ".to_string(),
        overrides: [
            (0, OverrideRecord::FullText("Hand written\n".to_string())),
            (1, OverrideRecord::Excluded(excluded)),
        ]
        .into_iter()
        .collect(),
    }
}

#[test]
fn state_survives_a_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let state = sample_state();

    let mut store = SessionStore::new(JsonFileStore::open(&path).unwrap());
    store.save(&state).unwrap();

    let reopened = SessionStore::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(reopened.load(), state);
}

#[test]
fn values_use_plain_string_encodings() {
    let mut store = SessionStore::new(MemoryStore::new());
    store.save(&sample_state()).unwrap();
    let inner = store.into_inner();

    assert_eq!(inner.get(HEADINGS_KEY).as_deref(), Some("true"));
    assert_eq!(inner.get(SEPARATOR_KEY).as_deref(), Some(" | "));
    assert!(inner.get(SLOTS_KEY).unwrap().starts_with('['));
    assert!(inner.get(OVERRIDES_KEY).unwrap().contains(r#""1":{"excluded":["#));
}

#[test]
fn each_malformed_key_falls_back_on_its_own() {
    let mut inner = MemoryStore::new();
    inner.set(SLOTS_KEY, "[]".to_string()).unwrap();
    inner.set(HEADINGS_KEY, "true".to_string()).unwrap();
    inner.set(SEPARATOR_KEY, "\n---\n".to_string()).unwrap();
    inner
        .set(OVERRIDES_KEY, r#"{"2":{"full_text":"Kept"},"x":{"full_text":"Lost"}}"#.to_string())
        .unwrap();

    let state = SessionStore::new(inner).load();

    assert!(state.slots.is_empty());
    assert!(state.include_headings);
    assert_eq!(state.separator, "\n---\n");
    assert_eq!(state.overrides.len(), 1);
    assert_eq!(state.overrides[&2], OverrideRecord::FullText("Kept".to_string()));
}

#[test]
fn default_slots_never_inherit_stored_edits() {
    let mut inner = MemoryStore::new();
    inner.set(SLOTS_KEY, "{broken".to_string()).unwrap();
    inner.set(HEADINGS_KEY, "true".to_string()).unwrap();
    inner
        .set(
            OVERRIDES_KEY,
            r#"{"2":{"full_text":"Written for the old slots"}}"#.to_string(),
        )
        .unwrap();

    let state = SessionStore::new(inner.clone()).load();
    let names: Vec<&str> = state.slots.iter().map(|slot| slot.name.as_str()).collect();
    assert_eq!(names, ["Hook", "Body", "Call to action"]);
    assert!(state.include_headings);
    assert!(state.overrides.is_empty());

    inner.remove(SLOTS_KEY).unwrap();
    assert!(SessionStore::new(inner).load().overrides.is_empty());
}

#[test]
fn repeated_slot_ids_fall_back_to_defaults() {
    let hook = Slot::with_texts("Hook", ["a"]);
    let mut twin = Slot::with_texts("Twin", ["b"]);
    twin.id = hook.id.clone();
    let mut inner = MemoryStore::new();
    inner
        .set(SLOTS_KEY, serde_json::to_string(&vec![hook, twin]).unwrap())
        .unwrap();
    inner
        .set(OVERRIDES_KEY, r#"{"0":{"full_text":"Edit"}}"#.to_string())
        .unwrap();

    let state = SessionStore::new(inner).load();
    assert_eq!(state.slots.len(), 3);
    assert_eq!(state.slots[0].name, "Hook");
    assert!(state.overrides.is_empty());
}

#[test]
fn blank_slot_ids_fall_back_to_defaults() {
    let mut inner = MemoryStore::new();
    inner
        .set(
            SLOTS_KEY,
            r#"[{"id":"  ","name":"Hook","enabled":true,"items":[]}]"#.to_string(),
        )
        .unwrap();

    let state = SessionStore::new(inner).load();
    assert_eq!(state.slots.len(), 3);
    assert!(!state.slots[0].id.as_str().is_empty());
}

/// Memory store whose override writes can be made to fail.
#[derive(Default)]
struct FailingOverrides {
    inner: MemoryStore,
    fail: bool,
}

impl KeyValueStore for FailingOverrides {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> adforge_persistence::Result<()> {
        if self.fail && key == OVERRIDES_KEY {
            return Err(PersistenceError::Io {
                operation: "write",
                path: PathBuf::from("session.json"),
                source: io::Error::other("disk full"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> adforge_persistence::Result<()> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_save_never_pairs_new_slots_with_old_edits() {
    let mut first = SessionState {
        slots: vec![Slot::with_texts("A", ["a0", "a1"])],
        ..SessionState::default()
    };
    first
        .overrides
        .insert(1, OverrideRecord::FullText("edit for A".to_string()));
    let second = SessionState {
        slots: vec![Slot::with_texts("B", ["b0", "b1"])],
        ..SessionState::default()
    };

    let mut store = SessionStore::new(FailingOverrides::default());
    store.save(&first).unwrap();
    assert_eq!(store.load().overrides.len(), 1);

    let mut inner = store.into_inner();
    inner.fail = true;
    let mut store = SessionStore::new(inner);
    assert!(store.save(&second).is_err());

    let loaded = store.load();
    assert_eq!(loaded.slots[0].name, "B");
    assert!(loaded.overrides.is_empty());
}

#[test]
fn unchanged_slots_keep_their_edits_on_save() {
    let state = sample_state();
    let mut store = SessionStore::new(MemoryStore::new());
    store.save(&state).unwrap();
    store.save(&state).unwrap();
    assert_eq!(store.load(), state);
}

#[test]
fn unreadable_overrides_are_dropped() {
    let mut inner = MemoryStore::new();
    inner.set(OVERRIDES_KEY, "[1, 2]".to_string()).unwrap();

    let state = SessionStore::new(inner).load();
    assert!(state.overrides.is_empty());
}

#[test]
fn empty_slot_list_is_kept() {
    let mut inner = MemoryStore::new();
    inner.set(SLOTS_KEY, "[]".to_string()).unwrap();

    let state = SessionStore::new(inner).load();
    assert!(state.slots.is_empty());
}
