//! Sparse per-index overrides.

use std::collections::{BTreeMap, BTreeSet};

use adforge_model::{OverrideRecord, SlotId};

/// Overrides keyed by ordinal index.
///
/// Keys only mean something against the active slot list they were written
/// for; [`crate::Session`] clears the whole map on every structural edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    records: BTreeMap<u64, OverrideRecord>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: BTreeMap<u64, OverrideRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &BTreeMap<u64, OverrideRecord> {
        &self.records
    }

    pub fn get(&self, index: u64) -> Option<&OverrideRecord> {
        self.records.get(&index)
    }

    /// The full-text replacement for `index`, if any.
    pub fn full_text(&self, index: u64) -> Option<&str> {
        self.get(index).and_then(OverrideRecord::full_text)
    }

    /// Slots excluded from `index`, if any.
    pub fn excluded(&self, index: u64) -> Option<&BTreeSet<SlotId>> {
        self.get(index).and_then(OverrideRecord::excluded)
    }

    /// Whether `index` carries a full-text replacement.
    pub fn is_edited(&self, index: u64) -> bool {
        self.full_text(index).is_some()
    }

    /// Replace the composed text of `index`. Any exclusions are dropped.
    pub fn set_full_text(&mut self, index: u64, text: impl Into<String>) {
        self.records
            .insert(index, OverrideRecord::FullText(text.into()));
    }

    /// Flip whether `slot_id` is excluded from `index`.
    ///
    /// A full-text replacement on `index` is discarded first. Returns `true`
    /// when the slot is excluded afterwards.
    pub fn toggle_exclusion(&mut self, index: u64, slot_id: &SlotId) -> bool {
        let mut excluded = match self.records.remove(&index) {
            Some(OverrideRecord::Excluded(ids)) => ids,
            Some(OverrideRecord::FullText(_)) | None => BTreeSet::new(),
        };

        let now_excluded = if excluded.remove(slot_id) {
            false
        } else {
            excluded.insert(slot_id.clone());
            true
        };

        if !excluded.is_empty() {
            self.records
                .insert(index, OverrideRecord::Excluded(excluded));
        }
        now_excluded
    }

    /// Drop any override on `index`. Returns whether one existed.
    pub fn clear(&mut self, index: u64) -> bool {
        self.records.remove(&index).is_some()
    }

    pub fn clear_all(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
