//! Persistable snapshot of an editing session.

use std::collections::BTreeMap;

use crate::overrides::OverrideRecord;
use crate::slot::Slot;

/// Separator placed between rendered slots when nothing else is configured.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Everything a session needs to be restored later.
///
/// Override keys are ordinal indices and are only meaningful against the
/// exact slot list stored alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub slots: Vec<Slot>,
    pub include_headings: bool,
    pub separator: String,
    pub overrides: BTreeMap<u64, OverrideRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            include_headings: false,
            separator: DEFAULT_SEPARATOR.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Built-in starter slots used for a fresh session or when stored slots
/// cannot be read.
pub fn default_slots() -> Vec<Slot> {
    vec![
        Slot::with_texts(
            "Hook",
            [
                "Still writing every ad by hand?",
                "Your next campaign is hiding in plain sight.",
                "Three minutes. That's all it takes.",
            ],
        ),
        Slot::with_texts(
            "Body",
            [
                "Mix proven hooks, bodies and offers into every variation worth testing.",
                "Pick your best lines once and let every combination write itself.",
            ],
        ),
        Slot::with_texts(
            "Call to action",
            ["Start your free trial today.", "See it in action."],
        ),
    ]
}
