//! Slots and their candidate values.

use serde::{Deserialize, Serialize};

use crate::ids::{CandidateId, SlotId};

/// One selectable value within a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub text: String,
}

impl Candidate {
    /// Create a candidate with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: CandidateId::generate(),
            text: text.into(),
        }
    }
}

/// A named, ordered, independently toggleable bucket of candidates.
///
/// The order of `items` is one axis of the addressing space, so reordering
/// candidates changes which combination an index refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Candidate>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Slot {
    /// Create an enabled, empty slot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SlotId::generate(),
            name: name.into(),
            items: Vec::new(),
            enabled: true,
        }
    }

    /// Create an enabled slot holding one candidate per text, in order.
    pub fn with_texts<I, S>(name: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slot = Self::new(name);
        slot.items = texts.into_iter().map(Candidate::new).collect();
        slot
    }

    /// Number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this slot takes part in the combination space.
    ///
    /// An empty slot is treated exactly like a disabled one.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.items.is_empty()
    }
}
