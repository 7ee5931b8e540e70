//! Per-combination override records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::SlotId;

/// An exception to the derived composition of one combination.
///
/// The two variants are mutually exclusive: writing one replaces the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideRecord {
    /// Replace the composed text verbatim.
    FullText(String),
    /// Drop these slots from the composition.
    Excluded(BTreeSet<SlotId>),
}

impl OverrideRecord {
    pub fn full_text(&self) -> Option<&str> {
        match self {
            Self::FullText(text) => Some(text),
            Self::Excluded(_) => None,
        }
    }

    pub fn excluded(&self) -> Option<&BTreeSet<SlotId>> {
        match self {
            Self::FullText(_) => None,
            Self::Excluded(ids) => Some(ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_tags() {
        let record = OverrideRecord::FullText("Custom".to_string());
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"full_text":"Custom"}"#
        );

        let ids = BTreeSet::from([SlotId::new("hook").unwrap()]);
        let record = OverrideRecord::Excluded(ids);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"excluded":["hook"]}"#
        );
    }
}
