use std::fmt;

use crate::ModelError;

/// Stable identifier of a slot.
///
/// Survives renames and reorders, so overrides and exclusion sets refer to
/// slots by id rather than by position.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId(String);

impl SlotId {
    /// Generate a fresh, process-unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSlotId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SlotId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotId> for String {
    fn from(id: SlotId) -> Self {
        id.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of a candidate within the whole session.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CandidateId(String);

impl CandidateId {
    /// Generate a fresh, process-unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidCandidateId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CandidateId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CandidateId> for String {
    fn from(id: CandidateId) -> Self {
        id.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SlotId::generate(), SlotId::generate());
        assert_ne!(CandidateId::generate(), CandidateId::generate());
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(
            SlotId::new("   "),
            Err(ModelError::InvalidSlotId(_))
        ));
        assert!(matches!(
            CandidateId::new(""),
            Err(ModelError::InvalidCandidateId(_))
        ));
        assert_eq!(SlotId::new(" hook ").unwrap().as_str(), "hook");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SlotId::new("hook").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hook\"");
    }

    #[test]
    fn deserializing_validates_like_new() {
        assert!(serde_json::from_str::<SlotId>("\"  \"").is_err());
        assert!(serde_json::from_str::<CandidateId>("\"\"").is_err());
        let id: SlotId = serde_json::from_str("\" hook \"").unwrap();
        assert_eq!(id.as_str(), "hook");
    }
}
