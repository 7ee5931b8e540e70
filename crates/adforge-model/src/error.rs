use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid slot id: {0:?}")]
    InvalidSlotId(String),
    #[error("invalid candidate id: {0:?}")]
    InvalidCandidateId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
