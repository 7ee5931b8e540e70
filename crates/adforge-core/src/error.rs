use adforge_model::SlotId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("index {index} is outside the combination space (total {total})")]
    IndexOutOfRange { index: u64, total: u64 },
    #[error("no slot with id {0}")]
    UnknownSlot(SlotId),
    #[error("slot {0} is not part of the active combination space")]
    InactiveSlot(SlotId),
    #[error("slot {slot} has no candidate at position {position}")]
    CandidateOutOfRange { slot: SlotId, position: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
