//! Data model for ad combinations: slots, candidates, overrides and the
//! persistable session snapshot.

pub mod error;
pub mod ids;
pub mod overrides;
pub mod slot;
pub mod state;

pub use error::{ModelError, Result};
pub use ids::{CandidateId, SlotId};
pub use overrides::OverrideRecord;
pub use slot::{Candidate, Slot};
pub use state::{DEFAULT_SEPARATOR, SessionState, default_slots};
