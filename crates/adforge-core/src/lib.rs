//! Combinatorial addressing and override composition for ad slots.
//!
//! Given an ordered list of slots, each holding candidate lines, the
//! combination space is the cartesian product of the active slots. This
//! crate counts that space without materializing it, maps any ordinal index
//! straight to its combination, layers sparse per-index overrides on top and
//! renders the result to text.
//!
//! # Architecture
//!
//! - `space` - active slot list and combination count
//! - `addressing` - mixed-radix decode of an index into picks
//! - `overrides` - full-text replacements and slot exclusions per index
//! - `compose` - joining picks into the final ad text
//! - `combinations` - read-side view tying the above together
//! - `session` - owned editing state; the only place slots are mutated
//! - `explorer` - cursor navigation and text search

mod addressing;
mod combinations;
mod compose;
mod error;
mod explorer;
mod overrides;
mod session;
mod space;

pub use addressing::Pick;
pub use combinations::Combinations;
pub use compose::{ComposeOptions, SlotText, compose};
pub use error::{CoreError, Result};
pub use explorer::{Explorer, SearchOutcome, find_next};
pub use overrides::Overrides;
pub use session::Session;
pub use space::{CombinationSpace, digit_count};
