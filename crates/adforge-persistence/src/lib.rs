//! Storage for ad composer sessions.
//!
//! A session is kept as a handful of string values in a flat key-value
//! store, so any host that can hold strings (a JSON file, a browser-style
//! local storage, memory in tests) can back it.
//!
//! # Architecture
//!
//! - `store.rs` - The [`KeyValueStore`] port plus memory and JSON file stores
//! - `session.rs` - [`SessionStore`], which maps a `SessionState` onto keys
//! - `error.rs` - Error types with user-friendly messages

mod error;
mod session;
mod store;

pub use error::{PersistenceError, Result};
pub use session::{HEADINGS_KEY, OVERRIDES_KEY, SEPARATOR_KEY, SLOTS_KEY, SessionStore};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
