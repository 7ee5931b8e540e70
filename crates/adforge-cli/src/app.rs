//! The session as seen from the command line: loaded from the store, edited
//! by one command, saved back.

use std::path::Path;

use adforge_core::Session;
use adforge_model::SlotId;
use adforge_persistence::{JsonFileStore, PersistenceError, SessionStore};
use anyhow::{Result, anyhow, bail};

use crate::settings::Settings;

pub struct App {
    session: Session,
    store: SessionStore<JsonFileStore>,
    settings: Settings,
}

impl App {
    /// Open the store at `store_path` and restore its session.
    pub fn open(store_path: &Path, settings: Settings) -> Result<Self> {
        let store = SessionStore::new(JsonFileStore::open(store_path).map_err(persistence_error)?);
        let session = Session::from_state(store.load());
        tracing::debug!(
            store = %store_path.display(),
            slots = session.slots().len(),
            total = session.total(),
            "Opened session"
        );
        Ok(Self {
            session,
            store,
            settings,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store_path(&self) -> &Path {
        self.store.store().path()
    }

    /// Apply `change` and save the session if it succeeds.
    pub fn update<R>(
        &mut self,
        change: impl FnOnce(&mut Session) -> adforge_core::Result<R>,
    ) -> Result<R> {
        let value = change(&mut self.session)?;
        self.store
            .save(&self.session.to_state())
            .map_err(persistence_error)?;
        Ok(value)
    }

    /// Index of the 1-based ad number `ad`.
    pub fn ad_index(&self, ad: u64) -> Result<u64> {
        let total = self.session.total();
        if total == 0 {
            bail!("There are no ads; enable a slot that has at least one candidate");
        }
        match ad.checked_sub(1) {
            Some(index) if index < total => Ok(index),
            _ => bail!("Ad {ad} does not exist (ads are numbered 1 to {total})"),
        }
    }

    /// Index to search after so the search begins at the ad after `from`, or
    /// at ad 1 when no ad is given.
    pub fn search_after(&self, from: Option<u64>) -> Result<u64> {
        match from {
            Some(ad) => self.ad_index(ad),
            None => Ok(self.session.total().saturating_sub(1)),
        }
    }

    /// Resolve a slot by id or name.
    pub fn slot_id(&self, key: &str) -> Result<SlotId> {
        self.session
            .find_slot(key)
            .map(|slot| slot.id.clone())
            .ok_or_else(|| anyhow!("No slot named \"{key}\""))
    }
}

/// Zero-based index of a 1-based position.
pub fn position_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Positions start at 1"))
}

/// Wrap a persistence error with its user-facing message and hint.
pub fn persistence_error(error: PersistenceError) -> anyhow::Error {
    let mut message = error.user_message();
    if let Some(hint) = error.suggestion() {
        message.push(' ');
        message.push_str(&hint);
    }
    anyhow::Error::new(error).context(message)
}
