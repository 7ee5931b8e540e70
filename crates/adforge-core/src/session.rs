//! The editing session: slots, overrides and compose options.

use adforge_model::{Candidate, CandidateId, SessionState, Slot, SlotId};
use tracing::{debug, warn};

use crate::combinations::Combinations;
use crate::compose::ComposeOptions;
use crate::error::{CoreError, Result};
use crate::overrides::Overrides;
use crate::space::CombinationSpace;

/// One logical editing session.
///
/// Every change that can alter the active slot list goes through
/// [`Session::edit_slots`], which clears all overrides in the same step.
#[derive(Debug, Clone, Default)]
pub struct Session {
    slots: Vec<Slot>,
    overrides: Overrides,
    options: ComposeOptions,
}

impl Session {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            overrides: Overrides::new(),
            options: ComposeOptions::default(),
        }
    }

    /// Restore a session from a persisted snapshot.
    ///
    /// Override keys outside the restored space are dropped.
    pub fn from_state(state: SessionState) -> Self {
        let SessionState {
            slots,
            include_headings,
            separator,
            mut overrides,
        } = state;

        let total = CombinationSpace::from_slots(&slots).total();
        let before = overrides.len();
        overrides.retain(|index, _| *index < total);
        if overrides.len() < before {
            warn!(
                dropped = before - overrides.len(),
                total, "Dropped overrides outside the combination space"
            );
        }

        Self {
            slots,
            overrides: Overrides::from_records(overrides),
            options: ComposeOptions {
                include_headings,
                separator,
            },
        }
    }

    /// Snapshot for persistence.
    pub fn to_state(&self) -> SessionState {
        SessionState {
            slots: self.slots.clone(),
            include_headings: self.options.include_headings,
            separator: self.options.separator.clone(),
            overrides: self.overrides.records().clone(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| &slot.id == id)
    }

    /// Look a slot up by exact id, then by case-insensitive name.
    pub fn find_slot(&self, key: &str) -> Option<&Slot> {
        let key = key.trim();
        self.slots
            .iter()
            .find(|slot| slot.id.as_str() == key)
            .or_else(|| {
                self.slots
                    .iter()
                    .find(|slot| slot.name.trim().eq_ignore_ascii_case(key))
            })
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    pub fn set_include_headings(&mut self, include: bool) {
        self.options.include_headings = include;
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.options.separator = separator.into();
    }

    pub fn space(&self) -> CombinationSpace<'_> {
        CombinationSpace::from_slots(&self.slots)
    }

    pub fn total(&self) -> u64 {
        self.space().total()
    }

    pub fn combinations(&self) -> Combinations<'_> {
        Combinations::new(self.space(), &self.overrides, &self.options)
    }

    /// Apply a structural edit to the slot list.
    ///
    /// Overrides are keyed by ordinal index, and any change to slot order,
    /// enabled flags or candidates renumbers the space, so the whole override
    /// map is cleared here together with the edit.
    pub fn edit_slots<R>(&mut self, edit: impl FnOnce(&mut Vec<Slot>) -> R) -> R {
        let result = edit(&mut self.slots);
        let cleared = self.overrides.len();
        self.overrides.clear_all();
        debug!(
            total = self.total(),
            cleared_overrides = cleared,
            "Slot list changed"
        );
        result
    }

    /// Append an enabled, empty slot.
    pub fn add_slot(&mut self, name: impl Into<String>) -> SlotId {
        let slot = Slot::new(name);
        let id = slot.id.clone();
        self.edit_slots(|slots| slots.push(slot));
        id
    }

    pub fn remove_slot(&mut self, id: &SlotId) -> Result<Slot> {
        let position = self.position_of(id)?;
        Ok(self.edit_slots(|slots| slots.remove(position)))
    }

    /// Move a slot to `position`, clamped to the end of the list.
    pub fn move_slot(&mut self, id: &SlotId, position: usize) -> Result<()> {
        let from = self.position_of(id)?;
        let to = position.min(self.slots.len() - 1);
        if from == to {
            return Ok(());
        }
        self.edit_slots(|slots| {
            let slot = slots.remove(from);
            slots.insert(to, slot);
        });
        Ok(())
    }

    pub fn set_enabled(&mut self, id: &SlotId, enabled: bool) -> Result<()> {
        let position = self.position_of(id)?;
        if self.slots[position].enabled == enabled {
            return Ok(());
        }
        self.edit_slots(|slots| slots[position].enabled = enabled);
        Ok(())
    }

    pub fn add_candidate(&mut self, id: &SlotId, text: impl Into<String>) -> Result<CandidateId> {
        let position = self.position_of(id)?;
        let candidate = Candidate::new(text);
        let candidate_id = candidate.id.clone();
        self.edit_slots(|slots| slots[position].items.push(candidate));
        Ok(candidate_id)
    }

    pub fn remove_candidate(&mut self, id: &SlotId, index: usize) -> Result<Candidate> {
        let position = self.position_of(id)?;
        if index >= self.slots[position].items.len() {
            return Err(CoreError::CandidateOutOfRange {
                slot: id.clone(),
                position: index,
            });
        }
        Ok(self.edit_slots(|slots| slots[position].items.remove(index)))
    }

    /// Replace a candidate's text. Counts as a structural edit.
    pub fn set_candidate_text(
        &mut self,
        id: &SlotId,
        index: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let position = self.position_of(id)?;
        if index >= self.slots[position].items.len() {
            return Err(CoreError::CandidateOutOfRange {
                slot: id.clone(),
                position: index,
            });
        }
        let text = text.into();
        self.edit_slots(|slots| slots[position].items[index].text = text);
        Ok(())
    }

    /// Rename a slot. Names do not take part in addressing, so overrides
    /// survive.
    pub fn rename_slot(&mut self, id: &SlotId, name: impl Into<String>) -> Result<()> {
        let position = self.position_of(id)?;
        self.slots[position].name = name.into();
        Ok(())
    }

    pub fn set_full_text(&mut self, index: u64, text: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.overrides.set_full_text(index, text);
        debug!(index, "Set full-text override");
        Ok(())
    }

    /// Flip whether `slot_id` is left out of combination `index`.
    ///
    /// Returns `true` when the slot is excluded afterwards.
    pub fn toggle_exclusion(&mut self, index: u64, slot_id: &SlotId) -> Result<bool> {
        self.check_index(index)?;
        match self.slot(slot_id) {
            None => return Err(CoreError::UnknownSlot(slot_id.clone())),
            Some(slot) if !slot.is_active() => {
                return Err(CoreError::InactiveSlot(slot_id.clone()));
            }
            Some(_) => {}
        }
        let excluded = self.overrides.toggle_exclusion(index, slot_id);
        debug!(index, slot = %slot_id, excluded, "Toggled slot exclusion");
        Ok(excluded)
    }

    pub fn clear_override(&mut self, index: u64) -> bool {
        self.overrides.clear(index)
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear_all();
    }

    fn position_of(&self, id: &SlotId) -> Result<usize> {
        self.slots
            .iter()
            .position(|slot| &slot.id == id)
            .ok_or_else(|| CoreError::UnknownSlot(id.clone()))
    }

    fn check_index(&self, index: u64) -> Result<()> {
        let total = self.total();
        if index < total {
            Ok(())
        } else {
            Err(CoreError::IndexOutOfRange { index, total })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_slot_session() -> (Session, SlotId, SlotId) {
        let a = Slot::with_texts("A", ["a0", "a1"]);
        let b = Slot::with_texts("B", ["b0"]);
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        (Session::new(vec![a, b]), a_id, b_id)
    }

    #[test]
    fn disabling_and_reenabling_clears_overrides() {
        let (mut session, _, b) = two_slot_session();
        session.set_full_text(1, "Custom").unwrap();
        assert_eq!(session.overrides().len(), 1);

        session.set_enabled(&b, false).unwrap();
        assert!(session.overrides().is_empty());
        assert_eq!(session.total(), 2);

        session.set_full_text(0, "Again").unwrap();
        session.set_enabled(&b, true).unwrap();
        assert!(session.overrides().is_empty());
    }

    fn assert_clears(session: &mut Session, edit: impl FnOnce(&mut Session)) {
        session.set_full_text(0, "Custom").unwrap();
        edit(session);
        assert!(session.overrides().is_empty());
    }

    #[test]
    fn every_structural_edit_clears_overrides() {
        let (mut session, a, b) = two_slot_session();
        assert_clears(&mut session, |s| {
            s.add_slot("C");
        });
        assert_clears(&mut session, |s| s.move_slot(&b, 0).unwrap());
        assert_clears(&mut session, |s| {
            s.add_candidate(&a, "a2").unwrap();
        });
        assert_clears(&mut session, |s| {
            s.remove_candidate(&a, 0).unwrap();
        });
        assert_clears(&mut session, |s| s.set_candidate_text(&b, 0, "b0!").unwrap());
        assert_clears(&mut session, |s| {
            s.remove_slot(&b).unwrap();
        });
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn rename_keeps_overrides() {
        let (mut session, a, _) = two_slot_session();
        session.set_full_text(0, "Custom").unwrap();
        session.rename_slot(&a, "Hook").unwrap();
        assert_eq!(session.overrides().len(), 1);
        assert_eq!(session.slot(&a).unwrap().name, "Hook");
    }

    #[test]
    fn failed_edits_leave_overrides_alone() {
        let (mut session, a, _) = two_slot_session();
        session.set_full_text(0, "Custom").unwrap();

        let unknown = SlotId::generate();
        assert_eq!(
            session.remove_slot(&unknown),
            Err(CoreError::UnknownSlot(unknown.clone()))
        );
        assert!(matches!(
            session.remove_candidate(&a, 9),
            Err(CoreError::CandidateOutOfRange { position: 9, .. })
        ));
        session.set_enabled(&a, true).unwrap();
        assert_eq!(session.overrides().len(), 1);
    }

    #[test]
    fn overrides_reject_out_of_range_indices() {
        let (mut session, a, _) = two_slot_session();
        assert_eq!(
            session.set_full_text(2, "x"),
            Err(CoreError::IndexOutOfRange { index: 2, total: 2 })
        );
        assert!(session.toggle_exclusion(7, &a).is_err());
    }

    #[test]
    fn exclusion_requires_an_active_slot() {
        let (mut session, a, _) = two_slot_session();
        let c = session.add_slot("Empty");
        assert_eq!(
            session.toggle_exclusion(0, &c),
            Err(CoreError::InactiveSlot(c.clone()))
        );
        assert_eq!(session.toggle_exclusion(0, &a), Ok(true));
    }

    #[test]
    fn move_slot_clamps_position() {
        let (mut session, a, b) = two_slot_session();
        session.move_slot(&a, 99).unwrap();
        let order: Vec<&SlotId> = session.slots().iter().map(|s| &s.id).collect();
        assert_eq!(order, [&b, &a]);
    }

    #[test]
    fn find_slot_by_id_or_name() {
        let (session, a, b) = two_slot_session();
        assert_eq!(session.find_slot(a.as_str()).map(|s| &s.id), Some(&a));
        assert_eq!(session.find_slot(" b ").map(|s| &s.id), Some(&b));
        assert!(session.find_slot("missing").is_none());
    }

    #[test]
    fn state_round_trip_keeps_overrides_in_range() {
        let (mut session, _, _) = two_slot_session();
        session.set_include_headings(true);
        session.set_separator(" | ");
        session.set_full_text(1, "Custom").unwrap();

        let mut state = session.to_state();
        state
            .overrides
            .insert(40, adforge_model::OverrideRecord::FullText("stale".into()));

        let restored = Session::from_state(state);
        assert!(restored.options().include_headings);
        assert_eq!(restored.options().separator, " | ");
        assert_eq!(restored.overrides().len(), 1);
        assert_eq!(restored.overrides().full_text(1), Some("Custom"));
    }
}
