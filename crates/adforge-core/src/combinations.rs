//! Read-side view joining addressing, overrides and composition.

use crate::addressing::Pick;
use crate::compose::{ComposeOptions, SlotText, compose};
use crate::overrides::Overrides;
use crate::space::CombinationSpace;

/// Everything needed to turn an index into its final text.
///
/// Borrowed from a [`crate::Session`]; the borrow keeps slots and overrides
/// frozen for as long as the view lives.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    space: CombinationSpace<'a>,
    overrides: &'a Overrides,
    options: &'a ComposeOptions,
}

impl<'a> Combinations<'a> {
    pub fn new(
        space: CombinationSpace<'a>,
        overrides: &'a Overrides,
        options: &'a ComposeOptions,
    ) -> Self {
        Self {
            space,
            overrides,
            options,
        }
    }

    pub fn space(&self) -> &CombinationSpace<'a> {
        &self.space
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.space.total()
    }

    pub fn decode(&self, index: u64) -> Option<Vec<Pick<'a>>> {
        self.space.decode(index)
    }

    /// Decoded picks for `index` with excluded slots removed.
    pub fn effective_pairs(&self, index: u64) -> Option<Vec<SlotText<'a>>> {
        let picks = self.space.decode(index)?;
        let excluded = self.overrides.excluded(index);
        Some(
            picks
                .into_iter()
                .filter(|pick| excluded.is_none_or(|ids| !ids.contains(&pick.slot.id)))
                .map(|Pick { slot, candidate }| SlotText {
                    slot_id: &slot.id,
                    slot_name: &slot.name,
                    text: &candidate.text,
                })
                .collect(),
        )
    }

    /// Final text of `index`: the full-text override verbatim when present,
    /// otherwise the composed picks. `None` only for out-of-range indices.
    pub fn effective_text(&self, index: u64) -> Option<String> {
        if !self.space.contains(index) {
            return None;
        }
        if let Some(text) = self.overrides.full_text(index) {
            return Some(text.to_string());
        }
        let pairs = self.effective_pairs(index)?;
        Some(compose(
            &pairs,
            self.options.include_headings,
            &self.options.separator,
        ))
    }

    pub fn is_edited(&self, index: u64) -> bool {
        self.overrides.is_edited(index)
    }

    /// The first `limit` combinations, in index order.
    pub fn preview(&self, limit: u64) -> Vec<(u64, String)> {
        (0..self.total().min(limit))
            .filter_map(|index| self.effective_text(index).map(|text| (index, text)))
            .collect()
    }
}
