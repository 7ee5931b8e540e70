//! Mixed-radix addressing of combinations.
//!
//! An ordinal index is read as a number whose digits are candidate
//! positions, one per active slot. The first active slot is the most
//! significant digit, so it changes slowest as the index increases; the last
//! active slot changes on every increment. Each slot's candidate count is the
//! radix of its digit.

use adforge_model::{Candidate, Slot};

use crate::space::CombinationSpace;

/// One slot's contribution to a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    pub slot: &'a Slot,
    pub candidate: &'a Candidate,
}

impl<'a> CombinationSpace<'a> {
    /// Select one candidate per active slot for `index`.
    ///
    /// Returns `None` for any index outside `[0, total)`. Runs in
    /// O(active slots) regardless of how large the space is.
    pub fn decode(&self, index: u64) -> Option<Vec<Pick<'a>>> {
        if !self.contains(index) {
            return None;
        }

        let active = self.active_slots();
        let mut picks = Vec::with_capacity(active.len());
        let mut rest = index;
        for &slot in active.iter().rev() {
            let radix = slot.len() as u64;
            let digit = usize::try_from(rest % radix).ok()?;
            rest /= radix;
            picks.push(Pick {
                slot,
                candidate: slot.items.get(digit)?,
            });
        }
        picks.reverse();
        Some(picks)
    }
}
