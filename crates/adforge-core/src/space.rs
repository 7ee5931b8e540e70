//! The combination space spanned by the active slots.

use adforge_model::Slot;

/// Active slots and the number of combinations they span.
///
/// Built from a borrowed slot list on demand, so it can never outlive the
/// slots it was derived from and never reports a stale `total`.
#[derive(Debug, Clone)]
pub struct CombinationSpace<'a> {
    active: Vec<&'a Slot>,
    total: u64,
}

impl<'a> CombinationSpace<'a> {
    /// Derive the space from the full slot list.
    ///
    /// Disabled and empty slots are left out entirely instead of counting as
    /// a zero factor. Products beyond `u64::MAX` saturate.
    pub fn from_slots(slots: &'a [Slot]) -> Self {
        let active: Vec<&Slot> = slots.iter().filter(|slot| slot.is_active()).collect();
        let total = if active.is_empty() {
            0
        } else {
            active
                .iter()
                .fold(1u64, |acc, slot| acc.saturating_mul(slot.len() as u64))
        };
        Self { active, total }
    }

    /// Slots that take part in addressing, in stored order.
    ///
    /// Position 0 is the most significant digit.
    pub fn active_slots(&self) -> &[&'a Slot] {
        &self.active
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether `index` addresses a combination in this space.
    #[inline]
    pub fn contains(&self, index: u64) -> bool {
        index < self.total
    }

    /// Number of decimal digits in `total`, used to zero-pad ordinals.
    pub fn digit_width(&self) -> usize {
        digit_count(self.total)
    }
}

/// Decimal digit count of `value` (1 for zero).
pub fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}
