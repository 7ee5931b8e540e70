//! Interactive inspection of one combination at a time.

use crate::combinations::Combinations;

/// Result of a text search across the combination space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(u64),
    NoMatch,
}

/// Cursor over the combination space.
///
/// Holds no reference to the session; every operation takes the current
/// `total` (or view) so a structural edit can never leave it pointing at a
/// stale space for longer than one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Explorer {
    cursor: u64,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.cursor
    }

    /// Move to `index`, clamped to `[0, total - 1]` (or 0 when empty).
    pub fn jump_to(&mut self, index: u64, total: u64) -> u64 {
        self.cursor = index.min(total.saturating_sub(1));
        self.cursor
    }

    /// Step forward, stopping at the last combination.
    pub fn next(&mut self, total: u64) -> u64 {
        self.jump_to(self.cursor.saturating_add(1), total)
    }

    /// Step back, stopping at the first combination.
    pub fn prev(&mut self, total: u64) -> u64 {
        self.jump_to(self.cursor.saturating_sub(1), total)
    }

    /// Search forward from the cursor and move to the first hit.
    ///
    /// The cursor is left unchanged when nothing matches.
    pub fn find_next(&mut self, combos: &Combinations<'_>, term: &str) -> SearchOutcome {
        let outcome = find_next(combos, term, self.cursor);
        if let SearchOutcome::Found(index) = outcome {
            self.cursor = index;
        }
        outcome
    }
}

/// Case-insensitive substring search over effective text.
///
/// Starts at `from + 1`, wraps around the end of the space and probes at
/// most `total` indices, so `from` itself is checked last.
pub fn find_next(combos: &Combinations<'_>, term: &str, from: u64) -> SearchOutcome {
    let total = combos.total();
    let needle = term.to_lowercase();
    if total == 0 || needle.trim().is_empty() {
        return SearchOutcome::NoMatch;
    }

    let start = u128::from(from % total);
    for step in 1..=u128::from(total) {
        let Ok(index) = u64::try_from((start + step) % u128::from(total)) else {
            continue;
        };
        let hit = combos
            .effective_text(index)
            .is_some_and(|text| text.to_lowercase().contains(&needle));
        if hit {
            tracing::debug!(term, index, "Search hit");
            return SearchOutcome::Found(index);
        }
    }
    SearchOutcome::NoMatch
}

#[cfg(test)]
mod tests {
    use adforge_model::Slot;

    use super::*;
    use crate::Session;

    fn session() -> Session {
        Session::new(vec![
            Slot::with_texts("Hook", ["Alpha", "Bravo", "Charlie"]),
            Slot::with_texts("Body", ["one", "two"]),
        ])
    }

    #[test]
    fn navigation_clamps_without_wrapping() {
        let mut explorer = Explorer::new();
        assert_eq!(explorer.prev(6), 0);
        assert_eq!(explorer.jump_to(99, 6), 5);
        assert_eq!(explorer.next(6), 5);
        assert_eq!(explorer.prev(6), 4);
        assert_eq!(explorer.jump_to(3, 0), 0);
    }

    #[test]
    fn find_wraps_and_is_case_insensitive() {
        let session = session();
        let combos = session.combinations();
        // 0 Alpha/one, 1 Alpha/two, 2 Bravo/one, 3 Bravo/two, 4 Charlie/one, 5 Charlie/two
        assert_eq!(find_next(&combos, "bravo", 0), SearchOutcome::Found(2));
        assert_eq!(find_next(&combos, "ALPHA", 4), SearchOutcome::Found(0));
        assert_eq!(find_next(&combos, "TWO", 1), SearchOutcome::Found(3));
    }

    #[test]
    fn find_checks_start_index_last() {
        let session = session();
        let combos = session.combinations();
        assert_eq!(find_next(&combos, "charlie\n\ntwo", 5), SearchOutcome::Found(5));
    }

    #[test]
    fn no_match_leaves_cursor_unchanged() {
        let session = session();
        let combos = session.combinations();
        let mut explorer = Explorer::new();
        explorer.jump_to(3, combos.total());

        assert_eq!(explorer.find_next(&combos, "xyz"), SearchOutcome::NoMatch);
        assert_eq!(explorer.current(), 3);

        assert_eq!(explorer.find_next(&combos, "charlie"), SearchOutcome::Found(4));
        assert_eq!(explorer.current(), 4);
    }

    #[test]
    fn search_sees_full_text_overrides() {
        let mut session = session();
        session.set_full_text(4, "Completely custom xyz").unwrap();
        let combos = session.combinations();
        assert_eq!(find_next(&combos, "XYZ", 0), SearchOutcome::Found(4));
        assert_eq!(find_next(&combos, "charlie\n\none", 0), SearchOutcome::NoMatch);
    }

    #[test]
    fn empty_space_or_term_never_matches() {
        let session = Session::new(vec![Slot::new("Empty")]);
        let combos = session.combinations();
        assert_eq!(find_next(&combos, "a", 0), SearchOutcome::NoMatch);

        let session = self::session();
        let combos = session.combinations();
        assert_eq!(find_next(&combos, "   ", 0), SearchOutcome::NoMatch);
    }
}
