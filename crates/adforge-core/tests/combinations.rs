//! Integration tests for the override layer and composition.

use adforge_core::{Session, SlotText};
use adforge_model::{Slot, SlotId};

fn hook_body_cta() -> (Session, [SlotId; 3]) {
    let hook = Slot::with_texts("Hook", ["H0", "H1"]);
    let body = Slot::with_texts("Body", ["B0", "B1", "B2"]);
    let cta = Slot::with_texts("CTA", ["Buy now"]);
    let ids = [hook.id.clone(), body.id.clone(), cta.id.clone()];
    (Session::new(vec![hook, body, cta]), ids)
}

#[test]
fn effective_text_composes_derived_picks() {
    let (session, _) = hook_body_cta();
    let combos = session.combinations();
    assert_eq!(combos.total(), 6);
    assert_eq!(combos.effective_text(0).unwrap(), "H0\n\nB0\n\nBuy now\n");
    assert_eq!(combos.effective_text(5).unwrap(), "H1\n\nB2\n\nBuy now\n");
    assert!(combos.effective_text(6).is_none());
}

#[test]
fn headings_and_separator_come_from_session() {
    let (mut session, _) = hook_body_cta();
    session.set_include_headings(true);
    session.set_separator("\n---\n");
    let text = session.combinations().effective_text(1).unwrap();
    assert_eq!(text, "Hook\nH0\n---\nBody\nB1\n---\nCTA\nBuy now\n");
}

#[test]
fn exclusions_drop_slots_for_one_index_only() {
    let (mut session, [_, body, _]) = hook_body_cta();
    assert!(session.toggle_exclusion(2, &body).unwrap());

    let combos = session.combinations();
    assert_eq!(combos.effective_text(2).unwrap(), "H0\n\nBuy now\n");
    assert_eq!(combos.effective_text(1).unwrap(), "H0\n\nB1\n\nBuy now\n");

    let pairs = combos.effective_pairs(2).unwrap();
    let names: Vec<&str> = pairs.iter().map(|p: &SlotText<'_>| p.slot_name).collect();
    assert_eq!(names, ["Hook", "CTA"]);
}

#[test]
fn excluding_every_slot_yields_empty_line() {
    let (mut session, ids) = hook_body_cta();
    for id in &ids {
        session.toggle_exclusion(0, id).unwrap();
    }
    assert_eq!(session.combinations().effective_text(0).unwrap(), "\n");
}

#[test]
fn full_text_wins_over_exclusions() {
    let (mut session, [hook, _, _]) = hook_body_cta();
    session.toggle_exclusion(3, &hook).unwrap();
    session.set_full_text(3, "  Written by hand  ").unwrap();

    let combos = session.combinations();
    assert_eq!(combos.effective_text(3).unwrap(), "  Written by hand  ");
    assert!(combos.is_edited(3));
}

#[test]
fn toggling_after_full_text_restores_derivation() {
    let (mut session, [hook, _, _]) = hook_body_cta();
    session.set_full_text(3, "Written by hand").unwrap();
    session.toggle_exclusion(3, &hook).unwrap();

    let combos = session.combinations();
    assert!(!combos.is_edited(3));
    assert_eq!(combos.effective_text(3).unwrap(), "B0\n\nBuy now\n");
}

#[test]
fn structural_change_invalidates_every_override() {
    let (mut session, [hook, body, _]) = hook_body_cta();
    session.set_full_text(0, "Custom").unwrap();
    session.toggle_exclusion(1, &hook).unwrap();

    session.set_enabled(&body, false).unwrap();
    session.set_enabled(&body, true).unwrap();

    let combos = session.combinations();
    assert!(session.overrides().is_empty());
    assert_eq!(combos.effective_text(0).unwrap(), "H0\n\nB0\n\nBuy now\n");
    assert_eq!(combos.effective_text(1).unwrap(), "H0\n\nB1\n\nBuy now\n");
}

#[test]
fn preview_is_bounded_by_limit_and_total() {
    let (session, _) = hook_body_cta();
    let combos = session.combinations();
    let first = combos.preview(2);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].0, 1);
    assert_eq!(combos.preview(100).len(), 6);
}

#[test]
fn empty_space_has_nothing_to_show() {
    let session = Session::new(vec![Slot::new("Hook")]);
    let combos = session.combinations();
    assert_eq!(combos.total(), 0);
    assert!(combos.effective_text(0).is_none());
    assert!(combos.preview(10).is_empty());
}
