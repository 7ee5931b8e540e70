use adforge_core::{Combinations, Session};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use adforge_cli::escape::escape;

/// Longest candidate text shown in a table cell.
const CELL_CHARS: usize = 48;

pub fn print_slots(session: &Session) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Slot"),
        header_cell("Enabled"),
        header_cell("Candidates"),
        header_cell("Active"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);

    for (position, slot) in session.slots().iter().enumerate() {
        let candidates = slot
            .items
            .iter()
            .enumerate()
            .map(|(i, candidate)| format!("{}. {}", i + 1, clip(&candidate.text)))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&slot.name).add_attribute(Attribute::Bold),
            flag_cell(slot.enabled),
            if candidates.is_empty() {
                dim_cell("(none)")
            } else {
                Cell::new(candidates)
            },
            flag_cell(slot.is_active()),
        ]);
    }
    println!("{table}");

    let options = session.options();
    println!("Ads: {}", session.total());
    println!(
        "Headings: {}  Separator: \"{}\"  Edited ads: {}",
        if options.include_headings { "on" } else { "off" },
        escape(&options.separator),
        session.overrides().len()
    );
}

pub fn print_ad(session: &Session, index: u64) {
    let combos = session.combinations();
    let marker = if combos.is_edited(index) { " (edited)" } else { "" };
    println!("Ad {} of {}{marker}", index + 1, combos.total());

    if let Some(picks) = combos.decode(index) {
        let excluded = session.overrides().excluded(index);
        let mut table = Table::new();
        table.set_header(vec![header_cell("Slot"), header_cell("Line")]);
        apply_table_style(&mut table);
        for pick in picks {
            let line = clip(&pick.candidate.text);
            let line = if excluded.is_some_and(|ids| ids.contains(&pick.slot.id)) {
                dim_cell(&format!("{line} (excluded)"))
            } else {
                Cell::new(line)
            };
            table.add_row(vec![Cell::new(&pick.slot.name), line]);
        }
        println!("{table}");
    }

    if let Some(text) = combos.effective_text(index) {
        println!();
        print!("{text}");
    }
}

pub fn print_preview(combos: &Combinations<'_>, limit: u64) {
    let rows = combos.preview(limit);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Ad"), header_cell("Text")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, text) in &rows {
        let ad = if combos.is_edited(*index) {
            Cell::new(format!("{}*", index + 1)).fg(Color::Yellow)
        } else {
            Cell::new(index + 1)
        };
        table.add_row(vec![ad, Cell::new(text.trim_end())]);
    }
    println!("{table}");
    if combos.total() > rows.len() as u64 {
        println!("Showing {} of {} ads", rows.len(), combos.total());
    }
}

fn clip(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    if text.chars().count() > CELL_CHARS || text.contains('\n') {
        let mut clipped: String = line.chars().take(CELL_CHARS).collect();
        clipped.push_str("...");
        clipped
    } else {
        line.to_string()
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::DarkGrey)
}

fn flag_cell(on: bool) -> Cell {
    if on {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
