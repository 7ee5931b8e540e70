//! Rendering a selected tuple into final ad text.

use adforge_model::{DEFAULT_SEPARATOR, SlotId};

/// One slot's rendered contribution, tagged with its owning slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotText<'a> {
    pub slot_id: &'a SlotId,
    pub slot_name: &'a str,
    pub text: &'a str,
}

/// How picks are joined into one ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Prefix every piece with its slot name on its own line.
    pub include_headings: bool,
    pub separator: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            include_headings: false,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Join `parts` into one ad.
///
/// The result is trimmed and always ends with exactly one line break, so an
/// empty input yields `"\n"`.
pub fn compose(parts: &[SlotText<'_>], include_headings: bool, separator: &str) -> String {
    let pieces: Vec<String> = parts
        .iter()
        .map(|part| {
            if include_headings {
                format!("{}\n{}", part.slot_name, part.text)
            } else {
                part.text.to_string()
            }
        })
        .collect();

    let joined = pieces.join(separator);
    let mut out = String::with_capacity(joined.len() + 1);
    out.push_str(joined.trim());
    out.push('\n');
    out
}
