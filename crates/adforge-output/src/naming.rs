//! File naming for exported ads.

/// Maximum slug length in characters, before whitespace becomes hyphens.
pub const MAX_SLUG_CHARS: usize = 40;

/// Slug used when nothing usable is left after normalization.
pub const FALLBACK_SLUG: &str = "ad";

/// Turn arbitrary text into a safe, lowercase file name stem.
///
/// Lowercases, collapses whitespace, trims, replaces anything outside
/// `[a-z0-9 -_.]` with a space, truncates to [`MAX_SLUG_CHARS`] and finally
/// turns whitespace runs into hyphens.
pub fn normalize_file_name(input: &str) -> String {
    let lowered = input.to_lowercase();
    let collapsed = replace_whitespace_runs(&lowered, " ");
    let replaced: String = collapsed
        .trim()
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .take(MAX_SLUG_CHARS)
        .collect();
    let slug = replace_whitespace_runs(&replaced, "-");
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '-' | '_' | '.')
}

fn replace_whitespace_runs(input: &str, with: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push_str(with);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// First line of `text` that is not blank, trimmed.
pub fn first_non_blank_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// File name for combination `index`: `{n}_{slug}.{extension}`.
///
/// `n` is the 1-based ordinal, zero-padded to `width` digits.
pub fn entry_name(index: u64, width: usize, text: &str, extension: &str) -> String {
    format!(
        "{:0width$}_{}.{extension}",
        index + 1,
        normalize_file_name(first_non_blank_line(text)),
    )
}
