//! Plain-text truncation by word or character budget.

use sm_domain::{Mode, TruncationConfig};

/// Appended to every truncated plain-text rendering.
pub const ELLIPSIS: &str = "...";

/// How far back a cut may move to land on whitespace, as a fraction of
/// the budget. A boundary earlier than this is ignored and the cut stays
/// mid-word. Fixed; every caller uses the same value.
pub const BOUNDARY_RATIO: f64 = 0.8;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Keep the first `limit` words, joined by single spaces, followed by
/// [`ELLIPSIS`]. Text within budget is returned untouched.
pub fn truncate_by_words(text: &str, limit: usize) -> String {
    if limit == 0 {
        return text.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return text.to_string();
    }
    let mut out = words[..limit].join(" ");
    out.push_str(ELLIPSIS);
    out
}

/// Keep at most `limit` characters, preferring to end on whitespace when
/// that costs no more than a fifth of the budget, strip trailing
/// punctuation and append [`ELLIPSIS`].
///
/// Text that already ends in the ellipsis with a stem inside the budget
/// is treated as truncated and returned as-is.
pub fn truncate_by_characters(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if limit == 0 || trimmed.chars().count() <= limit || already_truncated(trimmed, limit) {
        return text.to_string();
    }

    let mut cut = &trimmed[..byte_offset(trimmed, limit)];
    if let Some(boundary) = boundary_before(cut, limit) {
        cut = &cut[..boundary];
    }
    let stem =
        cut.trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c));
    format!("{stem}{ELLIPSIS}")
}

/// Dispatch on the configured mode.
pub fn truncate_text(text: &str, config: &TruncationConfig) -> String {
    match config.mode {
        Mode::Words => truncate_by_words(text, config.limit),
        Mode::Characters => truncate_by_characters(text, config.limit),
    }
}

fn already_truncated(text: &str, limit: usize) -> bool {
    text.strip_suffix(ELLIPSIS)
        .is_some_and(|stem| stem.trim_end().chars().count() <= limit)
}

/// Byte offset of the `chars`-th character, or the end of `text`.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Byte offset of the last whitespace in `prefix`, provided it sits at or
/// beyond [`BOUNDARY_RATIO`] of `budget` characters.
pub(crate) fn boundary_before(prefix: &str, budget: usize) -> Option<usize> {
    let threshold = budget as f64 * BOUNDARY_RATIO;
    prefix
        .char_indices()
        .enumerate()
        .filter(|(_, (_, c))| c.is_whitespace())
        .last()
        .filter(|(n, _)| *n as f64 >= threshold)
        .map(|(_, (byte, _))| byte)
}
