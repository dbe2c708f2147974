//! Markup-aware truncation.
//!
//! The fragment is cut so that its text fits the same budget the plain
//! truncator uses, while every element that was opened before the cut is
//! closed again with its original tags. No ellipsis is added here.

mod parse;
mod walk;

pub use parse::{Fragment, Node};
pub(crate) use parse::has_tag_opener;

use sm_domain::Mode;

use crate::classifier::needs_truncation;
use crate::content::ContentUnit;

/// Truncate a markup fragment to `limit` units of `mode`.
///
/// Fragments within budget, and fragments that cannot be parsed, are
/// returned unchanged.
pub fn truncate_markup(fragment: &str, limit: usize, mode: Mode) -> String {
    let unit = ContentUnit::markup(fragment);
    match unit.fragment() {
        Some(parsed) if needs_truncation(&unit, mode, limit) => {
            cut_fragment(parsed, unit.text(), limit, mode)
        }
        _ => fragment.to_string(),
    }
}

/// Cut an already parsed fragment whose plain-text projection is
/// `projection`.
pub fn cut_fragment(fragment: &Fragment, projection: &str, limit: usize, mode: Mode) -> String {
    walk::cut(fragment, target_length(projection, limit, mode), mode)
}

/// Number of projection characters to keep.
///
/// Words: up to the end of the `limit`-th word. Characters: `limit`
/// characters after any leading whitespace, which is not counted against
/// the budget.
pub fn target_length(projection: &str, limit: usize, mode: Mode) -> usize {
    match mode {
        Mode::Characters => {
            let leading = projection.chars().take_while(|c| c.is_whitespace()).count();
            leading + limit
        }
        Mode::Words => {
            let mut words = 0;
            let mut in_word = false;
            for (i, c) in projection.chars().enumerate() {
                if c.is_whitespace() {
                    if in_word && words == limit {
                        return i;
                    }
                    in_word = false;
                } else if !in_word {
                    in_word = true;
                    words += 1;
                }
            }
            projection.chars().count()
        }
    }
}
