//! Producing the collapsed and full renderings of one value.

use sm_domain::TruncationConfig;

use crate::classifier::needs_truncation;
use crate::content::ContentUnit;
use crate::markup::cut_fragment;
use crate::plain::{truncate_text, ELLIPSIS};

/// Outcome of truncating a single value.
///
/// When `was_truncated` is false, `collapsed` and `full` are the same
/// content and no toggle is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationResult {
    pub was_truncated: bool,
    pub collapsed: ContentUnit,
    pub full: ContentUnit,
}

impl TruncationResult {
    fn unchanged(unit: ContentUnit) -> Self {
        Self {
            was_truncated: false,
            collapsed: unit.clone(),
            full: unit,
        }
    }
}

/// Truncate `unit` under `config`.
///
/// Markup is cut structurally and the ellipsis is placed after the last
/// closing tag. Plain text goes through the word or character rule.
pub fn truncate(unit: ContentUnit, config: &TruncationConfig) -> TruncationResult {
    if !needs_truncation(&unit, config.mode, config.limit) {
        return TruncationResult::unchanged(unit);
    }

    let collapsed = match unit.fragment() {
        Some(fragment) => {
            let mut cut = cut_fragment(fragment, unit.text(), config.limit, config.mode);
            cut.push_str(ELLIPSIS);
            ContentUnit::markup(cut)
        }
        None => ContentUnit::plain(truncate_text(unit.source(), config)),
    };

    // The character rule leaves already-truncated text alone.
    if collapsed.source() == unit.source() {
        return TruncationResult::unchanged(unit);
    }

    tracing::debug!(
        mode = %config.mode,
        limit = config.limit,
        full = unit.measure(config.mode),
        kept = collapsed.measure(config.mode),
        "value truncated"
    );

    TruncationResult {
        was_truncated: true,
        collapsed,
        full: unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_not_truncated() {
        let result = truncate(ContentUnit::plain("one two"), &TruncationConfig::words(5));
        assert!(!result.was_truncated);
        assert_eq!(result.collapsed, result.full);
    }

    #[test]
    fn markup_ellipsis_follows_closing_tags() {
        let unit = ContentUnit::markup("<p>Alpha <b>bravo charlie</b> delta</p>");
        let result = truncate(unit, &TruncationConfig::words(2));
        assert!(result.was_truncated);
        assert_eq!(result.collapsed.source(), "<p>Alpha <b>bravo</b></p>...");
        assert_eq!(result.full.source(), "<p>Alpha <b>bravo charlie</b> delta</p>");
    }

    #[test]
    fn collapsed_plain_text_stays_plain() {
        let unit = ContentUnit::plain("one two three four");
        let result = truncate(unit, &TruncationConfig::words(2));
        assert!(result.was_truncated);
        assert!(!result.collapsed.is_markup());
        assert_eq!(result.collapsed.source(), "one two...");
    }

    #[test]
    fn truncated_markup_is_not_truncated_again() {
        let config = TruncationConfig::words(2);
        let first = truncate(ContentUnit::markup("<p>one two three</p>"), &config);
        let again = truncate(first.collapsed.clone(), &config);
        assert!(!again.was_truncated);
        assert_eq!(again.collapsed, first.collapsed);
    }
}
