//! Length classification: does a piece of content exceed its budget?

use sm_domain::Mode;

use crate::content::ContentUnit;

/// Number of whitespace-separated tokens in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length of `text` in characters, ignoring surrounding whitespace.
pub fn count_chars(text: &str) -> usize {
    text.trim().chars().count()
}

/// Measure `text` in the unit of `mode`.
pub fn measure(text: &str, mode: Mode) -> usize {
    match mode {
        Mode::Words => count_words(text),
        Mode::Characters => count_chars(text),
    }
}

/// Whether `content` is over budget. A zero limit never truncates, nor
/// does markup that failed to parse.
///
/// Uses the measures cached on the unit, so calling this repeatedly is
/// free.
pub fn needs_truncation(content: &ContentUnit, mode: Mode, limit: usize) -> bool {
    limit > 0 && content.is_truncatable() && content.measure(mode) > limit
}

/// [`needs_truncation`] for a bare string.
pub fn text_needs_truncation(text: &str, mode: Mode, limit: usize) -> bool {
    limit > 0 && measure(text, mode) > limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_never_truncates() {
        let long = "word ".repeat(500);
        for mode in [Mode::Words, Mode::Characters] {
            assert!(!text_needs_truncation(&long, mode, 0));
            assert!(!needs_truncation(&ContentUnit::plain(long.clone()), mode, 0));
            assert!(!needs_truncation(&ContentUnit::markup(format!("<p>{long}</p>")), mode, 0));
        }
    }

    #[test]
    fn words_split_on_whitespace_runs() {
        assert_eq!(count_words("  one\ttwo \n\n three  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn word_budget_is_strictly_exceeded() {
        assert!(!text_needs_truncation("a b c", Mode::Words, 3));
        assert!(text_needs_truncation("a b c d", Mode::Words, 3));
    }

    #[test]
    fn characters_count_scalars_not_bytes() {
        assert_eq!(count_chars("  héllo wörld "), 11);
        assert!(!text_needs_truncation("日本語テキスト", Mode::Characters, 7));
        assert!(text_needs_truncation("日本語テキスト", Mode::Characters, 6));
    }

    #[test]
    fn markup_is_measured_by_its_text() {
        let unit =
            ContentUnit::markup(r#"<a href="https://example.org/a/very/long/path">ab</a> cd"#);
        assert_eq!(unit.measure(Mode::Characters), 5);
        assert_eq!(unit.measure(Mode::Words), 2);
        assert!(!needs_truncation(&unit, Mode::Characters, 5));
    }
}
