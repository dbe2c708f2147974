use sm_domain::{Mode, TruncationConfig};
use sm_truncate::{is_excluded, truncate, truncate_markup, ContentUnit};

#[test]
fn word_budget_keeps_leading_words() {
    let text = "The quick brown fox jumps over the lazy dog";
    let result = truncate(ContentUnit::plain(text), &TruncationConfig::words(5));
    assert!(result.was_truncated);
    assert_eq!(result.collapsed.source(), "The quick brown fox jumps...");
    assert_eq!(result.full.source(), text);
}

#[test]
fn character_budget_backs_up_only_within_ratio() {
    // The space after "Hello" sits at index 5, short of 0.8 * 10, so the
    // cut stays mid-word.
    let result = truncate(
        ContentUnit::plain("Hello wonderful world"),
        &TruncationConfig::characters(10),
    );
    assert_eq!(result.collapsed.source(), "Hello wond...");

    let result = truncate(
        ContentUnit::plain("Hello wonderful world"),
        &TruncationConfig::characters(18),
    );
    assert_eq!(result.collapsed.source(), "Hello wonderful...");
}

#[test]
fn markup_cut_mid_element_keeps_structure() {
    let out = truncate_markup("<p>Alpha <b>bravo charlie</b> delta</p>", 2, Mode::Words);
    assert_eq!(out, "<p>Alpha <b>bravo</b></p>");

    let unit = ContentUnit::markup(out);
    assert_eq!(unit.text(), "Alpha bravo");
}

#[test]
fn zero_limit_leaves_everything_alone() {
    let inputs = [
        ContentUnit::plain("The quick brown fox jumps over the lazy dog"),
        ContentUnit::markup("<p>Alpha <b>bravo charlie</b> delta</p>"),
    ];
    for unit in inputs {
        for config in [TruncationConfig::words(0), TruncationConfig::characters(0)] {
            let result = truncate(unit.clone(), &config);
            assert!(!result.was_truncated);
            assert_eq!(result.collapsed, unit);
        }
    }
}

#[test]
fn excluded_fields_are_matched_by_label() {
    let excluded = vec!["dcterms:accessRights".to_string()];
    assert!(is_excluded("Access Rights", &excluded));
    assert!(!is_excluded("Abstract", &excluded));
}
