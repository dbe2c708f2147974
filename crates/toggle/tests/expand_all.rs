use sm_domain::config::ShowMoreConfig;
use sm_domain::TruncationConfig;
use sm_toggle::{AggregateLabel, Field, Page, ToggleState};

fn three_long_fields() -> Vec<Field> {
    vec![
        Field::new("Description", "The quick brown fox jumps over the lazy dog"),
        Field::new("Abstract", "<p>Alpha <b>bravo charlie</b> delta echo foxtrot</p>"),
        Field::new("Notes", "one two three four five six seven"),
    ]
}

fn states(page: &Page) -> Vec<ToggleState> {
    page.instances().iter().map(|i| i.borrow().state()).collect()
}

#[test]
fn aggregate_control_expands_and_collapses_everything() {
    let config = ShowMoreConfig::new(TruncationConfig::words(5)).with_expand_all(true);
    let mut page = Page::process(&three_long_fields(), &config);

    assert_eq!(page.instances().len(), 3);
    assert_eq!(states(&page), vec![ToggleState::Collapsed; 3]);
    let coordinator = page.coordinator().expect("enabled");
    assert!(coordinator.is_visible());
    assert_eq!(coordinator.label_text(), "Expand all");

    assert_eq!(page.activate_expand_all(), Some(AggregateLabel::CollapseAll));
    assert_eq!(states(&page), vec![ToggleState::Expanded; 3]);
    assert_eq!(page.coordinator().unwrap().label_text(), "Collapse all");

    assert_eq!(page.activate_expand_all(), Some(AggregateLabel::ExpandAll));
    assert_eq!(states(&page), vec![ToggleState::Collapsed; 3]);
    assert_eq!(page.coordinator().unwrap().label_text(), "Expand all");
}

#[test]
fn toggle_round_trip_restores_collapsed_markup() {
    let config = ShowMoreConfig::new(TruncationConfig::words(2));
    let mut page = Page::process(&three_long_fields(), &config);
    let before = page.render();

    assert_eq!(page.toggle(1), Some(ToggleState::Expanded));
    let expanded = page.render();
    assert_ne!(expanded, before);
    assert!(expanded.contains("<p>Alpha <b>bravo charlie</b> delta echo foxtrot</p></span>"));

    assert_eq!(page.toggle(1), Some(ToggleState::Collapsed));
    assert_eq!(page.render(), before);
    assert!(before.contains(r#"<span class="content-text"><p>Alpha <b>bravo</b></p>...</span>"#));
}

#[test]
fn report_reflects_current_states() {
    let config = ShowMoreConfig::new(TruncationConfig::words(5));
    let mut page = Page::process(&three_long_fields(), &config);
    page.toggle(0);

    let report = page.report();
    assert_eq!(report.truncated_count(), 3);
    let first = &report.fields[0].values[0];
    assert_eq!(first.state, Some(ToggleState::Expanded));
    assert_eq!(first.displayed, "The quick brown fox jumps over the lazy dog");
    let aggregate = report.expand_all.as_ref().unwrap();
    assert!(aggregate.visible);
    assert_eq!(aggregate.instances, 3);
    assert_eq!(aggregate.label, AggregateLabel::ExpandAll);
}
