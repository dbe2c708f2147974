//! HTML for toggle regions and the aggregate control, plus the default
//! stylesheet for their class names.

use quick_xml::escape::escape;
use sm_domain::config::ShowMoreConfig;
use sm_domain::{Mode, TruncationConfig};
use sm_truncate::{truncate, ContentUnit};

use crate::coordinator::ExpandAllCoordinator;
use crate::instance::ToggleInstance;

/// Container class used by [`show_more`] unless overridden.
pub const HELPER_CLASS: &str = "show-more-content";

/// Default styling for the region and control class names.
pub const STYLESHEET: &str = r#".show-more-content {
    display: block;
}
.show-more-content .content-text {
    white-space: pre-line;
}
.show-more-btn,
.show-more-expand-all-btn {
    background: none;
    border: none;
    padding: 0;
    color: #0066cc;
    cursor: pointer;
    font-size: 0.9em;
    text-decoration: underline;
}
.show-more-btn:hover,
.show-more-expand-all-btn:hover,
.show-more-btn:focus,
.show-more-expand-all-btn:focus {
    color: #004499;
}
.show-more-content.expanded .show-more-btn {
    margin-left: 0.25em;
}
.show-more-expand-all {
    margin: 0 0 1em;
    text-align: right;
}
"#;

/// Presentation region of one instance in its current state.
pub fn region(instance: &ToggleInstance) -> String {
    let result = instance.result();
    let labels = instance.labels();
    let expanded = instance.is_expanded();
    let class = if expanded {
        format!("{} expanded", instance.class())
    } else {
        instance.class().to_string()
    };
    format!(
        concat!(
            r#"<div class="{class}" id="{id}" data-full-content="{full}" data-truncated-content="{collapsed}">"#,
            r#"<span class="content-text">{shown}</span> "#,
            r#"<button type="button" class="show-more-btn" aria-expanded="{expanded}" aria-controls="{id}" data-show-text="{show}" data-hide-text="{hide}">{label}</button>"#,
            "</div>"
        ),
        class = escape(class.as_str()),
        id = escape(instance.id()),
        full = escape(&*result.full.to_html()),
        collapsed = escape(&*result.collapsed.to_html()),
        shown = instance.displayed().to_html(),
        expanded = expanded,
        show = escape(labels.show_more.as_str()),
        hide = escape(labels.show_less.as_str()),
        label = escape(instance.control_label()),
    )
}

/// The page's aggregate control.
pub fn aggregate(coordinator: &ExpandAllCoordinator) -> String {
    format!(
        r#"<div class="show-more-expand-all"><button type="button" class="show-more-expand-all-btn" data-action="{action}">{label}</button></div>"#,
        action = coordinator.label(),
        label = escape(coordinator.label_text()),
    )
}

/// Per-call overrides for [`show_more`]. Unset fields fall back to the
/// site configuration.
#[derive(Debug, Clone, Default)]
pub struct HelperOptions {
    pub mode: Option<Mode>,
    pub limit: Option<usize>,
    pub show_more_text: Option<String>,
    pub show_less_text: Option<String>,
    pub css_class: Option<String>,
    pub id: Option<String>,
}

/// Render one plain-text string with its own show more control.
///
/// Empty content renders nothing. Content within budget is escaped and
/// returned without a control.
pub fn show_more(content: &str, site: &ShowMoreConfig, options: &HelperOptions) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let config = TruncationConfig::new(
        options.mode.unwrap_or(site.truncation.mode),
        options.limit.unwrap_or(site.truncation.limit),
    );
    let result = truncate(ContentUnit::plain(content), &config);
    if !result.was_truncated {
        return result.full.to_html().into_owned();
    }

    let mut labels = site.labels.clone();
    if let Some(text) = &options.show_more_text {
        labels.show_more = text.clone();
    }
    if let Some(text) = &options.show_less_text {
        labels.show_less = text.clone();
    }

    let class = options.css_class.as_deref().unwrap_or(HELPER_CLASS);
    let mut instance = ToggleInstance::new("", result, labels).with_class(class);
    if let Some(id) = &options.id {
        instance = instance.with_id(id.as_str());
    }
    instance.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_domain::config::ControlLabels;

    fn site() -> ShowMoreConfig {
        ShowMoreConfig::new(TruncationConfig::words(3))
    }

    #[test]
    fn region_carries_both_renderings() {
        let result = truncate(
            ContentUnit::markup("<p>one <b>two</b> three four</p>"),
            &TruncationConfig::words(2),
        );
        let instance = ToggleInstance::new("Abstract", result, ControlLabels::default())
            .with_id("show-more-abc");
        let html = region(&instance);
        assert!(html.starts_with(
            r#"<div class="show-more-content show-more-metadata" id="show-more-abc" "#
        ));
        assert!(html.contains(
            r#"data-full-content="&lt;p&gt;one &lt;b&gt;two&lt;/b&gt; three four&lt;/p&gt;""#
        ));
        assert!(html.contains(r#"<span class="content-text"><p>one <b>two</b></p>...</span>"#));
        assert!(html.contains(
            r#"data-show-text="Show more" data-hide-text="Show less">Show more</button>"#
        ));
    }

    #[test]
    fn expanded_region_gets_expanded_class() {
        let result = truncate(ContentUnit::plain("a b c d"), &TruncationConfig::words(1));
        let mut instance =
            ToggleInstance::new("Notes", result, ControlLabels::default()).with_id("show-more-x");
        instance.toggle();
        let html = region(&instance);
        assert!(html.contains(r#"class="show-more-content show-more-metadata expanded""#));
        assert!(html.contains(r#"<span class="content-text">a b c d</span>"#));
        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains(">Show less</button>"));
    }

    #[test]
    fn helper_renders_nothing_for_empty_content() {
        assert_eq!(show_more("", &site(), &HelperOptions::default()), "");
        assert_eq!(show_more("   ", &site(), &HelperOptions::default()), "");
    }

    #[test]
    fn helper_escapes_short_content() {
        let out = show_more("fish & chips", &site(), &HelperOptions::default());
        assert_eq!(out, "fish &amp; chips");
    }

    #[test]
    fn helper_applies_overrides() {
        let options = HelperOptions {
            limit: Some(2),
            show_more_text: Some("More".into()),
            show_less_text: Some("Less".into()),
            css_class: Some("bio".into()),
            id: Some("bio-1".into()),
            ..HelperOptions::default()
        };
        let out = show_more("one two three four five", &site(), &options);
        assert!(out.starts_with(r#"<div class="bio" id="bio-1" "#));
        assert!(out.contains(r#"<span class="content-text">one two...</span>"#));
        assert!(out.contains(r#"data-show-text="More" data-hide-text="Less">More</button>"#));
    }

    #[test]
    fn helper_mode_override() {
        let options = HelperOptions {
            mode: Some(Mode::Characters),
            limit: Some(10),
            ..HelperOptions::default()
        };
        let out = show_more("Hello wonderful world", &site(), &options);
        assert!(out.contains(r#"<span class="content-text">Hello wond...</span>"#));
    }
}
