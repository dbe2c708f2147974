//! The page pass: every field value is gated by the exclusion filter,
//! classified, truncated if needed and, when truncated, wrapped in a
//! toggle instance registered with the page's coordinator.

use serde::{Deserialize, Deserializer};
use sm_domain::config::ShowMoreConfig;
use sm_truncate::exclusion::is_excluded_with;
use sm_truncate::{truncate, ContentUnit};

use crate::coordinator::{AggregateLabel, ExpandAllCoordinator};
use crate::instance::{InstanceHandle, ToggleInstance, ToggleState};
use crate::report::{AggregateReport, FieldReport, PageReport, ValueReport};

/// A visible metadata field as enumerated by the page: a label with one or
/// more rendered values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(alias = "value", deserialize_with = "one_or_many")]
    pub values: Vec<String>,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: vec![value.into()],
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

#[derive(Debug)]
enum Shown {
    /// Shown as-is: excluded, within budget, or unparseable.
    Static(String),
    Toggle(InstanceHandle),
}

#[derive(Debug)]
struct ProcessedValue {
    measured: usize,
    display: Shown,
}

#[derive(Debug)]
struct ProcessedField {
    label: String,
    excluded: bool,
    values: Vec<ProcessedValue>,
}

/// Result of one page pass. Owns the toggle instances it created.
#[derive(Debug)]
pub struct Page {
    config: ShowMoreConfig,
    fields: Vec<ProcessedField>,
    instances: Vec<InstanceHandle>,
    coordinator: Option<ExpandAllCoordinator>,
}

impl Page {
    /// Run the pass over `fields` in order.
    ///
    /// Each value is classified and truncated completely before its
    /// instance is registered with the coordinator.
    pub fn process(fields: &[Field], config: &ShowMoreConfig) -> Self {
        let truncation = &config.truncation;
        let mut coordinator = config
            .expand_all_enabled
            .then(|| ExpandAllCoordinator::new(config.labels.clone()));
        let mut instances = Vec::new();
        let mut processed = Vec::with_capacity(fields.len());

        for field in fields {
            let excluded =
                is_excluded_with(&field.label, &config.excluded_fields, config.exclusion_match);
            let mut values = Vec::with_capacity(field.values.len());

            for value in &field.values {
                let unit = ContentUnit::from_value(value);
                let measured = unit.measure(truncation.mode);
                tracing::debug!(
                    label = %field.label,
                    excluded,
                    measured,
                    markup = unit.is_markup(),
                    "field value classified"
                );

                if excluded {
                    values.push(ProcessedValue {
                        measured,
                        display: Shown::Static(unit.to_html().into_owned()),
                    });
                    continue;
                }

                let result = truncate(unit, truncation);
                if !result.was_truncated {
                    values.push(ProcessedValue {
                        measured,
                        display: Shown::Static(result.full.to_html().into_owned()),
                    });
                    continue;
                }

                let instance =
                    ToggleInstance::new(field.label.as_str(), result, config.labels.clone())
                        .into_handle();
                tracing::info!(
                    label = %field.label,
                    id = %instance.borrow().id(),
                    measured,
                    limit = truncation.limit,
                    "truncation applied"
                );
                if let Some(coordinator) = coordinator.as_mut() {
                    coordinator.register(&instance);
                }
                instances.push(instance.clone());
                values.push(ProcessedValue {
                    measured,
                    display: Shown::Toggle(instance),
                });
            }

            processed.push(ProcessedField {
                label: field.label.clone(),
                excluded,
                values,
            });
        }

        tracing::info!(
            fields = processed.len(),
            truncated = instances.len(),
            mode = %truncation.mode,
            limit = truncation.limit,
            "page processed"
        );

        Self {
            config: config.clone(),
            fields: processed,
            instances,
            coordinator,
        }
    }

    pub fn config(&self) -> &ShowMoreConfig {
        &self.config
    }

    /// Toggle instances in document order.
    pub fn instances(&self) -> &[InstanceHandle] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&InstanceHandle> {
        self.instances.get(index)
    }

    /// `None` when the aggregate control is disabled for the site.
    pub fn coordinator(&self) -> Option<&ExpandAllCoordinator> {
        self.coordinator.as_ref()
    }

    /// Activate the control of the `index`-th instance.
    pub fn toggle(&mut self, index: usize) -> Option<ToggleState> {
        let state = self.instances.get(index)?.borrow_mut().toggle();
        if let Some(coordinator) = self.coordinator.as_mut() {
            coordinator.refresh();
        }
        Some(state)
    }

    /// Activate the aggregate control. `None` when it is disabled or
    /// hidden.
    pub fn activate_expand_all(&mut self) -> Option<AggregateLabel> {
        self.coordinator.as_mut()?.activate()
    }

    /// Current page markup: the aggregate control (when shown) followed
    /// by one block per field.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(control) = self.coordinator.as_ref().and_then(|c| c.render()) {
            out.push_str(&control);
            out.push('\n');
        }
        for field in &self.fields {
            out.push_str(&format!(
                "<dt>{}</dt>\n",
                quick_xml::escape::escape(field.label.as_str())
            ));
            for value in &field.values {
                let html = match &value.display {
                    Shown::Static(html) => html.clone(),
                    Shown::Toggle(instance) => instance.borrow().render(),
                };
                out.push_str(&format!("<dd class=\"value\">{html}</dd>\n"));
            }
        }
        out
    }

    /// Serializable summary of the pass and the current toggle states.
    pub fn report(&self) -> PageReport {
        let fields = self
            .fields
            .iter()
            .map(|field| FieldReport {
                label: field.label.clone(),
                excluded: field.excluded,
                values: field
                    .values
                    .iter()
                    .map(|value| match &value.display {
                        Shown::Static(html) => ValueReport {
                            measured: value.measured,
                            truncated: false,
                            region_id: None,
                            state: None,
                            displayed: html.clone(),
                        },
                        Shown::Toggle(instance) => {
                            let instance = instance.borrow();
                            ValueReport {
                                measured: value.measured,
                                truncated: true,
                                region_id: Some(instance.id().to_string()),
                                state: Some(instance.state()),
                                displayed: instance.displayed().source().to_string(),
                            }
                        }
                    })
                    .collect(),
            })
            .collect();

        PageReport {
            mode: self.config.truncation.mode,
            limit: self.config.truncation.limit,
            expand_all: self.coordinator.as_ref().map(|c| AggregateReport {
                visible: c.is_visible(),
                label: c.label(),
                instances: c.len(),
            }),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_domain::TruncationConfig;

    fn config() -> ShowMoreConfig {
        ShowMoreConfig::new(TruncationConfig::words(3)).with_excluded(["dcterms:accessRights"])
    }

    #[test]
    fn excluded_fields_are_never_truncated() {
        let fields = vec![
            Field::new("Access Rights", "one two three four five"),
            Field::new("Description", "one two three four five"),
        ];
        let page = Page::process(&fields, &config());
        assert_eq!(page.instances().len(), 1);
        assert_eq!(page.instances()[0].borrow().label(), "Description");

        let report = page.report();
        assert!(report.fields[0].excluded);
        assert!(!report.fields[0].values[0].truncated);
        assert!(report.fields[1].values[0].truncated);
    }

    #[test]
    fn each_value_gets_its_own_instance() {
        let fields = vec![Field {
            label: "Subject".into(),
            values: vec!["a b c d".into(), "short".into(), "e f g h".into()],
        }];
        let page = Page::process(&fields, &config());
        assert_eq!(page.instances().len(), 2);
        assert_ne!(
            page.instances()[0].borrow().id(),
            page.instances()[1].borrow().id()
        );
    }

    #[test]
    fn disabled_aggregate_control_is_absent() {
        let fields = vec![Field::new("Description", "one two three four five")];
        let mut page = Page::process(&fields, &config().with_expand_all(false));
        assert!(page.coordinator().is_none());
        assert_eq!(page.activate_expand_all(), None);
        assert!(!page.render().contains("show-more-expand-all"));
        assert!(page.report().expand_all.is_none());
    }

    #[test]
    fn no_truncation_means_hidden_control() {
        let fields = vec![Field::new("Title", "short")];
        let mut page = Page::process(&fields, &config());
        assert!(!page.coordinator().is_some_and(|c| c.is_visible()));
        assert_eq!(page.activate_expand_all(), None);
        assert_eq!(page.render(), "<dt>Title</dt>\n<dd class=\"value\">short</dd>\n");
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut page = Page::process(&[Field::new("Title", "short")], &config());
        assert_eq!(page.toggle(0), None);
    }

    #[test]
    fn individual_toggles_refresh_the_aggregate_label() {
        let fields = vec![
            Field::new("A", "one two three four"),
            Field::new("B", "five six seven eight"),
        ];
        let mut page = Page::process(&fields, &config());
        page.toggle(0);
        page.toggle(1);
        let label = page.coordinator().map(|c| c.label());
        assert_eq!(label, Some(AggregateLabel::CollapseAll));
    }

    #[test]
    fn fields_deserialize_from_single_or_multiple_values() {
        let fields: Vec<Field> = serde_json::from_str(
            r#"[{"label": "Title", "value": "One"}, {"label": "Subject", "values": ["a", "b"]}]"#,
        )
        .unwrap();
        assert_eq!(fields[0].values, vec!["One".to_string()]);
        assert_eq!(fields[1].values.len(), 2);
    }
}
