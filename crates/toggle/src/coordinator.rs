//! Page-wide "Expand all" / "Collapse all" control.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use sm_domain::config::ControlLabels;

use crate::instance::{InstanceHandle, ToggleInstance};
use crate::render;

/// Which action the aggregate control performs next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateLabel {
    #[default]
    ExpandAll,
    CollapseAll,
}

impl fmt::Display for AggregateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExpandAll => "expand_all",
            Self::CollapseAll => "collapse_all",
        })
    }
}

/// Refers to every toggle instance on one page without owning them.
///
/// Built once per page pass and dropped with the page.
#[derive(Debug, Default)]
pub struct ExpandAllCoordinator {
    instances: Vec<Weak<RefCell<ToggleInstance>>>,
    label: AggregateLabel,
    labels: ControlLabels,
}

impl ExpandAllCoordinator {
    pub fn new(labels: ControlLabels) -> Self {
        Self {
            instances: Vec::new(),
            label: AggregateLabel::ExpandAll,
            labels,
        }
    }

    /// Track an instance. The control becomes visible with the first one.
    pub fn register(&mut self, instance: &InstanceHandle) {
        self.instances.push(Rc::downgrade(instance));
        tracing::debug!(
            id = %instance.borrow().id(),
            registered = self.instances.len(),
            "instance registered"
        );
    }

    fn live(&self) -> impl Iterator<Item = InstanceHandle> + '_ {
        self.instances.iter().filter_map(Weak::upgrade)
    }

    /// Number of registered instances still alive.
    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hidden while nothing has been registered.
    pub fn is_visible(&self) -> bool {
        !self.is_empty()
    }

    pub fn label(&self) -> AggregateLabel {
        self.label
    }

    pub fn label_text(&self) -> &str {
        match self.label {
            AggregateLabel::ExpandAll => &self.labels.expand_all,
            AggregateLabel::CollapseAll => &self.labels.collapse_all,
        }
    }

    /// Run the labelled action over every instance and flip the label.
    /// Instances already in the target state are left alone. Returns the
    /// new label, or `None` when the control is hidden.
    pub fn activate(&mut self) -> Option<AggregateLabel> {
        if !self.is_visible() {
            return None;
        }
        let mut changed = 0;
        for instance in self.live() {
            let mut instance = instance.borrow_mut();
            let moved = match self.label {
                AggregateLabel::ExpandAll => instance.expand(),
                AggregateLabel::CollapseAll => instance.collapse(),
            };
            changed += usize::from(moved);
        }
        let action = self.label;
        self.label = match action {
            AggregateLabel::ExpandAll => AggregateLabel::CollapseAll,
            AggregateLabel::CollapseAll => AggregateLabel::ExpandAll,
        };
        tracing::info!(action = %action, changed, "aggregate control activated");
        Some(self.label)
    }

    /// Re-derive the label from instance states after an individual
    /// toggle: "Collapse all" exactly when every instance is expanded.
    pub fn refresh(&mut self) {
        let all_expanded = self.is_visible() && self.live().all(|i| i.borrow().is_expanded());
        let label = if all_expanded {
            AggregateLabel::CollapseAll
        } else {
            AggregateLabel::ExpandAll
        };
        if label != self.label {
            tracing::debug!(from = %self.label, to = %label, "aggregate label re-derived");
            self.label = label;
        }
    }

    /// Markup for the control, or `None` while hidden.
    pub fn render(&self) -> Option<String> {
        self.is_visible().then(|| render::aggregate(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_domain::TruncationConfig;
    use sm_truncate::{truncate, ContentUnit};

    fn handle(text: &str) -> InstanceHandle {
        let result = truncate(ContentUnit::plain(text), &TruncationConfig::words(1));
        ToggleInstance::new("Field", result, ControlLabels::default()).into_handle()
    }

    #[test]
    fn hidden_until_first_registration() {
        let mut coordinator = ExpandAllCoordinator::new(ControlLabels::default());
        assert!(!coordinator.is_visible());
        assert!(coordinator.render().is_none());
        assert_eq!(coordinator.activate(), None);

        let a = handle("one two");
        coordinator.register(&a);
        assert!(coordinator.is_visible());
        assert!(coordinator.render().is_some());
    }

    #[test]
    fn expand_all_leaves_expanded_instances_alone() {
        let mut coordinator = ExpandAllCoordinator::new(ControlLabels::default());
        let a = handle("one two");
        let b = handle("three four");
        coordinator.register(&a);
        coordinator.register(&b);
        b.borrow_mut().toggle();

        assert_eq!(coordinator.activate(), Some(AggregateLabel::CollapseAll));
        assert!(a.borrow().is_expanded());
        assert!(b.borrow().is_expanded());
        assert_eq!(coordinator.label_text(), "Collapse all");
    }

    #[test]
    fn refresh_tracks_individual_toggles() {
        let mut coordinator = ExpandAllCoordinator::new(ControlLabels::default());
        let a = handle("one two");
        let b = handle("three four");
        coordinator.register(&a);
        coordinator.register(&b);

        coordinator.activate();
        a.borrow_mut().toggle();
        coordinator.refresh();
        assert_eq!(coordinator.label(), AggregateLabel::ExpandAll);

        // Expanding only the collapsed one.
        coordinator.activate();
        assert!(a.borrow().is_expanded());
        assert!(b.borrow().is_expanded());
        assert_eq!(coordinator.label(), AggregateLabel::CollapseAll);
    }

    #[test]
    fn dropped_instances_are_skipped() {
        let mut coordinator = ExpandAllCoordinator::new(ControlLabels::default());
        let a = handle("one two");
        {
            let b = handle("three four");
            coordinator.register(&b);
        }
        coordinator.register(&a);
        assert_eq!(coordinator.len(), 1);
        coordinator.activate();
        assert!(a.borrow().is_expanded());
    }
}
