//! One truncated value and its collapsed/expanded state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use sm_domain::config::ControlLabels;
use sm_truncate::{ContentUnit, TruncationResult};
use uuid::Uuid;

use crate::render;

/// Container class for regions created by the page pass.
pub const METADATA_CLASS: &str = "show-more-content show-more-metadata";

/// Shared handle: the page owns instances, the coordinator only refers to
/// them.
pub type InstanceHandle = Rc<RefCell<ToggleInstance>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    #[default]
    Collapsed,
    Expanded,
}

impl ToggleState {
    pub fn flipped(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        })
    }
}

/// Generate a region id of the form `show-more-xxxxxxxxx`.
pub fn new_region_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("show-more-{}", &hex[..9])
}

/// A truncated value on the page.
///
/// Collapsed always displays the collapsed rendering and expanded always
/// displays the full one. Transitions only flip the state; nothing is
/// re-truncated.
#[derive(Debug, Clone)]
pub struct ToggleInstance {
    id: String,
    label: String,
    class: String,
    result: TruncationResult,
    state: ToggleState,
    labels: ControlLabels,
}

impl ToggleInstance {
    pub fn new(label: impl Into<String>, result: TruncationResult, labels: ControlLabels) -> Self {
        Self {
            id: new_region_id(),
            label: label.into(),
            class: METADATA_CLASS.to_string(),
            result,
            state: ToggleState::Collapsed,
            labels,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the container class list.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn into_handle(self) -> InstanceHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label of the field this value belongs to.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn result(&self) -> &TruncationResult {
        &self.result
    }

    pub fn labels(&self) -> &ControlLabels {
        &self.labels
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == ToggleState::Expanded
    }

    /// Content currently shown.
    pub fn displayed(&self) -> &ContentUnit {
        match self.state {
            ToggleState::Collapsed => &self.result.collapsed,
            ToggleState::Expanded => &self.result.full,
        }
    }

    /// Text of the instance's own control in the current state.
    pub fn control_label(&self) -> &str {
        match self.state {
            ToggleState::Collapsed => &self.labels.show_more,
            ToggleState::Expanded => &self.labels.show_less,
        }
    }

    /// Handle an activation of the control. Returns the new state.
    pub fn toggle(&mut self) -> ToggleState {
        self.state = self.state.flipped();
        tracing::debug!(id = %self.id, state = %self.state, "instance toggled");
        self.state
    }

    /// Move to expanded. Returns false if already expanded.
    pub fn expand(&mut self) -> bool {
        if self.is_expanded() {
            return false;
        }
        self.toggle();
        true
    }

    /// Move to collapsed. Returns false if already collapsed.
    pub fn collapse(&mut self) -> bool {
        if !self.is_expanded() {
            return false;
        }
        self.toggle();
        true
    }

    /// Presentation region for the current state.
    pub fn render(&self) -> String {
        render::region(self)
    }
}
