//! Serializable summary of a page pass.

use serde::Serialize;
use sm_domain::Mode;

use crate::coordinator::AggregateLabel;
use crate::instance::ToggleState;

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub mode: Mode,
    pub limit: usize,
    /// Absent when the aggregate control is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_all: Option<AggregateReport>,
    pub fields: Vec<FieldReport>,
}

impl PageReport {
    pub fn truncated_count(&self) -> usize {
        self.fields
            .iter()
            .flat_map(|f| &f.values)
            .filter(|v| v.truncated)
            .count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub visible: bool,
    pub label: AggregateLabel,
    pub instances: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub label: String,
    pub excluded: bool,
    pub values: Vec<ValueReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueReport {
    /// Length of the value in the configured unit.
    pub measured: usize,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ToggleState>,
    /// What the viewer currently sees.
    pub displayed: String,
}
