//! Toggle state for truncated values: one controller per truncated value,
//! one expand-all coordinator per page, and the page pass that wires them
//! together.

pub mod coordinator;
pub mod instance;
pub mod page;
pub mod render;
pub mod report;

pub use coordinator::{AggregateLabel, ExpandAllCoordinator};
pub use instance::{InstanceHandle, ToggleInstance, ToggleState};
pub use page::{Field, Page};
pub use render::{show_more, HelperOptions, STYLESHEET};
pub use report::PageReport;
