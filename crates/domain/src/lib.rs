//! Shared types for the show-more engine: configuration, truncation mode
//! and the common error type.

pub mod config;
pub mod error;

pub use config::{Mode, TruncationConfig};
pub use error::{Error, Result};
