//! Truncation engine: measuring content against a budget, cutting plain
//! text and markup down to it, and deciding which fields are exempt.

pub mod classifier;
pub mod content;
pub mod exclusion;
pub mod markup;
pub mod plain;
pub mod result;

pub use classifier::needs_truncation;
pub use content::ContentUnit;
pub use exclusion::is_excluded;
pub use markup::truncate_markup;
pub use plain::{truncate_by_characters, truncate_by_words, ELLIPSIS};
pub use result::{truncate, TruncationResult};
