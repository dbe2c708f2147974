use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Truncation budget
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Limit used when the configured one is missing or unusable.
pub const DEFAULT_LIMIT: usize = 50;

/// Unit the budget is counted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Whitespace-separated tokens.
    #[default]
    Words,
    /// Unicode scalar values.
    Characters,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Words => "words",
            Mode::Characters => "characters",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "words" => Ok(Mode::Words),
            "characters" => Ok(Mode::Characters),
            other => Err(format!("unknown truncation mode {other:?}")),
        }
    }
}

/// Truncation budget: `limit` units of `mode`. A limit of 0 disables
/// truncation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "d_limit")]
    pub limit: usize,
}

impl TruncationConfig {
    pub fn new(mode: Mode, limit: usize) -> Self {
        Self { mode, limit }
    }

    pub fn words(limit: usize) -> Self {
        Self::new(Mode::Words, limit)
    }

    pub fn characters(limit: usize) -> Self {
        Self::new(Mode::Characters, limit)
    }

    /// `false` when the limit switches truncation off.
    pub fn is_active(&self) -> bool {
        self.limit > 0
    }
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Words,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn d_limit() -> usize {
    DEFAULT_LIMIT
}
