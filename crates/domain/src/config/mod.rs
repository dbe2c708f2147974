mod site;
mod truncation;
mod vocabulary;

pub use site::*;
pub use truncation::*;
pub use vocabulary::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub show_more: SiteSettings,
    /// Known properties, used to turn `excluded_property_ids` into terms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vocabulary: Vec<PropertyEntry>,
}

impl Config {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the site settings against this file's vocabulary.
    pub fn resolve(&self) -> Option<ShowMoreConfig> {
        let vocabulary = Vocabulary::new(self.vocabulary.clone());
        self.show_more.resolve(&vocabulary)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// None of these stop the engine from running (malformed values fall
    /// back at resolve time); "errors" are values that will be replaced
    /// by a default, "warnings" are legal but probably unintended.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let settings = &self.show_more;

        match settings.mode.as_deref().map(str::trim) {
            None | Some("") => issues.push(ConfigIssue {
                severity: ConfigSeverity::Warning,
                field: "show_more.mode".into(),
                message: "no mode configured, show-more is disabled".into(),
            }),
            Some(mode) => {
                if let Err(e) = mode.parse::<Mode>() {
                    issues.push(ConfigIssue {
                        severity: ConfigSeverity::Error,
                        field: "show_more.mode".into(),
                        message: format!("{e}, \"words\" will be used"),
                    });
                }
            }
        }

        match &settings.limit {
            Some(value) => match parse_limit(value) {
                Ok(0) => issues.push(ConfigIssue {
                    severity: ConfigSeverity::Warning,
                    field: "show_more.limit".into(),
                    message: "limit is 0, nothing will be truncated".into(),
                }),
                Ok(_) => {}
                Err(e) => issues.push(ConfigIssue {
                    severity: ConfigSeverity::Error,
                    field: "show_more.limit".into(),
                    message: format!("{e}, {DEFAULT_LIMIT} will be used"),
                }),
            },
            None => {}
        }

        for (i, term) in settings.excluded_fields.iter().enumerate() {
            if !term.contains(':') {
                issues.push(ConfigIssue {
                    severity: ConfigSeverity::Warning,
                    field: format!("show_more.excluded_fields[{i}]"),
                    message: format!("{term:?} is not a qualified term (namespace:localName)"),
                });
            }
        }

        for id in &settings.excluded_property_ids {
            if !self.vocabulary.iter().any(|e| e.id == *id) {
                issues.push(ConfigIssue {
                    severity: ConfigSeverity::Warning,
                    field: "show_more.excluded_property_ids".into(),
                    message: format!("property id {id} is not in the vocabulary"),
                });
            }
        }

        issues
    }
}
