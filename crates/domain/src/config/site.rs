use serde::{Deserialize, Serialize};

use super::truncation::{Mode, TruncationConfig, DEFAULT_LIMIT};
use super::vocabulary::PropertyResolver;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Per-site settings (raw, as stored)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Site settings exactly as the settings store hands them over.
///
/// Nothing here is trusted: `mode` and `limit` are kept loosely typed so
/// that a malformed value degrades to a default in [`SiteSettings::resolve`]
/// instead of failing the whole config load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// `"words"` or `"characters"`. Unset means the feature is off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Non-negative integer; numeric strings are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<serde_json::Value>,
    /// Qualified terms (`dcterms:accessRights`) never truncated.
    #[serde(default)]
    pub excluded_fields: Vec<String>,
    /// Store ids of excluded properties, resolved through the vocabulary.
    #[serde(default)]
    pub excluded_property_ids: Vec<u64>,
    #[serde(default = "d_true")]
    pub expand_all_enabled: bool,
    #[serde(default)]
    pub exclusion_match: ExclusionMatch,
    #[serde(default)]
    pub labels: ControlLabels,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            mode: None,
            limit: None,
            excluded_fields: Vec::new(),
            excluded_property_ids: Vec::new(),
            expand_all_enabled: true,
            exclusion_match: ExclusionMatch::Permissive,
            labels: ControlLabels::default(),
        }
    }
}

/// How loosely a field label may match an excluded term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionMatch {
    /// Derived-label equality, or the raw local name anywhere in the label.
    #[default]
    Permissive,
    /// Derived-label equality only.
    Strict,
}

/// Visible text of the per-instance and aggregate controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlLabels {
    #[serde(default = "d_show_more")]
    pub show_more: String,
    #[serde(default = "d_show_less")]
    pub show_less: String,
    #[serde(default = "d_expand_all")]
    pub expand_all: String,
    #[serde(default = "d_collapse_all")]
    pub collapse_all: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            show_more: d_show_more(),
            show_less: d_show_less(),
            expand_all: d_expand_all(),
            collapse_all: d_collapse_all(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Resolved settings
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings after validation and fallbacks; what the page pass consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowMoreConfig {
    pub truncation: TruncationConfig,
    pub excluded_fields: Vec<String>,
    pub expand_all_enabled: bool,
    pub exclusion_match: ExclusionMatch,
    pub labels: ControlLabels,
}

impl ShowMoreConfig {
    pub fn new(truncation: TruncationConfig) -> Self {
        Self {
            truncation,
            ..Self::default()
        }
    }

    pub fn with_excluded<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_fields = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expand_all(mut self, enabled: bool) -> Self {
        self.expand_all_enabled = enabled;
        self
    }
}

impl Default for ShowMoreConfig {
    fn default() -> Self {
        Self {
            truncation: TruncationConfig::default(),
            excluded_fields: Vec::new(),
            expand_all_enabled: true,
            exclusion_match: ExclusionMatch::Permissive,
            labels: ControlLabels::default(),
        }
    }
}

impl SiteSettings {
    /// Resolve the raw settings into a usable config.
    ///
    /// Returns `None` when no mode is configured at all, i.e. the site has
    /// not switched the feature on. Every other problem falls back:
    /// unknown mode becomes `words`, a bad limit becomes [`DEFAULT_LIMIT`],
    /// and a failing `resolver` contributes no exclusions.
    pub fn resolve(&self, resolver: &dyn PropertyResolver) -> Option<ShowMoreConfig> {
        let raw_mode = self.mode.as_deref().map(str::trim).filter(|m| !m.is_empty())?;

        let mode = raw_mode.parse::<Mode>().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to words mode");
            Mode::Words
        });

        let limit = match &self.limit {
            None => DEFAULT_LIMIT,
            Some(value) => parse_limit(value).unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    fallback = DEFAULT_LIMIT,
                    "falling back to default limit"
                );
                DEFAULT_LIMIT
            }),
        };

        let mut excluded_fields: Vec<String> = Vec::new();
        let mut push_term = |term: &str| {
            let term = term.trim();
            if !term.is_empty() && !excluded_fields.iter().any(|t| t == term) {
                excluded_fields.push(term.to_string());
            }
        };
        for term in &self.excluded_fields {
            push_term(term.as_str());
        }
        if !self.excluded_property_ids.is_empty() {
            match resolver.resolve_terms(&self.excluded_property_ids) {
                Ok(terms) => terms.iter().for_each(|t| push_term(t.as_str())),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        ids = self.excluded_property_ids.len(),
                        "property lookup failed, ignoring id-based exclusions"
                    );
                }
            }
        }

        Some(ShowMoreConfig {
            truncation: TruncationConfig::new(mode, limit),
            excluded_fields,
            expand_all_enabled: self.expand_all_enabled,
            exclusion_match: self.exclusion_match,
            labels: self.labels.clone(),
        })
    }
}

/// Interpret a stored limit. Accepts non-negative integers and strings
/// holding one.
pub fn parse_limit(value: &serde_json::Value) -> Result<usize, String> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| format!("limit {value} is not a non-negative integer"))
}

// ── serde default helpers ───────────────────────────────────────────

fn d_true() -> bool {
    true
}
fn d_show_more() -> String {
    "Show more".into()
}
fn d_show_less() -> String {
    "Show less".into()
}
fn d_expand_all() -> String {
    "Expand all".into()
}
fn d_collapse_all() -> String {
    "Collapse all".into()
}
