use serde::{Deserialize, Serialize};

use crate::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Property vocabulary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One known metadata property: the store id the settings refer to and
/// its qualified term (`namespace:localName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub id: u64,
    pub term: String,
    /// Human label, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Maps stored property ids to qualified terms.
///
/// Implementations backed by a remote store may fail; callers treat a
/// failure as "no exclusions".
pub trait PropertyResolver {
    /// Resolve `ids` to terms. Unknown ids are skipped, not errors.
    fn resolve_terms(&self, ids: &[u64]) -> Result<Vec<String>>;
}

/// In-memory vocabulary, usually read from the `[[vocabulary]]` tables of
/// the config file.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<PropertyEntry>,
}

impl Vocabulary {
    pub fn new(entries: Vec<PropertyEntry>) -> Self {
        Self { entries }
    }
}

impl PropertyResolver for Vocabulary {
    fn resolve_terms(&self, ids: &[u64]) -> Result<Vec<String>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.entries.iter().find(|e| e.id == *id))
            .map(|e| e.term.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, term: &str) -> PropertyEntry {
        PropertyEntry {
            id,
            term: term.into(),
            label: None,
        }
    }

    #[test]
    fn resolves_known_ids_in_request_order() {
        let vocab = Vocabulary::new(vec![entry(1, "dcterms:title"), entry(7, "dcterms:rights")]);
        let terms = vocab.resolve_terms(&[7, 1]).unwrap();
        assert_eq!(terms, vec!["dcterms:rights", "dcterms:title"]);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let vocab = Vocabulary::new(vec![entry(1, "dcterms:title")]);
        assert!(vocab.resolve_terms(&[42]).unwrap().is_empty());
    }
}
