//! Field exclusion: which labelled fields are never truncated.
//!
//! Excluded fields are configured as qualified vocabulary terms such as
//! `dcterms:accessRights`. Page labels are human-readable ("Access
//! Rights"), so each term is turned into a label-like phrase before it is
//! compared.

use std::sync::LazyLock;

use regex::Regex;
use sm_domain::config::ExclusionMatch;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{Ll}\d])(\p{Lu})").expect("valid regex"));

/// The part of a qualified term after its prefix: `dcterms:accessRights`
/// becomes `accessRights`. Unqualified terms are returned whole.
pub fn local_name(term: &str) -> &str {
    term.split_once(':').map_or(term, |(_, local)| local)
}

/// Lowercased phrase a label for `term` is expected to contain:
/// `dcterms:accessRights` becomes `access rights`.
pub fn derived_label(term: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(local_name(term).trim(), "$1 $2")
        .to_lowercase()
}

/// Whether the field labelled `label` is excluded, using the default
/// (substring) match.
pub fn is_excluded(label: &str, excluded: &[String]) -> bool {
    is_excluded_with(label, excluded, ExclusionMatch::default())
}

/// Whether the field labelled `label` is excluded.
///
/// The label is compared case-insensitively with runs of whitespace
/// collapsed. A label equal to the derived phrase always matches.
/// [`ExclusionMatch::Permissive`] also accepts any label containing the
/// bare local name, so `dcterms:title` excludes "Alternative Title".
pub fn is_excluded_with(label: &str, excluded: &[String], matching: ExclusionMatch) -> bool {
    let label = normalize(label);
    if label.is_empty() {
        return false;
    }
    excluded.iter().any(|term| {
        let phrase = derived_label(term);
        if phrase.is_empty() {
            return false;
        }
        let hit = label == phrase
            || (matching == ExclusionMatch::Permissive
                && label.contains(&local_name(term).trim().to_lowercase()));
        if hit {
            tracing::debug!(label = %label, term = %term, "field excluded from truncation");
        }
        hit
    })
}

fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
