// Rule candidate identification
//
// A rule is only offered for deletion when every one of its selectors is
// built exclusively from orphaned convention classes. One selector without a
// convention class, or with a single still-declared suffix, keeps the whole
// rule.

use super::class_pattern::convention_matches;
use super::comparator::OrphanSuffixSet;
use crate::parser::{NodeId, Stylesheet};
use std::path::PathBuf;

/// A rule eligible for deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCandidate {
    /// Node of the rule in its owning document
    pub rule: NodeId,
    /// Stylesheet that owns the rule
    pub file: PathBuf,
    /// Serialized rule
    pub text: String,
    pub selectors: Vec<String>,
}

/// Deletion candidates of `doc`, in document order
pub fn identify_candidates(doc: &Stylesheet, orphans: &OrphanSuffixSet) -> Vec<RuleCandidate> {
    if orphans.is_empty() {
        return Vec::new();
    }

    doc.rules()
        .into_iter()
        .filter(|rule| is_fully_orphaned(doc.selectors(*rule), orphans))
        .map(|rule| RuleCandidate {
            rule,
            file: doc.path().to_path_buf(),
            text: doc.rule_text(rule),
            selectors: doc.selectors(rule).to_vec(),
        })
        .collect()
}

/// True when the selector list is non-empty and every selector only uses
/// orphaned suffixes
pub fn is_fully_orphaned(selectors: &[String], orphans: &OrphanSuffixSet) -> bool {
    !selectors.is_empty()
        && selectors
            .iter()
            .all(|selector| selector_is_orphaned(selector, orphans))
}

fn selector_is_orphaned(selector: &str, orphans: &OrphanSuffixSet) -> bool {
    let matches = convention_matches(selector);
    if matches.is_empty() {
        return false;
    }

    // A match without a primary suffix neither keeps nor condemns the selector
    !matches.iter().any(|m| match m.primary_suffix {
        Some(suffix) => !orphans.contains(suffix),
        None => false,
    })
}
