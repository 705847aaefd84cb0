// Two-way comparison of used suffixes and declared block classes

use super::index::{DeclarationIndex, SuffixIndex};
use indexmap::IndexSet;

/// Suffixes styled in CSS that no block declares
pub type OrphanSuffixSet = IndexSet<String>;

/// Block classes declared in the store that no stylesheet styles
pub type OrphanDeclarationSet = IndexSet<String>;

/// Both directional differences between the indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub orphan_suffixes: OrphanSuffixSet,
    pub orphan_declarations: OrphanDeclarationSet,
}

impl Comparison {
    pub fn is_clean(&self) -> bool {
        self.orphan_suffixes.is_empty() && self.orphan_declarations.is_empty()
    }
}

/// Compare the indices. Each output set follows its index's key order.
pub fn compare(suffixes: &SuffixIndex, declarations: &DeclarationIndex) -> Comparison {
    let orphan_suffixes = suffixes
        .keys()
        .filter(|suffix| !declarations.contains_key(suffix))
        .map(str::to_string)
        .collect();

    let orphan_declarations = declarations
        .keys()
        .filter(|class| !suffixes.contains_key(class))
        .map(str::to_string)
        .collect();

    Comparison {
        orphan_suffixes,
        orphan_declarations,
    }
}
