//! Orphan analysis
//!
//! Stylesheets and store block files are scanned independently into two
//! location indices, which are then compared in both directions:
//!
//! - CSS suffixes with no `blockClass` declaring them (candidates for
//!   deletion), and
//! - `blockClass` declarations that no stylesheet styles.

pub mod candidates;
pub mod class_pattern;
pub mod comparator;
pub mod declarations;
pub mod index;
pub mod suffixes;

pub use candidates::{identify_candidates, RuleCandidate};
pub use comparator::{compare, Comparison, OrphanDeclarationSet, OrphanSuffixSet};
pub use declarations::{extract_declarations, DeclarationExtraction};
pub use index::{ClassUsageLocation, DeclarationIndex, DeclarationLocation, LocationIndex, SuffixIndex};
pub use suffixes::{extract_suffixes, SuffixExtraction};

use crate::discovery::ProjectFiles;
use crate::error::{Result, SanitizerError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// A file that contributed nothing because it could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedFile {
    pub fn new(path: &Path, error: &SanitizerError) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub json_files: usize,
    pub css_files: usize,
    pub unique_block_classes: usize,
    pub unique_css_suffixes: usize,
}

/// Everything one analysis run produced
#[derive(Debug)]
pub struct Analysis {
    pub suffixes: SuffixIndex,
    pub declarations: DeclarationIndex,
    pub comparison: Comparison,
    pub skipped: Vec<SkippedFile>,
    pub stats: AnalysisStats,
}

impl Analysis {
    /// Build the indices from the given files and compare them
    pub fn run(files: &ProjectFiles) -> Result<Self> {
        if files.config_files.is_empty() {
            return Err(SanitizerError::NoInputFiles {
                kind: "store block files (.json, .jsonc)",
                root: files.root.clone(),
            });
        }
        if files.stylesheets.is_empty() {
            return Err(SanitizerError::NoInputFiles {
                kind: "native stylesheets",
                root: files.root.clone(),
            });
        }

        info!(
            "Scanning {} block files and {} stylesheets",
            files.config_files.len(),
            files.stylesheets.len()
        );

        let declared = extract_declarations(&files.config_files);
        let used = extract_suffixes(&files.stylesheets);

        let comparison = compare(&used.index, &declared.index);
        info!(
            "{} unique blockClass values, {} unique CSS suffixes",
            declared.index.len(),
            used.index.len()
        );

        let stats = AnalysisStats {
            json_files: files.config_files.len(),
            css_files: files.stylesheets.len(),
            unique_block_classes: declared.index.len(),
            unique_css_suffixes: used.index.len(),
        };

        let mut skipped = declared.skipped;
        skipped.extend(used.skipped);

        Ok(Self {
            suffixes: used.index,
            declarations: declared.index,
            comparison,
            skipped,
            stats,
        })
    }

    pub fn orphan_suffixes(&self) -> &OrphanSuffixSet {
        &self.comparison.orphan_suffixes
    }

    pub fn orphan_declarations(&self) -> &OrphanDeclarationSet {
        &self.comparison.orphan_declarations
    }
}
