// Selector/suffix extraction from stylesheets

use super::class_pattern::selector_suffixes;
use super::index::{ClassUsageLocation, SuffixIndex};
use super::SkippedFile;
use crate::parser::Stylesheet;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of scanning a set of stylesheets
#[derive(Debug, Default)]
pub struct SuffixExtraction {
    pub index: SuffixIndex,
    /// Files that could not be read or parsed
    pub skipped: Vec<SkippedFile>,
}

/// Build the suffix index for `files`.
///
/// Files are parsed in parallel; results are merged in input order so the
/// location lists are the same on every run. A file that fails to read or
/// parse is logged and contributes nothing.
pub fn extract_suffixes(files: &[PathBuf]) -> SuffixExtraction {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| Stylesheet::read(path).map(|doc| suffix_usages(&doc)))
        .collect();

    let mut extraction = SuffixExtraction::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(usages) => {
                debug!("{}: {} convention classes", path.display(), usages.len());
                for (suffix, location) in usages {
                    extraction.index.record(&suffix, location);
                }
            }
            Err(e) => {
                warn!("Skipping stylesheet {}: {}", path.display(), e);
                extraction.skipped.push(SkippedFile::new(path, &e));
            }
        }
    }

    extraction
}

/// Every (primary suffix, location) pair in a parsed stylesheet, in
/// document order
pub fn suffix_usages(doc: &Stylesheet) -> Vec<(String, ClassUsageLocation)> {
    let mut usages = Vec::new();

    for rule in doc.rules() {
        for selector in doc.selectors(rule) {
            for suffix in selector_suffixes(selector) {
                usages.push((
                    suffix.to_string(),
                    ClassUsageLocation {
                        file: doc.path().to_path_buf(),
                        selector: selector.clone(),
                    },
                ));
            }
        }
    }

    usages
}
