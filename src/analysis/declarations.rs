// blockClass declaration extraction from store block files

use super::index::{DeclarationIndex, DeclarationLocation};
use super::SkippedFile;
use crate::error::SanitizerError;
use crate::parser::parse_jsonc;
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Result of scanning a set of configuration documents
#[derive(Debug, Default)]
pub struct DeclarationExtraction {
    pub index: DeclarationIndex,
    /// Files that could not be read or parsed
    pub skipped: Vec<SkippedFile>,
}

/// Build the declaration index for `files`, merged in input order
pub fn extract_declarations(files: &[PathBuf]) -> DeclarationExtraction {
    let results: Vec<_> = files.par_iter().map(|path| read_document(path)).collect();

    let mut extraction = DeclarationExtraction::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(document) => {
                let declarations = block_class_declarations(path, &document);
                debug!("{}: {} blockClass declarations", path.display(), declarations.len());
                for (class, location) in declarations {
                    extraction.index.record(&class, location);
                }
            }
            Err(e) => {
                warn!("Skipping configuration file {}: {}", path.display(), e);
                extraction.skipped.push(SkippedFile::new(path, &e));
            }
        }
    }

    extraction
}

fn read_document(path: &Path) -> Result<Value, SanitizerError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SanitizerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jsonc(&contents).map_err(|source| SanitizerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Every (class name, location) declared by a parsed document.
///
/// Each top-level key is a block; its `props.blockClass` may be a
/// whitespace-separated string or a list of strings. Any other shape, and a
/// non-object root, declares nothing.
pub fn block_class_declarations(path: &Path, document: &Value) -> Vec<(String, DeclarationLocation)> {
    let Some(blocks) = document.as_object() else {
        trace!("{}: root is not an object", path.display());
        return Vec::new();
    };

    let mut declarations = Vec::new();
    for (block, definition) in blocks {
        let Some(block_class) = definition.get("props").and_then(|props| props.get("blockClass")) else {
            continue;
        };

        for class in class_names(block_class) {
            declarations.push((
                class.to_string(),
                DeclarationLocation {
                    file: path.to_path_buf(),
                    block: block.clone(),
                },
            ));
        }
    }

    declarations
}

fn class_names(value: &Value) -> Vec<&str> {
    match value {
        Value::String(classes) => classes.split_whitespace().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|class| !class.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
