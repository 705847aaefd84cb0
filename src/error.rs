//! Error types for the sanitizer
//!
//! Library functions return `SanitizerError` for the failure kinds callers
//! need to tell apart; the binary converts everything into `miette` reports.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Sanitizer errors
#[derive(Error, Diagnostic, Debug)]
pub enum SanitizerError {
    #[error("No {kind} found under {}", root.display())]
    #[diagnostic(
        code(sanitizer::no_input_files),
        help("Point the command at the root of a store theme (the folder that holds `store/` and `styles/css/`)")
    )]
    NoInputFiles { kind: &'static str, root: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(sanitizer::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(sanitizer::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed stylesheet {}: {reason}", path.display())]
    #[diagnostic(code(sanitizer::stylesheet_parse))]
    StylesheetParse { path: PathBuf, reason: String },

    #[error("Malformed configuration document {}: {source}", path.display())]
    #[diagnostic(code(sanitizer::config_parse))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load the CSS grammar: {0}")]
    #[diagnostic(code(sanitizer::grammar))]
    Grammar(#[from] tree_sitter::LanguageError),
}

pub type Result<T, E = SanitizerError> = std::result::Result<T, E>;
