//! vtex-css-sanitizer - Find and remove orphaned CSS in VTEX IO store themes
//!
//! Store block files declare `blockClass` values; native stylesheets style
//! them through classes like `.flexRow--hero`. Over time the two drift
//! apart. This library cross-references both sides and can delete the rules
//! that style classes no block declares.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **File Discovery** - Find block files under `store/` and `vtex.*`
//!    stylesheets under `styles/css/`
//! 2. **Parsing** - Parse stylesheets with tree-sitter and block files as JSONC
//! 3. **Extraction** - Index CSS suffixes and declared `blockClass` values
//! 4. **Comparison** - Two-way diff of the indices
//! 5. **Fixing** - Interactive, per-rule deletion of orphaned rules
//! 6. **Reporting** - Terminal, JSON and markdown output

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parser;
pub mod refactor;
pub mod report;

pub use analysis::{Analysis, AnalysisStats, Comparison, RuleCandidate, SkippedFile};
pub use config::Config;
pub use discovery::{FileFinder, ProjectFiles};
pub use error::SanitizerError;
pub use parser::Stylesheet;
pub use refactor::{AcceptAll, Decision, FixEngine, FixOutcome, FixPrompt, FixStatus, TerminalPrompt};
pub use report::{ReportFormat, ReportWriter, Reporter};
