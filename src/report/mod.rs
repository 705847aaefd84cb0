mod json;
mod markdown;
mod terminal;

pub use json::JsonReporter;
pub use markdown::ReportWriter;
pub use terminal::TerminalReporter;

use crate::analysis::Analysis;
use crate::config::ReportConfig;
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for analysis results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for outputting analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    project_root: PathBuf,
    terminal_examples: usize,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>, project_root: &Path) -> Self {
        Self {
            format,
            output_path,
            project_root: project_root.to_path_buf(),
            terminal_examples: ReportConfig::default().terminal_examples,
        }
    }

    pub fn with_config(mut self, config: &ReportConfig) -> Self {
        self.terminal_examples = config.terminal_examples;
        self
    }

    /// Report the analysis findings
    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => TerminalReporter::new(&self.project_root)
                .with_examples(self.terminal_examples)
                .report(analysis),
            ReportFormat::Json => {
                JsonReporter::new(&self.project_root, self.output_path.clone()).report(analysis)
            }
        }
    }
}

/// `file` relative to `root` when it lives under it, for display
pub(crate) fn display_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}
