use super::display_path;
use crate::analysis::{Analysis, AnalysisStats};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    project_root: PathBuf,
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(project_root: &Path, output_path: Option<PathBuf>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            output_path,
        }
    }

    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        let report = JsonReport::from_analysis(analysis, &self.project_root);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonReport {
    version: &'static str,
    unused_css: Vec<JsonUnusedSuffix>,
    unused_block_classes: Vec<JsonUnusedBlockClass>,
    skipped: Vec<JsonSkippedFile>,
    stats: AnalysisStats,
}

#[derive(Debug, Serialize)]
struct JsonUnusedSuffix {
    suffix: String,
    locations: Vec<JsonSelectorLocation>,
}

#[derive(Debug, Serialize)]
struct JsonSelectorLocation {
    file: String,
    selector: String,
}

#[derive(Debug, Serialize)]
struct JsonUnusedBlockClass {
    block_class: String,
    locations: Vec<JsonBlockLocation>,
}

#[derive(Debug, Serialize)]
struct JsonBlockLocation {
    file: String,
    block: String,
}

#[derive(Debug, Serialize)]
struct JsonSkippedFile {
    file: String,
    reason: String,
}

impl JsonReport {
    pub(crate) fn from_analysis(analysis: &Analysis, root: &Path) -> Self {
        let unused_css = analysis
            .orphan_suffixes()
            .iter()
            .map(|suffix| JsonUnusedSuffix {
                suffix: suffix.clone(),
                locations: analysis
                    .suffixes
                    .locations(suffix)
                    .iter()
                    .map(|loc| JsonSelectorLocation {
                        file: display_path(root, &loc.file),
                        selector: loc.selector.clone(),
                    })
                    .collect(),
            })
            .collect();

        let unused_block_classes = analysis
            .orphan_declarations()
            .iter()
            .map(|class| JsonUnusedBlockClass {
                block_class: class.clone(),
                locations: analysis
                    .declarations
                    .locations(class)
                    .iter()
                    .map(|loc| JsonBlockLocation {
                        file: display_path(root, &loc.file),
                        block: loc.block.clone(),
                    })
                    .collect(),
            })
            .collect();

        let skipped = analysis
            .skipped
            .iter()
            .map(|s| JsonSkippedFile {
                file: display_path(root, &s.path),
                reason: s.reason.clone(),
            })
            .collect();

        Self {
            version: "1.0",
            unused_css,
            unused_block_classes,
            skipped,
            stats: analysis.stats,
        }
    }
}
