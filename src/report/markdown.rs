use super::display_path;
use crate::analysis::Analysis;
use crate::config::ReportConfig;
use crate::refactor::{FixOutcome, FixReportEntry, FixStatus};
use chrono::Local;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes dated markdown reports into the project's report directory
pub struct ReportWriter {
    project_root: PathBuf,
    report_dir: PathBuf,
    examples: usize,
}

impl ReportWriter {
    pub fn new(project_root: &Path, config: &ReportConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            report_dir: project_root.join(&config.dir),
            examples: config.markdown_examples,
        }
    }

    /// Write `analysis-report-<date>.md` and return its path
    pub fn write_analysis(&self, analysis: &Analysis) -> Result<PathBuf> {
        let path = self.report_path("analysis-report")?;
        let mut out = create(&path)?;
        self.render_analysis(&mut out, analysis).into_diagnostic()?;
        out.flush().into_diagnostic()?;
        debug!("Analysis report written to {}", path.display());
        Ok(path)
    }

    /// Write `fix-report-<date>.md` and return its path
    pub fn write_fix(&self, outcome: &FixOutcome) -> Result<PathBuf> {
        let path = self.report_path("fix-report")?;
        let mut out = create(&path)?;
        self.render_fix(&mut out, outcome).into_diagnostic()?;
        out.flush().into_diagnostic()?;
        debug!("Fix report written to {}", path.display());
        Ok(path)
    }

    fn report_path(&self, stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.report_dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to create {}", self.report_dir.display()))?;

        let date = Local::now().format("%Y-%m-%d");
        Ok(self.report_dir.join(format!("{}-{}.md", stem, date)))
    }

    fn render_analysis(&self, out: &mut impl Write, analysis: &Analysis) -> std::io::Result<()> {
        let stats = &analysis.stats;

        writeln!(out, "# CSS Analysis Report")?;
        writeln!(out)?;
        writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out)?;
        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out, "| | Count |")?;
        writeln!(out, "|---|---|")?;
        writeln!(out, "| Block files scanned | {} |", stats.json_files)?;
        writeln!(out, "| Stylesheets scanned | {} |", stats.css_files)?;
        writeln!(out, "| Unique blockClass values | {} |", stats.unique_block_classes)?;
        writeln!(out, "| Unique CSS suffixes | {} |", stats.unique_css_suffixes)?;
        writeln!(out, "| Unused CSS suffixes | {} |", analysis.orphan_suffixes().len())?;
        writeln!(out, "| Unused blockClass values | {} |", analysis.orphan_declarations().len())?;
        writeln!(out)?;

        writeln!(out, "## Unused CSS suffixes")?;
        writeln!(out)?;
        if analysis.orphan_suffixes().is_empty() {
            writeln!(out, "Every CSS suffix matches a declared blockClass.")?;
        } else {
            writeln!(
                out,
                "These suffixes appear in stylesheets but no block declares them. \
                 Run `fix` to review the rules that use them."
            )?;
            for suffix in analysis.orphan_suffixes() {
                let locations = analysis.suffixes.locations(suffix);
                writeln!(out)?;
                writeln!(out, "### `--{}`", suffix)?;
                writeln!(out)?;
                for loc in locations.iter().take(self.examples) {
                    writeln!(
                        out,
                        "- `{}` in `{}`",
                        loc.selector,
                        display_path(&self.project_root, &loc.file)
                    )?;
                }
                self.write_more(out, locations.len())?;
            }
        }
        writeln!(out)?;

        writeln!(out, "## Unused blockClass declarations")?;
        writeln!(out)?;
        if analysis.orphan_declarations().is_empty() {
            writeln!(out, "Every declared blockClass has CSS rules.")?;
        } else {
            writeln!(
                out,
                "These blockClass values are declared but no stylesheet styles them."
            )?;
            for class in analysis.orphan_declarations() {
                let locations = analysis.declarations.locations(class);
                writeln!(out)?;
                writeln!(out, "### `{}`", class)?;
                writeln!(out)?;
                for loc in locations.iter().take(self.examples) {
                    writeln!(
                        out,
                        "- block `{}` in `{}`",
                        loc.block,
                        display_path(&self.project_root, &loc.file)
                    )?;
                }
                self.write_more(out, locations.len())?;
            }
        }

        if !analysis.skipped.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Skipped files")?;
            writeln!(out)?;
            for skipped in &analysis.skipped {
                writeln!(
                    out,
                    "- `{}`: {}",
                    display_path(&self.project_root, &skipped.path),
                    skipped.reason
                )?;
            }
        }

        Ok(())
    }

    fn write_more(&self, out: &mut impl Write, total: usize) -> std::io::Result<()> {
        if total > self.examples {
            writeln!(out, "- ...and {} more", total - self.examples)?;
        }
        Ok(())
    }

    fn render_fix(&self, out: &mut impl Write, outcome: &FixOutcome) -> std::io::Result<()> {
        let status = match outcome.status {
            FixStatus::Completed => "completed",
            FixStatus::Cancelled => "cancelled by the user",
            FixStatus::NothingToFix => "nothing to fix",
            FixStatus::Failed => "stopped by an error",
        };

        writeln!(out, "# CSS Fix Report")?;
        writeln!(out)?;
        writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out)?;
        writeln!(out, "Status: {}", status)?;
        writeln!(out)?;
        if let Some(error) = &outcome.failure {
            writeln!(out, "Error: {}", error)?;
            writeln!(out)?;
        }
        writeln!(out, "- Rules deleted: {}", outcome.deleted.len())?;
        writeln!(out, "- Rules kept: {}", outcome.kept.len())?;
        writeln!(out, "- Files modified: {}", outcome.files_modified.len())?;
        writeln!(out)?;

        self.render_entries(out, "Deleted rules", &outcome.deleted)?;
        self.render_entries(out, "Kept rules", &outcome.kept)?;
        Ok(())
    }

    fn render_entries(
        &self,
        out: &mut impl Write,
        title: &str,
        entries: &[FixReportEntry],
    ) -> std::io::Result<()> {
        writeln!(out, "## {} ({})", title, entries.len())?;
        writeln!(out)?;
        if entries.is_empty() {
            writeln!(out, "None.")?;
            writeln!(out)?;
            return Ok(());
        }

        for entry in entries {
            writeln!(out, "`{}`", display_path(&self.project_root, &entry.file))?;
            writeln!(out)?;
            writeln!(out, "```css")?;
            writeln!(out, "{}", entry.rule)?;
            writeln!(out, "```")?;
            writeln!(out)?;
        }
        Ok(())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
