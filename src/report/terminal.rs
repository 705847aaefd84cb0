use super::display_path;
use crate::analysis::{Analysis, SkippedFile};
use crate::refactor::{FixOutcome, FixStatus};
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

/// Terminal reporter with colored output
pub struct TerminalReporter {
    project_root: PathBuf,
    /// Locations shown per orphan
    examples: usize,
}

impl TerminalReporter {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            examples: 3,
        }
    }

    pub fn with_examples(mut self, examples: usize) -> Self {
        self.examples = examples;
        self
    }

    fn relative(&self, file: &Path) -> String {
        display_path(&self.project_root, file)
    }

    pub fn report(&self, analysis: &Analysis) -> Result<()> {
        let stats = &analysis.stats;

        println!();
        println!("{}", "Scanned:".bold());
        println!("  {} block files (.json, .jsonc)", stats.json_files);
        println!("  {} native stylesheets (.css)", stats.css_files);
        println!(
            "  {} unique blockClass values, {} unique CSS suffixes",
            stats.unique_block_classes, stats.unique_css_suffixes
        );

        self.print_skipped(&analysis.skipped);
        self.print_orphan_suffixes(analysis);
        println!("{}", "─".repeat(60).dimmed());
        self.print_orphan_declarations(analysis);
        println!();

        Ok(())
    }

    fn print_skipped(&self, skipped: &[SkippedFile]) {
        if skipped.is_empty() {
            return;
        }
        println!();
        println!(
            "{}",
            format!("{} file(s) could not be read and were skipped:", skipped.len()).yellow()
        );
        for file in skipped {
            println!("  {} {}: {}", "!".yellow(), self.relative(&file.path), file.reason.dimmed());
        }
    }

    fn print_orphan_suffixes(&self, analysis: &Analysis) {
        let orphans = analysis.orphan_suffixes();
        println!();

        if orphans.is_empty() {
            println!(
                "{}",
                "✓ Every CSS suffix matches a declared blockClass.".green().bold()
            );
            return;
        }

        println!(
            "{}",
            format!(
                "Found {} CSS suffixes with no matching blockClass:",
                orphans.len()
            )
            .red()
            .bold()
        );
        for suffix in orphans {
            println!();
            println!("  - {}", format!("--{}", suffix).white().bold());
            for location in analysis.suffixes.locations(suffix).iter().take(self.examples) {
                println!(
                    "    {} {} {}",
                    "└─".dimmed(),
                    self.relative(&location.file).cyan(),
                    format!("(selector: \"{}\")", location.selector).dimmed()
                );
            }
        }
        println!();
        println!(
            "{}",
            "Tip: Run `fix` to review and delete these rules".dimmed()
        );
    }

    fn print_orphan_declarations(&self, analysis: &Analysis) {
        let orphans = analysis.orphan_declarations();
        println!();

        if orphans.is_empty() {
            println!(
                "{}",
                "✓ Every declared blockClass has CSS rules.".green().bold()
            );
            return;
        }

        println!(
            "{}",
            format!(
                "Found {} blockClass declarations that no stylesheet uses:",
                orphans.len()
            )
            .yellow()
            .bold()
        );
        for class in orphans {
            println!();
            println!("  - {}", format!("\"{}\"", class).white().bold());
            for location in analysis.declarations.locations(class).iter().take(self.examples) {
                println!(
                    "    {} {} {}",
                    "└─".dimmed(),
                    self.relative(&location.file).cyan(),
                    format!("(block: \"{}\")", location.block).dimmed()
                );
            }
        }
        println!();
        println!(
            "{}",
            "These declarations can be removed from the block files.".dimmed()
        );
    }

    /// Summary printed when a fix run ends
    pub fn report_fix(&self, outcome: &FixOutcome) {
        println!();
        match outcome.status {
            FixStatus::NothingToFix => {
                println!(
                    "{}",
                    "✓ No CSS rules to delete. The project is already clean!".green().bold()
                );
                return;
            }
            FixStatus::Cancelled => {
                println!("{}", "Cleanup cancelled by the user.".yellow().bold());
            }
            FixStatus::Completed => {
                println!("{}", "✓ Cleanup complete.".green().bold());
            }
            FixStatus::Failed => {
                println!("{}", "Cleanup stopped by an error.".red().bold());
            }
        }

        println!(
            "  {} rule(s) deleted, {} rule(s) kept",
            outcome.deleted.len(),
            outcome.kept.len()
        );
        for file in &outcome.files_modified {
            println!("  {} {}", "saved".dimmed(), self.relative(file));
        }
    }
}
