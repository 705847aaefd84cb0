use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Answer to "delete this rule?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
    /// Stop the whole run
    Abort,
}

/// What the user is shown for one candidate rule
#[derive(Debug, Clone, Copy)]
pub struct CandidateView<'a> {
    /// 1-based position of the file among all stylesheets
    pub file_index: usize,
    pub file_total: usize,
    /// 1-based position of the rule among the file's candidates
    pub candidate_index: usize,
    pub candidate_total: usize,
    pub file: &'a Path,
    pub rule_text: &'a str,
    pub selectors: &'a [String],
}

/// Confirmation collaborator of the fix engine
pub trait FixPrompt {
    /// Decide the fate of one candidate rule
    fn decide(&mut self, candidate: &CandidateView<'_>) -> Result<Decision>;

    /// Called after a modified stylesheet was saved
    fn file_saved(&mut self, _file: &Path, _removed: usize) -> Result<()> {
        Ok(())
    }
}

/// Interactive terminal prompt, one rule at a time.
///
/// Esc or `q` at the prompt aborts the run.
pub struct TerminalPrompt {
    project_root: PathBuf,
    term: Term,
}

impl TerminalPrompt {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            term: Term::stdout(),
        }
    }

    fn relative<'a>(&self, file: &'a Path) -> &'a Path {
        file.strip_prefix(&self.project_root).unwrap_or(file)
    }
}

impl FixPrompt for TerminalPrompt {
    fn decide(&mut self, candidate: &CandidateView<'_>) -> Result<Decision> {
        let rule = "─".repeat(66);

        self.term.clear_screen().into_diagnostic()?;
        println!(
            "{}",
            format!("[ File {} of {} ]", candidate.file_index, candidate.file_total).dimmed()
        );
        println!("{}", rule.dimmed());
        println!("Reviewing {}", self.relative(candidate.file).display().to_string().cyan().bold());
        println!(
            "Candidate {} of {}",
            candidate.candidate_index, candidate.candidate_total
        );
        println!("{}", rule.dimmed());
        println!("This rule only styles block classes no block declares:");
        println!();
        println!("{}", candidate.rule_text.yellow());
        println!();

        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete this rule?")
            .default(true)
            .interact_opt()
            .into_diagnostic()?;

        let decision = match answer {
            Some(true) => {
                println!("{}", "  Rule deleted.".red());
                Decision::Accept
            }
            Some(false) => {
                println!("{}", "  Rule kept.".green());
                Decision::Decline
            }
            None => {
                println!();
                println!("{}", "Cleanup cancelled.".yellow().bold());
                Decision::Abort
            }
        };
        Ok(decision)
    }

    fn file_saved(&mut self, file: &Path, removed: usize) -> Result<()> {
        println!();
        println!(
            "{} Saved {} ({} rule{} removed)",
            "✓".green(),
            self.relative(file).display(),
            removed,
            if removed == 1 { "" } else { "s" }
        );

        println!("{}", "Press Enter to continue with the next file...".dimmed());
        self.term.read_line().into_diagnostic()?;
        Ok(())
    }
}

/// Accepts every candidate without asking
#[derive(Debug, Default)]
pub struct AcceptAll;

impl FixPrompt for AcceptAll {
    fn decide(&mut self, candidate: &CandidateView<'_>) -> Result<Decision> {
        info!(
            "Deleting `{}` from {}",
            candidate.selectors.join(", "),
            candidate.file.display()
        );
        Ok(Decision::Accept)
    }
}
