//! Interactive rule deletion
//!
//! Every stylesheet is re-read and parsed before the first question, so a
//! broken file stops the run while nothing on disk has changed yet. The
//! engine then walks the documents one at a time, finds the rules made only
//! of orphaned suffixes, and asks the prompt about each of them in document
//! order. Accepted rules are detached from the in-memory document, which is
//! written back once the file is done. An abort stops the run at the
//! candidate boundary: deletions already accepted in the current file are
//! saved, nothing after it is touched.
//!
//! Once files start changing, a prompt or write failure no longer discards
//! the run: the outcome comes back with status `Failed` and the error, so
//! the caller can still write the undo script and the report.

use super::editor::FileEditor;
use super::prompt::{CandidateView, Decision, FixPrompt};
use super::undo::UndoScript;
use crate::analysis::{identify_candidates, OrphanSuffixSet, RuleCandidate};
use crate::parser::Stylesheet;
use miette::{Report, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rule that was offered for deletion, and where it lived
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixReportEntry {
    pub rule: String,
    pub file: PathBuf,
}

/// How a fix run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    /// Every candidate of every file was resolved
    Completed,
    /// The user aborted mid-run
    Cancelled,
    /// No candidate rules existed; nothing was written
    NothingToFix,
    /// A prompt or write error stopped the run after it started
    Failed,
}

#[derive(Debug)]
pub struct FixOutcome {
    pub status: FixStatus,
    pub deleted: Vec<FixReportEntry>,
    pub kept: Vec<FixReportEntry>,
    /// Stylesheets rewritten on disk, in processing order
    pub files_modified: Vec<PathBuf>,
    /// Original contents of rewritten files, when requested
    pub undo_script: Option<UndoScript>,
    /// Error that stopped a `Failed` run
    pub failure: Option<Report>,
}

impl FixOutcome {
    fn new(undo_script: Option<UndoScript>) -> Self {
        Self {
            status: FixStatus::NothingToFix,
            deleted: Vec::new(),
            kept: Vec::new(),
            files_modified: Vec::new(),
            undo_script,
            failure: None,
        }
    }

    fn fail(mut self, error: Report) -> Self {
        self.status = FixStatus::Failed;
        self.failure = Some(error);
        self
    }

    /// Whether a fix report has anything to say
    pub fn has_entries(&self) -> bool {
        !self.deleted.is_empty() || !self.kept.is_empty()
    }
}

/// Per-file, per-rule deletion driver
pub struct FixEngine {
    editor: FileEditor,
    record_undo: bool,
}

impl FixEngine {
    pub fn new() -> Self {
        Self {
            editor: FileEditor::new(),
            record_undo: false,
        }
    }

    /// Keep the original contents of every rewritten file
    pub fn with_undo_script(mut self, record: bool) -> Self {
        self.record_undo = record;
        self
    }

    /// Candidate rules of every stylesheet, without prompting or writing
    pub fn preview(&self, stylesheets: &[PathBuf], orphans: &OrphanSuffixSet) -> Result<Vec<RuleCandidate>> {
        if orphans.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();
        for path in stylesheets {
            let doc = Stylesheet::read(path)?;
            candidates.extend(identify_candidates(&doc, orphans));
        }
        Ok(candidates)
    }

    /// Run the confirmation loop over `stylesheets`.
    ///
    /// Read and parse failures return `Err` before any prompt or write. Any
    /// later failure ends the run with [`FixStatus::Failed`] and keeps the
    /// entries and undo data of everything already on disk.
    pub fn run(
        &self,
        stylesheets: &[PathBuf],
        orphans: &OrphanSuffixSet,
        prompt: &mut dyn FixPrompt,
    ) -> Result<FixOutcome> {
        let mut outcome = FixOutcome::new(self.record_undo.then(UndoScript::new));

        if orphans.is_empty() {
            info!("No orphaned suffixes, nothing to fix");
            return Ok(outcome);
        }

        let documents = stylesheets
            .iter()
            .map(|path| Stylesheet::read(path))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let file_total = documents.len();
        for (file_index, mut doc) in documents.into_iter().enumerate() {
            let candidates = identify_candidates(&doc, orphans);
            if candidates.is_empty() {
                debug!("{}: no candidate rules", doc.path().display());
                continue;
            }

            let deleted_before = outcome.deleted.len();
            let kept_before = outcome.kept.len();
            let mut removed = 0;
            let mut stop = None;

            for (candidate_index, candidate) in candidates.iter().enumerate() {
                let view = CandidateView {
                    file_index: file_index + 1,
                    file_total,
                    candidate_index: candidate_index + 1,
                    candidate_total: candidates.len(),
                    file: doc.path(),
                    rule_text: &candidate.text,
                    selectors: &candidate.selectors,
                };

                match prompt.decide(&view) {
                    Ok(Decision::Accept) => {
                        outcome.deleted.push(entry(candidate, doc.path()));
                        doc.detach(candidate.rule);
                        removed += 1;
                    }
                    Ok(Decision::Decline) => {
                        outcome.kept.push(entry(candidate, doc.path()));
                    }
                    Ok(Decision::Abort) => {
                        stop = Some(Stop::Abort);
                        break;
                    }
                    Err(e) => {
                        stop = Some(Stop::Failed(e));
                        break;
                    }
                }
            }

            if removed > 0 {
                if let Err(e) = self.save(&doc, &mut outcome) {
                    // Nothing of this file reached the disk
                    outcome.deleted.truncate(deleted_before);
                    outcome.kept.truncate(kept_before);
                    return Ok(outcome.fail(e));
                }
                info!("{}: removed {} rule(s)", doc.path().display(), removed);
                if stop.is_none() {
                    if let Err(e) = prompt.file_saved(doc.path(), removed) {
                        return Ok(outcome.fail(e));
                    }
                }
            }

            match stop {
                Some(Stop::Abort) => {
                    info!("Fix cancelled while reviewing {}", doc.path().display());
                    outcome.status = FixStatus::Cancelled;
                    return Ok(outcome);
                }
                Some(Stop::Failed(e)) => return Ok(outcome.fail(e)),
                None => {}
            }
        }

        outcome.status = if outcome.has_entries() {
            FixStatus::Completed
        } else {
            FixStatus::NothingToFix
        };
        Ok(outcome)
    }

    fn save(&self, doc: &Stylesheet, outcome: &mut FixOutcome) -> Result<()> {
        self.editor.replace_contents(doc.path(), &doc.to_source())?;
        if let Some(undo) = outcome.undo_script.as_mut() {
            undo.record_original(doc.path(), doc.source());
        }
        outcome.files_modified.push(doc.path().to_path_buf());
        Ok(())
    }
}

impl Default for FixEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the candidate loop of a file ended early
enum Stop {
    Abort,
    Failed(Report),
}

fn entry(candidate: &RuleCandidate, path: &Path) -> FixReportEntry {
    FixReportEntry {
        rule: candidate.text.clone(),
        file: path.to_path_buf(),
    }
}
