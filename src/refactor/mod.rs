// Stylesheet rewriting: the interactive fix loop and its collaborators

mod editor;
mod fix_engine;
mod prompt;
mod undo;

pub use editor::FileEditor;
pub use fix_engine::{FixEngine, FixOutcome, FixReportEntry, FixStatus};
pub use prompt::{AcceptAll, CandidateView, Decision, FixPrompt, TerminalPrompt};
pub use undo::UndoScript;
