use crate::error::SanitizerError;
use std::path::{Path, PathBuf};

/// Writes rewritten stylesheets back to disk
pub struct FileEditor;

impl FileEditor {
    pub fn new() -> Self {
        Self
    }

    /// Replace the contents of `path`.
    ///
    /// The new text goes to a sibling temp file that is then renamed over
    /// the original, so a failed write never leaves a half-written
    /// stylesheet behind.
    pub fn replace_contents(&self, path: &Path, contents: &str) -> Result<(), SanitizerError> {
        let temp = temp_path(path);

        let write_error = |source| SanitizerError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Err(e) = std::fs::write(&temp, contents) {
            let _ = std::fs::remove_file(&temp);
            return Err(write_error(e));
        }

        std::fs::rename(&temp, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp);
            write_error(e)
        })
    }
}

impl Default for FileEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.sanitizer-tmp", name))
}
