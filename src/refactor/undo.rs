use indexmap::IndexMap;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

/// Shell script that restores stylesheets rewritten by a fix run
#[derive(Debug, Default)]
pub struct UndoScript {
    /// Contents of each stylesheet before its first rewrite
    originals: IndexMap<PathBuf, String>,
}

impl UndoScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the contents of a stylesheet before it is rewritten. Only
    /// the first recording for a path is kept.
    pub fn record_original(&mut self, path: &Path, contents: &str) {
        self.originals
            .entry(path.to_path_buf())
            .or_insert_with(|| contents.to_string());
    }

    pub fn file_count(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Render the script text
    pub fn render(&self) -> String {
        let mut script = String::new();

        script.push_str("#!/bin/bash\n");
        script.push_str("# vtex-css-sanitizer undo script\n");
        script.push_str("# Restores every stylesheet rewritten by `fix`\n\n");
        script.push_str("set -e\n\n");

        for (path, contents) in &self.originals {
            let quoted = path.display().to_string().replace('\'', "'\\''");

            script.push_str(&format!("# {}\n", path.display()));
            script.push_str(&format!("cat > '{}' << 'SANITIZER_EOF'\n", quoted));
            script.push_str(contents);
            if !contents.ends_with('\n') {
                script.push('\n');
            }
            script.push_str("SANITIZER_EOF\n");
            script.push_str(&format!("echo '  restored {}'\n\n", quoted));
        }

        script.push_str(&format!("echo 'Restored {} stylesheet(s).'\n", self.originals.len()));
        script
    }

    /// Write the script and make it executable
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).into_diagnostic()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path).into_diagnostic()?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(path, perms).into_diagnostic()?;
        }

        Ok(())
    }
}
