use crate::config::Config;
use globset::GlobSet;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Files of a store theme that take part in the analysis
#[derive(Debug, Clone, Default)]
pub struct ProjectFiles {
    /// Project root the lists were discovered from
    pub root: PathBuf,

    /// Store block files (`.json` / `.jsonc`), sorted
    pub config_files: Vec<PathBuf>,

    /// Native stylesheets, sorted
    pub stylesheets: Vec<PathBuf>,
}

impl ProjectFiles {
    pub fn new(root: impl Into<PathBuf>, config_files: Vec<PathBuf>, stylesheets: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_files,
            stylesheets,
        }
    }

    /// Path of `file` relative to the project root, for display
    pub fn relative<'a>(&self, file: &'a Path) -> &'a Path {
        file.strip_prefix(&self.root).unwrap_or(file)
    }
}

/// File finder for discovering store and stylesheet files in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find block files under the store directory and native stylesheets
    /// under the styles directory
    pub fn find(&self, root: &Path) -> Result<ProjectFiles> {
        let exclude = self.config.exclude_set()?;

        let store = root.join(&self.config.store_dir);
        let styles = root.join(&self.config.styles_dir);
        debug!("Scanning {} and {}", store.display(), styles.display());

        let config_files = self.scan_directory(root, &store, &exclude, |path| {
            self.config.is_config_file(path)
        });
        let stylesheets = self.scan_directory(root, &styles, &exclude, |path| {
            self.config.is_native_stylesheet(path)
        });

        debug!(
            "Found {} block files, {} native stylesheets",
            config_files.len(),
            stylesheets.len()
        );

        Ok(ProjectFiles::new(root, config_files, stylesheets))
    }

    /// Collect files under `dir` accepted by `accept`, sorted by path
    fn scan_directory(
        &self,
        root: &Path,
        dir: &Path,
        exclude: &GlobSet,
        accept: impl Fn(&Path) -> bool,
    ) -> Vec<PathBuf> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path);
                if exclude.is_match(relative) {
                    trace!("Excluding: {}", path.display());
                    return false;
                }
                accept(path)
            })
            .collect();

        files.sort();
        files
    }
}
