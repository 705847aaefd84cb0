use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a sanitizer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding store block files, relative to the project root
    pub store_dir: PathBuf,

    /// Directory holding stylesheets, relative to the project root
    pub styles_dir: PathBuf,

    /// Only stylesheets whose file name starts with this prefix are scanned.
    /// Custom component styles do not follow the naming convention.
    pub stylesheet_prefix: String,

    /// Extensions of store block files
    pub config_extensions: Vec<String>,

    /// Glob patterns of files to leave out
    pub exclude: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Write markdown reports after each command
    pub enabled: bool,

    /// Report directory, relative to the project root
    pub dir: PathBuf,

    /// Locations shown per orphan in terminal output
    pub terminal_examples: usize,

    /// Locations listed per orphan in markdown reports
    pub markdown_examples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("store"),
            styles_dir: PathBuf::from("styles/css"),
            stylesheet_prefix: "vtex.".to_string(),
            config_extensions: vec!["json".to_string(), "jsonc".to_string()],
            exclude: vec![],
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(".sanitizer-reports"),
            terminal_examples: 3,
            markdown_examples: 5,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".sanitizer.yml",
            ".sanitizer.yaml",
            ".sanitizer.toml",
            "sanitizer.yml",
            "sanitizer.yaml",
            "sanitizer.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Compile the exclusion patterns
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .into_diagnostic()
                .wrap_err_with(|| format!("Invalid exclude pattern: {}", pattern))?;
            builder.add(glob);
        }
        builder.build().into_diagnostic()
    }

    /// Check whether `path` is a store block file by extension
    pub fn is_config_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.config_extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }

    /// Check whether `path` is a native stylesheet in scope
    pub fn is_native_stylesheet(&self, path: &Path) -> bool {
        let is_css = path.extension().and_then(|e| e.to_str()) == Some("css");
        let prefixed = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|name| name.starts_with(&self.stylesheet_prefix))
            .unwrap_or(false);
        is_css && prefixed
    }
}
