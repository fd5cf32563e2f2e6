use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".propdocrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories scanned for configuration sources.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
    /// Directory the metadata document is stored in, relative to the
    /// project directory.
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,
    /// A file is a candidate only if one of these strings occurs in its
    /// head lines.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_marker_scan_lines")]
    pub marker_scan_lines: usize,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_deprecation_marker")]
    pub deprecation_marker: String,
    /// Source-type suffixes whose items are rebuilt every run and never
    /// merged from a previous document.
    #[serde(default = "default_regenerated_suffixes")]
    pub regenerated_suffixes: Vec<String>,
}

fn default_roots() -> Vec<String> {
    vec![".".to_string()]
}

fn default_metadata_dir() -> String {
    "META-INF".to_string()
}

fn default_markers() -> Vec<String> {
    vec!["http://www.springframework.org/schema/".to_string()]
}

fn default_marker_scan_lines() -> usize {
    20
}

fn default_deprecation_marker() -> String {
    "@deprecated".to_string()
}

fn default_regenerated_suffixes() -> Vec<String> {
    vec![".xml".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            metadata_dir: default_metadata_dir(),
            markers: default_markers(),
            marker_scan_lines: default_marker_scan_lines(),
            ignores: Vec::new(),
            deprecation_marker: default_deprecation_marker(),
            regenerated_suffixes: default_regenerated_suffixes(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
