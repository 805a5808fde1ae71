use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::scope::TagPolicy;

pub const CONFIG_FILE_NAME: &str = ".locscanrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Directories (or glob patterns) to scan, relative to the source root.
    /// Empty means the whole source root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Markup attribute that marks a node as translatable (non-empty value)
    /// or excluded (empty value).
    #[serde(default = "default_scope_attribute")]
    pub scope_attribute: String,
    #[serde(default = "default_literal_table_extensions")]
    pub literal_table_extensions: Vec<String>,
    #[serde(default = "default_go_table_extensions")]
    pub go_table_extensions: Vec<String>,
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    #[serde(default)]
    pub tag_policy: TagPolicy,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_scope_attribute() -> String {
    "lang".to_string()
}

fn default_literal_table_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_go_table_extensions() -> Vec<String> {
    vec!["go".to_string()]
}

fn default_markup_extensions() -> Vec<String> {
    ["html", "htm", "xhtml", "php"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            source_root: default_source_root(),
            scope_attribute: default_scope_attribute(),
            literal_table_extensions: default_literal_table_extensions(),
            go_table_extensions: default_go_table_extensions(),
            markup_extensions: default_markup_extensions(),
            tag_policy: TagPolicy::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is
    /// invalid, or if the scope attribute is blank.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.scope_attribute.trim().is_empty() {
            anyhow::bail!("'scopeAttribute' must not be empty");
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
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
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
