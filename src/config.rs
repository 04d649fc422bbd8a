//! Configuration loaded from `aggq.toml`.
//!
//! ```toml
//! [repl]
//! prompt = "aggq> "
//! history = true
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{QueryError, QueryResult};

pub const CONFIG_FILE: &str = "aggq.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repl: ReplConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// Persist REPL history in the home directory.
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "aggq> ".to_string(),
            history: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Sql,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Sql,
    Json,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Load from an explicit file.
    pub fn from_path(path: &Path) -> QueryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load using the lookup order: `explicit`, `./aggq.toml`, then the user config dir.
    ///
    /// Falls back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>) -> QueryResult<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        for candidate in Self::candidates() {
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "loading config");
                return Self::from_path(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("aggq").join("config.toml"));
        }
        paths
    }

    /// Where REPL history is stored, when enabled.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.repl.history {
            return None;
        }
        dirs::home_dir().map(|p| p.join(".aggq_history"))
    }
}
