// src/config.rs

use crate::error::SzzError;
use serde::Deserialize;
use std::path::Path;

/// Tunable knobs for linking and tracing, read from an optional TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only affected paths containing this marker are traced
    pub source_extension: String,
    /// Commits touching more than `multiplier * median` files are outliers
    pub outlier_multiplier: usize,
    /// Largest allowed gap between a fix and a suspect, in seconds
    pub max_fix_gap_secs: i64,
    /// Worker override; capped by hardware parallelism
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extension: ".java".to_string(),
            outlier_multiplier: 5,
            max_fix_gap_secs: 63_000_000,
            workers: None,
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, SzzError> {
        Ok(toml::from_str(contents)?)
    }

    /// Defaults when no path is given; a given path must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, SzzError> {
        match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }
}
