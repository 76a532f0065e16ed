// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SzzError {
    #[error("git: {0}")]
    Git(#[from] git2::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse: line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SzzError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}
