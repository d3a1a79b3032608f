use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MorphoError {
    #[error("failed to build http client: {0}")]
    ClientBuild(String),

    #[error("neuromorpho request failed on page {page}: {message}")]
    Transport { page: usize, message: String },

    #[error("neuromorpho returned status {status} on page {page}")]
    Status { status: u16, page: usize },

    #[error("failed to decode neuromorpho response on page {page}: {message}")]
    Decode { page: usize, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("unknown metric name: {0}")]
    UnknownMetric(String),

    #[error("output error: {0}")]
    Output(String),
}

impl MorphoError {
    /// Page index a retrieval error occurred on, if this is a retrieval error.
    pub fn page(&self) -> Option<usize> {
        match self {
            MorphoError::Transport { page, .. }
            | MorphoError::Status { page, .. }
            | MorphoError::Decode { page, .. } => Some(*page),
            _ => None,
        }
    }
}
