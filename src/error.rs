use std::{io, path::PathBuf};

use thiserror::Error;

use crate::constants::GRAPH_SETTINGS;

#[derive(Debug, Error)]
pub enum TimyError {
    #[error("history file {path}: {source}")]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("invalid duration '{0}', expected a positive number of minutes")]
    InvalidDuration(String),
    #[error("window length must be between 1 and {} days", GRAPH_SETTINGS.max_window_days)]
    InvalidWindow,
    #[error("unsupported shell: {0}. Use bash, zsh, or fish.")]
    UnsupportedShell(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TimyError {
    pub fn history_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::HistoryIo {
            path: path.into(),
            source,
        }
    }
}

pub type TimyResult<T> = Result<T, TimyError>;
