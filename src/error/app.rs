use thiserror::Error;

use super::{ApiError, ConfigError, ReportError, StageError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("API client error: {0}")]
    Api(#[from] ApiError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("No valid agent available. {source}")]
    NoAgent {
        #[source]
        source: StageError,
    },
    #[error("Test reconciliation failed. {source}")]
    Reconcile {
        #[source]
        source: StageError,
    },
    #[error("No results returned. {source}")]
    NoResults {
        #[source]
        source: StageError,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }
}
