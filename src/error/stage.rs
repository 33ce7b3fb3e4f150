use thiserror::Error;

use super::ApiError;
use crate::api::Operation;

/// Failure of one pipeline stage. The driver decides whether it aborts the run.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("{operation} failed: {status} - {body}")]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },
    #[error("{operation} request failed: {source}")]
    Request {
        operation: Operation,
        #[source]
        source: ApiError,
    },
    #[error("{operation} returned an unreadable body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode {operation} payload: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("No agents found in your account.")]
    NoAgents,
    #[error("{operation} response did not include a testId.")]
    MissingTestId { operation: Operation },
}

impl StageError {
    /// True for expected-absence outcomes, as opposed to HTTP or transport failures.
    #[must_use]
    pub const fn is_empty_collection(&self) -> bool {
        matches!(self, Self::NoAgents)
    }
}
