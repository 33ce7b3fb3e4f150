use serde::de::DeserializeOwned;

use crate::api::{ApiReply, Operation};
use crate::error::{ApiError, StageError};

/// Turns a transport failure or non-2xx reply into a stage failure.
pub(super) fn expect_success(
    operation: Operation,
    reply: Result<ApiReply, ApiError>,
) -> Result<ApiReply, StageError> {
    let reply = reply.map_err(|err| {
        tracing::error!("{} request failed: {}", operation, err);
        StageError::Request {
            operation,
            source: err,
        }
    })?;
    if !reply.is_success() {
        return Err(status_failure(operation, &reply));
    }
    Ok(reply)
}

pub(super) fn status_failure(operation: Operation, reply: &ApiReply) -> StageError {
    tracing::error!(
        "{} failed: {} - {}",
        operation,
        reply.status.as_u16(),
        reply.body
    );
    StageError::Status {
        operation,
        status: reply.status.as_u16(),
        body: reply.body.clone(),
    }
}

pub(super) fn decode<T: DeserializeOwned>(
    operation: Operation,
    reply: &ApiReply,
) -> Result<T, StageError> {
    reply.json().map_err(|err| {
        tracing::error!("{} returned an unreadable body: {}", operation, err);
        StageError::Decode {
            operation,
            source: err,
        }
    })
}
