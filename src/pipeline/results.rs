use serde_json::Value;

use crate::api::{MonitoringApi, Operation, ResultSet, TestId, http_server_results_path};
use crate::error::StageError;

use super::reply::{decode, expect_success};

/// One-shot fetch of the latest HTTP server results for `test_id`.
///
/// # Errors
///
/// Returns a stage failure on a transport error, a non-2xx status or a body
/// that is not JSON.
pub async fn fetch_results<A>(api: &A, test_id: TestId) -> Result<ResultSet, StageError>
where
    A: MonitoringApi + ?Sized,
{
    let path = http_server_results_path(test_id);
    let reply = expect_success(Operation::FetchResults, api.get(&path).await)?;
    let payload: Value = decode(Operation::FetchResults, &reply)?;
    Ok(ResultSet::from_payload(payload))
}
