use reqwest::StatusCode;

use crate::api::{
    AgentId, CreatedTest, HTTP_SERVER_TESTS_PATH, MonitoringApi, NewHttpServerTest, Operation,
    TestId, TestList,
};
use crate::error::StageError;

use super::reply::{decode, expect_success, status_failure};

/// Whether the test was found by name or created during this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOrigin {
    Existing,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledTest {
    pub id: TestId,
    pub origin: TestOrigin,
}

impl ReconciledTest {
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self.origin, TestOrigin::Created)
    }
}

/// Looks up an HTTP server test by exact, case-sensitive name.
///
/// Only the first page returned by the provider is scanned, and only the
/// matching entry is decoded; malformed unrelated entries are ignored.
///
/// `Ok(None)` means the listing succeeded and no test has this name. A failed
/// listing is always an `Err`, never `None`.
///
/// # Errors
///
/// Returns a stage failure when the listing fails, or when the matching entry
/// is malformed or carries no identifier.
pub async fn find_existing_test<A>(api: &A, name: &str) -> Result<Option<TestId>, StageError>
where
    A: MonitoringApi + ?Sized,
{
    let reply = expect_success(
        Operation::ListTests,
        api.get(HTTP_SERVER_TESTS_PATH).await,
    )?;
    let list: TestList = decode(Operation::ListTests, &reply)?;

    let Some(matched) = list.find_by_name(name) else {
        return Ok(None);
    };
    let test = matched.map_err(|err| {
        tracing::error!("Test '{}' has a malformed listing entry: {}", name, err);
        StageError::Decode {
            operation: Operation::ListTests,
            source: err,
        }
    })?;
    test.test_id.map(Some).ok_or(StageError::MissingTestId {
        operation: Operation::ListTests,
    })
}

/// Creates an enabled agent-to-server test bound to `agent_id`.
///
/// Only `201 Created` counts as success. No retry is attempted.
///
/// # Errors
///
/// Returns a stage failure for any other status, an unreadable body, or a
/// body without `testId`.
pub async fn create_test<A>(
    api: &A,
    name: &str,
    target: &str,
    agent_id: AgentId,
    interval: u64,
) -> Result<TestId, StageError>
where
    A: MonitoringApi + ?Sized,
{
    let payload = NewHttpServerTest::new(name, target, agent_id, interval);
    let body = serde_json::to_value(&payload).map_err(|err| StageError::Encode {
        operation: Operation::CreateTest,
        source: err,
    })?;

    let reply = expect_success(
        Operation::CreateTest,
        api.post_json(HTTP_SERVER_TESTS_PATH, &body).await,
    )?;
    if reply.status != StatusCode::CREATED {
        return Err(status_failure(Operation::CreateTest, &reply));
    }

    let created: CreatedTest = decode(Operation::CreateTest, &reply)?;
    created.test_id.ok_or_else(|| {
        tracing::error!("Create test response did not include a testId: {}", reply.body);
        StageError::MissingTestId {
            operation: Operation::CreateTest,
        }
    })
}

/// Reuses the test named `name` or creates it.
///
/// Lookup and creation are two separate calls; concurrent runs with the same
/// name can both miss each other and create duplicates.
///
/// # Errors
///
/// Returns the failing stage's error. A failed lookup aborts here and never
/// falls through to creation.
pub async fn reconcile_test<A>(
    api: &A,
    name: &str,
    target: &str,
    agent_id: AgentId,
    interval: u64,
) -> Result<ReconciledTest, StageError>
where
    A: MonitoringApi + ?Sized,
{
    if let Some(id) = find_existing_test(api, name).await? {
        return Ok(ReconciledTest {
            id,
            origin: TestOrigin::Existing,
        });
    }

    tracing::debug!(
        "No test named '{}' is visible; creating one (not atomic with the lookup)",
        name
    );
    let id = create_test(api, name, target, agent_id, interval).await?;
    Ok(ReconciledTest {
        id,
        origin: TestOrigin::Created,
    })
}
