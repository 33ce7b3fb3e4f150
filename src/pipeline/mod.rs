//! Pipeline stages: agent selection, test reconciliation, readiness wait and
//! result retrieval. Each stage reports failure as a [`StageError`] value and
//! leaves the abort decision to the caller.
//!
//! [`StageError`]: crate::error::StageError
mod agents;
mod readiness;
mod reconcile;
mod reply;
mod results;

#[cfg(test)]
pub(crate) mod test_support;

pub use agents::first_agent;
pub use readiness::{GracePeriod, ReadinessGate};
pub use reconcile::{ReconciledTest, TestOrigin, create_test, find_existing_test, reconcile_test};
pub use results::fetch_results;
