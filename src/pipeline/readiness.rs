use std::time::Duration;

use async_trait::async_trait;

use super::reconcile::ReconciledTest;

/// Decides how long to hold off before asking for a test's results.
#[async_trait]
pub trait ReadinessGate: Send + Sync {
    /// Returns once results for `test` are expected to be available.
    async fn wait_for_results(&self, test: &ReconciledTest);

    /// How long [`Self::wait_for_results`] is expected to block for `test`.
    fn expected_wait(&self, _test: &ReconciledTest) -> Duration {
        Duration::ZERO
    }
}

/// Fixed delay after creating a test, on the assumption that the first
/// scheduled run has completed by then. Nothing verifies that it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePeriod {
    delay: Duration,
}

impl GracePeriod {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay applied for `test`; existing tests already have results.
    #[must_use]
    pub fn delay_for(&self, test: &ReconciledTest) -> Duration {
        if test.is_new() {
            self.delay
        } else {
            Duration::ZERO
        }
    }
}

#[async_trait]
impl ReadinessGate for GracePeriod {
    fn expected_wait(&self, test: &ReconciledTest) -> Duration {
        self.delay_for(test)
    }

    async fn wait_for_results(&self, test: &ReconciledTest) {
        let delay = self.delay_for(test);
        if delay.is_zero() {
            return;
        }
        tracing::debug!("Sleeping {:?} before fetching results for test {}", delay, test.id);
        tokio::time::sleep(delay).await;
    }
}
