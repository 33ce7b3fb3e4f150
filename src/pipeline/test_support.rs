use std::sync::Mutex;

use async_trait::async_trait;

use super::{ReadinessGate, ReconciledTest};

/// Gate that returns immediately and records which tests it was asked about.
#[derive(Debug, Default)]
pub(crate) struct RecordingGate {
    seen: Mutex<Vec<ReconciledTest>>,
}

impl RecordingGate {
    pub(crate) fn seen(&self) -> Vec<ReconciledTest> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ReadinessGate for RecordingGate {
    async fn wait_for_results(&self, test: &ReconciledTest) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(*test),
            Err(poisoned) => poisoned.into_inner().push(*test),
        }
    }
}
