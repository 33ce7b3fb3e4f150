use std::fmt;

use super::types::TestId;

/// Default public API root (v7).
pub const DEFAULT_BASE_URL: &str = "https://api.thousandeyes.com/v7";

pub(crate) const AGENTS_PATH: &str = "agents";
pub(crate) const HTTP_SERVER_TESTS_PATH: &str = "tests/http-server";

pub(crate) fn http_server_results_path(test_id: TestId) -> String {
    format!("test-results/{}/http-server", test_id)
}

/// Remote calls issued by the pipeline, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAgents,
    ListTests,
    CreateTest,
    FetchResults,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListAgents => "Fetch agents",
            Self::ListTests => "Retrieve tests",
            Self::CreateTest => "Create test",
            Self::FetchResults => "Retrieve test results",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
