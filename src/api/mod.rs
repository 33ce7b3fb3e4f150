//! ThousandEyes REST client, wire types and the endpoints the tool calls.
mod client;
mod endpoints;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ApiReply, MonitoringApi, ThousandEyesClient};
pub use endpoints::{DEFAULT_BASE_URL, Operation};
pub use types::{
    Agent, AgentId, AgentList, AgentRef, CreatedTest, NewHttpServerTest, ResultEntry, ResultSet,
    TEST_PROTOCOL, TEST_TYPE, TestId, TestList, TestSummary,
};

pub(crate) use endpoints::{AGENTS_PATH, HTTP_SERVER_TESTS_PATH, http_server_results_path};
