use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type AgentId = u64;
pub type TestId = u64;

/// Fixed test type sent on creation.
pub const TEST_TYPE: &str = "agent-to-server";
/// Fixed probe protocol sent on creation.
pub const TEST_PROTOCOL: &str = "ICMP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(deserialize_with = "lenient_id")]
    pub agent_id: AgentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub agent_name: String,
}

/// Agent listing. Entries stay raw so that only the one selected is decoded.
#[derive(Debug, Default, Deserialize)]
pub struct AgentList {
    #[serde(default)]
    pub agents: Vec<Value>,
}

impl AgentList {
    /// Decodes the first listed agent; later entries are never inspected.
    #[must_use]
    pub fn first_agent(&self) -> Option<Result<Agent, serde_json::Error>> {
        self.agents.first().map(Agent::deserialize)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    #[serde(default, deserialize_with = "lenient_opt_id")]
    pub test_id: Option<TestId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub test_name: String,
}

/// Test listing. Entries stay raw so that malformed unrelated tests are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct TestList {
    #[serde(default)]
    pub tests: Vec<Value>,
}

impl TestList {
    /// Decodes the first entry whose `testName` equals `name` exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Result<TestSummary, serde_json::Error>> {
        self.tests
            .iter()
            .find(|entry| entry.get("testName").and_then(Value::as_str) == Some(name))
            .map(TestSummary::deserialize)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    pub agent_id: AgentId,
}

/// Creation payload for an agent-to-server HTTP server test.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHttpServerTest<'req> {
    pub test_name: &'req str,
    #[serde(rename = "type")]
    pub test_type: &'static str,
    pub url: &'req str,
    pub interval: u64,
    pub protocol: &'static str,
    pub enabled: bool,
    pub agents: Vec<AgentRef>,
}

impl<'req> NewHttpServerTest<'req> {
    #[must_use]
    pub fn new(test_name: &'req str, url: &'req str, agent_id: AgentId, interval: u64) -> Self {
        Self {
            test_name,
            test_type: TEST_TYPE,
            url,
            interval,
            protocol: TEST_PROTOCOL,
            enabled: true,
            agents: vec![AgentRef { agent_id }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTest {
    #[serde(default, deserialize_with = "lenient_opt_id")]
    pub test_id: Option<TestId>,
}

/// Raw result payload as returned by the provider.
///
/// The document is kept untouched so the persisted report is exactly what the
/// API returned; [`ResultEntry`] gives a read-only view over single entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    payload: Value,
}

impl ResultSet {
    #[must_use]
    pub const fn from_payload(payload: Value) -> Self {
        Self { payload }
    }

    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    #[must_use]
    pub fn entries(&self) -> &[Value] {
        self.payload
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Positionally first entry, which is not necessarily the newest.
    #[must_use]
    pub fn first_entry(&self) -> Option<ResultEntry<'_>> {
        self.entries().first().map(ResultEntry::new)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResultEntry<'doc> {
    raw: &'doc Value,
}

impl<'doc> ResultEntry<'doc> {
    #[must_use]
    pub const fn new(raw: &'doc Value) -> Self {
        Self { raw }
    }

    /// Returns the field unless it is absent or JSON null.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'doc Value> {
        self.raw.get(key).filter(|value| !value.is_null())
    }

    #[must_use]
    pub fn agent_name(&self) -> Option<&'doc Value> {
        self.field("agent")
            .and_then(|agent| agent.get("agentName"))
            .filter(|value| !value.is_null())
    }

    #[must_use]
    pub fn agent_id(&self) -> Option<&'doc Value> {
        self.field("agent")
            .and_then(|agent| agent.get("agentId"))
            .filter(|value| !value.is_null())
    }

    /// Health score as a float; numeric strings are accepted.
    #[must_use]
    pub fn health_score(&self) -> Option<f64> {
        let score = match self.field("healthScore")? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        };
        score.filter(|value| value.is_finite())
    }
}

/// Provider identifiers arrive either as JSON numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl IdRepr {
    fn into_id<E: de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|err| E::custom(format!("invalid identifier '{}': {}", text, err))),
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    IdRepr::deserialize(deserializer)?.into_id()
}

fn lenient_opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IdRepr>::deserialize(deserializer)?
        .map(IdRepr::into_id)
        .transpose()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
