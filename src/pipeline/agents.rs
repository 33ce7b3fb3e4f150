use crate::api::{AGENTS_PATH, Agent, AgentList, MonitoringApi, Operation};
use crate::error::StageError;

use super::reply::{decode, expect_success};

/// Picks the first agent in provider order. There is no scoring or
/// capability matching, and entries after the first are not decoded.
///
/// # Errors
///
/// Returns a stage failure when the listing fails or comes back empty.
pub async fn first_agent<A>(api: &A) -> Result<Agent, StageError>
where
    A: MonitoringApi + ?Sized,
{
    let reply = expect_success(Operation::ListAgents, api.get(AGENTS_PATH).await)?;
    let list: AgentList = decode(Operation::ListAgents, &reply)?;

    let Some(first) = list.first_agent() else {
        return Err(StageError::NoAgents);
    };
    let agent = first.map_err(|err| {
        tracing::error!("First listed agent is malformed: {}", err);
        StageError::Decode {
            operation: Operation::ListAgents,
            source: err,
        }
    })?;
    tracing::debug!("Selected agent {} ({})", agent.agent_name, agent.agent_id);
    Ok(agent)
}
