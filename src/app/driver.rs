use std::path::PathBuf;

use crate::api::{Agent, MonitoringApi, ThousandEyesClient};
use crate::config::ProbeConfig;
use crate::error::{AppError, AppResult};
use crate::pipeline::{
    GracePeriod, ReadinessGate, ReconciledTest, fetch_results, first_agent, reconcile_test,
};
use crate::report::{SummaryContext, print_summary, save_report};

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub agent: Agent,
    pub test: ReconciledTest,
    pub report_path: PathBuf,
    pub results_empty: bool,
}

/// Runs the probe against the live API with the configured grace period.
///
/// # Errors
///
/// Returns an error when the client cannot be built or any stage fails.
pub async fn run_probe(config: &ProbeConfig) -> AppResult<ProbeOutcome> {
    let client = ThousandEyesClient::new(config)?;
    let gate = GracePeriod::new(config.grace_period);
    execute(&client, &gate, config).await
}

/// Agent selection, test reconciliation, readiness wait, result fetch,
/// summary and report, strictly in that order.
///
/// # Errors
///
/// Aborts with [`AppError::NoAgent`], [`AppError::Reconcile`] or
/// [`AppError::NoResults`] when the matching stage fails, and with a report
/// error when the report cannot be written. Nothing is written to disk
/// unless results were fetched.
pub async fn execute<A, G>(api: &A, gate: &G, config: &ProbeConfig) -> AppResult<ProbeOutcome>
where
    A: MonitoringApi + ?Sized,
    G: ReadinessGate + ?Sized,
{
    println!("[*] Starting ThousandEyes test automation...");
    tracing::debug!("Running with {:?}", config);

    let agent = first_agent(api).await.map_err(|source| {
        if source.is_empty_collection() {
            tracing::warn!("No agents found in your account.");
        }
        AppError::NoAgent { source }
    })?;
    println!(
        "[✓] Using agent: {} (ID: {})",
        agent.agent_name, agent.agent_id
    );

    let test = reconcile_test(
        api,
        &config.test_name,
        &config.target,
        agent.agent_id,
        config.interval,
    )
    .await
    .map_err(|source| AppError::Reconcile { source })?;
    if test.is_new() {
        println!(
            "[+] Created test '{}' with ID: {}",
            config.test_name, test.id
        );
    } else {
        println!("[✓] Found existing test ID: {}", test.id);
    }

    let wait = gate.expected_wait(&test);
    if !wait.is_zero() {
        println!(
            "[*] Waiting {} seconds for the first results...",
            wait.as_secs()
        );
    }
    gate.wait_for_results(&test).await;

    let results = fetch_results(api, test.id)
        .await
        .map_err(|source| AppError::NoResults { source })?;
    println!("[+] Fetched test results");

    print_summary(
        &results,
        SummaryContext {
            test_name: &config.test_name,
            target: &config.target,
        },
    );

    let report_path = save_report(&config.report_dir, &config.test_name, &results).await?;
    println!("[✓] Report saved to: {}", report_path.display());

    Ok(ProbeOutcome {
        agent,
        test,
        report_path,
        results_empty: results.is_empty(),
    })
}
