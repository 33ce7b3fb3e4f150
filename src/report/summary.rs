use serde_json::Value;

use crate::api::{ResultEntry, ResultSet};

/// Placeholder rendered for absent or null result fields.
pub const MISSING_VALUE: &str = "n/a";
pub const EMPTY_RESULTS_MESSAGE: &str = "[!] No HTTP server test results available.";

const HEADER: &str = "========== HTTP SERVER TEST RESULTS ==========";
const DIVIDER: &str = "----------------------------------------------";
const FOOTER: &str = "==============================================";

/// Values the summary echoes from the run configuration rather than the payload.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'cfg> {
    pub test_name: &'cfg str,
    pub target: &'cfg str,
}

/// Renders the first entry of `results`, or the empty-results notice.
#[must_use]
pub fn summary_lines(results: &ResultSet, context: SummaryContext<'_>) -> Vec<String> {
    let Some(entry) = results.first_entry() else {
        return vec![EMPTY_RESULTS_MESSAGE.to_owned()];
    };

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(HEADER.to_owned());
    lines.push(labeled("Test Name", context.test_name));
    lines.push(labeled(
        "Agent",
        &format!(
            "{} (ID: {})",
            render(entry.agent_name()),
            render(entry.agent_id())
        ),
    ));
    lines.push(labeled("Test Date", &render(entry.field("date"))));
    lines.push(labeled("Target URL", context.target));
    lines.push(DIVIDER.to_owned());
    lines.push(labeled("Response Code", &render(entry.field("responseCode"))));
    for (label, key) in [
        ("Response Time", "responseTime"),
        ("Redirect Time", "redirectTime"),
        ("DNS Time", "dnsTime"),
        ("SSL Time", "sslTime"),
        ("Connect Time", "connectTime"),
        ("Wait Time", "waitTime"),
        ("Receive Time", "receiveTime"),
        ("Total Time", "totalTime"),
    ] {
        lines.push(with_unit(label, &entry, key, "ms"));
    }
    lines.push(with_unit("Throughput", &entry, "throughput", "bytes/sec"));
    lines.push(with_unit("Wire Size", &entry, "wireSize", "bytes"));
    lines.push(labeled("Server IP", &render(entry.field("serverIp"))));
    lines.push(labeled("SSL Cipher", &render(entry.field("sslCipher"))));
    lines.push(labeled("SSL Version", &render(entry.field("sslVersion"))));
    lines.push(labeled("Health Score", &health_score(&entry)));
    lines.push(FOOTER.to_owned());
    lines.push(String::new());
    lines
}

pub fn print_summary(results: &ResultSet, context: SummaryContext<'_>) {
    if results.is_empty() {
        tracing::warn!("Result collection is empty");
    }
    for line in summary_lines(results, context) {
        println!("{}", line);
    }
}

fn labeled(label: &str, value: &str) -> String {
    format!(" {:<14}: {}", label, value)
}

fn with_unit(label: &str, entry: &ResultEntry<'_>, key: &str, unit: &str) -> String {
    match entry.field(key) {
        Some(value) => labeled(label, &format!("{} {}", render_value(value), unit)),
        None => labeled(label, MISSING_VALUE),
    }
}

fn health_score(entry: &ResultEntry<'_>) -> String {
    entry
        .health_score()
        .map_or_else(|| MISSING_VALUE.to_owned(), |score| format!("{:.4}", score))
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_owned(), render_value)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}
