use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::DEFAULT_BASE_URL;

use super::defaults::{
    DEFAULT_GRACE_PERIOD, DEFAULT_INTERVAL, DEFAULT_REPORT_DIR, DEFAULT_REQUEST_TIMEOUT,
};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_grace_period, parse_positive_u64};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Find or create a ThousandEyes HTTP server test, fetch its latest results, print a summary and save the raw report.",
    next_help_heading = "Advanced Options"
)]
pub struct ProbeArgs {
    /// ThousandEyes API bearer token
    #[arg(
        long = "token",
        env = "TE_API_TOKEN",
        hide_env_values = true,
        help_heading = "Common Options"
    )]
    pub api_token: Option<String>,

    /// Test name, used as the lookup key and as the report file stem
    #[arg(
        long = "test-name",
        short = 'n',
        env = "TEST_NAME",
        help_heading = "Common Options"
    )]
    pub test_name: Option<String>,

    /// Target URL or host, used only when the test has to be created
    #[arg(long, short = 't', env = "TARGET", help_heading = "Common Options")]
    pub target: Option<String>,

    /// API root URL
    #[arg(long = "base-url", env = "TE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Test interval in seconds, applied on creation
    #[arg(
        long,
        env = "TE_TEST_INTERVAL",
        default_value = DEFAULT_INTERVAL,
        value_parser = parse_positive_u64
    )]
    pub interval: u64,

    /// Wait after creating a test before fetching results (e.g. 90s, 2m, 0 to skip)
    #[arg(
        long = "grace-period",
        env = "TE_GRACE_PERIOD",
        default_value = DEFAULT_GRACE_PERIOD,
        value_parser = parse_grace_period
    )]
    pub grace_period: Duration,

    /// Timeout for each API request (e.g. 30s, 1m)
    #[arg(
        long = "request-timeout",
        env = "TE_REQUEST_TIMEOUT",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Directory the `<test-name>_report.json` file is written to
    #[arg(
        long = "report-dir",
        env = "TE_REPORT_DIR",
        default_value = DEFAULT_REPORT_DIR
    )]
    pub report_dir: PathBuf,

    /// Path to a TOML or JSON config file (defaults to te-probe.toml / te-probe.json)
    #[arg(long, short = 'c', help_heading = "Common Options")]
    pub config: Option<String>,

    /// Do not load variables from a .env file in the working directory
    #[arg(long = "no-dotenv")]
    pub no_dotenv: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by TE_PROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v', help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
