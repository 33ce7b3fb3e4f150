use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, ConfigError};

/// Settings resolved once at startup and handed to every stage.
#[derive(Clone)]
pub struct ProbeConfig {
    api_token: String,
    pub test_name: String,
    pub target: String,
    pub base_url: Url,
    pub interval: u64,
    pub grace_period: Duration,
    pub request_timeout: Duration,
    pub report_dir: PathBuf,
}

impl ProbeConfig {
    /// Validates merged arguments into a config.
    ///
    /// # Errors
    ///
    /// Returns an error when a required setting is missing or the base URL is invalid.
    pub fn from_args(args: &ProbeArgs) -> AppResult<Self> {
        let api_token = required(
            args.api_token.as_deref(),
            "API token",
            "--token",
            "TE_API_TOKEN",
        )?;
        let test_name = required(
            args.test_name.as_deref(),
            "test name",
            "--test-name",
            "TEST_NAME",
        )?;
        let target = required(args.target.as_deref(), "target", "--target", "TARGET")?;
        let base_url = parse_base_url(&args.base_url)?;

        Ok(Self {
            api_token: api_token.trim().to_owned(),
            test_name: test_name.to_owned(),
            target: target.trim().to_owned(),
            base_url,
            interval: args.interval,
            grace_period: args.grace_period,
            request_timeout: args.request_timeout,
            report_dir: args.report_dir.clone(),
        })
    }

    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("api_token", &"<redacted>")
            .field("test_name", &self.test_name)
            .field("target", &self.target)
            .field("base_url", &self.base_url.as_str())
            .field("interval", &self.interval)
            .field("grace_period", &self.grace_period)
            .field("request_timeout", &self.request_timeout)
            .field("report_dir", &self.report_dir)
            .finish()
    }
}

fn required<'arg>(
    value: Option<&'arg str>,
    field: &'static str,
    flag: &'static str,
    env: &'static str,
) -> AppResult<&'arg str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) | None => Err(AppError::config(ConfigError::MissingSetting {
            field,
            flag,
            env,
        })),
    }
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| {
        AppError::config(ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(AppError::config(ConfigError::UnsupportedScheme {
            url: raw.to_owned(),
        })),
    }
}
