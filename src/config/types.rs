use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

/// On-disk settings. The API token is only read from the CLI or environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub test_name: Option<String>,
    pub target: Option<String>,
    pub interval: Option<u64>,
    pub grace_period: Option<DurationValue>,
    pub request_timeout: Option<DurationValue>,
    pub report_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            Self::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            Self::Text(text) => parse_duration_value(text, false),
        }
    }

    pub(crate) fn to_grace_period(&self) -> Result<Duration, ValidationError> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            Self::Text(text) => parse_duration_value(text, true),
        }
    }
}
