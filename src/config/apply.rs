use clap::ArgMatches;
use clap::parser::ValueSource;
use std::path::PathBuf;

use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::loader::load_config;
use super::types::ConfigFile;

/// Merges the config file (explicit or default) into `args`.
///
/// Values given on the command line or through the environment win over the
/// file; the file wins over built-in defaults.
///
/// # Errors
///
/// Returns an error when the config file cannot be loaded or holds invalid values.
pub fn apply_config(args: &mut ProbeArgs, matches: &ArgMatches) -> AppResult<()> {
    let Some(config) = load_config(args.config.as_deref())? else {
        return Ok(());
    };
    apply_config_file(args, matches, &config)
}

pub(crate) fn apply_config_file(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "base_url")
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = base_url;
    }

    if !is_explicit(matches, "test_name")
        && let Some(test_name) = config.test_name.clone()
    {
        args.test_name = Some(test_name);
    }

    if !is_explicit(matches, "target")
        && let Some(target) = config.target.clone()
    {
        args.target = Some(target);
    }

    if !is_explicit(matches, "interval")
        && let Some(interval) = config.interval
    {
        if interval == 0 {
            return Err(AppError::config(ConfigError::FieldMustBePositive {
                field: "interval",
                source: ValidationError::ValueTooSmall { min: 1 },
            }));
        }
        args.interval = interval;
    }

    if !is_explicit(matches, "grace_period")
        && let Some(value) = config.grace_period.as_ref()
    {
        args.grace_period = value.to_grace_period().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "grace_period",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(value) = config.request_timeout.as_ref()
    {
        args.request_timeout = value.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "request_timeout",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "report_dir")
        && let Some(report_dir) = config.report_dir.as_ref()
    {
        args.report_dir = PathBuf::from(report_dir);
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
