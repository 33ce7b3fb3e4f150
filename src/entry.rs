use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use te_probe::app;
use te_probe::args::ProbeArgs;
use te_probe::config::{ProbeConfig, apply_config, load_dotenv};
use te_probe::error::AppResult;
use te_probe::logger::init_logging;

const NO_DOTENV_FLAG: &str = "--no-dotenv";

pub(crate) fn run() -> AppResult<()> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    // `.env` feeds clap's env fallbacks, so it has to load before parsing.
    let dotenv_path = if skips_dotenv(&raw_args) {
        None
    } else {
        load_dotenv()?
    };

    let (mut args, matches) = parse_args(raw_args)?;

    init_logging(args.verbose, args.no_color);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    apply_config(&mut args, &matches)?;
    let config = ProbeConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(app::run_probe(&config))?;
    tracing::debug!(
        "Run finished: agent {}, test {} ({:?}), report {}",
        outcome.agent.agent_id,
        outcome.test.id,
        outcome.test.origin,
        outcome.report_path.display()
    );
    Ok(())
}

fn parse_args(raw_args: Vec<OsString>) -> AppResult<(ProbeArgs, ArgMatches)> {
    let matches = ProbeArgs::command().get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn skips_dotenv(raw_args: &[OsString]) -> bool {
    raw_args
        .iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == NO_DOTENV_FLAG)
}
