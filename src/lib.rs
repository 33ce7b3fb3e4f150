//! Core library for the `te-probe` CLI.
//!
//! `te-probe` makes sure a ThousandEyes HTTP server test with a given name
//! exists, creating it on the first available agent when it does not, then
//! fetches its latest results, prints a summary and saves the raw payload as
//! `<test name>_report.json`. The library exposes the building blocks the
//! binary wires together: CLI arguments, configuration, the API client and
//! its wire types, the pipeline stages, and the report writers.
pub mod api;
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod report;
