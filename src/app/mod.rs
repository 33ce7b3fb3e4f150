//! Top-level probe run: the only place that turns stage failures into aborts.
mod driver;


pub use driver::{ProbeOutcome, execute, run_probe};
