//! Configuration loading, merging and validation.
mod apply;
mod env_file;
mod loader;
mod probe;
pub mod types;


pub use apply::apply_config;
pub use env_file::load_dotenv;
pub use loader::load_config;
pub use probe::ProbeConfig;

#[cfg(test)]
pub(crate) use apply::apply_config_file;
#[cfg(test)]
pub(crate) use loader::load_config_file;
