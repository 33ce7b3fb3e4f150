use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, AppResult, ConfigError};

/// Loads `.env` from the working directory (or a parent) without overriding
/// variables that are already set. A missing file is not an error.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_dotenv() -> AppResult<Option<PathBuf>> {
    match dotenv::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenv::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AppError::config(ConfigError::DotEnv { source: err })),
    }
}
