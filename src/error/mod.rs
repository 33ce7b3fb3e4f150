mod api;
mod app;
mod config;
mod report;
mod stage;
mod validation;

pub use api::ApiError;
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use report::ReportError;
pub use stage::StageError;
pub use validation::ValidationError;
