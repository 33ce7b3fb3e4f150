/// Default test interval passed on creation (seconds).
pub(crate) const DEFAULT_INTERVAL: &str = "3600";
/// Wait between creating a test and asking for its first result.
pub(crate) const DEFAULT_GRACE_PERIOD: &str = "90s";
/// Upper bound for a single API call.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
/// Reports land in the working directory unless told otherwise.
pub(crate) const DEFAULT_REPORT_DIR: &str = ".";
