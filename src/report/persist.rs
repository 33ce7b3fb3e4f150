use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::api::ResultSet;
use crate::error::ReportError;

pub const REPORT_SUFFIX: &str = "_report.json";

/// `<test name>_report.json`, with path separators in the name replaced by `_`.
#[must_use]
pub fn report_file_name(test_name: &str) -> String {
    let stem: String = test_name
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    format!("{}{}", stem, REPORT_SUFFIX)
}

#[must_use]
pub fn report_path(dir: &Path, test_name: &str) -> PathBuf {
    dir.join(report_file_name(test_name))
}

/// Writes the whole result payload, pretty-printed, replacing any previous report.
///
/// # Errors
///
/// Returns an error when the payload cannot be serialized, the directory
/// cannot be created or the file cannot be written.
pub async fn save_report(
    dir: &Path,
    test_name: &str,
    results: &ResultSet,
) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_vec_pretty(results.payload())
        .map_err(|source| ReportError::Serialize { source })?;

    if !dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ReportError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    let path = report_path(dir, test_name);
    let write_err = |source| ReportError::Write {
        path: path.clone(),
        source,
    };
    let file = tokio::fs::File::create(&path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await.map_err(write_err)?;
    writer.write_all(b"\n").await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    tracing::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(path)
}
