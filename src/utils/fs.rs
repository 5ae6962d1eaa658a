use std::path::Path;
use tokio::fs;
use crate::utils::OptimizerResult;

/// Creates `dir` and any missing parents. An existing directory is not an error.
pub async fn ensure_dir_exists(dir: impl AsRef<Path>) -> OptimizerResult<()> {
    let dir = dir.as_ref();
    if fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(());
    }
    match fs::create_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Creates the parent directory of `path` if needed.
pub async fn ensure_parent_dir(path: impl AsRef<Path>) -> OptimizerResult<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent).await,
        _ => Ok(()),
    }
}

/// Get file extension as lowercase string (empty when absent)
pub fn get_extension(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
