//! Command handlers for the UI layer.

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::core::{AppState, BatchRequest, BatchSummary, ImageFile, ProgressEvent};
use crate::processing::collect_files;
use crate::utils::{OptimizerResult, PathError, ValidationError};

/// Returns stats for an explicit file selection.
///
/// Files whose metadata cannot be read are reported with size 0 instead of
/// failing the whole selection.
pub async fn select_inputs(paths: Vec<PathBuf>) -> Vec<ImageFile> {
    debug!("Collecting stats for {} selected files", paths.len());
    collect_files(&paths).await
}

/// Compresses a batch of images with progress tracking.
///
/// # Arguments
/// * `state` - Application state holding the codec
/// * `request` - Source, destination, target format and size budget
/// * `on_progress` - Receives every [`ProgressEvent`] in order
///
/// # Returns
/// The batch summary, one detailed result per input file.
///
/// Checks that the destination folder (and the source folder, when given)
/// exists before the batch starts.
pub async fn process_images(
    state: &AppState,
    request: BatchRequest,
    on_progress: impl FnMut(ProgressEvent) + Send,
) -> OptimizerResult<BatchSummary> {
    if !request.destination_path.as_os_str().is_empty() {
        require_dir(&request.destination_path).await?;
    }
    let uses_files = request.files.as_ref().is_some_and(|f| !f.is_empty());
    if let Some(source) = request.source_path.as_ref().filter(|_| !uses_files) {
        if !source.as_os_str().is_empty() {
            require_dir(source).await?;
        }
    }

    state
        .create_processor()
        .process_batch(&request, on_progress)
        .await
}

async fn require_dir(path: &Path) -> Result<(), ValidationError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ValidationError::not_a_directory(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ValidationError::path_not_found(path))
        }
        Err(e) => Err(PathError::from(e).into()),
    }
}
