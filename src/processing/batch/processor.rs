use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::{
    BatchRequest, BatchSummary, CompressionRequest, CompressionResult, FileResult, ImageFile,
    ImageTask, ProgressEvent,
};
use crate::processing::codec::ImageCodec;
use crate::processing::compressor::SizeSeekingCompressor;
use crate::processing::validation::{BatchSource, ValidatedBatch, validate_request};
use crate::utils::{OptimizerError, OptimizerResult, ensure_parent_dir};

use super::paths::{flat_output_path, mirrored_output_path};
use super::scanner::{collect_files, scan_folder};

/// Drives one batch: validate, enumerate, then compress file by file.
///
/// Files are processed strictly one at a time in enumeration order, so the
/// progress stream and the summary share the same order. Per-file failures
/// become skipped results; only validation and an empty scan abort the batch.
pub struct BatchProcessor {
    codec: Arc<dyn ImageCodec>,
}

impl BatchProcessor {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self { codec }
    }

    /// Processes a batch with progress reporting.
    ///
    /// Emits `scanning(0, 0)`, `scanning(n, n)`, one `processing(i, n)` before
    /// each file, and `complete(n)`.
    pub async fn process_batch(
        &self,
        request: &BatchRequest,
        mut on_progress: impl FnMut(ProgressEvent) + Send,
    ) -> OptimizerResult<BatchSummary> {
        let batch = validate_request(request)?;
        info!(
            "Starting batch: {} ≤ {} KB into {}",
            batch.compression.format(),
            batch.compression.max_size_kb(),
            batch.destination.display()
        );

        on_progress(ProgressEvent::scanning(0, 0));
        let files = enumerate(&batch.source).await?;
        let total = files.len();
        on_progress(ProgressEvent::scanning(total, total));

        let mut summary = BatchSummary::with_capacity(total);
        for (idx, task) in plan_tasks(files, &batch).into_iter().enumerate() {
            on_progress(ProgressEvent::processing(idx + 1, total, task.input.path.clone()));

            let result = self.process_file(&task, &batch.compression).await;
            summary.record(FileResult::new(&task.input.path, &task.output_path, result));
        }

        on_progress(ProgressEvent::complete(total));
        info!(
            "Batch complete: {} processed, {} skipped of {}",
            summary.processed_count, summary.skipped_count, summary.total_files
        );
        Ok(summary)
    }

    /// Never fails: errors are folded into a skipped result.
    async fn process_file(&self, task: &ImageTask, request: &CompressionRequest) -> CompressionResult {
        match self.try_process_file(task, request).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping {}: {e}", task.input.path.display());
                CompressionResult::failed(e.to_string())
            }
        }
    }

    async fn try_process_file(
        &self,
        task: &ImageTask,
        request: &CompressionRequest,
    ) -> OptimizerResult<CompressionResult> {
        let input = fs::read(&task.input.path).await?;
        let input_size = input.len() as u64;

        if request.format().matches_extension(&task.input.extension)
            && input_size <= request.max_size_bytes()
        {
            ensure_parent_dir(&task.output_path).await?;
            if !same_file(&task.input.path, &task.output_path).await {
                fs::copy(&task.input.path, &task.output_path).await?;
            }
            debug!("{} already optimized, copied as-is", task.input.file_name());
            return Ok(CompressionResult::already_optimized(input_size));
        }

        let codec = Arc::clone(&self.codec);
        let format = request.format();
        let max_size_kb = request.max_size_kb();
        let compressed = tokio::task::spawn_blocking(move || {
            SizeSeekingCompressor::new(codec.as_ref()).search(&input, format, max_size_kb)
        })
        .await
        .map_err(|e| OptimizerError::processing(format!("Task panicked: {e}")))??;

        ensure_parent_dir(&task.output_path).await?;
        fs::write(&task.output_path, &compressed.bytes).await?;

        let result = CompressionResult::compressed(input_size, compressed.bytes.len() as u64);
        if !compressed.within_budget {
            warn!(
                "{} still exceeds {} KB after {} attempts ({} bytes written)",
                task.input.file_name(),
                max_size_kb,
                compressed.attempts,
                result.output_size
            );
        }
        debug!(
            "'{}' → {} bytes ({:.1}% saved, q={} width={:?})",
            task.input.file_name(),
            result.output_size,
            result.compression_ratio,
            compressed.step.quality,
            compressed.step.width
        );
        Ok(result)
    }
}

async fn enumerate(source: &BatchSource) -> OptimizerResult<Vec<ImageFile>> {
    match source {
        BatchSource::Files(paths) => Ok(collect_files(paths).await),
        BatchSource::Folder(root) => {
            let root = root.clone();
            tokio::task::spawn_blocking(move || scan_folder(&root))
                .await
                .map_err(|e| OptimizerError::processing(format!("Scan task panicked: {e}")))?
        }
    }
}

fn plan_tasks(files: Vec<ImageFile>, batch: &ValidatedBatch) -> Vec<ImageTask> {
    let format = batch.compression.format();
    files
        .into_iter()
        .map(|input| {
            let output_path = match &batch.source {
                BatchSource::Files(_) => flat_output_path(&input.path, &batch.destination, format),
                BatchSource::Folder(root) => {
                    mirrored_output_path(&input.path, root, &batch.destination, format)
                }
            };
            ImageTask { input, output_path }
        })
        .collect()
}

/// Guards the copy path against truncating a file onto itself.
async fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
