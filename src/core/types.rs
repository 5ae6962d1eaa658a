//! Core types for compression requests and results.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::utils::{ImageFormat, ValidationError};

/// Target format plus size budget, validated once at batch start.
///
/// Invariant: `MIN_SIZE_KB <= max_size_kb <= MAX_SIZE_KB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionRequest {
    format: ImageFormat,
    max_size_kb: u32,
}

impl CompressionRequest {
    pub const MIN_SIZE_KB: u32 = 10;
    pub const MAX_SIZE_KB: u32 = 10_000;

    /// Parses `target_format` and checks the size bounds.
    pub fn new(target_format: &str, max_size_kb: u32) -> Result<Self, ValidationError> {
        let format = target_format
            .parse::<ImageFormat>()
            .map_err(|_| ValidationError::UnsupportedFormat(target_format.to_string()))?;
        Self::with_format(format, max_size_kb)
    }

    pub fn with_format(format: ImageFormat, max_size_kb: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_SIZE_KB..=Self::MAX_SIZE_KB).contains(&max_size_kb) {
            return Err(ValidationError::SizeOutOfRange(max_size_kb));
        }
        Ok(Self { format, max_size_kb })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn max_size_kb(&self) -> u32 {
        self.max_size_kb
    }

    pub fn max_size_bytes(&self) -> u64 {
        u64::from(self.max_size_kb) * 1024
    }
}

/// Raw batch request as handed over by the UI layer.
///
/// Validated by [`crate::processing::validate_request`] before any file I/O.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Folder to scan recursively (ignored when `files` is non-empty)
    #[serde(default)]
    pub source_path: Option<PathBuf>,
    /// Folder receiving the outputs
    pub destination_path: PathBuf,
    /// Target format name (jpeg, png, webp, avif)
    pub target_format: String,
    /// Size budget per output file in kilobytes
    pub max_size_kb: u32,
    /// Explicit file selection, used as-is
    #[serde(default)]
    pub files: Option<Vec<PathBuf>>,
}

/// Outcome for one processed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionResult {
    pub success: bool,
    pub input_size: u64,
    pub output_size: u64,
    /// Percentage saved, never negative
    pub compression_ratio: f64,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompressionResult {
    pub const ALREADY_OPTIMIZED: &'static str = "already optimized";

    /// A freshly encoded output.
    pub fn compressed(input_size: u64, output_size: u64) -> Self {
        Self {
            success: true,
            input_size,
            output_size,
            compression_ratio: compression_ratio(input_size, output_size),
            skipped: false,
            reason: None,
        }
    }

    /// Input copied byte-for-byte because it already met format and budget.
    pub fn already_optimized(size: u64) -> Self {
        Self {
            success: true,
            input_size: size,
            output_size: size,
            compression_ratio: 0.0,
            skipped: false,
            reason: Some(Self::ALREADY_OPTIMIZED.to_string()),
        }
    }

    /// A contained per-file failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            input_size: 0,
            output_size: 0,
            compression_ratio: 0.0,
            skipped: true,
            reason: Some(reason.into()),
        }
    }

    /// Counted as processed in the summary.
    pub fn is_processed(&self) -> bool {
        self.success && !self.skipped
    }
}

/// `(input - output) / input * 100`, clamped to zero when the output grew.
pub fn compression_ratio(input_size: u64, output_size: u64) -> f64 {
    if input_size == 0 {
        return 0.0;
    }
    let saved = input_size as f64 - output_size as f64;
    (saved / input_size as f64 * 100.0).max(0.0)
}

/// Per-file entry of a [`BatchSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    pub filename: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(flatten)]
    pub result: CompressionResult,
}

impl FileResult {
    pub fn new(input_path: &Path, output_path: &Path, result: CompressionResult) -> Self {
        Self {
            filename: input_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            result,
        }
    }
}

/// Aggregate result of one batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub processed_count: usize,
    pub skipped_count: usize,
    pub total_files: usize,
    pub detailed_results: Vec<FileResult>,
}

impl BatchSummary {
    pub fn with_capacity(total_files: usize) -> Self {
        Self {
            total_files,
            detailed_results: Vec::with_capacity(total_files),
            ..Self::default()
        }
    }

    /// Appends a result, keeping the counters in step.
    pub fn record(&mut self, entry: FileResult) {
        if entry.result.is_processed() {
            self.processed_count += 1;
        } else {
            self.skipped_count += 1;
        }
        self.detailed_results.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bounds_are_inclusive() {
        assert!(CompressionRequest::new("webp", 10).is_ok());
        assert!(CompressionRequest::new("webp", 10_000).is_ok());
        assert_eq!(
            CompressionRequest::new("webp", 9),
            Err(ValidationError::SizeOutOfRange(9))
        );
        assert_eq!(
            CompressionRequest::new("webp", 10_001),
            Err(ValidationError::SizeOutOfRange(10_001))
        );
    }

    #[test]
    fn unknown_target_is_a_validation_error() {
        assert_eq!(
            CompressionRequest::new("bmp", 100),
            Err(ValidationError::UnsupportedFormat("bmp".into()))
        );
    }

    #[test]
    fn budget_is_in_kibibytes() {
        let req = CompressionRequest::new("png", 200).unwrap();
        assert_eq!(req.max_size_bytes(), 204_800);
    }

    #[test]
    fn ratio_never_goes_negative() {
        assert_eq!(compression_ratio(100, 250), 0.0);
        assert_eq!(compression_ratio(0, 10), 0.0);
        assert!((compression_ratio(200, 50) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_counts_follow_results() {
        let mut summary = BatchSummary::with_capacity(3);
        let p = Path::new("in/a.png");
        let o = Path::new("out/a.webp");
        summary.record(FileResult::new(p, o, CompressionResult::compressed(10, 5)));
        summary.record(FileResult::new(p, o, CompressionResult::already_optimized(10)));
        summary.record(FileResult::new(p, o, CompressionResult::failed("boom")));
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.detailed_results[0].filename, "a.png");
    }

    #[test]
    fn batch_request_reads_camel_case() {
        let req: BatchRequest = serde_json::from_str(
            r#"{"destinationPath":"/out","targetFormat":"webp","maxSizeKb":200,"files":["/a.png"]}"#,
        )
        .unwrap();
        assert_eq!(req.max_size_kb, 200);
        assert!(req.source_path.is_none());
        assert_eq!(req.files.unwrap().len(), 1);
    }
}
