use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Batch stage reported by a [`ProgressEvent`]
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStage {
    Scanning,
    Processing,
    Complete,
}

/// Progress update streamed to the caller while a batch runs.
///
/// Events are emitted, never retained. Per-file events strictly increase `current`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub stage: ProgressStage,
    pub current: usize,
    pub total: usize,
    /// File about to be processed (processing stage only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<PathBuf>,
}

impl ProgressEvent {
    pub fn scanning(current: usize, total: usize) -> Self {
        Self {
            stage: ProgressStage::Scanning,
            current,
            total,
            current_file: None,
        }
    }

    pub fn processing(current: usize, total: usize, file: impl Into<PathBuf>) -> Self {
        Self {
            stage: ProgressStage::Processing,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    pub fn complete(total: usize) -> Self {
        Self {
            stage: ProgressStage::Complete,
            current: total,
            total,
            current_file: None,
        }
    }

    /// Progress percentage (0-100)
    pub fn percentage(&self) -> usize {
        if self.total > 0 {
            (self.current * 100) / self.total
        } else {
            0
        }
    }
}
