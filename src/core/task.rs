//! Input files and per-file tasks.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::get_extension;

/// An input file found during enumeration. Identity is the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub path: PathBuf,
    /// Size in bytes at enumeration time (0 when metadata was unreadable)
    pub size: u64,
    /// Lowercase extension without the dot
    pub extension: String,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let extension = get_extension(&path);
        Self { path, size, extension }
    }

    /// Builds an entry from filesystem metadata, reporting size 0 when the
    /// file cannot be stat'ed. Reading it later surfaces the real error.
    pub async fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let size = tokio::fs::metadata(&path).await.map(|m| m.len()).unwrap_or(0);
        Self::new(path, size)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A single compression task: where to read and where to write.
#[derive(Debug, Clone)]
pub struct ImageTask {
    pub input: ImageFile,
    pub output_path: PathBuf,
}
