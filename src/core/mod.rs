//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`AppState`]: Injected context owning the codec
//! - [`ImageFile`] / [`ImageTask`]: Enumerated inputs and their output paths
//! - [`CompressionRequest`] / [`BatchRequest`]: What to produce
//! - [`CompressionResult`] / [`BatchSummary`]: What happened
//! - [`ProgressEvent`]: Progress streamed during a batch

mod progress;
mod state;
mod task;
mod types;

pub use progress::{ProgressEvent, ProgressStage};
pub use state::AppState;
pub use task::{ImageFile, ImageTask};
pub use types::{
    BatchRequest, BatchSummary, CompressionRequest, CompressionResult, FileResult,
    compression_ratio,
};
