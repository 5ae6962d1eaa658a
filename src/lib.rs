//! Adaptive image compression: fits each output under a byte budget by
//! searching quality first and width second, over a folder tree or an
//! explicit file list.

// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use self::core::{
    AppState, BatchRequest, BatchSummary, CompressionRequest, CompressionResult, FileResult,
    ImageFile, ProgressEvent, ProgressStage,
};
pub use processing::{BatchProcessor, ImageCodec, SizeSeekingCompressor};
pub use utils::{ImageFormat, OptimizerError, OptimizerResult, ValidationError};
pub use commands::*;
