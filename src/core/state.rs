//! Shared application context handed to the command layer.

use std::sync::Arc;
use tracing::debug;
use crate::processing::{BatchProcessor, ImageCodec};

/// Application state injected into every command.
///
/// Holds the codec the whole application shares. Cloning is cheap; concurrent
/// batches started from clones share nothing mutable except the filesystem.
#[derive(Clone)]
pub struct AppState {
    codec: Arc<dyn ImageCodec>,
}

impl AppState {
    /// Creates a state around the native libvips codec.
    ///
    /// Initializes libvips, which stays alive as long as any clone of this state exists.
    #[cfg(feature = "vips")]
    pub fn new() -> crate::utils::OptimizerResult<Self> {
        let codec = crate::processing::libvips::VipsCodec::new()?;
        Ok(Self::with_codec(Arc::new(codec)))
    }

    /// Creates a state around any codec implementation.
    pub fn with_codec(codec: Arc<dyn ImageCodec>) -> Self {
        debug!("AppState initialized");
        Self { codec }
    }

    pub fn codec(&self) -> Arc<dyn ImageCodec> {
        Arc::clone(&self.codec)
    }

    /// Creates a new batch processor bound to this state's codec.
    pub fn create_processor(&self) -> BatchProcessor {
        BatchProcessor::new(self.codec())
    }
}
