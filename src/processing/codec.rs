//! Codec adapter contract.
//!
//! The compressor only ever talks to an [`ImageCodec`]: decode once for the
//! original geometry, then encode the same source bytes as often as the search
//! needs. Implementations must be pure apart from CPU work.

use serde::Serialize;
use crate::utils::{ImageFormat, OptimizerResult};

/// Geometry reported by [`ImageCodec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

/// Which set of format-specific options an encode uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodeProfile {
    /// Full per-format tuning used inside the search loop
    Tuned,
    /// Quality and effort only; used for the last-resort encode
    Baseline,
}

/// Parameters of one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeRequest {
    pub format: ImageFormat,
    /// 1 (worst) to 100 (best)
    pub quality: u8,
    /// Fit inside this width when it is smaller than the source; never enlarges
    pub width: Option<u32>,
    pub profile: EncodeProfile,
}

/// Opaque encode/decode capability.
pub trait ImageCodec: Send + Sync {
    /// Reads the source geometry. Fails with [`crate::OptimizerError::Decode`].
    fn decode(&self, source: &[u8]) -> OptimizerResult<ImageMetadata>;

    /// Re-encodes `source` per `request`. Fails with [`crate::OptimizerError::Encode`]
    /// (or `Decode` when the source cannot be read).
    fn encode(&self, source: &[u8], request: &EncodeRequest) -> OptimizerResult<Vec<u8>>;
}

/// Width actually produced for a requested width: never wider than the
/// source. A requested width of 0 means no resize.
pub fn effective_width(original_width: u32, requested: Option<u32>) -> u32 {
    match requested {
        Some(w) if w > 0 && w < original_width => w,
        _ => original_width,
    }
}
