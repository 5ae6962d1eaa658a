// src/processing/libvips/codec.rs

//! [`ImageCodec`] implementation backed by libvips.
//!
//! Every encode starts from the original buffer so attempts never compound
//! generational loss. libvips parallelises within a single image on its own
//! thread pool, which is why callers run one encode at a time.

use std::sync::Arc;
use libvips::{VipsApp, VipsImage};
use tracing::debug;

use crate::processing::codec::{EncodeRequest, ImageCodec, ImageMetadata};
use crate::utils::{OptimizerError, OptimizerResult};

use super::formats::encode_as;
use super::resize::fit_to_width;

/// Thread-safe guard for the libvips `VipsApp` lifecycle.
///
/// `VipsApp` initializes the libvips thread pool and global state on creation
/// and shuts it down on drop. Wrapping in Arc ensures exactly one shutdown
/// call when the last reference is released.
struct VipsAppGuard(VipsApp);

// libvips is designed for concurrent use; individual VipsImage instances must
// not be shared between threads, but concurrent creation on separate threads is safe.
unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

/// Codec that decodes and re-encodes in memory through libvips.
#[derive(Clone)]
pub struct VipsCodec {
    _vips: Arc<VipsAppGuard>,
}

impl VipsCodec {
    pub fn new() -> OptimizerResult<Self> {
        let vips = VipsApp::default("image-compressor")
            .map_err(|e| OptimizerError::processing(format!("Failed to initialize libvips: {e}")))?;
        // 0 = let libvips decide based on available CPU cores
        vips.concurrency_set(0);
        debug!("libvips initialized (concurrency: {})", vips.concurency_get());

        Ok(Self {
            _vips: Arc::new(VipsAppGuard(vips)),
        })
    }

    fn load(source: &[u8]) -> OptimizerResult<VipsImage> {
        VipsImage::new_from_buffer(source, "")
            .map_err(|e| OptimizerError::decode(format!("Failed to load image: {e}")))
    }
}

impl ImageCodec for VipsCodec {
    fn decode(&self, source: &[u8]) -> OptimizerResult<ImageMetadata> {
        let image = Self::load(source)?;
        let metadata = ImageMetadata {
            width: u32::try_from(image.get_width()).unwrap_or(0),
            height: u32::try_from(image.get_height()).unwrap_or(0),
        };
        if metadata.width == 0 || metadata.height == 0 {
            return Err(OptimizerError::decode("Image has no pixels"));
        }
        Ok(metadata)
    }

    fn encode(&self, source: &[u8], request: &EncodeRequest) -> OptimizerResult<Vec<u8>> {
        let image = fit_to_width(Self::load(source)?, request.width)?;
        encode_as(&image, request)
    }
}
