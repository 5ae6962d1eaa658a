// src/processing/libvips/resize.rs

//! Width-constrained downscaling.

use libvips::{ops, VipsImage};
use crate::processing::codec::effective_width;
use crate::utils::OptimizerError;

type Result<T> = std::result::Result<T, OptimizerError>;

/// Shrinks `image` so it fits inside `target_width`, keeping the aspect ratio.
///
/// Returns the image unchanged when no width is requested or when the
/// requested width is not smaller than the current one (never enlarges).
pub fn fit_to_width(image: VipsImage, target_width: Option<u32>) -> Result<VipsImage> {
    let orig_w = u32::try_from(image.get_width()).unwrap_or(0);
    let width = effective_width(orig_w, target_width);
    if orig_w == 0 || width >= orig_w {
        return Ok(image);
    }

    let scale = f64::from(width) / f64::from(orig_w);
    ops::resize(&image, scale)
        .map_err(|e| OptimizerError::encode(format!("Resize to {width}px failed: {e}")))
}
