// src/processing/libvips/formats.rs

//! Maps an [`EncodeRequest`] to libvips format-specific buffer save options.
//!
//! [`EncodeProfile::Tuned`] carries the full per-format tuning used while
//! searching; [`EncodeProfile::Baseline`] keeps only quality and effort.

use libvips::ops::{self, ForeignHeifCompression, ForeignKeep, ForeignPngFilter, ForeignSubsample};
use libvips::VipsImage;
use crate::processing::codec::{EncodeProfile, EncodeRequest};
use crate::utils::{ImageFormat, OptimizerError};

type Result<T> = std::result::Result<T, OptimizerError>;

// ── Fixed per-format options ─────────────────────────────────────────────────────────

const PNG_COMPRESSION: i32 = 9; // 0-9, maximum deflate effort
const WEBP_EFFORT: i32 = 6;
const AVIF_EFFORT: i32 = 4;
/// mozjpeg quantisation table (higher quality at same byte count)
const MOZJPEG_QUANT_TABLE: i32 = 3;

/// Encodes `image` into a memory buffer according to `request`.
pub fn encode_as(image: &VipsImage, request: &EncodeRequest) -> Result<Vec<u8>> {
    let q = i32::from(request.quality);
    let tuned = request.profile == EncodeProfile::Tuned;
    match request.format {
        ImageFormat::Jpeg => encode_jpeg(image, q, tuned),
        ImageFormat::Png => encode_png(image, q, tuned),
        ImageFormat::Webp => encode_webp(image, q, tuned),
        ImageFormat::Avif => encode_avif(image, q, tuned),
    }
}

/// Progressive JPEG; tuned adds the mozjpeg-style trellis/scan optimisations.
fn encode_jpeg(image: &VipsImage, q: i32, tuned: bool) -> Result<Vec<u8>> {
    let opts = if tuned {
        ops::JpegsaveBufferOptions {
            q,
            interlace: true,
            optimize_coding: true,
            optimize_scans: true,
            trellis_quant: true,
            overshoot_deringing: true,
            quant_table: MOZJPEG_QUANT_TABLE,
            keep: ForeignKeep::None,
            ..ops::JpegsaveBufferOptions::default()
        }
    } else {
        ops::JpegsaveBufferOptions {
            q,
            interlace: true,
            keep: ForeignKeep::None,
            ..ops::JpegsaveBufferOptions::default()
        }
    };

    ops::jpegsave_buffer_with_opts(image, &opts)
        .map_err(|e| OptimizerError::encode(format!("JPEG save failed: {e}")))
}

/// Palette-quantised PNG (quality only applies to the palette).
fn encode_png(image: &VipsImage, q: i32, tuned: bool) -> Result<Vec<u8>> {
    let opts = if tuned {
        ops::PngsaveBufferOptions {
            q,
            palette: true,
            compression: PNG_COMPRESSION,
            filter: ForeignPngFilter::All, // adaptive filtering
            keep: ForeignKeep::None,
            ..ops::PngsaveBufferOptions::default()
        }
    } else {
        ops::PngsaveBufferOptions {
            q,
            palette: true,
            compression: PNG_COMPRESSION,
            keep: ForeignKeep::None,
            ..ops::PngsaveBufferOptions::default()
        }
    };

    ops::pngsave_buffer_with_opts(image, &opts)
        .map_err(|e| OptimizerError::encode(format!("PNG save failed: {e}")))
}

/// Lossy WebP; tuned enables smart chroma subsampling.
fn encode_webp(image: &VipsImage, q: i32, tuned: bool) -> Result<Vec<u8>> {
    let opts = ops::WebpsaveBufferOptions {
        q,
        effort: WEBP_EFFORT,
        smart_subsample: tuned,
        keep: ForeignKeep::None,
        ..ops::WebpsaveBufferOptions::default()
    };

    ops::webpsave_buffer_with_opts(image, &opts)
        .map_err(|e| OptimizerError::encode(format!("WebP save failed: {e}")))
}

/// AVIF (AV1 in a HEIF container); tuned forces 4:2:0 chroma subsampling.
fn encode_avif(image: &VipsImage, q: i32, tuned: bool) -> Result<Vec<u8>> {
    let opts = ops::HeifsaveBufferOptions {
        q,
        compression: ForeignHeifCompression::Av1,
        effort: AVIF_EFFORT,
        subsample_mode: if tuned { ForeignSubsample::On } else { ForeignSubsample::Auto },
        keep: ForeignKeep::None,
        ..ops::HeifsaveBufferOptions::default()
    };

    ops::heifsave_buffer_with_opts(image, &opts)
        .map_err(|e| OptimizerError::encode(format!("AVIF save failed: {e}")))
}
