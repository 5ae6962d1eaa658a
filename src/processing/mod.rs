//! Compression pipeline: codec adapter, size-seeking search and batch driver.

mod batch;
mod codec;
mod compressor;
#[cfg(feature = "vips")]
pub mod libvips;
mod validation;

pub use batch::{
    BatchProcessor, collect_files, flat_output_path, mirrored_output_path, scan_folder,
};
pub use codec::{EncodeProfile, EncodeRequest, ImageCodec, ImageMetadata, effective_width};
pub use compressor::{Compressed, SearchPlan, SearchState, SearchStep, SizeSeekingCompressor};
pub use validation::{BatchSource, ValidatedBatch, validate_request};
