//! Operations exposed to the UI layer:
//! - [`select_inputs`]: File stats for an explicit selection
//! - [`process_images`]: Run a batch, streaming progress

mod image;

pub use image::*;
