// src/processing/libvips/mod.rs

//! Native image codec via libvips-rs.
//!
//! # Architecture
//!
//! - [`VipsCodec`]: Implements [`crate::processing::ImageCodec`] on in-memory buffers.
//! - [`resize`]: Width-constrained downscaling that never enlarges.
//! - [`formats`]: Maps an `EncodeRequest` to format-specific `ops::*save_buffer_with_opts` calls.

mod codec;
mod formats;
mod resize;

pub use codec::VipsCodec;
