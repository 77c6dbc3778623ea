//! imgproc Core - single-request image transform pipeline
//!
//! This crate decodes a JPEG or PNG, applies an optional rotate, flip, color
//! filter and resize (always in that order), and re-encodes the result as
//! JPEG or PNG.
//!
//! Everything is synchronous and in memory. Each request owns its pixel
//! buffers, so a single [`Pipeline`] can be shared freely between threads.
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod raster;
pub mod request;
pub mod transform;

pub use config::ProcessorConfig;
pub use decode::{decode, probe, DecodeError, ImageInfo};
pub use encode::{encode, EncodeError};
pub use filter::{apply_filter, ColorMatrix, Filter};
pub use format::ImageFormat;
pub use pipeline::{plan, process, Pipeline, PipelineError, ProcessedImage, Stage};
pub use raster::{InvalidDimensionError, Raster};
pub use request::{TransformRequest, DEFAULT_QUALITY};
pub use transform::{
    apply_flip, apply_resize, apply_resize_with, apply_rotation, compute_rotated_bounds,
    resolve_resize_dimensions, FlipMode, ResampleFilter,
};
