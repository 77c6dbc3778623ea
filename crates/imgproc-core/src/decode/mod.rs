//! Image decoding.
//!
//! This module provides functionality for:
//! - Detecting the container (JPEG or PNG) from magic bytes
//! - Reading image dimensions from the header without decoding pixels
//! - Decoding into a straight RGBA [`Raster`](crate::Raster)
//!
//! All operations are pure and synchronous; the input is expected to be fully
//! buffered in memory.
//!
//! # Examples
//!
//! ```ignore
//! use imgproc_core::decode::{decode, probe};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let info = probe(&bytes).unwrap();
//! let raster = decode(&bytes).unwrap();
//! assert_eq!(raster.dimensions(), (info.width, info.height));
//! ```

mod reader;
mod types;

pub use reader::{decode, decode_limited, probe};
pub use types::{DecodeError, ImageInfo};
