//! Geometric transforms: rotation, flip and resize.
//!
//! All transforms take ownership of a [`Raster`](crate::Raster) and hand back
//! the result, so no two stages ever share a pixel buffer.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Sampling is nearest-neighbour unless a resize asks for bilinear

mod flip;
mod resize;
mod rotation;

pub use flip::{apply_flip, FlipMode};
pub use resize::{apply_resize, apply_resize_with, resolve_resize_dimensions, ResampleFilter};
pub use rotation::{apply_rotation, compute_rotated_bounds};
