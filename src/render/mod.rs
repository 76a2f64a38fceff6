//! Shape rendering module
//!
//! This module contains:
//! - The retained drawing surface the editors draw on
//! - Geometry calculations shared between shapes and the rasterizer
//! - Image rendering using tiny-skia (for saving to file)

pub mod geometry;
pub mod image;
pub mod surface;

pub use surface::{Scene, Shape, ShapeId, ShapeKind, Style, Surface, SurfaceId};
