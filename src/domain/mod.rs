//! Pure domain types with minimal dependencies
//!
//! Geometry, handle identities and annotation records shared by every
//! editor. Nothing here knows about drawing surfaces or image loading.

pub mod annotation;
pub mod geometry;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;
