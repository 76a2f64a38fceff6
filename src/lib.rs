//! Geometry editors for image labeling
//!
//! Draw and resize bounding boxes, place circular extent markers and spread
//! out crowded labelled points, all over an image shown at a different size
//! than its natural one.

pub mod canvas;
pub mod cli;
pub mod colors;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod render;
pub mod spread;

pub use error::EditorError;
