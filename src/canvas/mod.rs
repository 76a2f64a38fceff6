//! Image canvas: natural image size and the image/display coordinate mapping

pub mod loader;
pub mod mapper;

pub use loader::{ImageDimensions, ImageLoad, ImageLoader, image_load};
pub use mapper::{CoordinateMapper, DisplaySize, ImageCanvas};
