//! Conversion between natural image pixels and display (canvas) pixels
//!
//! The scale is the number of natural image pixels per display pixel, so
//! `display = image / scale` and `image = display * scale`.

use crate::domain::{Point, Rect};
use crate::error::EditorError;

use super::loader::ImageDimensions;

/// How the image should be sized on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplaySize {
    /// Fixed display width, height follows the aspect ratio
    Fixed(f32),
    /// Largest uniform size fitting inside the box
    Bounded { max_width: f32, max_height: f32 },
}

impl DisplaySize {
    /// Natural pixels per display pixel for an image of the given size
    pub fn scale_for(&self, dims: ImageDimensions) -> Result<f32, EditorError> {
        if dims.width == 0 || dims.height == 0 {
            return Err(EditorError::InvalidImage {
                width: dims.width,
                height: dims.height,
            });
        }
        let (w, h) = (dims.width as f32, dims.height as f32);
        match *self {
            DisplaySize::Fixed(width) if width > 0.0 => Ok(w / width),
            DisplaySize::Bounded {
                max_width,
                max_height,
            } if max_width > 0.0 && max_height > 0.0 => Ok((w / max_width).max(h / max_height)),
            _ => Err(EditorError::InvalidDisplaySize),
        }
    }
}

/// Established image-to-display mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    natural: ImageDimensions,
    scale: f32,
}

impl CoordinateMapper {
    pub fn new(natural: ImageDimensions, size: DisplaySize) -> Result<Self, EditorError> {
        let scale = size.scale_for(natural)?;
        Ok(Self { natural, scale })
    }

    /// Mapping with an explicit natural-per-display scale
    pub fn with_scale(natural: ImageDimensions, scale: f32) -> Result<Self, EditorError> {
        if natural.width == 0 || natural.height == 0 {
            return Err(EditorError::InvalidImage {
                width: natural.width,
                height: natural.height,
            });
        }
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(EditorError::InvalidDisplaySize);
        }
        Ok(Self { natural, scale })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn natural(&self) -> ImageDimensions {
        self.natural
    }

    pub fn display_width(&self) -> f32 {
        self.natural.width as f32 / self.scale
    }

    pub fn display_height(&self) -> f32 {
        self.natural.height as f32 / self.scale
    }

    pub fn to_display(&self, v: f32) -> f32 {
        v / self.scale
    }

    pub fn to_image(&self, v: f32) -> f32 {
        v * self.scale
    }

    pub fn rect_to_display(&self, rect: Rect) -> Rect {
        rect.map(|v| self.to_display(v))
    }

    pub fn rect_to_image(&self, rect: Rect) -> Rect {
        rect.map(|v| self.to_image(v))
    }

    pub fn point_to_display(&self, p: Point) -> Point {
        Point::new(self.to_display(p.x), self.to_display(p.y))
    }

    pub fn point_to_image(&self, p: Point) -> Point {
        Point::new(self.to_image(p.x), self.to_image(p.y))
    }
}

/// Image canvas whose mapping becomes available once the image loads
///
/// Every conversion before that point fails with [`EditorError::NotReady`].
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    size: DisplaySize,
    scale_override: Option<f32>,
    mapper: Option<CoordinateMapper>,
}

impl ImageCanvas {
    pub fn new(size: DisplaySize) -> Self {
        Self {
            size,
            scale_override: None,
            mapper: None,
        }
    }

    pub fn with_scale_override(mut self, scale: Option<f32>) -> Self {
        self.scale_override = scale;
        self
    }

    /// Fix the mapping from the loaded image's natural size
    ///
    /// The first successful call wins; the scale never changes afterwards.
    pub fn on_loaded(&mut self, dims: ImageDimensions) -> Result<&CoordinateMapper, EditorError> {
        if self.mapper.is_none() {
            let mapper = match self.scale_override {
                Some(scale) => CoordinateMapper::with_scale(dims, scale)?,
                None => CoordinateMapper::new(dims, self.size)?,
            };
            log::debug!(
                "Image {}x{} mapped at scale {:.4} ({:.1}x{:.1} display)",
                dims.width,
                dims.height,
                mapper.scale(),
                mapper.display_width(),
                mapper.display_height()
            );
            self.mapper = Some(mapper);
        }
        self.mapper.as_ref().ok_or(EditorError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.mapper.is_some()
    }

    pub fn mapper(&self) -> Result<&CoordinateMapper, EditorError> {
        self.mapper.as_ref().ok_or(EditorError::NotReady)
    }

    pub fn to_display(&self, v: f32) -> Result<f32, EditorError> {
        Ok(self.mapper()?.to_display(v))
    }

    pub fn to_image(&self, v: f32) -> Result<f32, EditorError> {
        Ok(self.mapper()?.to_image(v))
    }

    /// Display size, or `None` before the image loads
    pub fn display_size(&self) -> Option<(f32, f32)> {
        self.mapper
            .as_ref()
            .map(|m| (m.display_width(), m.display_height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_scale() {
        let mapper = CoordinateMapper::new(ImageDimensions::new(1000, 500), DisplaySize::Fixed(500.0))
            .unwrap();
        assert_eq!(mapper.scale(), 2.0);
        assert_eq!(mapper.display_width(), 500.0);
        assert_eq!(mapper.display_height(), 250.0);
        assert_eq!(mapper.to_display(100.0), 50.0);
        assert_eq!(mapper.to_image(50.0), 100.0);
    }

    #[test]
    fn test_bounded_scale_fits_both_axes() {
        let size = DisplaySize::Bounded {
            max_width: 400.0,
            max_height: 400.0,
        };
        let mapper = CoordinateMapper::new(ImageDimensions::new(800, 1600), size).unwrap();
        assert_eq!(mapper.scale(), 4.0);
        assert_eq!(mapper.display_width(), 200.0);
        assert_eq!(mapper.display_height(), 400.0);
    }

    #[test]
    fn test_roundtrip_within_epsilon() {
        let mapper = CoordinateMapper::new(ImageDimensions::new(1237, 911), DisplaySize::Fixed(333.0))
            .unwrap();
        for v in [0.0_f32, 0.5, 1.0, 17.3, 250.0, 911.0, 1236.9] {
            let back = mapper.to_image(mapper.to_display(v));
            assert!((back - v).abs() <= v.abs() * 1e-5 + 1e-6, "{v} -> {back}");
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert_eq!(
            CoordinateMapper::new(ImageDimensions::new(0, 10), DisplaySize::Fixed(10.0)),
            Err(EditorError::InvalidImage {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            CoordinateMapper::new(ImageDimensions::new(10, 10), DisplaySize::Fixed(0.0)),
            Err(EditorError::InvalidDisplaySize)
        );
        assert_eq!(
            CoordinateMapper::with_scale(ImageDimensions::new(10, 10), f32::NAN),
            Err(EditorError::InvalidDisplaySize)
        );
    }

    #[test]
    fn test_canvas_not_ready_before_load() {
        let mut canvas = ImageCanvas::new(DisplaySize::Fixed(100.0));
        assert_eq!(canvas.to_display(10.0), Err(EditorError::NotReady));
        assert_eq!(canvas.to_image(10.0), Err(EditorError::NotReady));
        assert_eq!(canvas.display_size(), None);

        canvas.on_loaded(ImageDimensions::new(200, 100)).unwrap();
        assert_eq!(canvas.to_display(10.0), Ok(5.0));
        assert_eq!(canvas.display_size(), Some((100.0, 50.0)));
    }

    #[test]
    fn test_scale_is_fixed_after_first_load() {
        let mut canvas = ImageCanvas::new(DisplaySize::Fixed(100.0));
        canvas.on_loaded(ImageDimensions::new(200, 100)).unwrap();
        canvas.on_loaded(ImageDimensions::new(400, 100)).unwrap();
        assert_eq!(canvas.mapper().unwrap().scale(), 2.0);
    }

    #[test]
    fn test_scale_override_wins() {
        let mut canvas = ImageCanvas::new(DisplaySize::Fixed(100.0)).with_scale_override(Some(4.0));
        canvas.on_loaded(ImageDimensions::new(200, 100)).unwrap();
        assert_eq!(canvas.display_size(), Some((50.0, 25.0)));
    }
}
