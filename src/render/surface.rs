//! Retained 2D drawing surface
//!
//! Editors that keep shapes alive between frames (extent objects, the fixed
//! box, arrows) talk to a [`Surface`]. [`Scene`] is the in-memory
//! implementation; its [`Scene::display_list`] feeds the rasterizer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ShapeColor;
use crate::domain::{Point, Rect};

/// Identity of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate an identity no other surface in this process shares
    pub fn unique() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SurfaceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of a shape on one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect(Rect),
    Circle { center: Point, r: f32 },
    /// Text centered on `at`
    Text {
        at: Point,
        content: String,
        font_size: f32,
    },
    Line { from: Point, to: Point },
    Polygon(Vec<Point>),
    /// Background image occupying `[0, width] x [0, height]`
    Image { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: Option<ShapeColor>,
    pub stroke_width: f32,
    pub fill: Option<ShapeColor>,
    pub fill_opacity: f32,
    /// Applies to both stroke and fill
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Some(ShapeColor::BLACK),
            stroke_width: 1.0,
            fill: None,
            fill_opacity: 1.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    pub fn stroked(color: ShapeColor, width: f32) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn filled(color: ShapeColor, fill_opacity: f32) -> Self {
        Self {
            stroke: None,
            fill: Some(color),
            fill_opacity,
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Nothing of the shape would be drawn
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0
            || (self.stroke.is_none() && (self.fill.is_none() || self.fill_opacity <= 0.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub style: Style,
}

impl Shape {
    pub fn new(kind: ShapeKind, style: Style) -> Self {
        Self { kind, style }
    }
}

/// Drawing capability the editors depend on
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Current drawable width and height
    fn bounds(&self) -> (f32, f32);

    /// Add a shape on top of every existing shape
    fn add(&mut self, shape: Shape) -> ShapeId;

    fn get(&self, id: ShapeId) -> Option<&Shape>;

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    fn remove(&mut self, id: ShapeId);

    fn to_front(&mut self, id: ShapeId);

    fn to_back(&mut self, id: ShapeId);

    /// Width and height of `text` rendered at `font_size`
    fn measure_text(&self, text: &str, font_size: f32) -> (f32, f32);

    /// Modify a shape in place; unknown ids are ignored
    fn update(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape))
    where
        Self: Sized,
    {
        if let Some(shape) = self.get_mut(id) {
            f(shape);
        }
    }
}

/// Average glyph advance relative to the font size
const GLYPH_ADVANCE: f32 = 0.6;
/// Line height relative to the font size
const LINE_HEIGHT: f32 = 1.2;

/// Approximate width and height of single-line text without a font
pub fn estimate_text_size(text: &str, font_size: f32) -> (f32, f32) {
    let chars = text.chars().count() as f32;
    (chars * font_size * GLYPH_ADVANCE, font_size * LINE_HEIGHT)
}

/// In-memory surface keeping shapes in z-order (back to front)
#[derive(Debug)]
pub struct Scene {
    id: SurfaceId,
    width: f32,
    height: f32,
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    next_shape: u64,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: SurfaceId::unique(),
            width,
            height,
            shapes: HashMap::new(),
            order: Vec::new(),
            next_shape: 0,
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Shape ids from back to front
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Index of a shape in the z-order (0 is the back)
    pub fn z_index(&self, id: ShapeId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible shapes from back to front
    pub fn display_list(&self) -> Vec<Shape> {
        self.order
            .iter()
            .filter_map(|id| self.shapes.get(id))
            .filter(|shape| !shape.style.is_invisible())
            .cloned()
            .collect()
    }

    fn detach(&mut self, id: ShapeId) -> bool {
        match self.z_index(id) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Surface for Scene {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        self.shapes.insert(id, shape);
        self.order.push(id);
        id
    }

    fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn remove(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
        self.detach(id);
    }

    fn to_front(&mut self, id: ShapeId) {
        if self.detach(id) {
            self.order.push(id);
        }
    }

    fn to_back(&mut self, id: ShapeId) {
        if self.detach(id) {
            self.order.insert(0, id);
        }
    }

    fn measure_text(&self, text: &str, font_size: f32) -> (f32, f32) {
        estimate_text_size(text, font_size)
    }
}
