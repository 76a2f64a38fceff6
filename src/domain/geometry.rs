//! Geometric types for annotations and coordinates

use serde::{Deserialize, Serialize};

/// Position and size of a rectangle in a single coordinate space
///
/// Width and height may be negative while a drag is in progress; call
/// [`Rect::normalized`] before accepting such a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle from position and size
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle spanning two arbitrary corner points
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            w: a.x.max(b.x) - x,
            h: a.y.max(b.y) - y,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Flip negative extents so that width and height are non-negative
    pub fn normalized(&self) -> Rect {
        Rect::from_corners(self.top_left(), self.bottom_right())
    }

    /// Whether both width and height are strictly positive
    pub fn has_positive_size(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Whether the rectangle lies entirely inside `[0, max_width] x [0, max_height]`
    pub fn fits_within(&self, max_width: f32, max_height: f32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= max_width
            && self.bottom() <= max_height
    }

    /// Move the rectangle (keeping its size) so that it lies inside the bounds
    pub fn clamped_within(&self, max_width: f32, max_height: f32) -> Rect {
        Rect {
            x: self.x.min(max_width - self.w).max(0.0),
            y: self.y.min(max_height - self.h).max(0.0),
            ..*self
        }
    }

    /// Translate the rectangle by the given offset
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Apply `f` to every field, used for coordinate-space conversion
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Rect {
        Rect {
            x: f(self.x),
            y: f(self.y),
            w: f(self.w),
            h: f(self.h),
        }
    }

    /// Round every field down to whole pixels
    pub fn floor(&self) -> Rect {
        self.map(f32::floor)
    }
}

/// A point in a single coordinate space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Center plus radius of a circular extent marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Extent {
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
