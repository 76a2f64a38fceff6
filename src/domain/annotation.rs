//! Annotation records exchanged with the host
//!
//! All records here store coordinates in natural image space.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};
use crate::config::ShapeColor;

/// Reference box drawn beneath the interactive box
///
/// A negative `x` marks the box as hidden.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticBox {
    #[serde(flatten)]
    pub rect: Rect,
    /// Overrides the drawer's box color when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ShapeColor>,
}

impl StaticBox {
    pub fn new(rect: Rect) -> Self {
        Self { rect, color: None }
    }

    pub fn with_color(rect: Rect, color: ShapeColor) -> Self {
        Self {
            rect,
            color: Some(color),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.rect.x < 0.0
    }
}

/// A labelled point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl NamedPoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
