//! Shared geometry calculations for drawn shapes
//!
//! Constants and math shared between the retained shapes and the tiny-skia
//! rasterizer.

use crate::config::ArrowConfig;
use crate::domain::Point;

/// Arrow geometry for relationship edges
pub mod arrow {
    use super::*;

    /// Shaft segment and optional filled head triangle of an arrow
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ArrowPaths {
        pub shaft: (Point, Point),
        /// Tip first, then the two barbs
        pub head: Option<[Point; 3]>,
    }

    /// Compute the arrow from `from` to `to`
    ///
    /// Both endpoints are pulled in by `padding` so the arrow does not cover
    /// the objects it connects. When a head is drawn the shaft stops at the
    /// head's base. Returns `None` for coincident endpoints.
    pub fn paths(from: Point, to: Point, config: &ArrowConfig) -> Option<ArrowPaths> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return None;
        }

        let factor = config.padding / length;
        let start = from.offset(factor * dx, factor * dy);
        let tip = to.offset(-factor * dx, -factor * dy);
        let dx = tip.x - start.x;
        let dy = tip.y - start.y;

        if !config.draw_arrowhead {
            return Some(ArrowPaths {
                shaft: (start, tip),
                head: None,
            });
        }

        // Angle measured from the y axis, matching the barb formulas below
        let theta = dx.atan2(dy);
        let barb = |angle: f32| {
            Point::new(
                tip.x - config.arrow_length * (theta + angle).sin(),
                tip.y - config.arrow_length * (theta + angle).cos(),
            )
        };
        let head = [tip, barb(config.arrow_angle), barb(-config.arrow_angle)];

        let shaft_length = (dx * dx + dy * dy).sqrt();
        let end = if shaft_length > 0.0 {
            let f = config.arrow_length / shaft_length;
            tip.offset(-f * dx, -f * dy)
        } else {
            tip
        };

        Some(ArrowPaths {
            shaft: (start, end),
            head: Some(head),
        })
    }
}

/// Shape geometry constants
pub mod shape {
    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}
