//! Text label with a padded background box
//!
//! The label sits above or below an anchor point. It starts hidden.

use crate::config::ShapeColor;
use crate::domain::{Point, Rect};
use crate::render::{Shape, ShapeId, ShapeKind, Style, Surface};

pub const FONT_SIZE: f32 = 16.0;
pub const PADDING: f32 = 2.0;

/// Which side of the anchor the label is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPlacement {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug)]
pub struct LabelBox {
    name: String,
    placement: LabelPlacement,
    /// Distance from the anchor to the near side of the label
    offset: f32,
    background: ShapeId,
    text: ShapeId,
}

impl LabelBox {
    pub fn new<S: Surface>(
        surface: &mut S,
        anchor: Point,
        placement: LabelPlacement,
        offset: f32,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let background = surface.add(Shape::new(
            ShapeKind::Rect(Rect::default()),
            Style {
                fill: Some(ShapeColor::WHITE),
                ..Style::default()
            }
            .with_opacity(0.0),
        ));
        let text = surface.add(Shape::new(
            ShapeKind::Text {
                at: anchor,
                content: name.clone(),
                font_size: FONT_SIZE,
            },
            Style::filled(ShapeColor::BLACK, 1.0).with_opacity(0.0),
        ));

        let label = Self {
            name,
            placement,
            offset,
            background,
            text,
        };
        label.move_to(surface, anchor);
        label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Center of the text for a given anchor
    fn text_center(&self, anchor: Point) -> Point {
        let dy = self.offset + FONT_SIZE / 2.0 + 2.0 * PADDING;
        match self.placement {
            LabelPlacement::Top => anchor.offset(0.0, -dy),
            LabelPlacement::Bottom => anchor.offset(0.0, dy),
        }
    }

    /// Reposition around a new anchor
    pub fn move_to<S: Surface>(&self, surface: &mut S, anchor: Point) {
        let at = self.text_center(anchor);
        let (w, h) = surface.measure_text(&self.name, FONT_SIZE);
        let rect = Rect::new(
            at.x - w / 2.0 - PADDING,
            at.y - h / 2.0 - PADDING,
            w + 2.0 * PADDING,
            h + 2.0 * PADDING,
        );

        surface.update(self.background, |s| s.kind = ShapeKind::Rect(rect));
        surface.update(self.text, |s| {
            if let ShapeKind::Text { at: pos, .. } = &mut s.kind {
                *pos = at;
            }
        });
    }

    /// Background box in display coordinates
    pub fn bounds<S: Surface>(&self, surface: &S) -> Option<Rect> {
        match surface.get(self.background)?.kind {
            ShapeKind::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn show<S: Surface>(&self, surface: &mut S) {
        self.set_opacity(surface, 1.0);
    }

    pub fn hide<S: Surface>(&self, surface: &mut S) {
        self.set_opacity(surface, 0.0);
    }

    pub fn is_visible<S: Surface>(&self, surface: &S) -> bool {
        surface
            .get(self.text)
            .is_some_and(|s| s.style.opacity > 0.0)
    }

    fn set_opacity<S: Surface>(&self, surface: &mut S, opacity: f32) {
        surface.update(self.text, |s| s.style.opacity = opacity);
        surface.update(self.background, |s| s.style.opacity = opacity);
    }

    /// Raise the box, then the text above it
    pub fn to_front<S: Surface>(&self, surface: &mut S) {
        surface.to_front(self.background);
        surface.to_front(self.text);
    }

    /// Lower the text, then the box beneath it
    pub fn to_back<S: Surface>(&self, surface: &mut S) {
        surface.to_back(self.text);
        surface.to_back(self.background);
    }

    pub fn remove<S: Surface>(&self, surface: &mut S) {
        surface.remove(self.text);
        surface.remove(self.background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Scene;

    #[test]
    fn test_bottom_label_sits_below_anchor() {
        let mut scene = Scene::new(200.0, 200.0);
        let label = LabelBox::new(
            &mut scene,
            Point::new(100.0, 100.0),
            LabelPlacement::Bottom,
            8.0,
            "cat",
        );
        let bounds = label.bounds(&scene).unwrap();
        let (w, h) = scene.measure_text("cat", FONT_SIZE);

        // Text center is 8 + 8 + 4 below the anchor.
        assert!((bounds.y + bounds.h / 2.0 - 120.0).abs() < 1e-4);
        assert!((bounds.x + bounds.w / 2.0 - 100.0).abs() < 1e-4);
        assert!((bounds.w - (w + 2.0 * PADDING)).abs() < 1e-4);
        assert!((bounds.h - (h + 2.0 * PADDING)).abs() < 1e-4);
    }

    #[test]
    fn test_top_label_moves_with_anchor() {
        let mut scene = Scene::new(200.0, 200.0);
        let label = LabelBox::new(
            &mut scene,
            Point::new(50.0, 50.0),
            LabelPlacement::Top,
            0.0,
            "dog",
        );
        label.move_to(&mut scene, Point::new(60.0, 80.0));
        let bounds = label.bounds(&scene).unwrap();
        assert!((bounds.y + bounds.h / 2.0 - 68.0).abs() < 1e-4);
        assert!((bounds.x + bounds.w / 2.0 - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_starts_hidden_and_toggles() {
        let mut scene = Scene::new(100.0, 100.0);
        let label = LabelBox::new(
            &mut scene,
            Point::new(10.0, 10.0),
            LabelPlacement::Bottom,
            0.0,
            "a",
        );
        assert!(!label.is_visible(&scene));
        assert!(scene.display_list().is_empty());

        label.show(&mut scene);
        assert!(label.is_visible(&scene));
        assert_eq!(scene.display_list().len(), 2);

        label.hide(&mut scene);
        assert!(!label.is_visible(&scene));
    }

    #[test]
    fn test_front_and_back_keep_text_over_box() {
        let mut scene = Scene::new(100.0, 100.0);
        let label = LabelBox::new(
            &mut scene,
            Point::new(10.0, 10.0),
            LabelPlacement::Bottom,
            0.0,
            "a",
        );
        label.to_back(&mut scene);
        assert_eq!(scene.order(), &[label.background, label.text]);
        label.to_front(&mut scene);
        assert_eq!(scene.order(), &[label.background, label.text]);

        label.remove(&mut scene);
        assert!(scene.is_empty());
    }
}
