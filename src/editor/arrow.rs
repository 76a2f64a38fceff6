//! Relationship arrow between two objects on a surface

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ArrowConfig, ShapeColor};
use crate::domain::Point;
use crate::render::geometry::arrow;
use crate::render::{Shape, ShapeId, ShapeKind, Style, Surface};

pub struct Arrow<S: Surface> {
    surface: Rc<RefCell<S>>,
    config: ArrowConfig,
    from: Point,
    to: Point,
    shaft: ShapeId,
    head: Option<ShapeId>,
    emphasized: bool,
    hidden: bool,
}

impl<S: Surface> Arrow<S> {
    pub fn new(surface: Rc<RefCell<S>>, from: Point, to: Point, config: ArrowConfig) -> Self {
        let (shaft, head) = {
            let mut s = surface.borrow_mut();
            let shaft = s.add(Shape::new(
                ShapeKind::Line { from, to },
                Style::stroked(config.edge_color, config.edge_width),
            ));
            let head = config.draw_arrowhead.then(|| {
                s.add(Shape::new(
                    ShapeKind::Polygon(Vec::new()),
                    Style {
                        fill: Some(config.edge_color),
                        ..Style::stroked(config.edge_color, 1.0)
                    },
                ))
            });
            (shaft, head)
        };

        let arrow = Self {
            surface,
            config,
            from,
            to,
            shaft,
            head,
            emphasized: false,
            hidden: false,
        };
        arrow.redraw();
        arrow
    }

    pub fn endpoints(&self) -> (Point, Point) {
        (self.from, self.to)
    }

    pub fn set_endpoints(&mut self, from: Point, to: Point) {
        self.from = from;
        self.to = to;
        self.redraw();
    }

    fn color(&self) -> ShapeColor {
        if self.emphasized {
            self.config.emph_edge_color
        } else {
            self.config.edge_color
        }
    }

    fn redraw(&self) {
        let paths = arrow::paths(self.from, self.to, &self.config);
        // Coincident endpoints draw nothing
        let opacity = if self.hidden || paths.is_none() { 0.0 } else { 1.0 };
        let color = self.color();
        let mut surface = self.surface.borrow_mut();

        surface.update(self.shaft, |s| {
            if let Some(p) = &paths {
                s.kind = ShapeKind::Line {
                    from: p.shaft.0,
                    to: p.shaft.1,
                };
            }
            s.style.stroke = Some(color);
            s.style.opacity = opacity;
        });
        if let Some(head) = self.head {
            surface.update(head, |s| {
                if let Some(points) = paths.as_ref().and_then(|p| p.head) {
                    s.kind = ShapeKind::Polygon(points.to_vec());
                }
                s.style.stroke = Some(color);
                s.style.fill = Some(color);
                s.style.opacity = opacity;
            });
        }
    }

    pub fn emphasize(&mut self) {
        self.emphasized = true;
        self.redraw();
    }

    pub fn deemphasize(&mut self) {
        self.emphasized = false;
        self.redraw();
    }

    pub fn hide(&mut self) {
        self.hidden = true;
        self.redraw();
    }

    pub fn show(&mut self) {
        self.hidden = false;
        self.redraw();
    }

    pub fn remove(self) {
        let mut surface = self.surface.borrow_mut();
        surface.remove(self.shaft);
        if let Some(head) = self.head {
            surface.remove(head);
        }
    }
}
