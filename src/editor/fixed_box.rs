//! Bounding box drawn on a retained surface with its own grab regions
//!
//! Each edge has a band `click_region_width` thick centered on it and each
//! corner has a disc of `corner_radius`. Positions that leave the surface are
//! rejected.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::{FixedBoxConfig, ShapeColor};
use crate::domain::{Point, Rect, ResizeHandle};
use crate::error::EditorError;
use crate::render::{Shape, ShapeId, ShapeKind, Style, Surface};

use super::drag::DragManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Resize(ResizeHandle),
    Move,
}

/// Callback observing every candidate position produced by a drag
pub type DragCallback = Box<dyn FnMut(Rect)>;

pub struct FixedBox<S: Surface> {
    surface: Rc<RefCell<S>>,
    config: FixedBoxConfig,
    position: Rect,
    outline: ShapeId,
    edges: [(ResizeHandle, ShapeId); 4],
    corners: [(ResizeHandle, ShapeId); 4],
    drag: DragManager,
    mode: Option<DragMode>,
    drag_callback: Option<DragCallback>,
    fixed: bool,
    hidden: bool,
}

impl<S: Surface> fmt::Debug for FixedBox<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBox")
            .field("position", &self.position)
            .field("mode", &self.mode)
            .field("fixed", &self.fixed)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Grab band for one edge of `rect`
fn edge_band(rect: Rect, handle: ResizeHandle, width: f32) -> Rect {
    let half = width / 2.0;
    match handle {
        ResizeHandle::N => Rect::new(rect.x, rect.y - half, rect.w, width),
        ResizeHandle::S => Rect::new(rect.x, rect.bottom() - half, rect.w, width),
        ResizeHandle::W => Rect::new(rect.x - half, rect.y, width, rect.h),
        ResizeHandle::E => Rect::new(rect.right() - half, rect.y, width, rect.h),
        _ => Rect::default(),
    }
}

fn corner(rect: Rect, handle: ResizeHandle) -> Point {
    match handle {
        ResizeHandle::NE => rect.top_right(),
        ResizeHandle::SW => rect.bottom_left(),
        ResizeHandle::SE => rect.bottom_right(),
        _ => rect.top_left(),
    }
}

fn region_style(opacity: f32) -> Style {
    Style::filled(ShapeColor::BLACK, opacity).with_opacity(opacity)
}

impl<S: Surface> FixedBox<S> {
    /// Draw the box at `position` (taken as given)
    pub fn new(
        surface: Rc<RefCell<S>>,
        position: Rect,
        color: ShapeColor,
        config: FixedBoxConfig,
    ) -> Self {
        let (outline, edges, corners) = {
            let mut s = surface.borrow_mut();
            let outline = s.add(Shape::new(
                ShapeKind::Rect(position),
                Style::stroked(color, config.stroke_width),
            ));
            let edges = ResizeHandle::EDGES.map(|handle| {
                let band = edge_band(position, handle, config.click_region_width);
                let id = s.add(Shape::new(
                    ShapeKind::Rect(band),
                    region_style(config.edge_opacity),
                ));
                (handle, id)
            });
            let corners = ResizeHandle::CORNERS.map(|handle| {
                let id = s.add(Shape::new(
                    ShapeKind::Circle {
                        center: corner(position, handle),
                        r: config.corner_radius,
                    },
                    region_style(config.corner_opacity),
                ));
                (handle, id)
            });
            (outline, edges, corners)
        };

        Self {
            surface,
            config,
            position,
            outline,
            edges,
            corners,
            drag: DragManager::new(),
            mode: None,
            drag_callback: None,
            fixed: false,
            hidden: false,
        }
    }

    /// Observe every candidate position a drag produces
    pub fn set_drag_callback(&mut self, f: impl FnMut(Rect) + 'static) {
        self.drag_callback = Some(Box::new(f));
    }

    /// Whether `rect` has positive size and lies on the surface
    pub fn is_valid_position(&self, rect: &Rect) -> bool {
        let (w, h) = self.surface.borrow().bounds();
        rect.has_positive_size() && rect.fits_within(w, h)
    }

    /// Move the box; invalid positions leave it unchanged and return `false`
    pub fn set_position(&mut self, rect: Rect) -> bool {
        if !self.is_valid_position(&rect) {
            log::trace!("Rejected fixed box position {:?}", rect);
            return false;
        }
        self.position = rect;
        self.layout();
        true
    }

    pub fn position(&self) -> Rect {
        self.position
    }

    fn layout(&self) {
        let mut surface = self.surface.borrow_mut();
        let rect = self.position;
        let width = self.config.click_region_width;

        surface.update(self.outline, |s| s.kind = ShapeKind::Rect(rect));
        for (handle, id) in self.edges {
            surface.update(id, |s| {
                s.kind = ShapeKind::Rect(edge_band(rect, handle, width));
            });
        }
        for (handle, id) in self.corners {
            surface.update(id, |s| {
                if let ShapeKind::Circle { center, .. } = &mut s.kind {
                    *center = corner(rect, handle);
                }
            });
        }
    }

    /// Grab region under `p`, corners before edges
    ///
    /// Always `None` once the box is fixed or while it is hidden.
    pub fn handle_at(&self, p: Point) -> ResizeHandle {
        if self.fixed || self.hidden {
            return ResizeHandle::None;
        }
        let rect = self.position;
        if let Some(handle) = ResizeHandle::CORNERS
            .into_iter()
            .find(|h| p.distance(corner(rect, *h)) <= self.config.corner_radius)
        {
            return handle;
        }
        ResizeHandle::EDGES
            .into_iter()
            .find(|h| edge_band(rect, *h, self.config.click_region_width).contains_point(p))
            .unwrap_or_default()
    }

    /// Start resizing from `handle`
    pub fn begin_resize(&mut self, handle: ResizeHandle) -> Result<(), EditorError> {
        self.drag.start(self.position)?;
        self.mode = Some(DragMode::Resize(handle));
        Ok(())
    }

    /// Start moving the whole box
    pub fn begin_move(&mut self) -> Result<(), EditorError> {
        self.drag.start(self.position)?;
        self.mode = Some(DragMode::Move);
        Ok(())
    }

    /// Apply the cumulative pointer offset of the active drag
    ///
    /// Returns whether the candidate position was accepted.
    pub fn drag(&mut self, dx: f32, dy: f32) -> Result<bool, EditorError> {
        let candidate = match self.mode {
            Some(DragMode::Resize(handle)) => self.drag.update(handle, dx, dy)?,
            Some(DragMode::Move) => {
                let (w, h) = self.surface.borrow().bounds();
                self.drag.translate(dx, dy)?.clamped_within(w, h)
            }
            None => {
                log::error!("Fixed box dragged without an active drag session");
                return Err(EditorError::NoActiveDrag);
            }
        };

        if let Some(callback) = self.drag_callback.as_mut() {
            callback(candidate);
        }
        Ok(self.set_position(candidate))
    }

    /// Finish the active drag, returning the resulting position
    pub fn end_drag(&mut self) -> Option<Rect> {
        self.mode = None;
        self.drag.end().map(|_| self.position)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Make the box non-interactive
    pub fn set_fixed_position(&mut self) {
        self.fixed = true;
        self.end_drag();
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn set_corner_opacity(&mut self, opacity: f32) {
        self.config.corner_opacity = opacity;
        if !self.hidden {
            self.apply_opacity(&self.corners, opacity);
        }
    }

    pub fn set_edge_opacity(&mut self, opacity: f32) {
        self.config.edge_opacity = opacity;
        if !self.hidden {
            self.apply_opacity(&self.edges, opacity);
        }
    }

    fn apply_opacity(&self, regions: &[(ResizeHandle, ShapeId)], opacity: f32) {
        let mut surface = self.surface.borrow_mut();
        for (_, id) in regions {
            surface.update(*id, |s| {
                s.style.fill_opacity = opacity;
                s.style.opacity = opacity;
            });
        }
    }

    pub fn hide(&mut self) {
        self.hidden = true;
        self.surface
            .borrow_mut()
            .update(self.outline, |s| s.style.opacity = 0.0);
        self.apply_opacity(&self.edges, 0.0);
        self.apply_opacity(&self.corners, 0.0);
    }

    pub fn show(&mut self) {
        self.hidden = false;
        self.surface
            .borrow_mut()
            .update(self.outline, |s| s.style.opacity = 1.0);
        self.apply_opacity(&self.edges, self.config.edge_opacity);
        self.apply_opacity(&self.corners, self.config.corner_opacity);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Remove every shape of the box from the surface
    pub fn remove(self) {
        let mut surface = self.surface.borrow_mut();
        surface.remove(self.outline);
        for (_, id) in self.edges.iter().chain(self.corners.iter()) {
            surface.remove(*id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::render::Scene;

    fn setup(position: Rect) -> (Rc<RefCell<Scene>>, FixedBox<Scene>) {
        let scene = Rc::new(RefCell::new(Scene::new(100.0, 100.0)));
        let fixed = FixedBox::new(
            scene.clone(),
            position,
            ShapeColor::default(),
            FixedBoxConfig::default(),
        );
        (scene, fixed)
    }

    #[test]
    fn test_rejects_positions_off_surface() {
        let (_scene, mut fixed) = setup(Rect::new(20.0, 20.0, 30.0, 30.0));
        assert!(!fixed.set_position(Rect::new(-5.0, 0.0, 10.0, 10.0)));
        assert_eq!(fixed.position(), Rect::new(20.0, 20.0, 30.0, 30.0));
        assert!(fixed.set_position(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(fixed.position(), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(fixed.set_position(Rect::new(90.0, 90.0, 10.0, 10.0)));
        assert!(!fixed.set_position(Rect::new(95.0, 0.0, 10.0, 10.0)));
        assert!(!fixed.set_position(Rect::new(10.0, 10.0, 0.0, 10.0)));
    }

    #[test]
    fn test_layout_follows_position() {
        let (scene, mut fixed) = setup(Rect::new(20.0, 20.0, 30.0, 30.0));
        fixed.set_position(Rect::new(10.0, 10.0, 40.0, 20.0));

        let scene = scene.borrow();
        assert_eq!(
            scene.get(fixed.outline).unwrap().kind,
            ShapeKind::Rect(Rect::new(10.0, 10.0, 40.0, 20.0))
        );
        let (_, east) = fixed.edges[1];
        assert_eq!(
            scene.get(east).unwrap().kind,
            ShapeKind::Rect(Rect::new(40.0, 10.0, 20.0, 20.0))
        );
        let (_, se) = fixed.corners[3];
        assert_eq!(
            scene.get(se).unwrap().kind,
            ShapeKind::Circle {
                center: Point::new(50.0, 30.0),
                r: 20.0
            }
        );
    }

    #[test]
    fn test_handle_at_prefers_corners() {
        let (_scene, mut fixed) = setup(Rect::new(10.0, 10.0, 80.0, 80.0));
        assert_eq!(fixed.handle_at(Point::new(15.0, 15.0)), ResizeHandle::NW);
        assert_eq!(fixed.handle_at(Point::new(89.0, 89.0)), ResizeHandle::SE);
        assert_eq!(fixed.handle_at(Point::new(50.0, 12.0)), ResizeHandle::N);
        assert_eq!(fixed.handle_at(Point::new(88.0, 50.0)), ResizeHandle::E);
        assert_eq!(fixed.handle_at(Point::new(50.0, 50.0)), ResizeHandle::None);

        fixed.set_fixed_position();
        assert!(fixed.is_fixed());
        assert_eq!(fixed.handle_at(Point::new(15.0, 15.0)), ResizeHandle::None);
    }

    #[test]
    fn test_resize_drag_goes_through_validation() {
        let (_scene, mut fixed) = setup(Rect::new(10.0, 10.0, 50.0, 50.0));
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        fixed.set_drag_callback(move |_| counter.set(counter.get() + 1));

        fixed.begin_resize(ResizeHandle::SE).unwrap();
        assert_eq!(fixed.drag(10.0, 5.0), Ok(true));
        assert_eq!(fixed.position(), Rect::new(10.0, 10.0, 60.0, 55.0));
        // Past the surface edge: rejected, last good position kept.
        assert_eq!(fixed.drag(50.0, 0.0), Ok(false));
        assert_eq!(fixed.position(), Rect::new(10.0, 10.0, 60.0, 55.0));
        assert_eq!(fixed.end_drag(), Some(Rect::new(10.0, 10.0, 60.0, 55.0)));
        assert_eq!(seen.get(), 2);

        assert_eq!(fixed.drag(1.0, 1.0), Err(EditorError::NoActiveDrag));
    }

    #[test]
    fn test_move_clamps_inside_surface() {
        let (_scene, mut fixed) = setup(Rect::new(10.0, 10.0, 20.0, 20.0));
        fixed.begin_move().unwrap();
        assert_eq!(fixed.begin_move(), Err(EditorError::DragAlreadyActive));
        assert_eq!(fixed.drag(-50.0, 100.0), Ok(true));
        assert_eq!(fixed.position(), Rect::new(0.0, 80.0, 20.0, 20.0));
        fixed.end_drag();
        assert!(!fixed.is_dragging());
    }

    #[test]
    fn test_hide_show_restores_opacity() {
        let (scene, mut fixed) = setup(Rect::new(10.0, 10.0, 20.0, 20.0));
        fixed.set_corner_opacity(0.4);
        fixed.hide();
        assert!(scene.borrow().display_list().is_empty());
        assert_eq!(fixed.handle_at(Point::new(10.0, 10.0)), ResizeHandle::None);

        fixed.set_edge_opacity(0.3);
        fixed.show();
        let (_, edge) = fixed.edges[0];
        let (_, nw) = fixed.corners[0];
        assert_eq!(scene.borrow().get(edge).unwrap().style.opacity, 0.3);
        assert_eq!(scene.borrow().get(nw).unwrap().style.opacity, 0.4);
        // Outline plus four edges and four corners.
        assert_eq!(scene.borrow().display_list().len(), 9);

        fixed.remove();
        assert!(scene.borrow().is_empty());
    }
}
