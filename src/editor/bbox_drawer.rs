//! Interactive bounding-box drawer over a scaled image
//!
//! The user drags out one box, then resizes it by grabbing a corner or an
//! edge. Reference boxes and labelled objects are drawn beneath it. Geometry
//! is kept in display coordinates; everything crossing the public boundary is
//! in natural image coordinates.
//!
//! Operations issued before the image has loaded are queued and replayed in
//! order once the scale is known.

use std::fmt;

use crate::canvas::{CoordinateMapper, DisplaySize, ImageCanvas, ImageDimensions, ImageLoad};
use crate::config::{BBoxDrawerConfig, ShapeColor};
use crate::domain::{Cursor, NamedPoint, Point, Rect, ResizeHandle, StaticBox};
use crate::error::EditorError;
use crate::render::surface::estimate_text_size;
use crate::render::{Shape, ShapeKind, Style};

use super::drag::{DragManager, classify_hit};

const TEXT_FONT_SIZE: f32 = 20.0;
const TEXT_BOX_PADDING: f32 = 4.0;

/// Called once the image has loaded and queued operations have been applied
pub type ReadyCallback = Box<dyn FnOnce()>;

/// Operation waiting for the image scale
#[derive(Debug, Clone)]
enum Pending {
    SetBox(Rect),
    StaticBox(Rect),
    Boxes(Vec<StaticBox>),
    Objects(Vec<NamedPoint>),
    Object(NamedPoint),
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy)]
struct Gesture {
    handle: ResizeHandle,
    anchor: Point,
}

pub struct BBoxDrawer {
    config: BBoxDrawerConfig,
    canvas: ImageCanvas,
    pending: Vec<Pending>,
    ready_callback: Option<ReadyCallback>,
    enabled: bool,
    crosshairs: bool,
    cursor: Cursor,
    drag: DragManager,
    gesture: Option<Gesture>,
    mouse: Option<Point>,
    /// The interactive box
    bbox: Option<Rect>,
    /// Whether the box was finalized by the first gesture (or restored)
    drawn: bool,
    static_box: Option<Rect>,
    boxes: Vec<StaticBox>,
    objects: Vec<NamedPoint>,
    object: Option<NamedPoint>,
}

impl fmt::Debug for BBoxDrawer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBoxDrawer")
            .field("canvas", &self.canvas)
            .field("enabled", &self.enabled)
            .field("bbox", &self.bbox)
            .field("drawn", &self.drawn)
            .field("gesture", &self.gesture)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl BBoxDrawer {
    /// Create a disabled drawer
    ///
    /// `max_width` together with `max_height` in the config overrides
    /// `display_size`; an explicit `scale` overrides both.
    pub fn new(display_size: DisplaySize, config: BBoxDrawerConfig) -> Self {
        let size = match (config.max_width, config.max_height) {
            (Some(max_width), Some(max_height)) => DisplaySize::Bounded {
                max_width,
                max_height,
            },
            _ => display_size,
        };
        let canvas = ImageCanvas::new(size).with_scale_override(config.scale);

        Self {
            config,
            canvas,
            pending: Vec::new(),
            ready_callback: None,
            enabled: false,
            crosshairs: true,
            cursor: Cursor::Crosshair,
            drag: DragManager::new(),
            gesture: None,
            mouse: None,
            bbox: None,
            drawn: false,
            static_box: None,
            boxes: Vec::new(),
            objects: Vec::new(),
            object: None,
        }
    }

    /// Run `f` once the image has loaded (immediately if it already has)
    pub fn set_ready_callback(&mut self, f: impl FnOnce() + 'static) {
        if self.canvas.is_ready() {
            f();
        } else {
            self.ready_callback = Some(Box::new(f));
        }
    }

    /// Establish the scale, replay queued operations and signal readiness
    pub fn on_image_loaded(&mut self, dims: ImageDimensions) -> Result<(), EditorError> {
        if self.canvas.is_ready() {
            log::warn!("Image loaded twice, keeping the first scale");
            return Ok(());
        }
        let mapper = *self.canvas.on_loaded(dims)?;

        let pending = std::mem::take(&mut self.pending);
        log::debug!("Replaying {} queued operations", pending.len());
        for op in pending {
            self.apply(op, &mapper);
        }

        if let Some(callback) = self.ready_callback.take() {
            callback();
        }
        Ok(())
    }

    /// Wait for the image load to resolve, then behave as [`Self::on_image_loaded`]
    pub async fn attach(&mut self, load: ImageLoad) -> Result<(), EditorError> {
        let dims = load.await?;
        self.on_image_loaded(dims)
    }

    pub fn is_ready(&self) -> bool {
        self.canvas.is_ready()
    }

    pub fn mapper(&self) -> Result<&CoordinateMapper, EditorError> {
        self.canvas.mapper()
    }

    /// Canvas size in display pixels, once loaded
    pub fn display_size(&self) -> Option<(f32, f32)> {
        self.canvas.display_size()
    }

    fn submit(&mut self, op: Pending) {
        match self.canvas.mapper().copied() {
            Ok(mapper) => self.apply(op, &mapper),
            Err(_) => {
                log::debug!("Queued {:?} until the image loads", op);
                self.pending.push(op);
            }
        }
    }

    fn apply(&mut self, op: Pending, mapper: &CoordinateMapper) {
        let point = |p: NamedPoint| NamedPoint {
            x: mapper.to_display(p.x),
            y: mapper.to_display(p.y),
            name: p.name,
        };
        match op {
            Pending::SetBox(rect) => self.bbox = Some(mapper.rect_to_display(rect)),
            Pending::StaticBox(rect) => self.static_box = Some(mapper.rect_to_display(rect)),
            Pending::Boxes(boxes) => {
                self.boxes = boxes
                    .into_iter()
                    .map(|b| StaticBox {
                        rect: mapper.rect_to_display(b.rect),
                        color: b.color,
                    })
                    .collect();
            }
            Pending::Objects(objects) => {
                self.objects = objects.into_iter().map(point).collect();
            }
            Pending::Object(object) => self.object = Some(point(object)),
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop reacting to pointer input, ending any gesture
    pub fn disable(&mut self) {
        self.enabled = false;
        self.end_gesture();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin drawing a new box, or resizing the drawn one under `p`
    ///
    /// Ignored while disabled or when `p` misses every handle of a drawn box.
    pub fn pointer_down(&mut self, p: Point) -> Result<(), EditorError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.canvas.is_ready() {
            return Err(EditorError::NotReady);
        }

        match self.bbox {
            Some(rect) if self.drawn => {
                let handle = classify_hit(p, &rect, self.config.click_radius);
                if handle == ResizeHandle::None {
                    return Ok(());
                }
                self.drag.start(rect)?;
                self.gesture = Some(Gesture { handle, anchor: p });
            }
            _ => {
                // A new box is a zero-size box grown from its bottom-right corner
                let seed = Rect::new(p.x, p.y, 0.0, 0.0);
                self.drag.start(seed)?;
                self.gesture = Some(Gesture {
                    handle: ResizeHandle::SE,
                    anchor: p,
                });
                self.bbox = Some(seed);
            }
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, p: Point) {
        self.mouse = Some(p);

        if let Some(gesture) = self.gesture {
            let dx = p.x - gesture.anchor.x;
            let dy = p.y - gesture.anchor.y;
            if let Ok(candidate) = self.drag.update(gesture.handle, dx, dy) {
                let candidate = candidate.normalized();
                if self.accepts(&candidate) {
                    self.bbox = Some(candidate);
                }
            }
            return;
        }

        if self.enabled
            && let Some(rect) = self.bbox
        {
            self.cursor = match classify_hit(p, &rect, self.config.click_radius) {
                ResizeHandle::None => Cursor::Pointer,
                handle => Cursor::Resize(handle),
            };
        }
    }

    fn accepts(&self, candidate: &Rect) -> bool {
        if !candidate.has_positive_size() {
            return false;
        }
        if self.config.clamp_drawn_box
            && let Some((w, h)) = self.canvas.display_size()
        {
            return candidate.fits_within(w, h);
        }
        true
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    /// Pointer left the canvas: ends the gesture like a release
    pub fn pointer_leave(&mut self) {
        self.end_gesture();
        self.mouse = None;
    }

    fn end_gesture(&mut self) {
        self.gesture = None;
        self.drag.end();

        match self.bbox {
            Some(rect) if rect.has_positive_size() => {
                if !self.drawn {
                    log::debug!("Box finalized at {:?}", rect);
                }
                self.drawn = true;
                self.cursor = Cursor::Pointer;
            }
            Some(_) => {
                log::trace!("Discarding degenerate box");
                self.bbox = None;
                self.drawn = false;
            }
            None => {}
        }
    }

    /// Place the box, in image coordinates
    pub fn set_box_position(&mut self, rect: Rect) {
        self.submit(Pending::SetBox(rect));
    }

    /// The box in image coordinates, or `None` if there is no box
    pub fn box_position(&self) -> Option<Rect> {
        match self.canvas.mapper() {
            Ok(mapper) => self.bbox.map(|b| mapper.rect_to_image(b)),
            Err(_) => self.pending.iter().rev().find_map(|op| match op {
                Pending::SetBox(rect) => Some(*rect),
                _ => None,
            }),
        }
    }

    /// Treat a box placed with [`Self::set_box_position`] as already drawn
    pub fn restoring(&mut self) {
        self.drawn = true;
    }

    /// Clear the box, static box, object and any gesture
    pub fn reset(&mut self) {
        self.gesture = None;
        self.drag.end();
        self.mouse = None;
        self.drawn = false;
        self.bbox = None;
        self.static_box = None;
        self.object = None;
        self.pending.retain(|op| {
            !matches!(
                op,
                Pending::SetBox(_) | Pending::StaticBox(_) | Pending::Object(_)
            )
        });
        self.cursor = self.idle_cursor();
    }

    /// Single reference box, in image coordinates
    pub fn set_static_box(&mut self, rect: Rect) {
        self.submit(Pending::StaticBox(rect));
    }

    /// Reference boxes, in image coordinates; boxes with negative `x` are hidden
    pub fn draw_boxes(&mut self, boxes: Vec<StaticBox>) {
        self.submit(Pending::Boxes(boxes));
    }

    /// Labelled points, in image coordinates
    pub fn draw_objects(&mut self, objects: Vec<NamedPoint>) {
        self.submit(Pending::Objects(objects));
    }

    /// The single object that is emphasized while hovered
    pub fn set_object(&mut self, x: f32, y: f32, name: impl Into<String>) {
        self.submit(Pending::Object(NamedPoint::new(name, x, y)));
    }

    pub fn enable_crosshairs(&mut self) {
        self.crosshairs = true;
        self.cursor = Cursor::Crosshair;
    }

    pub fn disable_crosshairs(&mut self) {
        self.crosshairs = false;
        self.cursor = Cursor::Default;
    }

    fn idle_cursor(&self) -> Cursor {
        if self.crosshairs {
            Cursor::Crosshair
        } else {
            Cursor::Default
        }
    }

    /// Cursor the host should show over the canvas
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Shapes for the current state, back to front
    ///
    /// Empty until the image has loaded.
    pub fn frame(&self) -> Vec<Shape> {
        let Some((width, height)) = self.canvas.display_size() else {
            return Vec::new();
        };
        let mut shapes = Vec::new();

        let image_opacity = if self.enabled {
            self.config.image_opacity
        } else {
            1.0
        };
        shapes.push(Shape::new(
            ShapeKind::Image { width, height },
            Style {
                stroke: None,
                fill: Some(ShapeColor::WHITE),
                ..Style::default()
            }
            .with_opacity(image_opacity),
        ));

        for b in self.boxes.iter().filter(|b| !b.is_hidden()) {
            shapes.push(self.box_shape(b.rect, b.color.unwrap_or(self.config.bbox_color)));
        }
        for o in &self.objects {
            self.push_object(&mut shapes, o, true);
        }
        if let Some(rect) = self.static_box {
            shapes.push(self.box_shape(rect, self.config.static_box_color));
        }

        if !self.enabled {
            return shapes;
        }

        if let Some(object) = &self.object {
            let emphasized = self
                .mouse
                .is_some_and(|m| m.distance(object.position()) < self.config.click_radius);
            self.push_object(&mut shapes, object, emphasized);
        }

        match self.bbox {
            Some(rect) => {
                if self.drawn {
                    for corner in [
                        rect.top_left(),
                        rect.top_right(),
                        rect.bottom_left(),
                        rect.bottom_right(),
                    ] {
                        shapes.push(Shape::new(
                            ShapeKind::Circle {
                                center: corner,
                                r: self.config.click_radius,
                            },
                            Style::filled(ShapeColor::BLACK, 1.0)
                                .with_opacity(self.config.handle_opacity),
                        ));
                    }
                } else {
                    push_crosshair(&mut shapes, rect.top_left(), width, height);
                    push_crosshair(&mut shapes, rect.bottom_right(), width, height);
                }
                shapes.push(self.box_shape(rect, self.config.bbox_color));
            }
            None => {
                if self.crosshairs
                    && let Some(mouse) = self.mouse
                {
                    push_crosshair(&mut shapes, mouse, width, height);
                }
            }
        }

        shapes
    }

    fn box_shape(&self, rect: Rect, color: ShapeColor) -> Shape {
        Shape::new(
            ShapeKind::Rect(rect.floor()),
            Style::stroked(color, self.config.bbox_line_width),
        )
    }

    fn push_object(&self, shapes: &mut Vec<Shape>, object: &NamedPoint, emphasized: bool) {
        let center = object.position();
        let r = if emphasized {
            self.config.dot_big_radius
        } else {
            self.config.dot_small_radius
        };
        shapes.push(Shape::new(
            ShapeKind::Circle { center, r },
            Style {
                fill: Some(self.config.bbox_color),
                ..Style::default()
            },
        ));

        if !emphasized {
            return;
        }
        let (text_w, _) = estimate_text_size(&object.name, TEXT_FONT_SIZE);
        let top = center.y + self.config.dot_big_radius + 1.5 * TEXT_BOX_PADDING;
        let label = Rect::new(
            center.x - text_w / 2.0 - TEXT_BOX_PADDING,
            top,
            text_w + 2.0 * TEXT_BOX_PADDING,
            TEXT_FONT_SIZE + 1.5 * TEXT_BOX_PADDING,
        );
        shapes.push(Shape::new(
            ShapeKind::Rect(label),
            Style {
                fill: Some(ShapeColor::WHITE),
                fill_opacity: 0.5,
                ..Style::default()
            },
        ));
        shapes.push(Shape::new(
            ShapeKind::Text {
                at: Point::new(center.x, top + label.h / 2.0),
                content: object.name.clone(),
                font_size: TEXT_FONT_SIZE,
            },
            Style::filled(ShapeColor::BLACK, 1.0),
        ));
    }
}

/// Full-canvas guide lines through `p`: a faint wide white line under a thin black one
fn push_crosshair(shapes: &mut Vec<Shape>, p: Point, width: f32, height: f32) {
    let x = p.x.floor() + 0.5;
    let y = p.y.floor() + 0.5;
    let lines = [
        (Point::new(x, 0.0), Point::new(x, height)),
        (Point::new(0.0, y), Point::new(width, y)),
    ];
    for style in [
        Style::stroked(ShapeColor::WHITE, 3.0).with_opacity(0.3),
        Style::stroked(ShapeColor::BLACK, 1.0),
    ] {
        for (from, to) in lines {
            shapes.push(Shape::new(ShapeKind::Line { from, to }, style.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::image_load;
    use futures::executor::block_on;

    /// 1000x500 image shown 500 wide: scale 2
    fn loaded() -> BBoxDrawer {
        let mut drawer = BBoxDrawer::new(DisplaySize::Fixed(500.0), BBoxDrawerConfig::default());
        drawer
            .on_image_loaded(ImageDimensions::new(1000, 500))
            .unwrap();
        drawer.enable();
        drawer
    }

    fn draw(drawer: &mut BBoxDrawer, from: Point, to: Point) {
        drawer.pointer_down(from).unwrap();
        drawer.pointer_move(to);
        drawer.pointer_up();
    }

    #[test]
    fn test_draw_box_reports_image_coordinates() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(60.0, 40.0), Point::new(10.0, 20.0));
        assert!(drawer.is_drawn());
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(20.0, 40.0, 100.0, 40.0))
        );
        assert_eq!(drawer.cursor(), Cursor::Pointer);
    }

    #[test]
    fn test_degenerate_first_box_is_discarded() {
        let mut drawer = loaded();
        drawer.pointer_down(Point::new(10.0, 10.0)).unwrap();
        drawer.pointer_move(Point::new(10.0, 50.0));
        drawer.pointer_leave();
        assert_eq!(drawer.box_position(), None);
        assert!(!drawer.is_drawn());
        assert!(!drawer.is_dragging());
    }

    #[test]
    fn test_resize_drawn_box_by_corner() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(110.0, 60.0));

        drawer.pointer_down(Point::new(108.0, 58.0)).unwrap();
        assert!(drawer.is_dragging());
        drawer.pointer_move(Point::new(128.0, 78.0));
        drawer.pointer_up();
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(20.0, 20.0, 240.0, 140.0))
        );
    }

    #[test]
    fn test_resize_through_opposite_edge_is_normalized() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(110.0, 60.0));

        drawer.pointer_down(Point::new(110.0, 35.0)).unwrap();
        drawer.pointer_move(Point::new(0.0, 35.0));
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(0.0, 20.0, 20.0, 100.0))
        );
        // Exactly onto the opposite edge: zero width, rejected.
        drawer.pointer_move(Point::new(10.0, 35.0));
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(0.0, 20.0, 20.0, 100.0))
        );
    }

    #[test]
    fn test_click_away_from_handles_does_nothing() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(110.0, 110.0));
        drawer.pointer_down(Point::new(60.0, 60.0)).unwrap();
        assert!(!drawer.is_dragging());
    }

    #[test]
    fn test_drag_reentry_is_an_error() {
        let mut drawer = loaded();
        drawer.pointer_down(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(
            drawer.pointer_down(Point::new(20.0, 20.0)),
            Err(EditorError::DragAlreadyActive)
        );
    }

    #[test]
    fn test_unclamped_by_default_clamped_on_request() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(450.0, 200.0), Point::new(600.0, 240.0));
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(900.0, 400.0, 300.0, 80.0))
        );

        let config = BBoxDrawerConfig {
            clamp_drawn_box: true,
            ..BBoxDrawerConfig::default()
        };
        let mut drawer = BBoxDrawer::new(DisplaySize::Fixed(500.0), config);
        drawer
            .on_image_loaded(ImageDimensions::new(1000, 500))
            .unwrap();
        drawer.enable();
        drawer.pointer_down(Point::new(450.0, 200.0)).unwrap();
        drawer.pointer_move(Point::new(480.0, 220.0));
        drawer.pointer_move(Point::new(600.0, 240.0));
        drawer.pointer_up();
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(900.0, 400.0, 60.0, 40.0))
        );
    }

    #[test]
    fn test_disabled_ignores_pointer() {
        let mut drawer = loaded();
        drawer.disable();
        drawer.pointer_down(Point::new(10.0, 10.0)).unwrap();
        drawer.pointer_move(Point::new(50.0, 50.0));
        assert_eq!(drawer.box_position(), None);
    }

    #[test]
    fn test_pointer_before_load_is_not_ready() {
        let mut drawer = BBoxDrawer::new(DisplaySize::Fixed(500.0), BBoxDrawerConfig::default());
        drawer.enable();
        assert_eq!(
            drawer.pointer_down(Point::new(1.0, 1.0)),
            Err(EditorError::NotReady)
        );
        assert!(drawer.frame().is_empty());
    }

    #[test]
    fn test_operations_queue_until_load() {
        let mut drawer = BBoxDrawer::new(DisplaySize::Fixed(500.0), BBoxDrawerConfig::default());
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        drawer.set_ready_callback(move || counter.set(counter.get() + 1));

        drawer.set_box_position(Rect::new(100.0, 100.0, 200.0, 50.0));
        drawer.set_object(40.0, 60.0, "cat");
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(100.0, 100.0, 200.0, 50.0))
        );
        assert_eq!(fired.get(), 0);

        let (loader, load) = image_load();
        loader.resolve(ImageDimensions::new(1000, 500));
        block_on(drawer.attach(load)).unwrap();

        assert_eq!(fired.get(), 1);
        assert_eq!(drawer.bbox, Some(Rect::new(50.0, 50.0, 100.0, 25.0)));
        assert_eq!(drawer.object, Some(NamedPoint::new("cat", 20.0, 30.0)));
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(100.0, 100.0, 200.0, 50.0))
        );

        // A second load keeps the first scale and does not fire again.
        drawer
            .on_image_loaded(ImageDimensions::new(10, 10))
            .unwrap();
        assert_eq!(fired.get(), 1);
        assert_eq!(drawer.mapper().unwrap().scale(), 2.0);
    }

    #[test]
    fn test_max_size_overrides_width() {
        let config = BBoxDrawerConfig {
            max_width: Some(100.0),
            max_height: Some(100.0),
            ..BBoxDrawerConfig::default()
        };
        let mut drawer = BBoxDrawer::new(DisplaySize::Fixed(500.0), config);
        drawer
            .on_image_loaded(ImageDimensions::new(1000, 500))
            .unwrap();
        assert_eq!(drawer.display_size(), Some((100.0, 50.0)));
    }

    #[test]
    fn test_restoring_makes_box_resizable() {
        let mut drawer = loaded();
        drawer.set_box_position(Rect::new(20.0, 20.0, 200.0, 100.0));
        drawer.restoring();
        drawer.pointer_down(Point::new(10.0, 10.0)).unwrap();
        drawer.pointer_move(Point::new(0.0, 0.0));
        drawer.pointer_up();
        assert_eq!(
            drawer.box_position(),
            Some(Rect::new(0.0, 0.0, 220.0, 120.0))
        );
    }

    #[test]
    fn test_click_after_restoring_without_box_keeps_no_box() {
        let mut drawer = loaded();
        drawer.restoring();
        drawer.pointer_down(Point::new(10.0, 10.0)).unwrap();
        drawer.pointer_up();
        assert_eq!(drawer.box_position(), None);
        assert!(!drawer.is_drawn());

        // A real drag afterwards still draws a box
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(60.0, 30.0));
        let rect = drawer.box_position().unwrap();
        assert!(rect.w > 0.0 && rect.h > 0.0);
        assert!(drawer.is_drawn());
    }

    #[test]
    fn test_reset_clears_box() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        drawer.set_static_box(Rect::new(0.0, 0.0, 10.0, 10.0));
        drawer.disable_crosshairs();
        drawer.reset();
        assert_eq!(drawer.box_position(), None);
        assert!(!drawer.is_drawn());
        assert!(drawer.static_box.is_none());
        assert_eq!(drawer.cursor(), Cursor::Default);
    }

    #[test]
    fn test_hover_cursor_names_handle() {
        let mut drawer = loaded();
        draw(&mut drawer, Point::new(10.0, 10.0), Point::new(110.0, 110.0));
        drawer.pointer_move(Point::new(12.0, 12.0));
        assert_eq!(drawer.cursor(), Cursor::Resize(ResizeHandle::NW));
        drawer.pointer_move(Point::new(60.0, 108.0));
        assert_eq!(drawer.cursor(), Cursor::Resize(ResizeHandle::S));
        drawer.pointer_move(Point::new(60.0, 60.0));
        assert_eq!(drawer.cursor(), Cursor::Pointer);
    }

    #[test]
    fn test_frame_contents() {
        let mut drawer = loaded();
        drawer.draw_boxes(vec![
            StaticBox::new(Rect::new(0.0, 0.0, 20.0, 20.0)),
            StaticBox::new(Rect::new(-1.0, 0.0, 20.0, 20.0)),
        ]);
        let frame = drawer.frame();
        // Image and the one visible reference box
        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame[0].kind,
            ShapeKind::Image {
                width: 500.0,
                height: 250.0
            }
        );

        // Hovering with no box: two crosshair layers of two lines each
        drawer.pointer_move(Point::new(30.0, 30.0));
        assert_eq!(drawer.frame().len(), 2 + 4);

        // Drawn box: four handles plus the outline
        draw(&mut drawer, Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        let frame = drawer.frame();
        assert_eq!(frame.len(), 2 + 5);
        assert_eq!(
            frame.last().map(|s| s.kind.clone()),
            Some(ShapeKind::Rect(Rect::new(100.0, 100.0, 100.0, 50.0)))
        );

        // Disabled: reference content only
        drawer.disable();
        assert_eq!(drawer.frame().len(), 2);
    }

    #[test]
    fn test_hovered_object_is_emphasized() {
        let mut drawer = loaded();
        drawer.set_object(200.0, 200.0, "cat");
        assert_eq!(drawer.frame().len(), 2);

        drawer.pointer_move(Point::new(102.0, 100.0));
        let frame = drawer.frame();
        assert!(frame.iter().any(|s| s.kind
            == ShapeKind::Circle {
                center: Point::new(100.0, 100.0),
                r: 5.0
            }));
        assert!(
            frame
                .iter()
                .any(|s| matches!(&s.kind, ShapeKind::Text { content, .. } if content == "cat"))
        );
    }
}
