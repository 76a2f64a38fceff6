//! Circular extent object: a dot with a radius marker, a label and a click region
//!
//! Z-order with nothing emphasized, front to back:
//!
//! - every click region on the surface
//! - every dot
//! - the image
//! - labels and extents
//!
//! Emphasizing an object lifts its extent, dot and label above the other
//! objects' dots, with its own click region on top of all click regions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::CoordinateMapper;
use crate::config::{CircleObjectConfig, ShapeColor};
use crate::domain::{Extent, Point, Rect};
use crate::error::EditorError;
use crate::render::{Shape, ShapeId, ShapeKind, Style, Surface};

use super::drag::DragManager;
use super::label::{LabelBox, LabelPlacement};
use super::zorder::ZOrderRegistry;

pub struct CircleObject<S: Surface> {
    surface: Rc<RefCell<S>>,
    registry: Rc<RefCell<ZOrderRegistry>>,
    config: CircleObjectConfig,
    x: f32,
    y: f32,
    color: ShapeColor,
    name: String,
    dot: ShapeId,
    extent: ShapeId,
    click_region: Option<ShapeId>,
    label: LabelBox,
    radius: f32,
    emphasized: bool,
    click_region_expanded: bool,
    drag: DragManager,
}

fn set_radius<S: Surface>(surface: &mut S, id: ShapeId, radius: f32) {
    surface.update(id, |s| {
        if let ShapeKind::Circle { r, .. } = &mut s.kind {
            *r = radius;
        }
    });
}

fn set_center<S: Surface>(surface: &mut S, id: ShapeId, at: Point) {
    surface.update(id, |s| {
        if let ShapeKind::Circle { center, .. } = &mut s.kind {
            *center = at;
        }
    });
}

impl<S: Surface> CircleObject<S> {
    pub fn new(
        surface: Rc<RefCell<S>>,
        registry: Rc<RefCell<ZOrderRegistry>>,
        center: Point,
        color: ShapeColor,
        name: impl Into<String>,
        config: CircleObjectConfig,
    ) -> Self {
        let name = name.into();
        let circle = |r: f32| ShapeKind::Circle { center, r };

        let (dot, extent, click_region, label) = {
            let mut s = surface.borrow_mut();
            let mut reg = registry.borrow_mut();
            let surface_id = s.id();

            let dot = s.add(Shape::new(
                circle(config.dot_radius_small),
                Style {
                    fill: Some(color),
                    ..Style::default()
                },
            ));
            reg.register_dot(surface_id, dot);

            let extent = s.add(Shape::new(
                circle(config.extent_start_radius),
                Style::filled(color, 0.0),
            ));
            s.to_back(extent);

            let label = LabelBox::new(
                &mut *s,
                center,
                LabelPlacement::Bottom,
                config.dot_radius_big,
                name.clone(),
            );
            label.to_back(&mut *s);

            let click_region = if config.passive {
                None
            } else {
                let region = s.add(Shape::new(
                    circle(config.click_region_radius),
                    Style::filled(ShapeColor::WHITE, config.click_region_opacity),
                ));
                reg.register_click_region(surface_id, region);
                reg.dots_to_front(&mut *s);
                reg.click_regions_to_front(&mut *s);
                Some(region)
            };

            (dot, extent, click_region, label)
        };

        log::debug!("Created object {:?} at ({}, {})", name, center.x, center.y);

        Self {
            surface,
            registry,
            radius: config.extent_start_radius,
            config,
            x: center.x,
            y: center.y,
            color,
            name,
            dot,
            extent,
            click_region,
            label,
            emphasized: false,
            click_region_expanded: false,
            drag: DragManager::new(),
        }
    }

    /// Create an object from an extent record in image coordinates
    pub fn from_extent(
        surface: Rc<RefCell<S>>,
        registry: Rc<RefCell<ZOrderRegistry>>,
        mapper: &CoordinateMapper,
        extent: Extent,
        color: ShapeColor,
        name: impl Into<String>,
        config: CircleObjectConfig,
    ) -> Self {
        let center = mapper.point_to_display(Point::new(extent.x, extent.y));
        let mut object = Self::new(surface, registry, center, color, name, config);
        object.set_extent(mapper.to_display(extent.r));
        object
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }

    /// Center and radius in display coordinates
    pub fn as_extent(&self) -> Extent {
        Extent::new(self.x, self.y, self.radius)
    }

    /// Center and radius in image coordinates
    pub fn to_extent(&self, mapper: &CoordinateMapper) -> Extent {
        Extent::new(
            mapper.to_image(self.x),
            mapper.to_image(self.y),
            mapper.to_image(self.radius),
        )
    }

    /// [`Self::move_to`] with a position in image coordinates
    pub fn move_to_image(&mut self, mapper: &CoordinateMapper, p: Point) -> bool {
        let at = mapper.point_to_display(p);
        self.move_to(at.x, at.y)
    }

    /// [`Self::set_extent`] with a radius in image coordinates
    pub fn set_image_extent(&mut self, mapper: &CoordinateMapper, r: f32) {
        self.set_extent(mapper.to_display(r));
    }

    /// Move to a new position; positions off the surface are ignored
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        let mut surface = self.surface.borrow_mut();
        let (w, h) = surface.bounds();
        if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
            return false;
        }
        self.x = x;
        self.y = y;

        let at = Point::new(x, y);
        self.label.move_to(&mut *surface, at);
        set_center(&mut *surface, self.dot, at);
        set_center(&mut *surface, self.extent, at);
        if let Some(region) = self.click_region {
            set_center(&mut *surface, region, at);
        }
        true
    }

    /// Set the extent radius; anything below the minimum (or NaN) becomes the minimum
    pub fn set_extent(&mut self, r: f32) {
        self.radius = if r >= self.config.extent_min_radius {
            r
        } else {
            self.config.extent_min_radius
        };
        set_radius(&mut *self.surface.borrow_mut(), self.extent, self.radius);
        self.update_click_region();
    }

    pub fn extent(&self) -> f32 {
        self.radius
    }

    /// Current click region radius, `None` for passive objects
    pub fn click_radius(&self) -> Option<f32> {
        self.click_region?;
        let base = if self.click_region_expanded {
            self.config.click_region_big_radius
        } else {
            self.config.click_region_radius
        };
        Some(if self.emphasized {
            base + self.radius
        } else {
            base
        })
    }

    fn update_click_region(&self) {
        if let (Some(region), Some(r)) = (self.click_region, self.click_radius()) {
            set_radius(&mut *self.surface.borrow_mut(), region, r);
        }
    }

    pub fn expand_click_region(&mut self) {
        self.click_region_expanded = true;
        self.update_click_region();
    }

    pub fn shrink_click_region(&mut self) {
        self.click_region_expanded = false;
        self.update_click_region();
    }

    /// Whether `p` falls inside the click region
    pub fn contains(&self, p: Point) -> bool {
        self.click_radius()
            .is_some_and(|r| p.distance(Point::new(self.x, self.y)) <= r)
    }

    pub fn emphasize(&mut self) {
        self.emphasized = true;
        {
            let mut surface = self.surface.borrow_mut();
            self.label.show(&mut *surface);
            surface.update(self.extent, |s| s.style.fill_opacity = 0.5);
            set_radius(&mut *surface, self.dot, self.config.dot_radius_big);
        }
        self.update_click_region();

        let mut surface = self.surface.borrow_mut();
        surface.to_front(self.extent);
        surface.to_front(self.dot);
        self.label.to_front(&mut *surface);
        self.registry
            .borrow()
            .click_regions_to_front(&mut *surface);
        if let Some(region) = self.click_region {
            surface.to_front(region);
        }
    }

    pub fn deemphasize(&mut self) {
        self.emphasized = false;
        {
            let mut surface = self.surface.borrow_mut();
            self.label.hide(&mut *surface);
            surface.update(self.extent, |s| s.style.fill_opacity = 0.0);
            set_radius(&mut *surface, self.dot, self.config.dot_radius_small);
        }
        self.update_click_region();

        let mut surface = self.surface.borrow_mut();
        surface.to_back(self.extent);
        self.label.to_back(&mut *surface);
        let registry = self.registry.borrow();
        registry.dots_to_front(&mut *surface);
        registry.click_regions_to_front(&mut *surface);
    }

    pub fn toggle(&mut self) {
        if self.emphasized {
            self.deemphasize();
        } else {
            self.emphasize();
        }
    }

    pub fn hide(&mut self) {
        self.deemphasize();
        self.surface
            .borrow_mut()
            .update(self.dot, |s| s.style.opacity = 0.0);
    }

    pub fn show(&mut self) {
        self.surface
            .borrow_mut()
            .update(self.dot, |s| s.style.opacity = 1.0);
    }

    pub fn begin_move(&mut self) -> Result<(), EditorError> {
        self.drag.start(Rect::new(self.x, self.y, 0.0, 0.0))
    }

    /// Move by `(dx, dy)` from where the move began
    ///
    /// Returns whether the new position was on the surface.
    pub fn drag_move(&mut self, dx: f32, dy: f32) -> Result<bool, EditorError> {
        let target = self.drag.translate(dx, dy)?;
        Ok(self.move_to(target.x, target.y))
    }

    /// Finish the move, returning the final position
    pub fn end_move(&mut self) -> Option<Point> {
        self.drag.end().map(|_| Point::new(self.x, self.y))
    }

    /// Remove every shape of this object from the surface
    pub fn remove(self) {
        let mut surface = self.surface.borrow_mut();
        let mut registry = self.registry.borrow_mut();
        let surface_id = surface.id();

        surface.remove(self.dot);
        registry.unregister(surface_id, self.dot);
        if let Some(region) = self.click_region {
            surface.remove(region);
            registry.unregister(surface_id, region);
        }
        surface.remove(self.extent);
        self.label.remove(&mut *surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageDimensions;
    use crate::render::Scene;

    struct Fixture {
        scene: Rc<RefCell<Scene>>,
        registry: Rc<RefCell<ZOrderRegistry>>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                scene: Rc::new(RefCell::new(Scene::new(100.0, 100.0))),
                registry: Rc::new(RefCell::new(ZOrderRegistry::new())),
            }
        }

        fn object(&self, x: f32, y: f32, name: &str) -> CircleObject<Scene> {
            CircleObject::new(
                self.scene.clone(),
                self.registry.clone(),
                Point::new(x, y),
                ShapeColor::default(),
                name,
                CircleObjectConfig::default(),
            )
        }

        fn radius(&self, id: ShapeId) -> f32 {
            match self.scene.borrow().get(id).map(|s| s.kind.clone()) {
                Some(ShapeKind::Circle { r, .. }) => r,
                other => panic!("not a circle: {other:?}"),
            }
        }
    }

    #[test]
    fn test_set_extent_clamps_to_minimum() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        obj.set_extent(0.0);
        assert_eq!(obj.extent(), 5.0);
        obj.set_extent(f32::NAN);
        assert_eq!(obj.extent(), 5.0);
        obj.set_extent(30.0);
        assert_eq!(obj.extent(), 30.0);
        assert_eq!(f.radius(obj.extent), 30.0);
    }

    #[test]
    fn test_click_region_follows_emphasis_and_expansion() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        obj.set_extent(30.0);
        assert_eq!(obj.click_radius(), Some(10.0));

        obj.emphasize();
        assert_eq!(obj.click_radius(), Some(40.0));
        obj.expand_click_region();
        assert_eq!(obj.click_radius(), Some(230.0));
        assert_eq!(f.radius(obj.click_region.unwrap()), 230.0);

        obj.deemphasize();
        assert_eq!(obj.click_radius(), Some(200.0));
        obj.shrink_click_region();
        assert_eq!(obj.click_radius(), Some(10.0));
    }

    #[test]
    fn test_emphasis_visuals() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        obj.toggle();
        assert!(obj.is_emphasized());
        assert_eq!(f.radius(obj.dot), 8.0);
        assert!(obj.label.is_visible(&*f.scene.borrow()));
        assert_eq!(
            f.scene.borrow().get(obj.extent).unwrap().style.fill_opacity,
            0.5
        );

        obj.toggle();
        assert!(!obj.is_emphasized());
        assert_eq!(f.radius(obj.dot), 4.0);
        assert!(!obj.label.is_visible(&*f.scene.borrow()));
    }

    #[test]
    fn test_emphasized_z_order() {
        let f = Fixture::new();
        let mut a = f.object(10.0, 10.0, "a");
        let b = f.object(50.0, 50.0, "b");
        a.emphasize();

        let scene = f.scene.borrow();
        let order = scene.order();
        let tail = &order[order.len() - 6..];
        assert_eq!(tail[0], a.extent);
        assert_eq!(tail[1], a.dot);
        assert_eq!(tail[4], b.click_region.unwrap());
        assert_eq!(tail[5], a.click_region.unwrap());
        assert!(scene.z_index(b.dot).unwrap() < scene.z_index(a.extent).unwrap());
    }

    #[test]
    fn test_deemphasize_restores_resting_order() {
        let f = Fixture::new();
        let mut a = f.object(10.0, 10.0, "a");
        let b = f.object(50.0, 50.0, "b");
        a.emphasize();
        a.deemphasize();

        let scene = f.scene.borrow();
        let order = scene.order();
        let n = order.len();
        assert_eq!(
            &order[n - 4..],
            &[a.dot, b.dot, a.click_region.unwrap(), b.click_region.unwrap()]
        );
        assert!(scene.z_index(a.extent).unwrap() < scene.z_index(b.dot).unwrap());
    }

    #[test]
    fn test_z_order_isolated_across_surfaces() {
        let registry = Rc::new(RefCell::new(ZOrderRegistry::new()));
        let first = Rc::new(RefCell::new(Scene::new(100.0, 100.0)));
        let second = Rc::new(RefCell::new(Scene::new(100.0, 100.0)));
        let make = |scene: &Rc<RefCell<Scene>>, name: &str| {
            CircleObject::new(
                scene.clone(),
                registry.clone(),
                Point::new(20.0, 20.0),
                ShapeColor::default(),
                name,
                CircleObjectConfig::default(),
            )
        };

        let mut a = make(&first, "a");
        let b = make(&second, "b");
        let second_before = second.borrow().order().to_vec();

        a.emphasize();
        a.deemphasize();

        assert_eq!(second.borrow().order(), second_before.as_slice());
        let registry = registry.borrow();
        assert_eq!(registry.dots(first.borrow().id()), &[a.dot]);
        assert_eq!(registry.dots(second.borrow().id()), &[b.dot]);
    }

    #[test]
    fn test_move_to_rejects_off_surface() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        assert!(!obj.move_to(100.0, 50.0));
        assert!(!obj.move_to(-1.0, 50.0));
        assert_eq!((obj.x(), obj.y()), (10.0, 10.0));

        assert!(obj.move_to(99.0, 0.0));
        assert_eq!((obj.x(), obj.y()), (99.0, 0.0));
        assert!(obj.contains(Point::new(95.0, 5.0)));
        assert!(!obj.contains(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_drag_move_from_snapshot() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        assert_eq!(obj.drag_move(1.0, 1.0), Err(EditorError::NoActiveDrag));

        obj.begin_move().unwrap();
        assert_eq!(obj.drag_move(5.0, 5.0), Ok(true));
        assert_eq!(obj.drag_move(20.0, 0.0), Ok(true));
        assert_eq!((obj.x(), obj.y()), (30.0, 10.0));
        assert_eq!(obj.drag_move(-50.0, 0.0), Ok(false));
        assert_eq!(obj.end_move(), Some(Point::new(30.0, 10.0)));
        assert_eq!(obj.end_move(), None);
    }

    #[test]
    fn test_passive_object_has_no_click_region() {
        let f = Fixture::new();
        let obj = CircleObject::new(
            f.scene.clone(),
            f.registry.clone(),
            Point::new(10.0, 10.0),
            ShapeColor::default(),
            "p",
            CircleObjectConfig {
                passive: true,
                ..CircleObjectConfig::default()
            },
        );
        assert_eq!(obj.click_radius(), None);
        assert!(!obj.contains(Point::new(10.0, 10.0)));
        assert!(f.registry.borrow().click_regions(f.scene.borrow().id()).is_empty());
    }

    #[test]
    fn test_image_space_round_trip() {
        let f = Fixture::new();
        // 400x400 image shown at 100x100
        let mapper = CoordinateMapper::with_scale(ImageDimensions::new(400, 400), 4.0).unwrap();
        let record = Extent::new(40.0, 80.0, 60.0);
        let mut obj = CircleObject::from_extent(
            f.scene.clone(),
            f.registry.clone(),
            &mapper,
            record,
            ShapeColor::default(),
            "a",
            CircleObjectConfig::default(),
        );
        assert_eq!((obj.x(), obj.y(), obj.extent()), (10.0, 20.0, 15.0));
        assert_eq!(obj.to_extent(&mapper), record);

        assert!(obj.move_to_image(&mapper, Point::new(200.0, 120.0)));
        assert_eq!((obj.x(), obj.y()), (50.0, 30.0));
        assert!(!obj.move_to_image(&mapper, Point::new(400.0, 0.0)));

        obj.set_image_extent(&mapper, 8.0);
        assert_eq!(obj.extent(), 5.0);
        assert_eq!(obj.to_extent(&mapper), Extent::new(200.0, 120.0, 20.0));
    }

    #[test]
    fn test_hide_show_and_remove() {
        let f = Fixture::new();
        let mut obj = f.object(10.0, 10.0, "a");
        obj.emphasize();
        obj.hide();
        assert!(!obj.is_emphasized());
        assert_eq!(f.scene.borrow().get(obj.dot).unwrap().style.opacity, 0.0);
        obj.show();
        assert_eq!(f.scene.borrow().get(obj.dot).unwrap().style.opacity, 1.0);

        obj.remove();
        assert!(f.scene.borrow().is_empty());
        assert!(f.registry.borrow().dots(f.scene.borrow().id()).is_empty());
    }
}
