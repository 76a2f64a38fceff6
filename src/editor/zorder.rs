//! Per-surface z-order groups for extent objects
//!
//! Every surface gets its own group of dots and click regions. Raising a
//! group keeps the relative order in which its members were registered.

use std::collections::HashMap;

use crate::render::{ShapeId, Surface, SurfaceId};

#[derive(Debug, Default, Clone)]
struct ZGroup {
    dots: Vec<ShapeId>,
    click_regions: Vec<ShapeId>,
}

/// Registry of dot and click-region groups, keyed by surface
#[derive(Debug, Default)]
pub struct ZOrderRegistry {
    groups: HashMap<SurfaceId, ZGroup>,
}

impl ZOrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_dot(&mut self, surface: SurfaceId, dot: ShapeId) {
        self.groups.entry(surface).or_default().dots.push(dot);
    }

    pub fn register_click_region(&mut self, surface: SurfaceId, region: ShapeId) {
        self.groups
            .entry(surface)
            .or_default()
            .click_regions
            .push(region);
    }

    /// Forget a shape; empty groups are dropped
    pub fn unregister(&mut self, surface: SurfaceId, shape: ShapeId) {
        if let Some(group) = self.groups.get_mut(&surface) {
            group.dots.retain(|id| *id != shape);
            group.click_regions.retain(|id| *id != shape);
            if group.dots.is_empty() && group.click_regions.is_empty() {
                self.groups.remove(&surface);
            }
        }
    }

    pub fn dots(&self, surface: SurfaceId) -> &[ShapeId] {
        self.groups
            .get(&surface)
            .map(|g| g.dots.as_slice())
            .unwrap_or_default()
    }

    pub fn click_regions(&self, surface: SurfaceId) -> &[ShapeId] {
        self.groups
            .get(&surface)
            .map(|g| g.click_regions.as_slice())
            .unwrap_or_default()
    }

    /// Raise every dot registered for this surface
    pub fn dots_to_front<S: Surface>(&self, surface: &mut S) {
        for id in self.dots(surface.id()) {
            surface.to_front(*id);
        }
    }

    /// Raise every click region registered for this surface
    pub fn click_regions_to_front<S: Surface>(&self, surface: &mut S) {
        for id in self.click_regions(surface.id()) {
            surface.to_front(*id);
        }
    }
}
