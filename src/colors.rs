//! Distinct colors for labelled objects

use std::collections::HashMap;

use crate::config::ShapeColor;

/// Number of colors a [`ColorFactory`] cycles through
pub const MAX_COLORS: usize = 256;

/// Convert HSL (all components in `[0, 1]`) to RGB
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> ShapeColor {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    ShapeColor::new(r + m, g + m, b + m)
}

/// `n` fully saturated colors with evenly spaced hues
pub fn evenly_spaced_colors(n: usize) -> Vec<ShapeColor> {
    let space = 1.0 / n as f32;
    (0..n)
        .map(|i| hsl_to_rgb(space * i as f32, 1.0, 0.5))
        .collect()
}

/// Hands out colors so that the ones given so far stay roughly evenly spaced
///
/// Hues are visited with halving strides: 0, 1/2, then 1/4 and 3/4, and so
/// on. After all [`MAX_COLORS`] have been used the sequence starts over.
#[derive(Debug, Clone)]
pub struct ColorFactory {
    colors: Vec<ShapeColor>,
    used: Vec<bool>,
    idx: usize,
    step: usize,
}

impl Default for ColorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorFactory {
    pub fn new() -> Self {
        Self {
            colors: evenly_spaced_colors(MAX_COLORS),
            used: vec![false; MAX_COLORS],
            idx: 0,
            step: MAX_COLORS / 2,
        }
    }

    pub fn next_color(&mut self) -> ShapeColor {
        if self.used.iter().all(|u| *u) {
            log::debug!("All {} colors used, starting over", MAX_COLORS);
            self.used.fill(false);
            self.idx = 0;
            self.step = MAX_COLORS / 2;
        }

        let color = self.colors[self.idx];
        self.used[self.idx] = true;
        self.advance();
        color
    }

    /// Move to the next unused index, halving the stride at each wrap
    fn advance(&mut self) {
        loop {
            self.idx += self.step;
            if self.idx >= self.colors.len() {
                self.step /= 2;
                self.idx = 0;
                if self.step == 0 {
                    return;
                }
            }
            if !self.used[self.idx] {
                return;
            }
        }
    }
}

/// Stable key to color assignment
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    assigned: HashMap<String, ShapeColor>,
    factory: ColorFactory,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `key`; the same key always gets the same color
    pub fn color(&mut self, key: &str) -> ShapeColor {
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }
        let color = self.factory.next_color();
        self.assigned.insert(key.to_string(), color);
        color
    }
}
