//! Configuration for the editors, persisted as JSON
//!
//! Every recognized option is a named field with an explicit default; a
//! config file only needs to mention the values it overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color, stored on disk as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // #B00C0C, the box color of the labeling tool
        Self::from_rgb_u8(0xb0, 0x0c, 0x0c)
    }
}

impl ShapeColor {
    pub const BLACK: ShapeColor = ShapeColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: ShapeColor = ShapeColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb_u8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::from_rgb_u8(short(0)?, short(1)?, short(2)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ShapeColor::from_hex(&value).ok_or_else(|| format!("invalid color: {value:?}"))
    }
}

impl From<ShapeColor> for String {
    fn from(c: ShapeColor) -> Self {
        c.to_hex()
    }
}

/// Options for the interactive bounding-box drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BBoxDrawerConfig {
    /// Color of the single static box
    pub static_box_color: ShapeColor,
    /// Color of the interactive box, reference boxes and object dots
    pub bbox_color: ShapeColor,
    pub bbox_line_width: f32,
    /// Radius around corners and edges that grabs a resize handle
    pub click_radius: f32,
    pub handle_opacity: f32,
    pub dot_small_radius: f32,
    pub dot_big_radius: f32,
    /// Image opacity while the drawer is enabled
    pub image_opacity: f32,
    /// With `max_height`, fit the image inside this box instead of a fixed width
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    /// Explicit natural-per-display scale, overriding the computed one
    pub scale: Option<f32>,
    /// Reject resize results that leave the canvas (off by default)
    pub clamp_drawn_box: bool,
}

impl Default for BBoxDrawerConfig {
    fn default() -> Self {
        Self {
            static_box_color: ShapeColor::default(),
            bbox_color: ShapeColor::default(),
            bbox_line_width: 2.0,
            click_radius: 15.0,
            handle_opacity: 0.2,
            dot_small_radius: 5.0,
            dot_big_radius: 5.0,
            image_opacity: 1.0,
            max_width: None,
            max_height: None,
            scale: None,
            clamp_drawn_box: false,
        }
    }
}

/// Options for circular extent objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleObjectConfig {
    pub dot_radius_small: f32,
    pub dot_radius_big: f32,
    pub extent_min_radius: f32,
    pub extent_start_radius: f32,
    pub click_region_radius: f32,
    pub click_region_big_radius: f32,
    pub click_region_opacity: f32,
    /// Passive objects are display-only and have no click region
    pub passive: bool,
}

impl Default for CircleObjectConfig {
    fn default() -> Self {
        Self {
            dot_radius_small: 4.0,
            dot_radius_big: 8.0,
            extent_min_radius: 5.0,
            extent_start_radius: 0.0,
            click_region_radius: 10.0,
            click_region_big_radius: 200.0,
            click_region_opacity: 0.0,
            passive: false,
        }
    }
}

/// Options for the fixed-position box with circular corner regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedBoxConfig {
    pub stroke_width: f32,
    pub click_region_width: f32,
    pub corner_radius: f32,
    pub edge_opacity: f32,
    pub corner_opacity: f32,
}

impl Default for FixedBoxConfig {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            click_region_width: 20.0,
            corner_radius: 20.0,
            edge_opacity: 0.0,
            corner_opacity: 0.0,
        }
    }
}

/// Options for the point-spreading heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    /// Minimum separation in display pixels
    pub min_distance: f32,
    pub max_passes: usize,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            min_distance: 20.0,
            max_passes: 5,
        }
    }
}

/// Options for relationship arrows between objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    pub draw_arrowhead: bool,
    /// Half-angle of the head in radians
    pub arrow_angle: f32,
    pub arrow_length: f32,
    /// Gap left between the arrow and the objects it connects
    pub padding: f32,
    pub edge_width: f32,
    pub edge_color: ShapeColor,
    pub emph_edge_color: ShapeColor,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            draw_arrowhead: true,
            arrow_angle: std::f32::consts::PI / 12.0,
            arrow_length: 10.0,
            padding: 10.0,
            edge_width: 2.0,
            edge_color: ShapeColor::from_rgb_u8(0xfe, 0x80, 0x80),
            emph_edge_color: ShapeColor::new(1.0, 0.0, 0.0),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bbox: BBoxDrawerConfig,
    #[serde(default)]
    pub circle_object: CircleObjectConfig,
    #[serde(default)]
    pub fixed_box: FixedBoxConfig,
    #[serde(default)]
    pub spread: SpreadConfig,
    #[serde(default)]
    pub arrow: ArrowConfig,
}

impl AppConfig {
    pub const APP_DIR: &'static str = "annotate-canvas";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config directory for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }
}
