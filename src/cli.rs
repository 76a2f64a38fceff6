//! Command line interface for rendering annotations over an image
//!
//! Geometry arguments are JSON in natural image coordinates, the same records
//! the editors exchange with a host page.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::canvas::DisplaySize;
use crate::domain::{Extent, NamedPoint, Rect, StaticBox};

/// Display width used when no size is given
pub const DEFAULT_WIDTH: f32 = 800.0;

/// Render a bounding box, reference boxes and labelled objects over an image
///
/// Examples:
///   annotate-canvas --image cat.jpg --box '{"x":10,"y":20,"w":200,"h":120}'
///   annotate-canvas --image cat.jpg --max-width 640 --max-height 480 \
///       --objects '[{"name":"ear","x":40,"y":30},{"name":"eye","x":44,"y":31}]'
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "annotate-canvas",
    version,
    about = "Render bounding-box and extent annotations over an image"
)]
pub struct Cli {
    /// Image to annotate
    #[clap(long, short = 'i')]
    pub image: PathBuf,

    /// Display width; height follows the aspect ratio
    #[clap(long, short = 'w', conflicts_with_all = ["max_width", "max_height"])]
    pub width: Option<f32>,

    /// Fit the image inside this width (requires --max-height)
    #[clap(long, requires = "max_height")]
    pub max_width: Option<f32>,

    /// Fit the image inside this height (requires --max-width)
    #[clap(long, requires = "max_width")]
    pub max_height: Option<f32>,

    /// The interactive box as `{"x","y","w","h"}`
    #[clap(long = "box", value_name = "JSON")]
    pub bbox: Option<String>,

    /// Reference boxes as a JSON list; an optional "color" overrides the box color
    #[clap(long, value_name = "JSON")]
    pub boxes: Option<String>,

    /// Labelled points as `[{"name","x","y"}]`, spread apart before drawing
    #[clap(long, value_name = "JSON")]
    pub objects: Option<String>,

    /// Extent markers as `[{"x","y","r"}]`
    #[clap(long, value_name = "JSON")]
    pub extents: Option<String>,

    /// Config file to use instead of the default location
    #[clap(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Write the effective config to the default location
    #[clap(long)]
    pub write_config: bool,

    /// Where to write the rendered PNG
    #[clap(long, short = 'o', default_value = "annotated.png")]
    pub output: PathBuf,
}

fn parse_json<T: serde::de::DeserializeOwned>(
    arg: Option<&str>,
    what: &str,
) -> anyhow::Result<Option<T>> {
    arg.map(|json| serde_json::from_str(json).with_context(|| format!("Invalid {what} JSON")))
        .transpose()
}

impl Cli {
    pub fn display_size(&self) -> anyhow::Result<DisplaySize> {
        let size = match (self.max_width, self.max_height, self.width) {
            (Some(max_width), Some(max_height), _) => DisplaySize::Bounded {
                max_width,
                max_height,
            },
            (_, _, Some(width)) => DisplaySize::Fixed(width),
            _ => DisplaySize::Fixed(DEFAULT_WIDTH),
        };
        let valid = match size {
            DisplaySize::Fixed(w) => w > 0.0,
            DisplaySize::Bounded {
                max_width,
                max_height,
            } => max_width > 0.0 && max_height > 0.0,
        };
        anyhow::ensure!(valid, "Display size must be positive, got {:?}", size);
        Ok(size)
    }

    pub fn bbox(&self) -> anyhow::Result<Option<Rect>> {
        parse_json(self.bbox.as_deref(), "box")
    }

    pub fn boxes(&self) -> anyhow::Result<Vec<StaticBox>> {
        Ok(parse_json(self.boxes.as_deref(), "boxes")?.unwrap_or_default())
    }

    pub fn objects(&self) -> anyhow::Result<Vec<NamedPoint>> {
        Ok(parse_json(self.objects.as_deref(), "objects")?.unwrap_or_default())
    }

    pub fn extents(&self) -> anyhow::Result<Vec<Extent>> {
        Ok(parse_json(self.extents.as_deref(), "extents")?.unwrap_or_default())
    }
}
