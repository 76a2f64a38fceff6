//! One-shot image loading boundary
//!
//! The natural size of the image is the only thing the editors need from the
//! loader. It arrives exactly once, through a future that consumers await
//! before doing any coordinate conversion.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use anyhow::Context as _;
use futures::channel::oneshot;

use crate::error::EditorError;

/// Natural pixel size of a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Read the dimensions from an image file without decoding its pixels
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read image dimensions of {}", path.display()))?;
        Ok(Self { width, height })
    }
}

/// Sending half: resolves the matching [`ImageLoad`] once
pub struct ImageLoader {
    tx: oneshot::Sender<ImageDimensions>,
}

impl ImageLoader {
    pub fn resolve(self, dims: ImageDimensions) {
        if self.tx.send(dims).is_err() {
            log::debug!("Image loaded after its consumer was dropped");
        }
    }
}

/// Future resolving to the natural image size
///
/// Resolves to [`EditorError::ImageLoadCanceled`] if the [`ImageLoader`] is
/// dropped without resolving.
pub struct ImageLoad {
    rx: oneshot::Receiver<ImageDimensions>,
}

impl Future for ImageLoad {
    type Output = Result<ImageDimensions, EditorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| EditorError::ImageLoadCanceled))
    }
}

/// Create a connected loader / load-future pair
pub fn image_load() -> (ImageLoader, ImageLoad) {
    let (tx, rx) = oneshot::channel();
    (ImageLoader { tx }, ImageLoad { rx })
}
