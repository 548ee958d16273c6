//! Compositor: flattens Background and Foreground into one PNG snapshot.
//!
//! Capture never mutates either layer. It draws onto a scratch pixmap of the
//! same size: an optional opaque paper backdrop, then the Background, then the
//! Foreground on top, both source-over at the origin. The result is encoded
//! as PNG and wrapped in a base64 data URI.
//!
//! Same layers in ⇒ byte-identical snapshot out.

#[cfg(test)]
#[path = "compositor_test.rs"]
mod compositor_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tiny_skia::{Pixmap, PixmapPaint, Transform};
use tracing::debug;

use crate::color::Rgb;
use crate::layer::{Layer, LayerRole, Rgba};

const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositeError {
    #[error("layer sizes differ: background {background:?}, foreground {foreground:?}")]
    DimensionMismatch { background: (u32, u32), foreground: (u32, u32) },
    #[error("layers passed in the wrong roles: background slot holds {background:?}, foreground slot holds {foreground:?}")]
    RoleMismatch { background: LayerRole, foreground: LayerRole },
    #[error("cannot allocate {0}x{1} scratch surface")]
    Allocation(u32, u32),
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Read-only view over a Background/Foreground pair of matching size.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    background: &'a Layer,
    foreground: &'a Layer,
    backdrop: Option<Rgb>,
}

impl<'a> Compositor<'a> {
    /// Pair two layers for compositing, with a white paper backdrop.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::RoleMismatch`] unless `background` is the
    /// Background layer and `foreground` the Foreground layer, and
    /// [`CompositeError::DimensionMismatch`] if the layers differ in size.
    pub fn new(background: &'a Layer, foreground: &'a Layer) -> Result<Self, CompositeError> {
        if background.role() != LayerRole::Background || foreground.role() != LayerRole::Foreground {
            return Err(CompositeError::RoleMismatch { background: background.role(), foreground: foreground.role() });
        }
        if background.size() != foreground.size() {
            return Err(CompositeError::DimensionMismatch {
                background: background.size(),
                foreground: foreground.size(),
            });
        }
        Ok(Self { background, foreground, backdrop: Some(Rgb::WHITE) })
    }

    /// Replace the paper color; `None` keeps transparent areas transparent.
    #[must_use]
    pub fn with_backdrop(mut self, backdrop: Option<Rgb>) -> Self {
        self.backdrop = backdrop;
        self
    }

    #[must_use]
    pub fn backdrop(&self) -> Option<Rgb> {
        self.backdrop
    }

    /// Flatten both layers and encode the result.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::Allocation`] or [`CompositeError::Encode`] if the
    /// scratch surface cannot be created or encoded.
    pub fn capture(&self) -> Result<CompositeSnapshot, CompositeError> {
        let (width, height) = self.background.size();
        let mut scratch = Pixmap::new(width, height).ok_or(CompositeError::Allocation(width, height))?;

        if let Some(paper) = self.backdrop {
            scratch.fill(paper.to_skia());
        }
        let paint = PixmapPaint::default();
        scratch.draw_pixmap(0, 0, self.background.as_pixmap_ref(), &paint, Transform::identity(), None);
        scratch.draw_pixmap(0, 0, self.foreground.as_pixmap_ref(), &paint, Transform::identity(), None);

        let png = scratch.encode_png().map_err(|e| CompositeError::Encode(e.to_string()))?;
        let data_uri = format!("data:{PNG_MIME};base64,{}", STANDARD.encode(&png));
        debug!(width, height, bytes = png.len(), "snapshot captured");

        Ok(CompositeSnapshot { data_uri, png, flattened: scratch })
    }
}

/// Immutable flattened image of a practice screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSnapshot {
    data_uri: String,
    png: Vec<u8>,
    flattened: Pixmap,
}

impl CompositeSnapshot {
    /// `data:image/png;base64,<payload>`.
    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// The base64 payload without the data URI prefix.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.data_uri.split_once(',').map_or(self.data_uri.as_str(), |(_, payload)| payload)
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        PNG_MIME
    }

    /// Encoded PNG bytes.
    #[must_use]
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.flattened.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.flattened.height()
    }

    /// Read one flattened pixel, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.flattened.pixel(x, y)?.demultiply();
        Some(Rgba { r: c.red(), g: c.green(), b: c.blue(), a: c.alpha() })
    }
}
