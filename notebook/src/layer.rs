//! Raster layers: the two stacked surfaces of a practice screen.
//!
//! A [`Layer`] is a fixed-size premultiplied RGBA buffer tagged with the role
//! that owns it. The Background belongs to the guide renderer and the
//! Foreground to the ink surface; nothing else writes to either. Both are
//! allocated once and reused for the lifetime of the engine.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use tiny_skia::{Pixmap, PixmapRef};

use crate::geom::PixelRect;

/// Which component owns a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    /// Guide content; painted by the guide renderer only.
    Background,
    /// User ink; mutated by drawing operations only.
    Foreground,
}

/// Errors produced while allocating a layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayerError {
    /// The requested size is zero or too large to allocate.
    #[error("cannot allocate {role:?} layer of {width}x{height}")]
    Allocation { role: LayerRole, width: u32, height: u32 },
}

/// One RGBA pixel, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
}

/// A fixed-size raster surface with an ownership role.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    role: LayerRole,
    pixmap: Pixmap,
}

impl Layer {
    /// Allocate a fully transparent layer.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Allocation`] for a zero or oversized area.
    pub fn new(role: LayerRole, width: u32, height: u32) -> Result<Self, LayerError> {
        let pixmap = Pixmap::new(width, height).ok_or(LayerError::Allocation { role, width, height })?;
        Ok(Self { role, pixmap })
    }

    #[must_use]
    pub fn role(&self) -> LayerRole {
        self.role
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Whether every pixel is fully transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&byte| byte == 0)
    }

    /// Read one pixel, or `None` outside the layer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba { r: c.red(), g: c.green(), b: c.blue(), a: c.alpha() })
    }

    /// Raw premultiplied RGBA bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA bytes, row-major, as expected by DOM `ImageData`.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.copy_rgba(self.full_rect(), &mut out);
        out
    }

    /// The whole layer as a rectangle.
    #[must_use]
    pub fn full_rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width(), self.height())
    }

    /// Copy the straight-alpha RGBA bytes of `rect` into `out`, reusing its
    /// allocation. The rectangle is clipped to the layer; returns the clipped
    /// rectangle, or `None` (with `out` emptied) if nothing remains.
    pub fn copy_rgba(&self, rect: PixelRect, out: &mut Vec<u8>) -> Option<PixelRect> {
        out.clear();
        let x = rect.x.min(self.width());
        let y = rect.y.min(self.height());
        let right = rect.x.saturating_add(rect.width).min(self.width());
        let bottom = rect.y.saturating_add(rect.height).min(self.height());
        if right <= x || bottom <= y {
            return None;
        }
        let stride = self.width() as usize;
        let pixels = self.pixmap.pixels();
        for row in y..bottom {
            let start = row as usize * stride + x as usize;
            let end = row as usize * stride + right as usize;
            let Some(span) = pixels.get(start..end) else {
                continue;
            };
            for p in span {
                let c = p.demultiply();
                out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }
        Some(PixelRect::new(x, y, right - x, bottom - y))
    }

    pub(crate) fn as_pixmap_ref(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}
