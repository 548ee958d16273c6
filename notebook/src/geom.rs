#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either client (page) space or layer-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box used to parameterize stroke exemplar routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Point at fractional offsets `(fx, fy)` of the box, `0.0..=1.0` on each axis.
    #[must_use]
    pub fn at(&self, fx: f32, fy: f32) -> Point {
        Point::new(self.x + self.width * fx, self.y + self.height * fy)
    }
}

/// Client-space bounding rectangle of the drawing surface.
///
/// Mirrors the DOM `getBoundingClientRect()` result. Only the offset is used:
/// the surface is displayed at its intrinsic pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Convert a client-space point to layer-local coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point { x: client.x - self.left, y: client.y - self.top }
    }

    /// Convert a layer-local point back to client coordinates.
    #[must_use]
    pub fn to_client(&self, local: Point) -> Point {
        Point { x: local.x + self.left, y: local.y + self.top }
    }
}

/// Integer pixel rectangle within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Pixels covered by a round-capped segment of `line_width`, clipped to a
    /// `width`×`height` surface. `None` if nothing lands on the surface.
    #[must_use]
    pub fn around_segment(from: Point, to: Point, line_width: f32, width: u32, height: u32) -> Option<Self> {
        let pad = line_width / 2.0 + 1.0;
        let left = (from.x.min(to.x) - pad).floor().max(0.0);
        let top = (from.y.min(to.y) - pad).floor().max(0.0);
        let right = (from.x.max(to.x) + pad).ceil().min(width as f32);
        let bottom = (from.y.max(to.y) + pad).ceil().min(height as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left as u32, top as u32, (right - left) as u32, (bottom - top) as u32))
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Self::new(x, y, right - x, bottom - y)
    }
}
