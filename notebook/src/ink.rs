//! Ink surface: turns pointer input into freehand strokes on the Foreground.
//!
//! Strokes are built from short independent segments: every move paints one
//! segment from the previous point and then makes the new point the origin.
//! Brush size, color and eraser mode are read per segment, so changing them
//! mid-stroke affects the next segment only.
//!
//! Ink is rasterized without anti-aliasing. Erasing uses destination-out with
//! full coverage, so erasing along the exact path of a brush stroke leaves the
//! layer fully transparent again.

#[cfg(test)]
#[path = "ink_test.rs"]
mod ink_test;

use tiny_skia::{BlendMode, LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform};
use tracing::{debug, trace};

use crate::color::Rgb;
use crate::consts::{BRUSH_SIZE_DEFAULT, BRUSH_SIZE_MAX, BRUSH_SIZE_MIN};
use crate::geom::{PixelRect, Point, SurfaceRect};
use crate::input::{InkState, InputError, PointerPosition};
use crate::layer::{Layer, LayerError, LayerRole};

/// Pen settings applied to each new segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    size: u8,
    color: Rgb,
    erasing: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self { size: BRUSH_SIZE_DEFAULT, color: Rgb::BLACK, erasing: false }
    }
}

impl Brush {
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Set the diameter, clamped to `1..=20`.
    pub fn set_size(&mut self, size: u8) {
        self.size = size.clamp(BRUSH_SIZE_MIN, BRUSH_SIZE_MAX);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.erasing = erasing;
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = false;
        if self.erasing {
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.blend_mode = BlendMode::DestinationOut;
        } else {
            paint.set_color(self.color.to_skia());
            paint.blend_mode = BlendMode::SourceOver;
        }
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: f32::from(self.size),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

/// The Foreground layer plus the pointer state machine that draws on it.
#[derive(Debug, Clone)]
pub struct InkSurface {
    layer: Layer,
    brush: Brush,
    state: InkState,
    bounds: SurfaceRect,
    dirty: Option<PixelRect>,
}

impl InkSurface {
    /// Allocate a transparent Foreground of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError`] for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Result<Self, LayerError> {
        Ok(Self {
            layer: Layer::new(LayerRole::Foreground, width, height)?,
            brush: Brush::default(),
            state: InkState::Idle,
            bounds: SurfaceRect::default(),
            dirty: None,
        })
    }

    #[must_use]
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    #[must_use]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    #[must_use]
    pub fn state(&self) -> InkState {
        self.state
    }

    #[must_use]
    pub fn bounds(&self) -> SurfaceRect {
        self.bounds
    }

    /// Update the client-space rectangle the surface is displayed at.
    pub fn set_bounds(&mut self, bounds: SurfaceRect) {
        self.bounds = bounds;
    }

    /// Flip between brush and eraser; returns the new eraser state.
    pub fn toggle_eraser(&mut self) -> bool {
        self.brush.erasing = !self.brush.erasing;
        self.brush.erasing
    }

    fn local_position(&self, event: &impl PointerPosition) -> Result<Point, InputError> {
        Ok(self.bounds.to_local(event.client_position()?))
    }

    /// Begin a stroke at the event position. Paints nothing by itself.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnsupportedInputDevice`] when the event carries no position;
    /// the state is left unchanged.
    pub fn pointer_down(&mut self, event: &impl PointerPosition) -> Result<(), InputError> {
        let at = self.local_position(event)?;
        self.state = InkState::Drawing { last: at };
        debug!(x = at.x, y = at.y, erasing = self.brush.erasing, "stroke started");
        Ok(())
    }

    /// Paint one segment from the previous point to the event position.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoActivePointer`] while idle, or
    /// [`InputError::UnsupportedInputDevice`] for an event with no position.
    /// The layer is untouched in both cases.
    pub fn pointer_move(&mut self, event: &impl PointerPosition) -> Result<(), InputError> {
        let InkState::Drawing { last } = self.state else {
            return Err(InputError::NoActivePointer);
        };
        let to = self.local_position(event)?;
        self.stroke_segment(last, to);
        self.state = InkState::Drawing { last: to };
        Ok(())
    }

    /// End the current stroke (pointer-up or pointer-leave).
    ///
    /// Returns whether a stroke was in progress.
    pub fn pointer_up(&mut self) -> bool {
        let was_drawing = self.state.is_drawing();
        self.state = InkState::Idle;
        if was_drawing {
            debug!("stroke finished");
        }
        was_drawing
    }

    /// Region painted since the last call, then reset.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Wipe all ink. The state machine is reset as well.
    pub fn clear(&mut self) {
        self.layer.clear();
        self.state = InkState::Idle;
        self.dirty = None;
        debug!("ink cleared");
    }

    fn stroke_segment(&mut self, from: Point, to: Point) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            trace!("degenerate segment skipped");
            return;
        };
        let paint = self.brush.paint();
        let stroke = self.brush.stroke();
        self.layer.pixmap_mut().stroke_path(&path, &paint, &stroke, Transform::identity(), None);

        let (width, height) = self.layer.size();
        if let Some(rect) = PixelRect::around_segment(from, to, stroke.width, width, height) {
            self.dirty = Some(self.dirty.map_or(rect, |d| d.union(rect)));
        }
    }
}
