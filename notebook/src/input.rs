//! Input model: normalized pointer positions and the drawing state machine.
//!
//! Hosts deliver mouse or touch events in client (page) coordinates. Every
//! event shape implements [`PointerPosition`], so the ink surface never
//! branches on device type. [`InkState`] is the gesture being tracked between
//! pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Deserialize;

use crate::geom::Point;

/// Reasons a pointer event produces no ink.
///
/// Both are expected during normal use and are ignored by the engine rather
/// than reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A move arrived with no preceding pointer-down (e.g. a stray touch-move after touch-end).
    #[error("no active pointer")]
    NoActivePointer,
    /// The event matched neither the mouse nor the touch shape, or carried no touch points.
    #[error("unsupported input device")]
    UnsupportedInputDevice,
}

/// Anything that can report where the pointer is, in client coordinates.
pub trait PointerPosition {
    /// Client-space position of the active pointer.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnsupportedInputDevice`] when no position can be derived.
    fn client_position(&self) -> Result<Point, InputError>;
}

impl PointerPosition for Point {
    fn client_position(&self) -> Result<Point, InputError> {
        Ok(*self)
    }
}

/// A mouse event position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MouseInput {
    #[serde(rename = "clientX")]
    pub client_x: f32,
    #[serde(rename = "clientY")]
    pub client_y: f32,
}

impl PointerPosition for MouseInput {
    fn client_position(&self) -> Result<Point, InputError> {
        Ok(Point::new(self.client_x, self.client_y))
    }
}

/// A touch event: the currently active touch points, first one wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TouchInput {
    pub touches: Vec<MouseInput>,
}

impl PointerPosition for TouchInput {
    fn client_position(&self) -> Result<Point, InputError> {
        self.touches
            .first()
            .ok_or(InputError::UnsupportedInputDevice)?
            .client_position()
    }
}

/// An event of unknown shape, as serialized by a host (DOM event JSON, replay script).
///
/// Touch is tried before mouse because a touch payload may also carry
/// page-level `clientX`/`clientY` fields from a polyfill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPointerEvent {
    Touch(TouchInput),
    Mouse(MouseInput),
    Other(serde_json::Value),
}

impl PointerPosition for RawPointerEvent {
    fn client_position(&self) -> Result<Point, InputError> {
        match self {
            Self::Touch(touch) => touch.client_position(),
            Self::Mouse(mouse) => mouse.client_position(),
            Self::Other(_) => Err(InputError::UnsupportedInputDevice),
        }
    }
}

/// Drawing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InkState {
    /// No pointer held; moves are ignored.
    #[default]
    Idle,
    /// Pointer held; the next segment starts at `last` (layer-local).
    Drawing { last: Point },
}

impl InkState {
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
