//! Browser host: binds a [`NotebookCore`] to two stacked canvas elements.
//!
//! The page supplies a Background and a Foreground `<canvas>` of identical
//! size, positioned on top of each other. DOM events are forwarded to the
//! handle; after each call the layers that changed are blitted with
//! `putImageData`. Ink moves copy only the region the last segments touched,
//! through one reused buffer. The bounding rect is re-read on every pointer
//! event so scrolling mid-stroke does not offset the ink. A canvas whose 2D
//! context cannot be obtained is skipped and the session keeps running.

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, MouseEvent, TouchEvent};

use tracing::warn;

use crate::color::Rgb;
use crate::engine::{Action, NotebookCore};
use crate::geom::{PixelRect, Point, SurfaceRect};
use crate::input::{InputError, PointerPosition};
use crate::layer::Layer;
use crate::unit::{Alphabet, PracticeMode, StrokeKind};

impl PointerPosition for MouseEvent {
    fn client_position(&self) -> Result<Point, InputError> {
        Ok(Point::new(self.client_x() as f32, self.client_y() as f32))
    }
}

impl PointerPosition for TouchEvent {
    fn client_position(&self) -> Result<Point, InputError> {
        let touch = self.touches().get(0).ok_or(InputError::UnsupportedInputDevice)?;
        Ok(Point::new(touch.client_x() as f32, touch.client_y() as f32))
    }
}

/// A practice notebook mounted on two canvases.
#[wasm_bindgen]
pub struct NotebookHandle {
    core: NotebookCore,
    background: HtmlCanvasElement,
    foreground: HtmlCanvasElement,
    scratch: Vec<u8>,
}

#[wasm_bindgen]
impl NotebookHandle {
    /// Size both canvases to the notebook, paint the first page, and return the handle.
    ///
    /// # Errors
    ///
    /// Fails if the layers cannot be allocated.
    #[wasm_bindgen(constructor)]
    pub fn new(background: HtmlCanvasElement, foreground: HtmlCanvasElement) -> Result<NotebookHandle, JsError> {
        let core = NotebookCore::new(Alphabet::latin())?;
        let (width, height) = core.background().size();
        for canvas in [&background, &foreground] {
            canvas.set_width(width);
            canvas.set_height(height);
        }
        let mut handle = Self { core, background, foreground, scratch: Vec::new() };
        handle.blit_background();
        handle.blit_foreground();
        Ok(handle)
    }

    // --- Pointer input ---

    pub fn mouse_down(&mut self, event: &MouseEvent) {
        self.refresh_bounds();
        let actions = self.core.on_pointer_down(event);
        self.present(&actions);
    }

    pub fn mouse_move(&mut self, event: &MouseEvent) {
        self.refresh_bounds();
        let actions = self.core.on_pointer_move(event);
        self.present(&actions);
    }

    pub fn touch_start(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.refresh_bounds();
        let actions = self.core.on_pointer_down(event);
        self.present(&actions);
    }

    pub fn touch_move(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.refresh_bounds();
        let actions = self.core.on_pointer_move(event);
        self.present(&actions);
    }

    /// Mouse-up and touch-end.
    pub fn pointer_up(&mut self) {
        let actions = self.core.on_pointer_up();
        self.present(&actions);
    }

    /// Mouse-leave.
    pub fn pointer_leave(&mut self) {
        let actions = self.core.on_pointer_leave();
        self.present(&actions);
    }

    // --- Brush ---

    pub fn set_brush_size(&mut self, size: u8) {
        self.core.set_brush_size(size);
    }

    /// Set the ink color from a `#rrggbb` string.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a hex color.
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsError> {
        self.core.set_color(hex.parse::<Rgb>()?);
        Ok(())
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.core.toggle_eraser()
    }

    pub fn clear(&mut self) {
        let actions = self.core.clear_ink();
        self.present(&actions);
    }

    // --- Session ---

    /// Returns the page index after the call.
    pub fn next_page(&mut self) -> usize {
        let actions = self.core.next_page();
        self.present(&actions);
        self.core.session().page_index()
    }

    /// Returns the page index after the call.
    pub fn previous_page(&mut self) -> usize {
        let actions = self.core.previous_page();
        self.present(&actions);
        self.core.session().page_index()
    }

    /// Returns the new mode, `"letters"` or `"strokes"`.
    pub fn toggle_mode(&mut self) -> String {
        let actions = self.core.toggle_mode();
        self.present(&actions);
        self.mode()
    }

    /// Select a stroke by id (e.g. `"right-slant"`).
    ///
    /// # Errors
    ///
    /// Fails for an unknown id.
    pub fn select_stroke(&mut self, id: &str) -> Result<(), JsError> {
        let kind = StrokeKind::from_id(id).ok_or_else(|| JsError::new(&format!("unknown stroke: {id}")))?;
        let actions = self.core.select_stroke(kind);
        self.present(&actions);
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> String {
        match self.core.session().mode() {
            PracticeMode::Letters => "letters".to_owned(),
            PracticeMode::Strokes => "strokes".to_owned(),
        }
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.core.session().page_index()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.core.session().page_count()
    }

    #[must_use]
    pub fn task_prompt(&self) -> String {
        self.core.session().task_prompt()
    }

    /// Flatten both layers into a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Fails if the composite cannot be encoded.
    pub fn capture(&self) -> Result<String, JsError> {
        Ok(self.core.capture()?.data_uri().to_owned())
    }
}

impl NotebookHandle {
    fn refresh_bounds(&mut self) {
        let rect = self.foreground.get_bounding_client_rect();
        self.core.set_bounds(SurfaceRect::new(rect.left() as f32, rect.top() as f32));
    }

    fn present(&mut self, actions: &[Action]) {
        if actions.contains(&Action::BackgroundRepainted) {
            self.blit_background();
        }
        let dirty = self.core.take_ink_dirty();
        if actions.contains(&Action::InkCleared) {
            self.blit_foreground();
        } else if actions.contains(&Action::InkChanged) {
            if let Some(rect) = dirty {
                blit(&self.foreground, self.core.foreground(), rect, &mut self.scratch);
            }
        }
    }

    fn blit_background(&mut self) {
        let rect = self.core.background().full_rect();
        blit(&self.background, self.core.background(), rect, &mut self.scratch);
    }

    fn blit_foreground(&mut self) {
        let rect = self.core.foreground().full_rect();
        blit(&self.foreground, self.core.foreground(), rect, &mut self.scratch);
    }
}

fn blit(canvas: &HtmlCanvasElement, layer: &Layer, rect: PixelRect, scratch: &mut Vec<u8>) {
    if let Err(e) = try_blit(canvas, layer, rect, scratch) {
        warn!(role = ?layer.role(), error = ?e, "canvas draw skipped");
    }
}

fn try_blit(canvas: &HtmlCanvasElement, layer: &Layer, rect: PixelRect, scratch: &mut Vec<u8>) -> Result<(), JsValue> {
    let Some(rect) = layer.copy_rgba(rect, scratch) else {
        return Ok(());
    };
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(scratch.as_slice()), rect.width, rect.height)?;
    ctx.put_image_data(&image, f64::from(rect.x), f64::from(rect.y))
}
