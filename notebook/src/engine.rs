//! Notebook engine: owns both layers and routes input and commands to them.
//!
//! DESIGN
//! ======
//! [`NotebookCore`] contains everything that does not need a browser, so it
//! can be driven from tests and the native replay tool. The browser binding
//! in [`crate::web`] wraps it and blits the layers after each call.
//!
//! Session effects are applied synchronously before a method returns; the
//! returned [`Action`]s only tell the host what changed.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::trace;

use crate::color::Rgb;
use crate::compositor::{CompositeError, CompositeSnapshot, Compositor};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::{PixelRect, SurfaceRect};
use crate::guide::GuideRenderer;
use crate::ink::{Brush, InkSurface};
use crate::input::PointerPosition;
use crate::layer::{Layer, LayerError, LayerRole};
use crate::session::{PracticeSession, SessionEffect};
use crate::unit::{Alphabet, PracticeMode, StrokeKind};

/// What changed, for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The Background was cleared and redrawn.
    BackgroundRepainted,
    /// New ink (or erasure) landed on the Foreground.
    InkChanged,
    /// The Foreground was wiped.
    InkCleared,
    PageChanged { page: usize, page_count: usize },
    ModeChanged(PracticeMode),
    StrokeSelected(StrokeKind),
}

/// Core engine state: session, guide renderer, and the two layers.
#[derive(Debug, Clone)]
pub struct NotebookCore {
    session: PracticeSession,
    guides: GuideRenderer,
    background: Layer,
    ink: InkSurface,
}

impl NotebookCore {
    /// Allocate an 800×480 notebook and paint the first page of guides.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError`] if a layer cannot be allocated.
    pub fn new(alphabet: Alphabet) -> Result<Self, LayerError> {
        Self::with_size(alphabet, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Like [`new`](Self::new) with a custom surface size.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError`] if a layer cannot be allocated.
    pub fn with_size(alphabet: Alphabet, width: u32, height: u32) -> Result<Self, LayerError> {
        let mut core = Self {
            session: PracticeSession::new(alphabet.clone()),
            guides: GuideRenderer::new(alphabet),
            background: Layer::new(LayerRole::Background, width, height)?,
            ink: InkSurface::new(width, height)?,
        };
        core.repaint_guides();
        Ok(core)
    }

    // --- Queries ---

    #[must_use]
    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    #[must_use]
    pub fn background(&self) -> &Layer {
        &self.background
    }

    #[must_use]
    pub fn foreground(&self) -> &Layer {
        self.ink.layer()
    }

    #[must_use]
    pub fn brush(&self) -> Brush {
        self.ink.brush()
    }

    /// Client-space offset last set with [`set_bounds`](Self::set_bounds).
    #[must_use]
    pub fn bounds(&self) -> SurfaceRect {
        self.ink.bounds()
    }

    // --- Pointer input ---

    /// Update the client-space offset of the drawing surface.
    pub fn set_bounds(&mut self, bounds: SurfaceRect) {
        self.ink.set_bounds(bounds);
    }

    pub fn on_pointer_down(&mut self, event: &impl PointerPosition) -> Vec<Action> {
        if let Err(e) = self.ink.pointer_down(event) {
            trace!(%e, "pointer down ignored");
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, event: &impl PointerPosition) -> Vec<Action> {
        match self.ink.pointer_move(event) {
            Ok(()) => vec![Action::InkChanged],
            Err(e) => {
                trace!(%e, "pointer move ignored");
                Vec::new()
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.ink.pointer_up();
        Vec::new()
    }

    /// The pointer left the surface; ends the stroke like pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Brush ---

    pub fn set_brush_size(&mut self, size: u8) {
        self.ink.brush_mut().set_size(size);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.ink.brush_mut().set_color(color);
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.ink.brush_mut().set_erasing(erasing);
    }

    /// Returns the new eraser state.
    pub fn toggle_eraser(&mut self) -> bool {
        self.ink.toggle_eraser()
    }

    /// Foreground region changed by ink since the last call. A host that
    /// redraws incrementally copies only this rectangle after `InkChanged`.
    pub fn take_ink_dirty(&mut self) -> Option<PixelRect> {
        self.ink.take_dirty()
    }

    pub fn clear_ink(&mut self) -> Vec<Action> {
        self.ink.clear();
        vec![Action::InkCleared]
    }

    // --- Session commands ---

    pub fn next_page(&mut self) -> Vec<Action> {
        let effects = self.session.next_page();
        self.page_actions(effects)
    }

    pub fn previous_page(&mut self) -> Vec<Action> {
        let effects = self.session.previous_page();
        self.page_actions(effects)
    }

    pub fn select_stroke(&mut self, kind: StrokeKind) -> Vec<Action> {
        let effects = self.session.select_stroke(kind);
        if effects.is_empty() {
            trace!(stroke = kind.id(), "stroke selection ignored");
            return Vec::new();
        }
        let mut actions = self.apply(&effects);
        actions.push(Action::StrokeSelected(kind));
        actions
    }

    pub fn toggle_mode(&mut self) -> Vec<Action> {
        let effects = self.session.toggle_mode();
        let mut actions = self.apply(&effects);
        actions.push(Action::ModeChanged(self.session.mode()));
        actions
    }

    // --- Output ---

    /// Flatten both layers onto white paper.
    ///
    /// # Errors
    ///
    /// See [`Compositor::capture`].
    pub fn capture(&self) -> Result<CompositeSnapshot, CompositeError> {
        Compositor::new(&self.background, self.ink.layer())?.capture()
    }

    /// Flatten both layers onto a chosen backdrop (`None` for transparent).
    ///
    /// # Errors
    ///
    /// See [`Compositor::capture`].
    pub fn capture_with_backdrop(&self, backdrop: Option<Rgb>) -> Result<CompositeSnapshot, CompositeError> {
        Compositor::new(&self.background, self.ink.layer())?.with_backdrop(backdrop).capture()
    }

    // --- Internals ---

    fn page_actions(&mut self, effects: Vec<SessionEffect>) -> Vec<Action> {
        if effects.is_empty() {
            trace!(page = self.session.page_index(), mode = ?self.session.mode(), "page change ignored");
            return Vec::new();
        }
        let mut actions = self.apply(&effects);
        actions.push(Action::PageChanged { page: self.session.page_index(), page_count: self.session.page_count() });
        actions
    }

    fn apply(&mut self, effects: &[SessionEffect]) -> Vec<Action> {
        effects
            .iter()
            .map(|effect| match effect {
                SessionEffect::ClearInk => {
                    self.ink.clear();
                    Action::InkCleared
                }
                SessionEffect::RepaintGuides => {
                    self.repaint_guides();
                    Action::BackgroundRepainted
                }
            })
            .collect()
    }

    fn repaint_guides(&mut self) {
        self.guides.render(&mut self.background, self.session.content());
    }
}
