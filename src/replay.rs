//! Replay: drives a notebook from a recorded JSON script.
//!
//! DESIGN
//! ======
//! A script is a list of steps mirroring what a host would forward to the
//! engine: raw pointer events (mouse or touch JSON, exactly as a browser
//! serializes them), brush changes, and session commands. Steps are applied
//! in order to a fresh [`NotebookCore`]; ignored input is counted, not
//! fatal, just like in the browser.
//!
//! ```json
//! {
//!   "language": "en",
//!   "steps": [
//!     { "op": "pointer_down", "event": { "clientX": 100, "clientY": 200 } },
//!     { "op": "pointer_move", "event": { "touches": [{ "clientX": 140, "clientY": 230 }] } },
//!     { "op": "pointer_up" },
//!     { "op": "toggle_mode" },
//!     { "op": "select_stroke", "stroke": "hook" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use notebook::color::Rgb;
use notebook::compositor::{CompositeError, CompositeSnapshot};
use notebook::engine::{Action, NotebookCore};
use notebook::geom::{Point, SurfaceRect};
use notebook::input::RawPointerEvent;
use notebook::layer::LayerError;
use notebook::unit::{Alphabet, StrokeKind};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("cannot read script {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot create notebook: {0}")]
    Layer(#[from] LayerError),
    #[error("cannot capture snapshot: {0}")]
    Composite(#[from] CompositeError),
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// One scripted interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    PointerDown { event: RawPointerEvent },
    PointerMove { event: RawPointerEvent },
    PointerUp,
    PointerLeave,
    /// Down, a move per remaining point, then up. Points are layer-local and
    /// are mapped through the current bounds before dispatch.
    Stroke { points: Vec<Point> },
    Bounds { left: f32, top: f32 },
    BrushSize { size: u8 },
    Color { color: Rgb },
    Eraser { on: bool },
    ToggleEraser,
    Clear,
    NextPage,
    PreviousPage,
    ToggleMode,
    SelectStroke { stroke: StrokeKind },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_language")]
    pub language: String,
    pub steps: Vec<Step>,
}

fn default_language() -> String {
    "en".to_string()
}

/// What happened while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub actions: usize,
    /// Pointer moves that produced no ink (no active pointer or unsupported event).
    pub ignored_moves: usize,
}

impl Script {
    /// # Errors
    ///
    /// Returns [`ReplayError::Parse`] for malformed JSON or unknown steps.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`ReplayError::Read`] or [`ReplayError::Parse`].
    pub async fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ReplayError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }

    /// Apply every step to `core` in order.
    pub fn apply(&self, core: &mut NotebookCore) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for step in &self.steps {
            let actions = match step {
                Step::PointerMove { event } => {
                    let actions = core.on_pointer_move(event);
                    if actions.is_empty() {
                        summary.ignored_moves += 1;
                    }
                    actions
                }
                other => apply_step(core, other),
            };
            summary.steps += 1;
            summary.actions += actions.len();
        }
        debug!(?summary, "script applied");
        summary
    }
}

fn apply_step(core: &mut NotebookCore, step: &Step) -> Vec<Action> {
    match step {
        Step::PointerDown { event } => core.on_pointer_down(event),
        Step::PointerMove { event } => core.on_pointer_move(event),
        Step::PointerUp => core.on_pointer_up(),
        Step::PointerLeave => core.on_pointer_leave(),
        Step::Stroke { points } => {
            let bounds = core.bounds();
            let Some((first, rest)) = points.split_first() else {
                return Vec::new();
            };
            let mut actions = core.on_pointer_down(&bounds.to_client(*first));
            for point in rest {
                actions.extend(core.on_pointer_move(&bounds.to_client(*point)));
            }
            actions.extend(core.on_pointer_up());
            actions
        }
        Step::Bounds { left, top } => {
            core.set_bounds(SurfaceRect::new(*left, *top));
            Vec::new()
        }
        Step::BrushSize { size } => {
            core.set_brush_size(*size);
            Vec::new()
        }
        Step::Color { color } => {
            core.set_color(*color);
            Vec::new()
        }
        Step::Eraser { on } => {
            core.set_erasing(*on);
            Vec::new()
        }
        Step::ToggleEraser => {
            core.toggle_eraser();
            Vec::new()
        }
        Step::Clear => core.clear_ink(),
        Step::NextPage => core.next_page(),
        Step::PreviousPage => core.previous_page(),
        Step::ToggleMode => core.toggle_mode(),
        Step::SelectStroke { stroke } => core.select_stroke(*stroke),
    }
}

/// Run `script` on a fresh notebook.
///
/// # Errors
///
/// Returns [`ReplayError::Layer`] if the notebook cannot be allocated.
pub fn run(script: &Script, alphabet: Alphabet) -> Result<(NotebookCore, ReplaySummary), ReplayError> {
    let mut core = NotebookCore::new(alphabet)?;
    let summary = script.apply(&mut core);
    Ok((core, summary))
}

/// Write the snapshot's PNG bytes to `path`.
///
/// # Errors
///
/// Returns [`ReplayError::Write`] on I/O failure.
pub async fn write_png(snapshot: &CompositeSnapshot, path: &Path) -> Result<(), ReplayError> {
    tokio::fs::write(path, snapshot.png())
        .await
        .map_err(|source| ReplayError::Write { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), width = snapshot.width(), height = snapshot.height(), "snapshot written");
    Ok(())
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;
