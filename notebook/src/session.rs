//! Practice session: which page or stroke the learner is working on.
//!
//! Pure state with no rendering. Every mutation returns the
//! [`SessionEffect`]s the owner must apply; an operation that changes nothing
//! returns an empty list.
//!
//! DESIGN
//! ======
//! Page navigation only exists in Letters mode. Switching mode resets the
//! page to 0 and asks for the ink to be cleared, since tracing left over
//! from letters is meaningless on a stroke exemplar (and vice versa). Moving
//! between pages repaints the guides but keeps the ink.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::debug;

use crate::guide::GuideContent;
use crate::unit::{Alphabet, PracticeMode, PracticeUnit, StrokeKind};

/// Side effect requested by a session mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Clear and redraw the Background for [`PracticeSession::content`].
    RepaintGuides,
    /// Wipe the Foreground.
    ClearInk,
}

/// Mode, page and stroke selection over an injected alphabet.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    alphabet: Alphabet,
    mode: PracticeMode,
    page_index: usize,
    current_stroke: StrokeKind,
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

impl PracticeSession {
    /// Start in Letters mode on page 0 with the first catalog stroke selected.
    #[must_use]
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet, mode: PracticeMode::Letters, page_index: 0, current_stroke: StrokeKind::default() }
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn current_stroke(&self) -> StrokeKind {
        self.current_stroke
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.alphabet.page_count()
    }

    /// Letters on the current page (empty in Strokes mode).
    #[must_use]
    pub fn visible_letters(&self) -> &[char] {
        match self.mode {
            PracticeMode::Letters => self.alphabet.page(self.page_index),
            PracticeMode::Strokes => &[],
        }
    }

    /// The units currently shown for tracing.
    #[must_use]
    pub fn visible_units(&self) -> Vec<PracticeUnit> {
        match self.mode {
            PracticeMode::Letters => self.visible_letters().iter().copied().map(PracticeUnit::Letter).collect(),
            PracticeMode::Strokes => vec![PracticeUnit::Stroke(self.current_stroke)],
        }
    }

    /// What the guide renderer should draw for the current state.
    #[must_use]
    pub fn content(&self) -> GuideContent {
        match self.mode {
            PracticeMode::Letters => GuideContent::Letters { page: self.page_index },
            PracticeMode::Strokes => GuideContent::Stroke(self.current_stroke),
        }
    }

    /// Task-specific instructions for an evaluator looking at a snapshot of this screen.
    #[must_use]
    pub fn task_prompt(&self) -> String {
        match self.mode {
            PracticeMode::Letters => {
                let letters = self.visible_letters().iter().map(char::to_string).collect::<Vec<_>>().join(", ");
                format!(
                    "The reference row shows the letters {letters}. \
                     Check the student's tracing and copies of each letter."
                )
            }
            PracticeMode::Strokes => {
                let kind = self.current_stroke;
                format!(
                    "The reference row shows the stroke \"{}\". {} \
                     Check the student's copies of this stroke.",
                    kind.name(),
                    kind.description()
                )
            }
        }
    }

    // =========================================================
    // Mutations
    // =========================================================

    /// Advance one page. No-op on the last page and in Strokes mode.
    pub fn next_page(&mut self) -> Vec<SessionEffect> {
        if self.mode != PracticeMode::Letters || self.page_index + 1 >= self.page_count() {
            return Vec::new();
        }
        self.page_index += 1;
        debug!(page = self.page_index, "next page");
        vec![SessionEffect::RepaintGuides]
    }

    /// Go back one page. No-op on page 0 and in Strokes mode.
    pub fn previous_page(&mut self) -> Vec<SessionEffect> {
        if self.mode != PracticeMode::Letters || self.page_index == 0 {
            return Vec::new();
        }
        self.page_index -= 1;
        debug!(page = self.page_index, "previous page");
        vec![SessionEffect::RepaintGuides]
    }

    /// Choose the stroke exemplar. No-op outside Strokes mode or when already selected.
    pub fn select_stroke(&mut self, kind: StrokeKind) -> Vec<SessionEffect> {
        if self.mode != PracticeMode::Strokes || self.current_stroke == kind {
            return Vec::new();
        }
        self.current_stroke = kind;
        debug!(stroke = kind.id(), "stroke selected");
        vec![SessionEffect::RepaintGuides]
    }

    /// Flip between Letters and Strokes, back to page 0 with a blank ink layer.
    pub fn toggle_mode(&mut self) -> Vec<SessionEffect> {
        self.mode = self.mode.toggled();
        self.page_index = 0;
        debug!(mode = ?self.mode, "mode toggled");
        vec![SessionEffect::ClearInk, SessionEffect::RepaintGuides]
    }
}
