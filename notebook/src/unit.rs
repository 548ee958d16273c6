//! Practice content: letters, stroke exemplars, and the alphabet configuration.
//!
//! A [`PracticeUnit`] is one traceable guide item. Letters come from an
//! injected [`Alphabet`]; strokes come from the fixed [`StrokeKind`] catalog,
//! each kind carrying its own draw routine over a bounding box.

#[cfg(test)]
#[path = "unit_test.rs"]
mod unit_test;

use serde::{Deserialize, Serialize};
use tiny_skia::{Path, PathBuilder};

use crate::consts::UNITS_PER_PAGE;
use crate::geom::Bounds;

/// Which set of practice units is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    /// Paginated reference letters.
    #[default]
    Letters,
    /// A single repeated stroke exemplar.
    Strokes,
}

impl PracticeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Letters => Self::Strokes,
            Self::Strokes => Self::Letters,
        }
    }
}

/// The basic pen strokes letters are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeKind {
    /// Top-left to bottom-right.
    #[default]
    RightSlant,
    /// Top-right to bottom-left.
    LeftSlant,
    /// Top to bottom.
    Straight,
    /// Left to right.
    Horizontal,
    /// Curve opening to the right.
    LeftParenthesis,
    /// Curve opening to the left.
    RightParenthesis,
    /// Down stroke ending in a rightward hook.
    Hook,
}

impl StrokeKind {
    /// Every stroke, in teaching order.
    pub const ALL: [Self; 7] = [
        Self::RightSlant,
        Self::LeftSlant,
        Self::Straight,
        Self::Horizontal,
        Self::LeftParenthesis,
        Self::RightParenthesis,
        Self::Hook,
    ];

    /// Stable identifier, also the serde name.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::RightSlant => "right-slant",
            Self::LeftSlant => "left-slant",
            Self::Straight => "straight",
            Self::Horizontal => "horizontal",
            Self::LeftParenthesis => "left-parenthesis",
            Self::RightParenthesis => "right-parenthesis",
            Self::Hook => "hook",
        }
    }

    /// Display name, including the symbol the stroke resembles.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RightSlant => "Right Slant (\\)",
            Self::LeftSlant => "Left Slant (/)",
            Self::Straight => "Straight Line (|)",
            Self::Horizontal => "Horizontal Line (—)",
            Self::LeftParenthesis => "Left Parenthesis (()",
            Self::RightParenthesis => "Right Parenthesis ())",
            Self::Hook => "Hook (ɾ)",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::RightSlant => "Draw from top-left to bottom-right. Used in letters like 'v', 'w', 'y'.",
            Self::LeftSlant => "Draw from top-right to bottom-left. Used in letters like 'v', 'w', 'x'.",
            Self::Straight => "Draw from top to bottom. Used in letters like 'b', 'd', 'h', 'l'.",
            Self::Horizontal => "Draw from left to right. Used in letters like 'e', 'f', 't'.",
            Self::LeftParenthesis => {
                "Draw a curve that opens to the right. Used in parentheses and letters like 'c', 'e'."
            }
            Self::RightParenthesis => {
                "Draw a curve that opens to the left. Used in parentheses and letters like 'd', 'b'."
            }
            Self::Hook => "Draw a hook shape. Used in letters like 'r', 'n', 'm'.",
        }
    }

    /// Look up a stroke by its [`id`](Self::id).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Build this stroke's exemplar path inside `b`.
    ///
    /// Returns `None` only for a degenerate box.
    #[must_use]
    pub fn trace(self, b: Bounds) -> Option<Path> {
        let mut pb = PathBuilder::new();
        match self {
            Self::RightSlant => {
                move_to(&mut pb, b, 0.0, 0.0);
                line_to(&mut pb, b, 1.0, 1.0);
            }
            Self::LeftSlant => {
                move_to(&mut pb, b, 1.0, 0.0);
                line_to(&mut pb, b, 0.0, 1.0);
            }
            Self::Straight => {
                move_to(&mut pb, b, 0.5, 0.0);
                line_to(&mut pb, b, 0.5, 1.0);
            }
            Self::Horizontal => {
                move_to(&mut pb, b, 0.0, 0.5);
                line_to(&mut pb, b, 1.0, 0.5);
            }
            Self::LeftParenthesis => {
                move_to(&mut pb, b, 0.6, 0.0);
                quad_to(&mut pb, b, (0.0, 0.5), (0.6, 1.0));
            }
            Self::RightParenthesis => {
                move_to(&mut pb, b, 0.4, 0.0);
                quad_to(&mut pb, b, (1.0, 0.5), (0.4, 1.0));
            }
            Self::Hook => {
                move_to(&mut pb, b, 0.0, 0.0);
                line_to(&mut pb, b, 0.0, 0.7);
                quad_to(&mut pb, b, (0.3, 1.0), (1.0, 0.7));
            }
        }
        pb.finish()
    }
}

fn move_to(pb: &mut PathBuilder, b: Bounds, fx: f32, fy: f32) {
    let p = b.at(fx, fy);
    pb.move_to(p.x, p.y);
}

fn line_to(pb: &mut PathBuilder, b: Bounds, fx: f32, fy: f32) {
    let p = b.at(fx, fy);
    pb.line_to(p.x, p.y);
}

fn quad_to(pb: &mut PathBuilder, b: Bounds, control: (f32, f32), end: (f32, f32)) {
    let c = b.at(control.0, control.1);
    let e = b.at(end.0, end.1);
    pb.quad_to(c.x, c.y, e.x, e.y);
}

/// One traceable guide item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeUnit {
    Letter(char),
    Stroke(StrokeKind),
}

/// Ordered letters offered for practice, with the page size used to slice them.
///
/// Constructed once and injected into the session; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
    units_per_page: usize,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl Alphabet {
    /// `A` through `Z`, four per page.
    #[must_use]
    pub fn latin() -> Self {
        Self { letters: ('A'..='Z').collect(), units_per_page: UNITS_PER_PAGE }
    }

    /// A custom letter set. A `units_per_page` of zero is raised to one.
    #[must_use]
    pub fn new(letters: impl IntoIterator<Item = char>, units_per_page: usize) -> Self {
        Self { letters: letters.into_iter().collect(), units_per_page: units_per_page.max(1) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[must_use]
    pub fn units_per_page(&self) -> usize {
        self.units_per_page
    }

    /// `ceil(len / units_per_page)`, at least one so page 0 always exists.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.letters.len().div_ceil(self.units_per_page).max(1)
    }

    /// Letters visible on `page`; shorter (or empty) past the end of the alphabet.
    #[must_use]
    pub fn page(&self, page: usize) -> &[char] {
        let start = page.saturating_mul(self.units_per_page).min(self.letters.len());
        let end = start.saturating_add(self.units_per_page).min(self.letters.len());
        &self.letters[start..end]
    }
}
