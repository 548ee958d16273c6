//! Single-stroke vector font for reference letters and labels.
//!
//! Each glyph is a set of polylines on a 4×6 grid: x runs `0..=4` left to
//! right, y runs `0..=6` from cap line to baseline. Glyphs are stroked, not
//! filled, so a child can trace them with the same pen motion. Lowercase
//! input folds to uppercase; characters with no glyph advance without drawing.

#[cfg(test)]
#[path = "glyphs_test.rs"]
mod glyphs_test;

use tiny_skia::{Path, PathBuilder};

use crate::consts::CAP_HEIGHT_RATIO;

type Polyline = &'static [(i8, i8)];

/// Grid width of a glyph body.
const GRID_WIDTH: f32 = 4.0;

/// Grid height from cap line to baseline.
const GRID_HEIGHT: f32 = 6.0;

/// Horizontal advance per character, in grid units (body plus spacing).
const ADVANCE: f32 = 5.5;

/// Look up the polylines of a character.
#[must_use]
pub fn glyph(ch: char) -> Option<&'static [Polyline]> {
    let strokes: &'static [Polyline] = match ch.to_ascii_uppercase() {
        'A' => &[&[(0, 6), (2, 0), (4, 6)], &[(1, 3), (3, 3)]],
        'B' => &[
            &[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)],
            &[(3, 3), (4, 4), (4, 5), (3, 6), (0, 6)],
        ],
        'C' => &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5)]],
        'D' => &[&[(0, 0), (0, 6), (2, 6), (4, 4), (4, 2), (2, 0), (0, 0)]],
        'E' => &[&[(4, 0), (0, 0), (0, 6), (4, 6)], &[(0, 3), (3, 3)]],
        'F' => &[&[(4, 0), (0, 0), (0, 6)], &[(0, 3), (3, 3)]],
        'G' => &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5), (4, 3), (2, 3)]],
        'H' => &[&[(0, 0), (0, 6)], &[(4, 0), (4, 6)], &[(0, 3), (4, 3)]],
        'I' => &[&[(1, 0), (3, 0)], &[(2, 0), (2, 6)], &[(1, 6), (3, 6)]],
        'J' => &[&[(4, 0), (4, 5), (3, 6), (1, 6), (0, 5)]],
        'K' => &[&[(0, 0), (0, 6)], &[(4, 0), (0, 4)], &[(1, 3), (4, 6)]],
        'L' => &[&[(0, 0), (0, 6), (4, 6)]],
        'M' => &[&[(0, 6), (0, 0), (2, 3), (4, 0), (4, 6)]],
        'N' => &[&[(0, 6), (0, 0), (4, 6), (4, 0)]],
        'O' => &[&[(1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6), (0, 5), (0, 1), (1, 0)]],
        'P' => &[&[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)]],
        'Q' => &[
            &[(1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6), (0, 5), (0, 1), (1, 0)],
            &[(2, 4), (4, 6)],
        ],
        'R' => &[&[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)], &[(2, 3), (4, 6)]],
        'S' => &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 2), (1, 3), (3, 3), (4, 4), (4, 5), (3, 6), (1, 6), (0, 5)]],
        'T' => &[&[(0, 0), (4, 0)], &[(2, 0), (2, 6)]],
        'U' => &[&[(0, 0), (0, 5), (1, 6), (3, 6), (4, 5), (4, 0)]],
        'V' => &[&[(0, 0), (2, 6), (4, 0)]],
        'W' => &[&[(0, 0), (1, 6), (2, 3), (3, 6), (4, 0)]],
        'X' => &[&[(0, 0), (4, 6)], &[(4, 0), (0, 6)]],
        'Y' => &[&[(0, 0), (2, 3), (4, 0)], &[(2, 3), (2, 6)]],
        'Z' => &[&[(0, 0), (4, 0), (0, 6), (4, 6)]],
        '(' => &[&[(2, 0), (1, 1), (1, 5), (2, 6)]],
        ')' => &[&[(2, 0), (3, 1), (3, 5), (2, 6)]],
        '/' => &[&[(4, 0), (0, 6)]],
        '\\' => &[&[(0, 0), (4, 6)]],
        '|' => &[&[(2, 0), (2, 6)]],
        '-' => &[&[(1, 3), (3, 3)]],
        '—' => &[&[(0, 3), (4, 3)]],
        '\'' => &[&[(2, 0), (2, 1)]],
        _ => return None,
    };
    Some(strokes)
}

/// Layout metrics for text set at one font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Pixels per grid unit.
    pub scale: f32,
}

impl TextMetrics {
    #[must_use]
    pub fn for_font_size(font_size: f32) -> Self {
        Self { scale: font_size * CAP_HEIGHT_RATIO / GRID_HEIGHT }
    }

    /// Height from cap line to baseline.
    #[must_use]
    pub fn cap_height(&self) -> f32 {
        GRID_HEIGHT * self.scale
    }

    /// Inked width of a single glyph body.
    #[must_use]
    pub fn glyph_width(&self) -> f32 {
        GRID_WIDTH * self.scale
    }

    /// Width of a run of `text`, excluding trailing spacing.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        let count = text.chars().count();
        if count == 0 {
            return 0.0;
        }
        ((count - 1) as f32 * ADVANCE + GRID_WIDTH) * self.scale
    }
}

/// Build the stroke path of `text` with its left edge at `x` and baseline at `baseline`.
///
/// Returns `None` when no character has a glyph.
#[must_use]
pub fn text_path(text: &str, x: f32, baseline: f32, font_size: f32) -> Option<Path> {
    let metrics = TextMetrics::for_font_size(font_size);
    let top = baseline - metrics.cap_height();
    let mut pb = PathBuilder::new();

    for (i, ch) in text.chars().enumerate() {
        let Some(strokes) = glyph(ch) else {
            continue;
        };
        let origin_x = x + i as f32 * ADVANCE * metrics.scale;
        for line in strokes {
            let mut points = line.iter().map(|&(gx, gy)| {
                (origin_x + f32::from(gx) * metrics.scale, top + f32::from(gy) * metrics.scale)
            });
            if let Some((px, py)) = points.next() {
                pb.move_to(px, py);
                for (px, py) in points {
                    pb.line_to(px, py);
                }
            }
        }
    }

    pb.finish()
}
