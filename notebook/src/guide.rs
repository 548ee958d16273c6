//! Guide rendering: ruled lines, reference letters, and stroke exemplars.
//!
//! This module is the only writer of the Background layer. Every call to
//! [`GuideRenderer::render`] clears the whole layer and redraws ruling plus the
//! selected content, so repeated calls with the same input produce identical
//! pixels. It never reads or writes the Foreground.
//!
//! A path that cannot be built (degenerate geometry) is skipped: the layer
//! simply does not receive that element.

#[cfg(test)]
#[path = "guide_test.rs"]
mod guide_test;

use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Stroke, Transform};
use tracing::{trace, warn};

use crate::color::Rgb;
use crate::consts::{
    EXEMPLAR_COLUMNS, EXEMPLAR_HEIGHT, EXEMPLAR_INSET, EXEMPLAR_STROKE_WIDTH, LABEL_BASELINE_Y, LABEL_FONT_SIZE,
    LABEL_STROKE_WIDTH, LABEL_X, LETTER_BASELINE_Y, LETTER_FONT_SIZE, LETTER_STROKE_WIDTH, LINE_GAP, LINES_PER_ROW,
    ROW_HEIGHT, RULE_LINE_WIDTH,
};
use crate::geom::Bounds;
use crate::glyphs::{TextMetrics, text_path};
use crate::layer::{Layer, LayerRole};
use crate::unit::{Alphabet, StrokeKind};

/// What the Background shows on top of the ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideContent {
    /// Reference letters for one page of the alphabet.
    Letters { page: usize },
    /// One stroke exemplar repeated across the first row.
    Stroke(StrokeKind),
}

/// Paints guide content onto a Background layer.
#[derive(Debug, Clone)]
pub struct GuideRenderer {
    alphabet: Alphabet,
}

impl GuideRenderer {
    #[must_use]
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Full repaint: clear, rule, then draw `content`.
    pub fn render(&self, layer: &mut Layer, content: GuideContent) {
        if layer.role() != LayerRole::Background {
            warn!(role = ?layer.role(), "guide render skipped: not a background layer");
            return;
        }
        layer.clear();
        Self::render_rule_lines(layer, ROW_HEIGHT, LINE_GAP);
        match content {
            GuideContent::Letters { page } => self.render_letters(layer, page),
            GuideContent::Stroke(kind) => Self::render_stroke_exemplar(layer, kind),
        }
        trace!(?content, "guide repainted");
    }

    /// Draw the four-line ruling of every row.
    ///
    /// Lines 0 and 3 of each group mark the boundary (red); lines 1 and 2 are
    /// the midlines (blue).
    pub fn render_rule_lines(layer: &mut Layer, row_height: f32, line_gap: f32) {
        if row_height <= 0.0 {
            return;
        }
        let width = layer.width() as f32;
        let rows = (layer.height() as f32 / row_height).floor() as usize;
        let stroke = Stroke { width: RULE_LINE_WIDTH, ..Stroke::default() };

        for row in 0..rows {
            for line in 0..LINES_PER_ROW {
                let y = row as f32 * row_height + line as f32 * line_gap;
                let color = if line == 0 || line == LINES_PER_ROW - 1 { Rgb::GUIDE_RED } else { Rgb::GUIDE_BLUE };
                let mut pb = PathBuilder::new();
                pb.move_to(0.0, y);
                pb.line_to(width, y);
                stroke_guide(layer, pb.finish(), color, &stroke);
            }
        }
    }

    /// Draw the letters of `page`, one centered in each column.
    pub fn render_letters(&self, layer: &mut Layer, page: usize) {
        let per_page = self.alphabet.units_per_page();
        let column_width = layer.width() as f32 / per_page as f32;
        let metrics = TextMetrics::for_font_size(LETTER_FONT_SIZE);
        let stroke = pen(LETTER_STROKE_WIDTH);

        for (column, &letter) in self.alphabet.page(page).iter().enumerate() {
            let x = column as f32 * column_width + (column_width - metrics.glyph_width()) / 2.0;
            let path = text_path(&letter.to_string(), x, LETTER_BASELINE_Y, LETTER_FONT_SIZE);
            stroke_guide(layer, path, Rgb::LETTER_GRAY, &stroke);
        }
    }

    /// Draw `kind` once per column across the first row, then its name label.
    pub fn render_stroke_exemplar(layer: &mut Layer, kind: StrokeKind) {
        let column_width = layer.width() as f32 / EXEMPLAR_COLUMNS as f32;
        let stroke = pen(EXEMPLAR_STROKE_WIDTH);

        for column in 0..EXEMPLAR_COLUMNS {
            let bounds = Bounds::new(
                column as f32 * column_width + EXEMPLAR_INSET,
                0.0,
                column_width - 2.0 * EXEMPLAR_INSET,
                EXEMPLAR_HEIGHT,
            );
            stroke_guide(layer, kind.trace(bounds), Rgb::EXEMPLAR, &stroke);
        }

        let label = text_path(kind.name(), LABEL_X, LABEL_BASELINE_Y, LABEL_FONT_SIZE);
        stroke_guide(layer, label, Rgb::LABEL, &pen(LABEL_STROKE_WIDTH));
    }
}

fn pen(width: f32) -> Stroke {
    Stroke { width, line_cap: LineCap::Round, line_join: LineJoin::Round, ..Stroke::default() }
}

fn stroke_guide(layer: &mut Layer, path: Option<Path>, color: Rgb, stroke: &Stroke) {
    let Some(path) = path else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    layer.pixmap_mut().stroke_path(&path, &paint, stroke, Transform::identity(), None);
}
