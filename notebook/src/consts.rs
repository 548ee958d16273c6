//! Shared numeric constants for the notebook crate.
//!
//! Guide geometry is derived from the fixed 800×480 practice surface and is
//! not resolution-independent.

// ── Surface ─────────────────────────────────────────────────────

/// Width of every practice layer in logical pixels.
pub const CANVAS_WIDTH: u32 = 800;

/// Height of every practice layer in logical pixels.
pub const CANVAS_HEIGHT: u32 = 480;

// ── Ruling ──────────────────────────────────────────────────────

/// Vertical distance between the first lines of consecutive rows.
pub const ROW_HEIGHT: f32 = 120.0;

/// Vertical distance between adjacent lines inside one row group.
pub const LINE_GAP: f32 = 20.0;

/// Lines per row group: boundary, midline, midline, boundary.
pub const LINES_PER_ROW: usize = 4;

/// Stroke width of the ruled lines.
pub const RULE_LINE_WIDTH: f32 = 2.0;

// ── Letters ─────────────────────────────────────────────────────

/// Reference letters shown per page (one per column).
pub const UNITS_PER_PAGE: usize = 4;

/// Nominal font size of reference letters.
pub const LETTER_FONT_SIZE: f32 = 60.0;

/// Cap height as a fraction of the font size.
pub const CAP_HEIGHT_RATIO: f32 = 2.0 / 3.0;

/// Baseline of the reference letters (bottom boundary line of the first row).
pub const LETTER_BASELINE_Y: f32 = 60.0;

/// Pen width of the reference letters.
pub const LETTER_STROKE_WIDTH: f32 = 4.0;

// ── Stroke exemplars ────────────────────────────────────────────

/// Columns an exemplar is repeated across.
pub const EXEMPLAR_COLUMNS: usize = 4;

/// Horizontal inset of an exemplar inside its column, on each side.
pub const EXEMPLAR_INSET: f32 = 20.0;

/// Height of the exemplar bounding box, measured from the top of the layer.
pub const EXEMPLAR_HEIGHT: f32 = 60.0;

/// Pen width of the exemplar strokes.
pub const EXEMPLAR_STROKE_WIDTH: f32 = 3.0;

/// Font size of the label naming the active stroke.
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// Left edge of the stroke label.
pub const LABEL_X: f32 = 10.0;

/// Baseline of the stroke label.
pub const LABEL_BASELINE_Y: f32 = 75.0;

/// Pen width of label text.
pub const LABEL_STROKE_WIDTH: f32 = 1.5;

// ── Brush ───────────────────────────────────────────────────────

/// Smallest brush diameter.
pub const BRUSH_SIZE_MIN: u8 = 1;

/// Largest brush diameter.
pub const BRUSH_SIZE_MAX: u8 = 20;

/// Brush diameter on a fresh surface.
pub const BRUSH_SIZE_DEFAULT: u8 = 5;
