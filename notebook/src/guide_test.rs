use super::*;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::layer::{LayerRole, Rgba};

// =============================================================
// Helpers
// =============================================================

fn background() -> Layer {
    Layer::new(LayerRole::Background, CANVAS_WIDTH, CANVAS_HEIGHT).unwrap()
}

fn renderer() -> GuideRenderer {
    GuideRenderer::new(Alphabet::latin())
}

fn opaque(c: Rgb) -> Rgba {
    Rgba { r: c.r, g: c.g, b: c.b, a: 255 }
}

fn region_has_ink(layer: &Layer, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| layer.pixel(x, y).is_some_and(|p| p.a > 0)))
}

// =============================================================
// Ruling
// =============================================================

#[test]
fn boundary_lines_are_red() {
    let mut layer = background();
    GuideRenderer::render_rule_lines(&mut layer, ROW_HEIGHT, LINE_GAP);
    assert_eq!(layer.pixel(400, 0), Some(opaque(Rgb::GUIDE_RED)));
    assert_eq!(layer.pixel(400, 60), Some(opaque(Rgb::GUIDE_RED)));
    assert_eq!(layer.pixel(400, 120), Some(opaque(Rgb::GUIDE_RED)));
    assert_eq!(layer.pixel(400, 420), Some(opaque(Rgb::GUIDE_RED)));
}

#[test]
fn midlines_are_blue() {
    let mut layer = background();
    GuideRenderer::render_rule_lines(&mut layer, ROW_HEIGHT, LINE_GAP);
    assert_eq!(layer.pixel(400, 20), Some(opaque(Rgb::GUIDE_BLUE)));
    assert_eq!(layer.pixel(400, 40), Some(opaque(Rgb::GUIDE_BLUE)));
    assert_eq!(layer.pixel(10, 380), Some(opaque(Rgb::GUIDE_BLUE)));
}

#[test]
fn space_between_row_groups_is_empty() {
    let mut layer = background();
    GuideRenderer::render_rule_lines(&mut layer, ROW_HEIGHT, LINE_GAP);
    assert!(!region_has_ink(&layer, 0, 63, 800, 117));
    assert_eq!(layer.pixel(400, 30), Some(Rgba::TRANSPARENT));
}

#[test]
fn lines_span_full_width() {
    let mut layer = background();
    GuideRenderer::render_rule_lines(&mut layer, ROW_HEIGHT, LINE_GAP);
    assert_eq!(layer.pixel(0, 20), Some(opaque(Rgb::GUIDE_BLUE)));
    assert_eq!(layer.pixel(799, 20), Some(opaque(Rgb::GUIDE_BLUE)));
}

#[test]
fn non_positive_row_height_draws_nothing() {
    let mut layer = background();
    GuideRenderer::render_rule_lines(&mut layer, 0.0, LINE_GAP);
    assert!(layer.is_blank());
}

// =============================================================
// Letters
// =============================================================

#[test]
fn letters_are_drawn_in_each_column() {
    let mut layer = background();
    renderer().render_letters(&mut layer, 0);
    for column in 0..4 {
        let x0 = column * 200 + 70;
        assert!(region_has_ink(&layer, x0, 15, x0 + 60, 65), "column {column} has no letter");
    }
}

#[test]
fn letter_crossbar_is_gray() {
    let mut layer = background();
    renderer().render_letters(&mut layer, 0);
    // 'A' crossbar sits halfway between cap line and baseline.
    assert_eq!(layer.pixel(100, 40), Some(opaque(Rgb::LETTER_GRAY)));
}

#[test]
fn letters_stay_inside_their_columns() {
    let mut layer = background();
    renderer().render_letters(&mut layer, 0);
    assert!(!region_has_ink(&layer, 0, 0, 60, 480));
    assert!(!region_has_ink(&layer, 140, 0, 260, 480));
}

#[test]
fn partial_last_page_leaves_columns_empty() {
    let mut layer = background();
    renderer().render_letters(&mut layer, 6);
    assert!(region_has_ink(&layer, 70, 15, 130, 65));
    assert!(region_has_ink(&layer, 270, 15, 330, 65));
    assert!(!region_has_ink(&layer, 400, 0, 800, 480));
}

#[test]
fn page_past_end_draws_nothing() {
    let mut layer = background();
    renderer().render_letters(&mut layer, 99);
    assert!(layer.is_blank());
}

#[test]
fn different_pages_differ() {
    let r = renderer();
    let mut a = background();
    let mut b = background();
    r.render_letters(&mut a, 0);
    r.render_letters(&mut b, 1);
    assert_ne!(a.data(), b.data());
}

#[test]
fn letters_without_glyph_render_nothing() {
    let r = GuideRenderer::new(Alphabet::new(['7', '8'], 4));
    let mut layer = background();
    r.render_letters(&mut layer, 0);
    assert!(layer.is_blank());
}

// =============================================================
// Stroke exemplars
// =============================================================

#[test]
fn straight_exemplar_crosses_first_column_center() {
    let mut layer = background();
    GuideRenderer::render_stroke_exemplar(&mut layer, StrokeKind::Straight);
    assert_eq!(layer.pixel(100, 30), Some(opaque(Rgb::EXEMPLAR)));
    assert_eq!(layer.pixel(700, 30), Some(opaque(Rgb::EXEMPLAR)));
}

#[test]
fn slant_and_horizontal_exemplars_cross_column_center() {
    for kind in [StrokeKind::RightSlant, StrokeKind::LeftSlant, StrokeKind::Horizontal] {
        let mut layer = background();
        GuideRenderer::render_stroke_exemplar(&mut layer, kind);
        assert_eq!(layer.pixel(100, 30), Some(opaque(Rgb::EXEMPLAR)), "{kind:?}");
    }
}

#[test]
fn exemplar_is_repeated_in_every_column() {
    let mut layer = background();
    GuideRenderer::render_stroke_exemplar(&mut layer, StrokeKind::Hook);
    for column in 0..4 {
        let x0 = column * 200;
        assert!(region_has_ink(&layer, x0 + 15, 0, x0 + 185, 62), "column {column} is empty");
    }
}

#[test]
fn exemplar_respects_column_inset() {
    let mut layer = background();
    GuideRenderer::render_stroke_exemplar(&mut layer, StrokeKind::Horizontal);
    assert!(!region_has_ink(&layer, 185, 0, 215, 62));
}

#[test]
fn exemplar_has_label_below_first_row() {
    let mut layer = background();
    GuideRenderer::render_stroke_exemplar(&mut layer, StrokeKind::LeftSlant);
    assert!(region_has_ink(&layer, 8, 63, 300, 78));
}

#[test]
fn different_strokes_differ() {
    let mut a = background();
    let mut b = background();
    GuideRenderer::render_stroke_exemplar(&mut a, StrokeKind::LeftParenthesis);
    GuideRenderer::render_stroke_exemplar(&mut b, StrokeKind::RightParenthesis);
    assert_ne!(a.data(), b.data());
}

// =============================================================
// Full render contract
// =============================================================

#[test]
fn render_is_idempotent() {
    let r = renderer();
    let mut a = background();
    r.render(&mut a, GuideContent::Letters { page: 2 });
    let first = a.clone();
    r.render(&mut a, GuideContent::Letters { page: 2 });
    assert_eq!(a, first);
}

#[test]
fn render_fully_replaces_previous_content() {
    let r = renderer();
    let mut a = background();
    r.render(&mut a, GuideContent::Stroke(StrokeKind::Hook));
    r.render(&mut a, GuideContent::Letters { page: 0 });

    let mut fresh = background();
    r.render(&mut fresh, GuideContent::Letters { page: 0 });
    assert_eq!(a, fresh);
}

#[test]
fn letters_mode_leaves_label_area_empty() {
    let mut layer = background();
    renderer().render(&mut layer, GuideContent::Letters { page: 0 });
    assert!(!region_has_ink(&layer, 8, 63, 300, 78));
}

#[test]
fn render_includes_ruling() {
    let mut layer = background();
    renderer().render(&mut layer, GuideContent::Stroke(StrokeKind::Straight));
    assert_eq!(layer.pixel(400, 120), Some(opaque(Rgb::GUIDE_RED)));
}

#[test]
fn render_refuses_foreground_layer() {
    let mut foreground = Layer::new(LayerRole::Foreground, CANVAS_WIDTH, CANVAS_HEIGHT).unwrap();
    renderer().render(&mut foreground, GuideContent::Letters { page: 0 });
    assert!(foreground.is_blank());
}
