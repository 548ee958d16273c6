use super::*;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geom::Point;
use crate::guide::{GuideContent, GuideRenderer};
use crate::ink::InkSurface;
use crate::layer::LayerRole;
use crate::unit::Alphabet;

// =============================================================
// Helpers
// =============================================================

fn ruled_background() -> Layer {
    let mut layer = Layer::new(LayerRole::Background, CANVAS_WIDTH, CANVAS_HEIGHT).unwrap();
    GuideRenderer::new(Alphabet::latin()).render(&mut layer, GuideContent::Letters { page: 0 });
    layer
}

/// Horizontal black stroke along the first red boundary line of row 2.
fn inked_foreground() -> InkSurface {
    let mut ink = InkSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT).unwrap();
    ink.pointer_down(&Point::new(300.0, 120.0)).unwrap();
    ink.pointer_move(&Point::new(500.0, 120.0)).unwrap();
    ink.pointer_up();
    ink
}

fn opaque(r: u8, g: u8, b: u8) -> Rgba {
    Rgba { r, g, b, a: 255 }
}

// =============================================================
// Dimension guard
// =============================================================

#[test]
fn mismatched_layers_are_rejected() {
    let bg = Layer::new(LayerRole::Background, 800, 480).unwrap();
    let fg = Layer::new(LayerRole::Foreground, 800, 481).unwrap();
    let err = Compositor::new(&bg, &fg).unwrap_err();
    assert_eq!(err, CompositeError::DimensionMismatch { background: (800, 480), foreground: (800, 481) });
}

#[test]
fn swapped_layers_are_rejected() {
    let bg = Layer::new(LayerRole::Background, 800, 480).unwrap();
    let fg = Layer::new(LayerRole::Foreground, 800, 480).unwrap();
    let err = Compositor::new(&fg, &bg).unwrap_err();
    assert_eq!(
        err,
        CompositeError::RoleMismatch { background: LayerRole::Foreground, foreground: LayerRole::Background }
    );
}

#[test]
fn two_backgrounds_are_rejected() {
    let a = Layer::new(LayerRole::Background, 800, 480).unwrap();
    let b = Layer::new(LayerRole::Background, 800, 480).unwrap();
    assert!(matches!(Compositor::new(&a, &b), Err(CompositeError::RoleMismatch { .. })));
}

#[test]
fn matching_layers_are_accepted() {
    let bg = Layer::new(LayerRole::Background, 800, 480).unwrap();
    let fg = Layer::new(LayerRole::Foreground, 800, 480).unwrap();
    assert!(Compositor::new(&bg, &fg).is_ok());
}

// =============================================================
// Layer order
// =============================================================

#[test]
fn foreground_wins_over_background() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert_eq!(bg.pixel(400, 120), Some(opaque(255, 0, 0)));
    assert_eq!(snap.pixel(400, 120), Some(opaque(0, 0, 0)));
}

#[test]
fn background_shows_where_foreground_is_empty() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert_eq!(snap.pixel(100, 120), Some(opaque(255, 0, 0)));
}

#[test]
fn empty_areas_show_white_paper() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert_eq!(snap.pixel(400, 90), Some(opaque(255, 255, 255)));
}

#[test]
fn no_backdrop_keeps_transparency() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().with_backdrop(None).capture().unwrap();
    assert_eq!(snap.pixel(400, 90), Some(Rgba::TRANSPARENT));
}

#[test]
fn custom_backdrop_color_is_used() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let paper = Rgb::new(250, 240, 200);
    let compositor = Compositor::new(&bg, ink.layer()).unwrap().with_backdrop(Some(paper));
    assert_eq!(compositor.backdrop(), Some(paper));
    assert_eq!(compositor.capture().unwrap().pixel(400, 90), Some(opaque(250, 240, 200)));
}

// =============================================================
// Snapshot contract
// =============================================================

#[test]
fn capture_is_deterministic() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let compositor = Compositor::new(&bg, ink.layer()).unwrap();
    let a = compositor.capture().unwrap();
    let b = compositor.capture().unwrap();
    assert_eq!(a.data_uri(), b.data_uri());
    assert_eq!(a.png(), b.png());
}

#[test]
fn capture_leaves_layers_untouched() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let bg_before = bg.clone();
    let fg_before = ink.layer().clone();
    Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert_eq!(bg, bg_before);
    assert_eq!(ink.layer(), &fg_before);
}

#[test]
fn snapshot_is_png_data_uri() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert!(snap.data_uri().starts_with("data:image/png;base64,"));
    assert_eq!(snap.mime_type(), "image/png");
    assert!(!snap.payload().starts_with("data:"));
    assert_eq!(STANDARD.decode(snap.payload()).unwrap(), snap.png());
    assert_eq!(&snap.png()[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn png_decodes_to_same_size() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    let decoded = Pixmap::decode_png(snap.png()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 480));
    assert_eq!((snap.width(), snap.height()), (800, 480));
}

#[test]
fn pixel_outside_snapshot_is_none() {
    let bg = ruled_background();
    let ink = inked_foreground();
    let snap = Compositor::new(&bg, ink.layer()).unwrap().capture().unwrap();
    assert_eq!(snap.pixel(800, 0), None);
}
