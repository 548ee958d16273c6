//! Handwriting practice notebook engine.
//!
//! A practice screen is two stacked raster layers: a Background of ruled
//! lines plus reference letters or stroke exemplars, and a Foreground the
//! learner draws on. The engine keeps the two strictly apart, tracks which
//! page or stroke is being practiced, and flattens both into a PNG snapshot
//! that a host can hand to an external evaluator.
//!
//! The same core runs natively (tests, the replay tool) and in the browser
//! through [`web::NotebookHandle`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::NotebookCore`] and the [`engine::Action`]s it reports |
//! | [`session`] | Mode, page and stroke selection |
//! | [`guide`] | Ruling, reference letters, stroke exemplars (Background only) |
//! | [`ink`] | Brush, eraser, pointer state machine (Foreground only) |
//! | [`compositor`] | Layer flattening and PNG data URI snapshots |
//! | [`input`] | Normalized mouse/touch positions |
//! | [`unit`] | Alphabet, stroke catalog, practice modes |
//! | [`layer`] | Raster layers and pixel access |
//! | [`glyphs`] | Built-in single-stroke vector font |
//! | [`geom`] | Points, boxes, client/local conversion |
//! | [`color`] | `#rrggbb` colors and the guide palette |
//! | [`web`] | `wasm-bindgen` host over two canvas elements |
//! | [`consts`] | Canvas geometry, ruling and brush limits |

pub mod color;
pub mod compositor;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod glyphs;
pub mod guide;
pub mod ink;
pub mod input;
pub mod layer;
pub mod session;
pub mod unit;
pub mod web;
