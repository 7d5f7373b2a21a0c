//! Font file data
//!
//! Loading and saving UFOs, and moving glyph outlines in and out of the
//! point-pen representation.

pub mod conversions;
pub mod ufo;

pub use conversions::{
    draw_glyph_points, on_curve_points, overlap_glyph, write_glyph_outline, GlyphPen,
};
pub use ufo::{glyph_mut, load_ufo_from_path, save_ufo_to_path};
