//! add-overlap
//!
//! Transforms glyph outlines by pulling selected on-curve points apart along
//! their adjacent segments, inserting a short connector so the contour
//! overlaps itself at those corners.
//!
//! ```
//! use add_overlap::editing::{add_overlap, Selection};
//! use add_overlap::font_source::{Contour, Path, PointRecord};
//! use add_overlap::kurbo::Point;
//!
//! let mut path = Path::new();
//! path.contours.push(Contour::new(vec![
//!     PointRecord::line((0.0, 0.0)),
//!     PointRecord::line((0.0, 100.0)),
//!     PointRecord::line((100.0, 100.0)),
//!     PointRecord::line((100.0, 0.0)),
//! ]));
//! let selection: Selection = [Point::new(0.0, 0.0)].into_iter().collect();
//!
//! let result = add_overlap(&path, &selection, 10)?;
//! assert_eq!(result.contours[0].len(), 5);
//! # Ok::<(), add_overlap::core::OverlapError>(())
//! ```

pub mod core;
pub mod data;
pub mod editing;
pub mod font_source;
pub mod geometry;
pub mod logging;

// Re-export kurbo so callers build points with the same version
pub use kurbo;
