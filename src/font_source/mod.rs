//! Font source data structures
//!
//! The in-memory outline model that point pens build and the overlap
//! transform consumes.

pub mod data;

// Explicit re-exports for public API
pub use data::{
    Component, Contour, ExtraAttributes, Path, PointRecord, SegmentType, IDENTIFIER_KEY,
};
