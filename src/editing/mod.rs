//! Editing Functionality
//!
//! This module contains the outline editing operations:
//! - Point pens for buffering and replaying outlines
//! - Selection of points by coordinate
//! - Adding overlap at selected corners

pub mod overlap;
pub mod pen;
pub mod selection;

// Re-export commonly used items
pub use overlap::{add_overlap, OverlapPen, HANDLE_SAMPLE_T};
pub use pen::{PointPen, RecordingPen};
pub use selection::Selection;
