//! Geometric Primitives and Operations

pub mod bezier;
pub mod offset;

// Re-export commonly used items
pub use bezier::point_on_cubic;
pub use offset::{round_to_grid, scaled_direction};
