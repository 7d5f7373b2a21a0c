//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - CLI handling and validation
//! - User configuration and the stored offset
//! - Error types
//! - The runner that ties loading, transforming and saving together

pub mod cli;
pub mod config;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config::{ConfigFile, OffsetValue};
pub use errors::OverlapError;
pub use runner::{add_overlap_to_font, run_app, SelectionSource};
