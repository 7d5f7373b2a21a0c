//! Application configuration management
//!
//! This module handles all configuration aspects:
//! - User configuration files
//! - The stored overlap offset

pub mod offset_value;
pub mod user_config;

// Simple, clear re-exports
pub use offset_value::{sanitize_offset_text, OffsetValue, DEFAULT_OFFSET};
pub use user_config::{ConfigFile, APP_DIR_NAME};
