//! UFO file I/O operations

use anyhow::{anyhow, Context, Result};
use norad::{Font, Glyph};
use std::path::Path;
use tracing::debug;

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("Failed to load UFO {}", path.display()))?;
    debug!("Loaded UFO from {:?}", path);
    Ok(font)
}

/// Save a UFO font to disk, replacing whatever is there
pub fn save_ufo_to_path(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.save(path)
        .with_context(|| format!("Failed to save UFO {}", path.display()))?;
    debug!("Saved UFO to {:?}", path);
    Ok(())
}

/// Find a glyph for editing, in the named layer or the default one
pub fn glyph_mut<'a>(font: &'a mut Font, layer: Option<&str>, name: &str) -> Result<&'a mut Glyph> {
    let layer = match layer {
        Some(layer_name) => font
            .layers
            .get_mut(layer_name)
            .ok_or_else(|| anyhow!("No layer named '{layer_name}'"))?,
        None => font.default_layer_mut(),
    };
    layer
        .get_glyph_mut(name)
        .ok_or_else(|| anyhow!("No glyph named '{name}'"))
}
