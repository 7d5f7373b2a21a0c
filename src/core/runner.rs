//! Application runner logic
//!
//! Handles the different ways to run add-overlap

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::core::cli::CliArgs;
use crate::core::config::ConfigFile;
use crate::data::{
    glyph_mut, load_ufo_from_path, on_curve_points, overlap_glyph, save_ufo_to_path, GlyphPen,
};
use crate::editing::Selection;
use crate::font_source::Path;
use crate::logging;

/// Where the selected points of each glyph come from
#[derive(Debug, Clone)]
pub enum SelectionSource {
    /// The same coordinates in every glyph
    Points(Selection),
    /// Every on-curve point of the glyph being processed
    AllOnCurve,
}

impl SelectionSource {
    fn for_glyph(&self, glyph: &norad::Glyph) -> Selection {
        match self {
            SelectionSource::Points(selection) => selection.clone(),
            SelectionSource::AllOnCurve => on_curve_points(glyph),
        }
    }
}

/// One glyph's transformed outline
#[derive(Debug, Clone, Serialize)]
pub struct GlyphOutline {
    pub glyph: String,
    pub outline: Path,
}

/// Add overlap to several glyphs of a font
///
/// Every glyph is transformed and converted before any of them is written
/// back, so a failure leaves the font untouched.
pub fn add_overlap_to_font(
    font: &mut norad::Font,
    layer: Option<&str>,
    glyph_names: &[String],
    source: &SelectionSource,
    offset: i64,
) -> Result<Vec<GlyphOutline>> {
    let mut outlines = Vec::with_capacity(glyph_names.len());
    for name in glyph_names {
        let glyph = glyph_mut(font, layer, name)?;
        let selection = source.for_glyph(glyph);
        let outline = overlap_glyph(glyph, selection, offset)
            .with_context(|| format!("Failed to add overlap to glyph '{name}'"))?;
        let (on, off) = outline.point_counts();
        info!(
            "{}: {} contours, {} points ({} on-curve)",
            name,
            outline.contours.len(),
            on + off,
            on
        );
        outlines.push(GlyphOutline {
            glyph: name.clone(),
            outline,
        });
    }

    let mut pens = Vec::with_capacity(outlines.len());
    for GlyphOutline { glyph, outline } in &outlines {
        let mut pen = GlyphPen::new();
        outline
            .draw_points(&mut pen)
            .with_context(|| format!("Failed to write glyph '{glyph}'"))?;
        pens.push((glyph, pen));
    }
    for (glyph, pen) in pens {
        pen.commit(glyph_mut(font, layer, glyph)?)?;
    }

    Ok(outlines)
}

/// Sanitize and persist a new default offset
pub fn store_offset(mut config: ConfigFile, raw: &str) -> Result<i64> {
    let mut value = config.offset_value();
    value.subscribe(|offset| info!("Default offset is now {}", offset));
    if !value.set(raw) {
        bail!("'{raw}' is not a usable offset");
    }
    config.offset = Some(value.get().to_string());
    config.save()?;
    Ok(value.magnitude())
}

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the overlap pipeline.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    let _log_guard = logging::init(cli_args.verbose, cli_args.log_file)?;
    cli_args.validate().map_err(|e| anyhow!(e))?;

    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    let config = ConfigFile::load();

    if let Some(raw) = &cli_args.set_offset {
        let offset = store_offset(config.unwrap_or_default(), raw)?;
        println!(
            "Stored offset {} in {:?}",
            offset,
            ConfigFile::config_path()
        );
        return Ok(());
    }

    let offset = cli_args.resolve_offset(config.as_ref());
    let ufo_path = cli_args
        .ufo
        .as_ref()
        .ok_or_else(|| anyhow!("No font source given"))?;
    let source = if cli_args.all_points {
        SelectionSource::AllOnCurve
    } else {
        SelectionSource::Points(cli_args.points.iter().copied().collect())
    };

    let mut font = load_ufo_from_path(ufo_path)?;
    let outlines = add_overlap_to_font(
        &mut font,
        cli_args.layer.as_deref(),
        &cli_args.glyphs,
        &source,
        offset,
    )?;

    if cli_args.dry_run {
        println!("{}", serde_json::to_string_pretty(&outlines)?);
        return Ok(());
    }

    let destination = cli_args.output.as_ref().unwrap_or(ufo_path);
    save_ufo_to_path(&font, destination)?;
    info!(
        "Added overlap to {} glyphs with offset {}, saved to {:?}",
        outlines.len(),
        offset,
        destination
    );
    Ok(())
}
