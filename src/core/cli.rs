//! Command line interface for add-overlap
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use clap::Parser;
use kurbo::Point;
use std::path::PathBuf;
use tracing::debug;

use crate::core::config::{ConfigFile, OffsetValue};

/// add-overlap CLI arguments
///
/// Examples:
///   add-overlap -u MyFont.ufo -g A -p 120,0                 # Overlap one corner of A
///   add-overlap -u MyFont.ufo -g A -g B --all-points        # Every corner of A and B
///   add-overlap -u MyFont.ufo -g A -p 120,0 --offset 20     # Explicit offset
///   add-overlap -u MyFont.ufo -g A --all-points --dry-run   # Print result as JSON
///   add-overlap --set-offset -25                            # Remember an offset
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "add-overlap",
    version,
    about = "Add overlap to selected corners of UFO glyphs",
    long_about = "add-overlap pulls selected on-curve points of a glyph apart along their adjacent segments and inserts a short connector, so the contour overlaps itself at those corners."
)]
pub struct CliArgs {
    /// Path to the UFO to edit
    #[clap(
        long = "ufo",
        short = 'u',
        help = "UFO font source to edit",
        long_help = "Path to a UFO directory. The glyphs named with --glyph are edited in place unless --output is given."
    )]
    pub ufo: Option<PathBuf>,

    /// Glyphs to process
    #[clap(
        long = "glyph",
        short = 'g',
        help = "Glyph to process (repeatable)"
    )]
    pub glyphs: Vec<String>,

    /// Selected point coordinates
    #[clap(
        long = "point",
        short = 'p',
        value_parser = parse_point,
        allow_hyphen_values = true,
        help = "Selected on-curve point as X,Y (repeatable)"
    )]
    pub points: Vec<Point>,

    /// Select every on-curve point of each glyph
    #[clap(
        long = "all-points",
        help = "Select every on-curve point",
        conflicts_with = "points"
    )]
    pub all_points: bool,

    /// Signed offset distance in font units
    #[clap(
        long = "offset",
        allow_negative_numbers = true,
        help = "Offset in font units (default: stored setting, else -30)"
    )]
    pub offset: Option<i64>,

    /// Layer to edit
    #[clap(long = "layer", help = "Layer to edit instead of the default layer")]
    pub layer: Option<String>,

    /// Write the result to another UFO
    #[clap(
        long = "output",
        short = 'o',
        help = "Write the edited font here instead of in place"
    )]
    pub output: Option<PathBuf>,

    /// Print the transformed outlines instead of saving
    #[clap(
        long = "dry-run",
        help = "Print transformed outlines as JSON and write nothing"
    )]
    pub dry_run: bool,

    /// Store a new default offset
    #[clap(
        long = "set-offset",
        allow_hyphen_values = true,
        help = "Store the default offset in the user settings and exit",
        long_help = "Store the default offset in ~/.config/add-overlap/settings.json and exit. Spaces and stray characters are removed; an empty value means 0."
    )]
    pub set_offset: Option<String>,

    /// Initialize user configuration directory
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/add-overlap directory with a settings.json file and a logs directory."
    )]
    pub new_config: bool,

    /// Also log to a file
    #[clap(
        long = "log-file",
        help = "Also write logs to ~/.config/add-overlap/logs/"
    )]
    pub log_file: bool,

    /// Verbosity
    #[clap(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

/// Parse an `X,Y` coordinate pair
pub fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", value.trim()))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that the font source exists and that there is something
    /// to do, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config || self.set_offset.is_some() {
            return Ok(());
        }

        let Some(path) = &self.ufo else {
            return Err("No font source given.\nUse --ufo to pick a UFO directory.".to_string());
        };
        if !path.exists() {
            return Err(format!(
                "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
                path.display()
            ));
        }
        if !path.is_dir() {
            return Err(format!(
                "Not a UFO directory: {}\nUFO font sources are directories.",
                path.display()
            ));
        }
        if !path.join("metainfo.plist").exists() {
            return Err(format!(
                "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                path.display()
            ));
        }

        if self.glyphs.is_empty() {
            return Err("No glyphs given.\nUse --glyph to name at least one glyph.".to_string());
        }
        if self.points.is_empty() && !self.all_points {
            return Err(
                "No points selected.\nUse --point X,Y or --all-points to select corners."
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Resolve the offset to use
    ///
    /// Priority order:
    /// 1. CLI argument (--offset)
    /// 2. Config file setting (~/.config/add-overlap/settings.json)
    /// 3. Built-in default (-30)
    pub fn resolve_offset(&self, config: Option<&ConfigFile>) -> i64 {
        if let Some(offset) = self.offset {
            debug!("Using offset from CLI: {}", offset);
            return offset;
        }

        if let Some(config) = config {
            if config.offset.is_some() {
                let offset = config.offset_value().magnitude();
                debug!("Using offset from config file: {}", offset);
                return offset;
            }
        }

        let offset = OffsetValue::default().magnitude();
        debug!("Using default offset: {}", offset);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("add-overlap").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,-20").unwrap(), Point::new(10.0, -20.0));
        assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_negative_values() {
        let args = parse(&["-u", "x.ufo", "-g", "A", "-p", "-10,5", "--offset", "-30"]);
        assert_eq!(args.points, vec![Point::new(-10.0, 5.0)]);
        assert_eq!(args.offset, Some(-30));
        assert_eq!(args.glyphs, vec!["A".to_string()]);
    }

    #[test]
    fn test_all_points_conflicts_with_points() {
        let result = CliArgs::try_parse_from([
            "add-overlap",
            "-u",
            "x.ufo",
            "-g",
            "A",
            "-p",
            "0,0",
            "--all-points",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_offset_priority() {
        let config = ConfigFile {
            offset: Some("12".to_string()),
        };
        let with_flag = parse(&["--offset", "5"]);
        assert_eq!(with_flag.resolve_offset(Some(&config)), 5);

        let without_flag = parse(&[]);
        assert_eq!(without_flag.resolve_offset(Some(&config)), 12);
        assert_eq!(without_flag.resolve_offset(Some(&ConfigFile::default())), -30);
        assert_eq!(without_flag.resolve_offset(None), -30);
    }

    #[test]
    fn test_validate_requires_font_source() {
        let args = parse(&["-g", "A", "--all-points"]);
        assert!(args.validate().unwrap_err().contains("--ufo"));

        let args = parse(&["--set-offset", "-20"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_ufo_layout() {
        let dir = tempfile::tempdir().unwrap();
        let ufo = dir.path().to_str().unwrap();

        let args = parse(&["-u", ufo, "-g", "A", "--all-points"]);
        assert!(args.validate().unwrap_err().contains("metainfo.plist"));

        std::fs::write(dir.path().join("metainfo.plist"), "").unwrap();
        assert!(args.validate().is_ok());

        let args = parse(&["-u", ufo, "-g", "A"]);
        assert!(args.validate().unwrap_err().contains("No points selected"));
    }

    #[test]
    fn test_verbose_count() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}
