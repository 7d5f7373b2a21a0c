//! UFO format conversion utilities
//!
//! This module connects norad glyphs to the point-pen world: a glyph can be
//! drawn into any [`PointPen`], and a [`GlyphPen`] collects a point stream
//! back into norad contours and components and swaps them into a glyph in
//! one step.

use kurbo::{Affine, Point};
use tracing::{debug, warn};

use crate::core::errors::OverlapError;
use crate::editing::{OverlapPen, PointPen, Selection};
use crate::font_source::{Component, Path, PointRecord, SegmentType, IDENTIFIER_KEY};

impl SegmentType {
    pub fn from_norad_point_type(norad_type: &norad::PointType) -> Option<Self> {
        match norad_type {
            norad::PointType::Move => Some(SegmentType::Move),
            norad::PointType::Line => Some(SegmentType::Line),
            norad::PointType::OffCurve => None,
            norad::PointType::Curve => Some(SegmentType::Curve),
            norad::PointType::QCurve => Some(SegmentType::QCurve),
        }
    }

    pub fn to_norad_point_type(segment_type: Option<Self>) -> norad::PointType {
        match segment_type {
            Some(SegmentType::Move) => norad::PointType::Move,
            Some(SegmentType::Line) => norad::PointType::Line,
            Some(SegmentType::Curve) => norad::PointType::Curve,
            Some(SegmentType::QCurve) => norad::PointType::QCurve,
            None => norad::PointType::OffCurve,
        }
    }
}

impl PointRecord {
    /// Convert from a norad point, keeping its identifier as an extra attribute
    pub fn from_norad_point(norad_point: &norad::ContourPoint) -> Self {
        let mut record = PointRecord::new(
            Point::new(norad_point.x, norad_point.y),
            SegmentType::from_norad_point_type(&norad_point.typ),
        )
        .with_smooth(norad_point.smooth);
        record.name = norad_point.name.as_ref().map(|name| name.to_string());
        if let Some(identifier) = norad_point.identifier() {
            record = record.with_identifier(identifier.as_str());
        }
        record
    }

    /// Convert back to a norad point
    ///
    /// Names or identifiers that norad rejects are dropped with a warning.
    pub fn to_norad_point(&self) -> norad::ContourPoint {
        let name = self.name.as_deref().and_then(|name| {
            let parsed = name.parse::<norad::Name>().ok();
            if parsed.is_none() {
                warn!("Dropping invalid point name {:?}", name);
            }
            parsed
        });

        norad::ContourPoint::new(
            self.point.x,
            self.point.y,
            SegmentType::to_norad_point_type(self.segment_type),
            self.smooth,
            name,
            self.extra
                .get(IDENTIFIER_KEY)
                .map(String::as_str)
                .and_then(parse_identifier),
        )
    }
}

impl Component {
    pub fn from_norad_component(norad_component: &norad::Component) -> Self {
        let t = &norad_component.transform;
        Self {
            base: norad_component.base.to_string(),
            transform: Affine::new([
                t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
            ]),
            identifier: norad_component.identifier().map(|id| id.as_str().to_string()),
        }
    }

    pub fn to_norad_component(&self) -> Result<norad::Component, OverlapError> {
        let base: norad::Name = self
            .base
            .parse()
            .map_err(|_| OverlapError::InvalidBaseName(self.base.clone()))?;
        let [x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset] = self.transform.as_coeffs();
        let transform = norad::AffineTransform {
            x_scale,
            xy_scale,
            yx_scale,
            y_scale,
            x_offset,
            y_offset,
        };
        Ok(norad::Component::new(
            base,
            transform,
            self.identifier.as_deref().and_then(parse_identifier),
        ))
    }
}

fn parse_identifier(raw: &str) -> Option<norad::Identifier> {
    let parsed = norad::Identifier::new(raw).ok();
    if parsed.is_none() {
        warn!("Dropping invalid identifier {:?}", raw);
    }
    parsed
}

/// Draw a norad glyph's contours and components into `pen`
pub fn draw_glyph_points<P: PointPen + ?Sized>(
    glyph: &norad::Glyph,
    pen: &mut P,
) -> Result<(), OverlapError> {
    for contour in &glyph.contours {
        pen.begin_path(contour.identifier().map(|id| id.as_str().to_string()))?;
        for point in &contour.points {
            pen.add_point(PointRecord::from_norad_point(point))?;
        }
        pen.end_path()?;
    }
    for component in &glyph.components {
        pen.add_component(Component::from_norad_component(component))?;
    }
    Ok(())
}

/// Every on-curve coordinate of a glyph, for selecting all corners at once
pub fn on_curve_points(glyph: &norad::Glyph) -> Selection {
    glyph
        .contours
        .iter()
        .flat_map(|contour| contour.points.iter())
        .filter(|point| point.typ != norad::PointType::OffCurve)
        .map(|point| Point::new(point.x, point.y))
        .collect()
}

/// Writes a point stream into a glyph
///
/// Contours and components are collected aside and only replace the glyph's
/// outline on [`GlyphPen::commit`], so an aborted stream leaves the glyph as
/// it was.
#[derive(Debug, Default)]
pub struct GlyphPen {
    contours: Vec<norad::Contour>,
    components: Vec<norad::Component>,
    current: Option<(Vec<norad::ContourPoint>, Option<String>)>,
}

impl GlyphPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the glyph's contours and components with what was drawn
    pub fn commit(self, glyph: &mut norad::Glyph) -> Result<(), OverlapError> {
        if self.current.is_some() {
            return Err(OverlapError::UnfinishedContour);
        }
        debug!(
            "Replacing outline of {}: {} contours, {} components",
            glyph.name(),
            self.contours.len(),
            self.components.len()
        );
        glyph.contours = self.contours;
        glyph.components = self.components;
        Ok(())
    }
}

impl PointPen for GlyphPen {
    fn begin_path(&mut self, identifier: Option<String>) -> Result<(), OverlapError> {
        if self.current.is_some() {
            return Err(OverlapError::PathAlreadyStarted);
        }
        self.current = Some((Vec::new(), identifier));
        Ok(())
    }

    fn add_point(&mut self, record: PointRecord) -> Result<(), OverlapError> {
        let (points, _) = self
            .current
            .as_mut()
            .ok_or(OverlapError::PathNotStarted { call: "add_point" })?;
        points.push(record.to_norad_point());
        Ok(())
    }

    fn end_path(&mut self) -> Result<(), OverlapError> {
        let (points, identifier) = self
            .current
            .take()
            .ok_or(OverlapError::PathNotStarted { call: "end_path" })?;
        let identifier = identifier.as_deref().and_then(parse_identifier);
        self.contours.push(norad::Contour::new(points, identifier));
        Ok(())
    }

    fn add_component(&mut self, component: Component) -> Result<(), OverlapError> {
        self.components.push(component.to_norad_component()?);
        Ok(())
    }
}

/// Compute the overlapped outline of `glyph` without touching it
pub fn overlap_glyph(
    glyph: &norad::Glyph,
    selection: Selection,
    offset: i64,
) -> Result<Path, OverlapError> {
    let mut pen = OverlapPen::new(selection, offset);
    draw_glyph_points(glyph, &mut pen)?;
    pen.transformed()
}

/// Replace the outline of `glyph` with `path`
pub fn write_glyph_outline(glyph: &mut norad::Glyph, path: &Path) -> Result<(), OverlapError> {
    let mut pen = GlyphPen::new();
    path.draw_points(&mut pen)?;
    pen.commit(glyph)
}
