//! Buffered outline data
//!
//! Plain, owned representations of a glyph outline as it arrives through a
//! point pen: contours of point records plus component references. These are
//! built fresh for every operation and dropped once re-emitted.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::errors::OverlapError;
use crate::editing::pen::PointPen;

/// Pass-through attributes attached to a point (e.g. its UFO identifier)
pub type ExtraAttributes = BTreeMap<String, String>;

/// Key under which a point's UFO identifier travels in [`ExtraAttributes`]
pub const IDENTIFIER_KEY: &str = "identifier";

/// Type of the segment ending at an on-curve point
///
/// Off-curve control points have no segment type and are represented as
/// `None` wherever an `Option<SegmentType>` appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    /// First point of an open contour
    Move,
    /// Straight line from the previous on-curve point
    Line,
    /// Cubic Bézier ending here
    Curve,
    /// Quadratic curve ending here
    QCurve,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::Move => "move",
            SegmentType::Line => "line",
            SegmentType::Curve => "curve",
            SegmentType::QCurve => "qcurve",
        }
    }
}

/// One vertex of a contour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub point: Point,
    #[serde(rename = "type")]
    pub segment_type: Option<SegmentType>,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: ExtraAttributes,
}

impl PointRecord {
    pub fn new(point: impl Into<Point>, segment_type: Option<SegmentType>) -> Self {
        Self {
            point: point.into(),
            segment_type,
            smooth: false,
            name: None,
            extra: ExtraAttributes::new(),
        }
    }

    pub fn line(point: impl Into<Point>) -> Self {
        Self::new(point, Some(SegmentType::Line))
    }

    pub fn curve(point: impl Into<Point>) -> Self {
        Self::new(point, Some(SegmentType::Curve))
    }

    pub fn qcurve(point: impl Into<Point>) -> Self {
        Self::new(point, Some(SegmentType::QCurve))
    }

    pub fn move_to(point: impl Into<Point>) -> Self {
        Self::new(point, Some(SegmentType::Move))
    }

    pub fn off_curve(point: impl Into<Point>) -> Self {
        Self::new(point, None)
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.extra.insert(IDENTIFIER_KEY.to_string(), identifier.into());
        self
    }

    pub fn identifier(&self) -> Option<&str> {
        self.extra.get(IDENTIFIER_KEY).map(String::as_str)
    }

    /// On-curve points end a segment; off-curve points are controls
    pub fn is_on_curve(&self) -> bool {
        self.segment_type.is_some()
    }
}

/// A closed, cyclic sequence of point records
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Contour {
    pub fn new(points: Vec<PointRecord>) -> Self {
        Self {
            points,
            identifier: None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Single-point contours are lone move points or legacy anchors
    pub fn is_single_point(&self) -> bool {
        self.points.len() == 1
    }

    /// Index `delta` steps away from `index`, wrapping in both directions
    pub fn cyclic_index(&self, index: usize, delta: isize) -> usize {
        let len = self.points.len() as isize;
        (index as isize + delta).rem_euclid(len) as usize
    }

    /// The record `delta` steps away from `index`, wrapping in both directions
    pub fn cyclic(&self, index: usize, delta: isize) -> &PointRecord {
        &self.points[self.cyclic_index(index, delta)]
    }
}

/// A placed reference to another glyph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub base: String,
    pub transform: Affine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Component {
    pub fn new<S: Into<String>>(base: S, transform: Affine) -> Self {
        Self {
            base: base.into(),
            transform,
            identifier: None,
        }
    }
}

/// A whole buffered outline: contours first, then components
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub contours: Vec<Contour>,
    pub components: Vec<Component>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of (on-curve, off-curve) points across all contours
    pub fn point_counts(&self) -> (usize, usize) {
        self.contours
            .iter()
            .flat_map(|contour| contour.points.iter())
            .fold((0, 0), |(on, off), record| {
                if record.is_on_curve() {
                    (on + 1, off)
                } else {
                    (on, off + 1)
                }
            })
    }

    /// Replay this outline into another pen, contours before components
    pub fn draw_points<P: PointPen + ?Sized>(&self, pen: &mut P) -> Result<(), OverlapError> {
        for contour in &self.contours {
            pen.begin_path(contour.identifier.clone())?;
            for record in &contour.points {
                pen.add_point(record.clone())?;
            }
            pen.end_path()?;
        }
        for component in &self.components {
            pen.add_component(component.clone())?;
        }
        Ok(())
    }
}
