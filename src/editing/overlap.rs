//! Adding overlap at selected corners
//!
//! Each selected on-curve point is split in two. The original record moves
//! along the direction of its incoming segment, and a new line point is
//! inserted on the line of the outgoing segment, on the other side of the
//! corner. With a positive offset both run past the corner and the contour
//! crosses itself there, which keeps later overlap removal and hinting from
//! opening hairline gaps. A negative offset pulls them back from the corner.
//!
//! ```text
//!   |                |
//!   |                |
//!   |______   ->   __+______
//!                    |
//! ```

use kurbo::{CubicBez, Vec2};
use tracing::{debug, trace};

use crate::core::errors::OverlapError;
use crate::editing::pen::{PointPen, RecordingPen};
use crate::editing::selection::Selection;
use crate::font_source::{Component, Contour, Path, PointRecord, SegmentType};
use crate::geometry::{point_on_cubic, scaled_direction};

/// Curve parameter sampled when a handle sits on top of its on-curve point
pub const HANDLE_SAMPLE_T: f64 = 0.9;

/// Which side of a point a segment leaves from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Incoming,
    Outgoing,
}

impl Side {
    fn step(self) -> isize {
        match self {
            Side::Incoming => -1,
            Side::Outgoing => 1,
        }
    }
}

/// Add overlap at every selected on-curve point of `path`
///
/// Single-point contours are dropped and components are copied unchanged.
/// The input is never modified; on error nothing is produced.
pub fn add_overlap(path: &Path, selection: &Selection, offset: i64) -> Result<Path, OverlapError> {
    let mut contours = Vec::with_capacity(path.contours.len());
    for (contour_index, contour) in path.contours.iter().enumerate() {
        if contour.len() < 2 {
            debug!("Skipping single-point contour {}", contour_index);
            continue;
        }
        contours.push(overlap_contour(contour, contour_index, selection, offset)?);
    }

    Ok(Path {
        contours,
        components: path.components.clone(),
    })
}

fn overlap_contour(
    contour: &Contour,
    contour_index: usize,
    selection: &Selection,
    offset: i64,
) -> Result<Contour, OverlapError> {
    let mut points = Vec::with_capacity(contour.len() + selection.len());

    for (index, record) in contour.points.iter().enumerate() {
        if !record.is_on_curve() || !selection.contains(record.point) {
            points.push(record.clone());
            continue;
        }

        let incoming = segment_offset(contour, contour_index, index, Side::Incoming, offset)?;
        let outgoing = segment_offset(contour, contour_index, index, Side::Outgoing, offset)?;
        trace!(
            "contour {} point {}: incoming {:?}, outgoing {:?}",
            contour_index,
            index,
            incoming,
            outgoing
        );

        points.push(PointRecord {
            point: record.point + incoming,
            ..record.clone()
        });
        points.push(PointRecord::new(
            record.point - outgoing,
            Some(SegmentType::Line),
        ));
    }

    Ok(Contour {
        points,
        identifier: contour.identifier.clone(),
    })
}

/// Offset vector along the segment on one `side` of the point at `index`,
/// always pointing in drawing direction
fn segment_offset(
    contour: &Contour,
    contour_index: usize,
    index: usize,
    side: Side,
    offset: i64,
) -> Result<Vec2, OverlapError> {
    let current = contour.points[index].point;
    let neighbor = contour.cyclic(index, side.step());
    let direction = |other| match side {
        Side::Incoming => scaled_direction(other, current, offset),
        Side::Outgoing => scaled_direction(current, other, offset),
    };

    let vector = direction(neighbor.point);
    if vector != Vec2::ZERO || neighbor.is_on_curve() || offset == 0 {
        return Ok(vector);
    }

    // The handle lies on the point itself, so follow the curve a little way
    // instead to find the tangent.
    let curve = handle_curve(contour, contour_index, index, side)?;
    let sample = point_on_cubic(curve, HANDLE_SAMPLE_T);
    debug!(
        "contour {} point {}: coincident handle, sampled curve at {:?}",
        contour_index, index, sample
    );
    Ok(direction(sample))
}

/// The cubic running into the point at `index` from `side`, oriented to end
/// at that point
fn handle_curve(
    contour: &Contour,
    contour_index: usize,
    index: usize,
    side: Side,
) -> Result<CubicBez, OverlapError> {
    let geometry_error = |reason: String| OverlapError::Geometry {
        contour: contour_index,
        point: index,
        reason,
    };

    if contour.len() < 4 {
        return Err(geometry_error(format!(
            "coincident handle needs a cubic segment, but the contour has only {} points",
            contour.len()
        )));
    }

    let step = side.step();
    let near = contour.cyclic(index, step);
    let far = contour.cyclic(index, 2 * step);
    let anchor = contour.cyclic(index, 3 * step);
    if far.is_on_curve() || !anchor.is_on_curve() {
        return Err(geometry_error(
            "coincident handle is not part of a cubic segment".to_string(),
        ));
    }

    Ok(CubicBez::new(
        anchor.point,
        far.point,
        near.point,
        contour.points[index].point,
    ))
}

/// A point pen that buffers an outline and draws it back out with overlap
/// added at the selected points
#[derive(Debug, Default)]
pub struct OverlapPen {
    recording: RecordingPen,
    selection: Selection,
    offset: i64,
}

impl OverlapPen {
    pub fn new(selection: Selection, offset: i64) -> Self {
        Self {
            recording: RecordingPen::new(),
            selection,
            offset,
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The transformed outline, fully built before anything is emitted
    pub fn transformed(&self) -> Result<Path, OverlapError> {
        if self.recording.is_drawing() {
            return Err(OverlapError::UnfinishedContour);
        }
        add_overlap(self.recording.path(), &self.selection, self.offset)
    }

    /// Draw the transformed outline into `pen`
    ///
    /// If the transform fails, `pen` receives nothing.
    pub fn draw_points<P: PointPen + ?Sized>(&self, pen: &mut P) -> Result<(), OverlapError> {
        self.transformed()?.draw_points(pen)
    }
}

impl PointPen for OverlapPen {
    fn begin_path(&mut self, identifier: Option<String>) -> Result<(), OverlapError> {
        self.recording.begin_path(identifier)
    }

    fn add_point(&mut self, record: PointRecord) -> Result<(), OverlapError> {
        self.recording.add_point(record)
    }

    fn end_path(&mut self) -> Result<(), OverlapError> {
        self.recording.end_path()
    }

    fn add_component(&mut self, component: Component) -> Result<(), OverlapError> {
        self.recording.add_component(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Affine, Point};

    fn square() -> Contour {
        Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::line((0.0, 100.0)),
            PointRecord::line((100.0, 100.0)),
            PointRecord::line((100.0, 0.0)),
        ])
    }

    fn path_of(contours: Vec<Contour>) -> Path {
        Path {
            contours,
            components: Vec::new(),
        }
    }

    fn select(points: &[(f64, f64)]) -> Selection {
        points.iter().map(|&p| Point::from(p)).collect()
    }

    fn coords(contour: &Contour) -> Vec<(f64, f64)> {
        contour.points.iter().map(|r| (r.point.x, r.point.y)).collect()
    }

    /// A corner at the origin whose outgoing handle sits on the corner
    fn coincident_outgoing_handle() -> Contour {
        Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::off_curve((0.0, 0.0)),
            PointRecord::off_curve((45.0, 100.0)),
            PointRecord::curve((100.0, 100.0)),
            PointRecord::line((100.0, 0.0)),
        ])
    }

    #[test]
    fn test_square_corner() {
        let path = path_of(vec![square()]);
        let result = add_overlap(&path, &select(&[(0.0, 0.0)]), 10).unwrap();

        let contour = &result.contours[0];
        assert_eq!(
            coords(contour),
            vec![
                (-10.0, 0.0),
                (0.0, -10.0),
                (0.0, 100.0),
                (100.0, 100.0),
                (100.0, 0.0)
            ]
        );
        assert!(contour
            .points
            .iter()
            .all(|r| r.segment_type == Some(SegmentType::Line)));
    }

    #[test]
    fn test_negative_offset_mirrors() {
        let path = path_of(vec![square()]);
        let selection = select(&[(0.0, 0.0), (100.0, 100.0)]);
        let out = add_overlap(&path, &selection, 10).unwrap();
        let back = add_overlap(&path, &selection, -10).unwrap();

        let original = Point::new(0.0, 0.0);
        for i in [0, 1] {
            let a = out.contours[0].points[i].point - original;
            let b = back.contours[0].points[i].point - original;
            assert_eq!(a, -b);
        }
        let corner = Point::new(100.0, 100.0);
        let a = out.contours[0].points[4].point - corner;
        let b = back.contours[0].points[4].point - corner;
        assert_eq!(a, -b);
        assert_ne!(a, Vec2::ZERO);
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let lone = Contour::new(vec![PointRecord::move_to((5.0, 5.0))]);
        let path = path_of(vec![square(), lone, coincident_outgoing_handle()]);
        let result = add_overlap(&path, &Selection::new(), 30).unwrap();
        assert_eq!(
            result,
            path_of(vec![square(), coincident_outgoing_handle()])
        );
    }

    #[test]
    fn test_single_point_contours_are_dropped() {
        let lone = Contour::new(vec![PointRecord::move_to((0.0, 0.0))]);
        let path = path_of(vec![lone.clone(), square(), lone]);
        let result = add_overlap(&path, &select(&[(0.0, 0.0)]), -30).unwrap();
        assert_eq!(result.contours.len(), 1);
        assert_eq!(result.contours[0].len(), 5);
    }

    #[test]
    fn test_off_curve_points_are_never_targets() {
        let contour = coincident_outgoing_handle();
        let path = path_of(vec![contour.clone()]);
        let result = add_overlap(&path, &select(&[(45.0, 100.0)]), 20).unwrap();
        assert_eq!(result.contours[0], contour);
    }

    #[test]
    fn test_attributes_survive_and_connector_is_plain() {
        let mut contour = square();
        contour.points[0] = PointRecord::line((0.0, 0.0))
            .with_smooth(true)
            .with_name("corner")
            .with_identifier("id0");
        contour.identifier = Some("outer".to_string());

        let result = add_overlap(&path_of(vec![contour]), &select(&[(0.0, 0.0)]), 10).unwrap();
        let moved = &result.contours[0].points[0];
        assert!(moved.smooth);
        assert_eq!(moved.name.as_deref(), Some("corner"));
        assert_eq!(moved.identifier(), Some("id0"));

        let connector = &result.contours[0].points[1];
        assert_eq!(connector.segment_type, Some(SegmentType::Line));
        assert!(!connector.smooth);
        assert!(connector.name.is_none());
        assert!(connector.extra.is_empty());
        assert_eq!(result.contours[0].identifier.as_deref(), Some("outer"));
    }

    #[test]
    fn test_components_pass_through_after_contours() {
        let mut path = path_of(vec![square()]);
        path.components
            .push(Component::new("acutecomb", Affine::translate((200.0, 500.0))));
        path.components.push(Component::new("dotaccent", Affine::IDENTITY));
        let result = add_overlap(&path, &select(&[(0.0, 0.0)]), 10).unwrap();
        assert_eq!(result.components, path.components);
    }

    #[test]
    fn test_zero_offset_keeps_coordinates() {
        let path = path_of(vec![square(), coincident_outgoing_handle()]);
        let selection = select(&[(0.0, 0.0), (100.0, 100.0)]);
        let result = add_overlap(&path, &selection, 0).unwrap();

        // connectors land on their trigger point; dropping them restores the input
        for (before, after) in path.contours.iter().zip(&result.contours) {
            let mut restored: Vec<PointRecord> = Vec::new();
            for record in &after.points {
                let is_connector = restored
                    .last()
                    .map(|prev| {
                        prev.point == record.point
                            && prev.is_on_curve()
                            && record.segment_type == Some(SegmentType::Line)
                            && record.name.is_none()
                            && record.extra.is_empty()
                    })
                    .unwrap_or(false);
                if !is_connector {
                    restored.push(record.clone());
                }
            }
            assert_eq!(&restored, &before.points);
        }
    }

    #[test]
    fn test_rotation_invariance() {
        let base = vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::line((20.0, 150.0)),
            PointRecord::curve((120.0, 180.0)),
            PointRecord::off_curve((160.0, 120.0)),
            PointRecord::off_curve((170.0, 40.0)),
            PointRecord::curve((110.0, -10.0)),
        ];
        let selection = select(&[(0.0, 0.0), (20.0, 150.0), (110.0, -10.0)]);

        let mut rotated = base.clone();
        rotated.rotate_left(3);

        let sorted = |points: Vec<(f64, f64)>| {
            let mut points = points;
            points.sort_by(|a, b| a.partial_cmp(b).unwrap());
            points
        };
        let a = add_overlap(&path_of(vec![Contour::new(base)]), &selection, 25).unwrap();
        let b = add_overlap(&path_of(vec![Contour::new(rotated)]), &selection, 25).unwrap();
        assert_eq!(sorted(coords(&a.contours[0])), sorted(coords(&b.contours[0])));
    }

    #[test]
    fn test_coincident_outgoing_handle_samples_curve() {
        let path = path_of(vec![coincident_outgoing_handle()]);
        let result = add_overlap(&path, &select(&[(0.0, 0.0)]), 10).unwrap();

        // incoming edge runs from (100, 0) to the origin; the outgoing tangent
        // comes from the curve sample at t = 0.9, (1.315, 2.8), scaled to 10
        assert_eq!(
            coords(&result.contours[0]),
            vec![
                (-10.0, 0.0),
                (-4.0, -9.0),
                (0.0, 0.0),
                (45.0, 100.0),
                (100.0, 100.0),
                (100.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_coincident_incoming_handle_samples_curve() {
        let contour = Contour::new(vec![
            PointRecord::line((100.0, 100.0)),
            PointRecord::off_curve((45.0, 100.0)),
            PointRecord::off_curve((0.0, 0.0)),
            PointRecord::curve((0.0, 0.0)),
            PointRecord::line((100.0, 0.0)),
        ]);
        let result = add_overlap(&path_of(vec![contour]), &select(&[(0.0, 0.0)]), 10).unwrap();
        assert_eq!(
            coords(&result.contours[0]),
            vec![
                (100.0, 100.0),
                (45.0, 100.0),
                (0.0, 0.0),
                (-4.0, -9.0),
                (-10.0, 0.0),
                (100.0, 0.0)
            ]
        );
        assert_eq!(
            result.contours[0].points[3].segment_type,
            Some(SegmentType::Curve)
        );
    }

    #[test]
    fn test_coincident_on_curve_neighbor_stays_zero() {
        let contour = Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::line((0.0, 0.0)),
            PointRecord::line((0.0, 100.0)),
            PointRecord::line((100.0, 0.0)),
        ]);
        let result = add_overlap(&path_of(vec![contour]), &select(&[(0.0, 0.0)]), 10).unwrap();
        let points = coords(&result.contours[0]);
        // first (0, 0): incoming from (100, 0), outgoing has zero length
        assert_eq!(points[0], (-10.0, 0.0));
        assert_eq!(points[1], (0.0, 0.0));
        // second (0, 0): incoming has zero length, outgoing runs up
        assert_eq!(points[2], (0.0, 0.0));
        assert_eq!(points[3], (0.0, -10.0));
    }

    #[test]
    fn test_short_contour_with_coincident_handle_is_rejected() {
        let contour = Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::off_curve((0.0, 0.0)),
            PointRecord::qcurve((100.0, 0.0)),
        ]);
        let err = add_overlap(&path_of(vec![square(), contour]), &select(&[(0.0, 0.0)]), 10)
            .unwrap_err();
        assert!(matches!(
            err,
            OverlapError::Geometry {
                contour: 1,
                point: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_non_cubic_arrangement_is_rejected() {
        // quadratic run: the handle after the coincident one is on-curve
        let contour = Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::off_curve((0.0, 0.0)),
            PointRecord::qcurve((100.0, 50.0)),
            PointRecord::line((100.0, 0.0)),
        ]);
        let err = add_overlap(&path_of(vec![contour]), &select(&[(0.0, 0.0)]), 10).unwrap_err();
        assert!(!err.is_stream_ordering());
    }

    #[test]
    fn test_overlap_pen_draws_transformed_outline() {
        let mut pen = OverlapPen::new(select(&[(0.0, 0.0)]), 10);
        path_of(vec![square()]).draw_points(&mut pen).unwrap();
        pen.add_component(Component::new("ring", Affine::IDENTITY))
            .unwrap();

        let mut out = RecordingPen::new();
        pen.draw_points(&mut out).unwrap();
        let drawn = out.finish().unwrap();
        assert_eq!(drawn.contours[0].len(), 5);
        assert_eq!(drawn.components.len(), 1);
    }

    #[test]
    fn test_overlap_pen_failure_draws_nothing() {
        let bad = Contour::new(vec![
            PointRecord::line((0.0, 0.0)),
            PointRecord::off_curve((0.0, 0.0)),
            PointRecord::curve((100.0, 0.0)),
        ]);
        let mut pen = OverlapPen::new(select(&[(0.0, 0.0)]), 10);
        path_of(vec![square(), bad]).draw_points(&mut pen).unwrap();

        let mut out = RecordingPen::new();
        assert!(pen.draw_points(&mut out).is_err());
        assert!(out.finish().unwrap().contours.is_empty());
    }

    #[test]
    fn test_overlap_pen_defaults_to_empty_selection() {
        let pen = OverlapPen::default();
        assert!(pen.selection().is_empty());
        assert_eq!(pen.offset(), 0);
    }
}
