//! Point selection by coordinate
//!
//! Selected points are identified purely by where they are, so a selection
//! taken from one outline can be matched against a freshly rebuilt copy of it.

use kurbo::Point;
use std::collections::HashSet;

/// Hashable stand-in for a coordinate; `-0.0` and `0.0` compare equal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PointKey(u64, u64);

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        // adding 0.0 folds -0.0 into 0.0
        PointKey((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
    }
}

/// An unordered set of selected coordinates
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    points: HashSet<PointKey>,
}

impl Selection {
    /// An empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate; returns false if it was already selected
    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point.into())
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&PointKey::from(point))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Point> for Selection {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut selection = Selection::new();
        selection.extend(iter);
        selection
    }
}

impl Extend<Point> for Selection {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter.into_iter().map(PointKey::from));
    }
}
