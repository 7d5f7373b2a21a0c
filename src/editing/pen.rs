//! Point pens
//!
//! A point pen receives an outline as a stream of calls: `begin_path`, a run
//! of `add_point`s, `end_path`, repeated per contour, with `add_component`
//! allowed anywhere outside that nesting. Anything that produces outlines
//! (a glyph, a buffered [`Path`], the overlap transform) drives a pen, and
//! anything that consumes them (a buffer, a glyph writer) implements one.

use crate::core::errors::OverlapError;
use crate::font_source::{Component, Contour, Path, PointRecord};

/// Consumer side of the point-stream interface
pub trait PointPen {
    /// Open a new contour
    fn begin_path(&mut self, identifier: Option<String>) -> Result<(), OverlapError>;

    /// Append a point to the open contour
    fn add_point(&mut self, record: PointRecord) -> Result<(), OverlapError>;

    /// Close the open contour
    fn end_path(&mut self) -> Result<(), OverlapError>;

    /// Add a component reference; independent of contour nesting
    fn add_component(&mut self, component: Component) -> Result<(), OverlapError>;
}

#[derive(Debug, Default)]
enum RecordingState {
    #[default]
    Idle,
    Drawing(Contour),
}

/// Buffers a point stream into a [`Path`]
#[derive(Debug, Default)]
pub struct RecordingPen {
    path: Path,
    state: RecordingState,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a contour is currently open
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, RecordingState::Drawing(_))
    }

    /// The outline buffered so far (closed contours only)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the buffered outline
    ///
    /// Errors when a contour is still open.
    pub fn finish(self) -> Result<Path, OverlapError> {
        match self.state {
            RecordingState::Idle => Ok(self.path),
            RecordingState::Drawing(_) => Err(OverlapError::UnfinishedContour),
        }
    }
}

impl PointPen for RecordingPen {
    fn begin_path(&mut self, identifier: Option<String>) -> Result<(), OverlapError> {
        match self.state {
            RecordingState::Idle => {
                self.state = RecordingState::Drawing(Contour {
                    points: Vec::new(),
                    identifier,
                });
                Ok(())
            }
            RecordingState::Drawing(_) => Err(OverlapError::PathAlreadyStarted),
        }
    }

    fn add_point(&mut self, record: PointRecord) -> Result<(), OverlapError> {
        match &mut self.state {
            RecordingState::Idle => Err(OverlapError::PathNotStarted { call: "add_point" }),
            RecordingState::Drawing(contour) => {
                contour.points.push(record);
                Ok(())
            }
        }
    }

    fn end_path(&mut self) -> Result<(), OverlapError> {
        match std::mem::take(&mut self.state) {
            RecordingState::Idle => Err(OverlapError::PathNotStarted { call: "end_path" }),
            RecordingState::Drawing(contour) => {
                // Empty contours carry nothing worth keeping
                if !contour.is_empty() {
                    self.path.contours.push(contour);
                }
                Ok(())
            }
        }
    }

    fn add_component(&mut self, component: Component) -> Result<(), OverlapError> {
        self.path.components.push(component);
        Ok(())
    }
}
