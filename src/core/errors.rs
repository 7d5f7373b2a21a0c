//! Errors raised while buffering or transforming an outline

use thiserror::Error;

/// An error that occurs while feeding a point stream into a pen or while
/// adding overlap to the buffered outline.
///
/// Every variant aborts the whole operation; nothing is emitted to the final
/// sink once one of these has been returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OverlapError {
    /// `add_point()` or `end_path()` arrived with no open contour.
    #[error("must call begin_path() before calling {call}()")]
    PathNotStarted { call: &'static str },

    /// `begin_path()` arrived while a contour was still open.
    #[error("begin_path() called while a contour is still open")]
    PathAlreadyStarted,

    /// The stream ended with a contour still open.
    #[error("unfinished contour, end_path() was never called")]
    UnfinishedContour,

    /// The degenerate-handle fallback could not find a cubic segment to sample.
    #[error("contour {contour}, point {point}: {reason}")]
    Geometry {
        contour: usize,
        point: usize,
        reason: String,
    },

    /// A component refers to a base glyph name the UFO format cannot hold.
    #[error("invalid component base glyph name {0:?}")]
    InvalidBaseName(String),
}

impl OverlapError {
    /// Whether this error comes from calling the pen methods out of order.
    pub fn is_stream_ordering(&self) -> bool {
        matches!(
            self,
            OverlapError::PathNotStarted { .. }
                | OverlapError::PathAlreadyStarted
                | OverlapError::UnfinishedContour
        )
    }
}
