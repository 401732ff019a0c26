use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapError>;

#[derive(Debug, Error)]
pub enum SnapError {
    /// A query or request to the windowing layer failed.
    #[error("Display server error: {0}")]
    Protocol(String),
    /// Nothing observable happened before the deadline. Whether that is a failure depends on the
    /// call site.
    #[error("{operation}: timeout after {duration:?}")]
    Timeout {
        operation: &'static str,
        duration: Duration,
    },
    #[error(transparent)]
    State(#[from] StateError),
    #[error("No action bound to drop zone {0:?}")]
    UnboundAction(String),
    #[error("Unknown action {0:?}")]
    UnknownAction(String),
    #[error("No drop zone under the pointer")]
    NoDropZone,
}

impl SnapError {
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Gesture invariants that were violated. These are never fatal, the gesture state is reset
/// before they are returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("Cannot end drag: not currently dragging")]
    NotDragging,
    #[error("Cannot end drag: no incoming window")]
    NoIncomingWindow,
    #[error("Cannot end drag: no target window")]
    NoTargetWindow,
    #[error("A drag is already in progress")]
    AlreadyDragging,
}
