//! Various utilities used by the gesture handlers.
pub mod adjacency;
pub mod geometry_sync;
pub mod move_resize;
