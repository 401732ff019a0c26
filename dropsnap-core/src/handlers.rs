//! Pointer gestures: dragging an edge to resize, and dragging a window onto a drop zone.
mod drag_handler;
mod resize_drag_handler;

pub use drag_handler::{DragHandler, DragInteractionState, DropZone};
pub use resize_drag_handler::{adjoin_edge, resize_direction, ResizeDragHandler, ResizeDragState};
