//! Geometry synchronization, adjacent multi-window resizing and drag gestures for dropsnap.
// We deny clippy pedantic lints, primarily to keep code as correct as possible
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
pub mod actions;
pub mod config;
pub mod display_servers;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;

pub use actions::{Action, ActionTable};
pub use config::Config;
pub use display_servers::DisplayServer;
pub use errors::{Result, SnapError, StateError};
pub use handlers::{DragHandler, DropZone, ResizeDragHandler};
pub use models::{Direction, Handle, WindowHandle, Xyhw, XyhwBuilder};
