use crate::errors::Result;
use crate::models::{Handle, WindowHandle, Xyhw};

#[cfg(test)]
mod mock_display_server;

#[cfg(test)]
pub use self::mock_display_server::{MockDisplayServer, MockWindow, Request};

/// The windowing layer. Queries are answered from the live state of the display; requests are
/// fire-and-forget, the window manager applies them whenever (and however) it wants to.
pub trait DisplayServer<H: Handle> {
    /// The window's own drawable area, in root coordinates.
    fn window_geometry(&self, handle: &WindowHandle<H>) -> Result<Xyhw>;

    /// The window including the borders and titlebar added by the window manager.
    fn window_decorated_geometry(&self, handle: &WindowHandle<H>) -> Result<Xyhw>;

    fn request_move(&self, handle: &WindowHandle<H>, x: i32, y: i32) -> Result<()>;

    fn request_resize(&self, handle: &WindowHandle<H>, w: i32, h: i32) -> Result<()>;

    fn request_move_resize(&self, handle: &WindowHandle<H>, geometry: Xyhw) -> Result<()>;

    /// All windows managed by the window manager.
    fn managed_windows(&self) -> Result<Vec<WindowHandle<H>>>;

    /// The top-most managed window under the pointer, if any.
    fn window_under_pointer(&self) -> Result<Option<WindowHandle<H>>>;

    /// The top-level window directly under the pointer, managed or not. Drop zone icons are
    /// found through this.
    fn toplevel_under_pointer(&self) -> Result<Option<WindowHandle<H>>>;

    /// The pointer position relative to the window's origin.
    fn pointer_position_within(&self, handle: &WindowHandle<H>) -> Result<(i32, i32)>;

    fn flush(&self) {}
}
