// allow casting types
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod xatom;
mod xwrap;

use serde::{Deserialize, Serialize};
pub use xwrap::{MoveResize, PointerQuery, XWrap, XlibError};

use dropsnap_core::errors::{Result, SnapError};
use dropsnap_core::models::{Handle, WindowHandle, Xyhw};
use dropsnap_core::DisplayServer;

use x11_dl::xlib;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XlibWindowHandle(pub xlib::Window);
impl Handle for XlibWindowHandle {}

impl From<XlibError> for SnapError {
    fn from(err: XlibError) -> Self {
        Self::Protocol(err.to_string())
    }
}

/// Talks to the window manager the way a pager does: geometry is read straight from the X
/// server and every change is a `_NET_MOVERESIZE_WINDOW` request.
pub struct XlibDisplayServer {
    xw: XWrap,
}

impl XlibDisplayServer {
    /// # Errors
    ///
    /// Errors if the X server cannot be reached.
    pub fn new() -> Result<Self> {
        Ok(Self { xw: XWrap::new()? })
    }

    /// Whether the window manager advertises `_NET_MOVERESIZE_WINDOW`.
    pub fn supports_moveresize(&self) -> bool {
        self.xw.is_supported(self.xw.atoms.NetMoveresizeWindow)
    }

    fn send(&self, handle: &WindowHandle<XlibWindowHandle>, request: MoveResize) {
        let WindowHandle(XlibWindowHandle(window)) = *handle;
        tracing::trace!("_NET_MOVERESIZE_WINDOW {}: {:?}", window, request);
        self.xw.send_moveresize(window, request);
    }
}

impl DisplayServer<XlibWindowHandle> for XlibDisplayServer {
    fn window_geometry(&self, handle: &WindowHandle<XlibWindowHandle>) -> Result<Xyhw> {
        Ok(self.xw.get_window_geometry(handle.0 .0)?)
    }

    fn window_decorated_geometry(&self, handle: &WindowHandle<XlibWindowHandle>) -> Result<Xyhw> {
        Ok(self.xw.get_decorated_geometry(handle.0 .0)?)
    }

    fn request_move(&self, handle: &WindowHandle<XlibWindowHandle>, x: i32, y: i32) -> Result<()> {
        self.send(
            handle,
            MoveResize {
                x: Some(x),
                y: Some(y),
                ..MoveResize::default()
            },
        );
        Ok(())
    }

    fn request_resize(
        &self,
        handle: &WindowHandle<XlibWindowHandle>,
        w: i32,
        h: i32,
    ) -> Result<()> {
        self.send(
            handle,
            MoveResize {
                w: Some(w),
                h: Some(h),
                ..MoveResize::default()
            },
        );
        Ok(())
    }

    fn request_move_resize(
        &self,
        handle: &WindowHandle<XlibWindowHandle>,
        geometry: Xyhw,
    ) -> Result<()> {
        self.send(
            handle,
            MoveResize {
                x: Some(geometry.x()),
                y: Some(geometry.y()),
                w: Some(geometry.w()),
                h: Some(geometry.h()),
            },
        );
        Ok(())
    }

    fn managed_windows(&self) -> Result<Vec<WindowHandle<XlibWindowHandle>>> {
        Ok(self
            .xw
            .get_client_list()?
            .into_iter()
            .map(|window| WindowHandle(XlibWindowHandle(window)))
            .collect())
    }

    fn window_under_pointer(&self) -> Result<Option<WindowHandle<XlibWindowHandle>>> {
        Ok(self
            .xw
            .get_cursor_window()?
            .map(|window| WindowHandle(XlibWindowHandle(window))))
    }

    fn toplevel_under_pointer(&self) -> Result<Option<WindowHandle<XlibWindowHandle>>> {
        Ok(self
            .xw
            .get_toplevel_under_cursor()?
            .map(|window| WindowHandle(XlibWindowHandle(window))))
    }

    fn pointer_position_within(
        &self,
        handle: &WindowHandle<XlibWindowHandle>,
    ) -> Result<(i32, i32)> {
        let pointer = self.xw.query_pointer(handle.0 .0)?;
        Ok((pointer.win_x, pointer.win_y))
    }

    fn flush(&self) {
        self.xw.flush();
    }
}
