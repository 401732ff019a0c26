//! A wrapper around calls to xlib and X related functions.
// We allow this because _y_ and _x_ are intentionally similar. Changing it makes the code noisy.
#![allow(clippy::similar_names)]
use super::xatom::XAtom;
use std::os::raw::{c_int, c_long};
use std::ptr;
use thiserror::Error;

use x11_dl::xlib;

mod getters;
mod setters;

pub use self::getters::PointerQuery;
pub use self::setters::MoveResize;

const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

const X_GETGEOMETRY: u8 = 14;
const X_QUERYTREE: u8 = 15;
const X_GETPROPERTY: u8 = 20;
const X_TRANSLATECOORDS: u8 = 40;
const X_QUERYPOINTER: u8 = 38;

// This is allowed for now as const extern fns
// are not yet stable (1.56.0, 16 Sept 2021)
// see issue #64926 <https://github.com/rust-lang/rust/issues/64926> for more information.
#[allow(clippy::missing_const_for_fn)]
pub extern "C" fn on_error_from_xlib(_: *mut xlib::Display, er: *mut xlib::XErrorEvent) -> c_int {
    let err = unsafe { *er };
    let ec = err.error_code;
    let rc = err.request_code;

    // Windows come and go while we look at them. The failing call reports the error itself.
    if ec == xlib::BadWindow
        || (ec == xlib::BadDrawable && rc == X_GETGEOMETRY)
        || rc == X_QUERYTREE
        || rc == X_GETPROPERTY
        || rc == X_TRANSLATECOORDS
        || rc == X_QUERYPOINTER
    {
        return 0;
    }
    tracing::warn!(
        "X error: code {}, request {}, resource {}",
        ec,
        rc,
        err.resourceid
    );
    0
}

#[derive(Debug, Clone, Error)]
pub enum XlibError {
    #[error("Xlib returned a failed status")]
    FailedStatus,
    #[error("root window not found")]
    RootWindowNotFound,
    #[error("cannot open display")]
    DisplayNotFound,
    #[error("cannot load Xlib: {0}")]
    LibraryNotFound(String),
}

/// Contains Xserver information and origins.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    root: xlib::Window,
    pub atoms: XAtom,
}

impl XWrap {
    /// Connects to the display named by `$DISPLAY`.
    ///
    /// # Errors
    ///
    /// Errors if Xlib cannot be loaded or the display cannot be opened.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XDefaultRootWindow`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultRootWindow
    // `XSetErrorHandler`: https://tronche.com/gui/x/xlib/event-handling/protocol-errors/XSetErrorHandler.html
    pub fn new() -> Result<Self, XlibError> {
        let xlib =
            xlib::Xlib::open().map_err(|err| XlibError::LibraryNotFound(err.to_string()))?;
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(XlibError::DisplayNotFound);
        }

        let atoms = XAtom::new(&xlib, display);
        let root = unsafe { (xlib.XDefaultRootWindow)(display) };

        let xw = Self {
            xlib,
            display,
            root,
            atoms,
        };
        unsafe { (xw.xlib.XSetErrorHandler)(Some(on_error_from_xlib)) };
        xw.sync();

        if !xw.is_supported(xw.atoms.NetMoveresizeWindow) {
            tracing::warn!(
                "The window manager does not advertise {}, windows might not move",
                xw.atoms.get_name(xw.atoms.NetMoveresizeWindow)
            );
        }
        Ok(xw)
    }

    /// Flush and sync the xserver.
    // `XSync`: https://tronche.com/gui/x/xlib/event-handling/XSync.html
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }
}

impl Drop for XWrap {
    // `XCloseDisplay`: https://tronche.com/gui/x/xlib/display/XCloseDisplay.html
    fn drop(&mut self) {
        unsafe { (self.xlib.XCloseDisplay)(self.display) };
    }
}
