//! `XWrap` getters.
use super::{XlibError, MAX_PROPERTY_VALUE_LEN};
use crate::XWrap;
use dropsnap_core::Xyhw;
use std::os::raw::{c_int, c_uchar, c_uint, c_ulong};
use std::slice;
use x11_dl::xlib;

/// What `XQueryPointer` reports relative to one window.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerQuery {
    /// The child of the queried window containing the pointer, or 0.
    pub child: xlib::Window,
    pub root_x: i32,
    pub root_y: i32,
    pub win_x: i32,
    pub win_y: i32,
}

impl XWrap {
    // Public functions.

    /// Returns the geometry of the window itself, with its origin in root coordinates.
    /// # Errors
    ///
    /// Errors if Xlib returns a status of 0.
    // `XGetGeometry`: https://tronche.com/gui/x/xlib/window-information/XGetGeometry.html
    // `XTranslateCoordinates`: https://tronche.com/gui/x/xlib/window-information/XTranslateCoordinates.html
    pub fn get_window_geometry(&self, window: xlib::Window) -> Result<Xyhw, XlibError> {
        let (_, width, height, _) = self.get_geometry(window)?;
        let mut x_return: c_int = 0;
        let mut y_return: c_int = 0;
        let mut child_return: xlib::Window = 0;
        let status = unsafe {
            (self.xlib.XTranslateCoordinates)(
                self.display,
                window,
                self.root,
                0,
                0,
                &mut x_return,
                &mut y_return,
                &mut child_return,
            )
        };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(Xyhw::new(x_return, y_return, width, height))
    }

    /// Returns the geometry of the frame the window manager put around the window, borders
    /// included. Without a frame this is the window itself plus its border.
    /// # Errors
    ///
    /// Errors if the window tree or the geometry cannot be read.
    pub fn get_decorated_geometry(&self, window: xlib::Window) -> Result<Xyhw, XlibError> {
        let frame = self.get_toplevel(window)?;
        let ((x, y), width, height, border) = self.get_geometry(frame)?;
        Ok(Xyhw::new(x, y, width + 2 * border, height + 2 * border))
    }

    /// Returns the ancestor of the window that is a direct child of the root.
    /// # Errors
    ///
    /// Errors if the window tree cannot be read.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    pub fn get_toplevel(&self, window: xlib::Window) -> Result<xlib::Window, XlibError> {
        let mut current = window;
        loop {
            let parent = self.get_parent(current)?;
            if parent == self.root || parent == 0 {
                return Ok(current);
            }
            current = parent;
        }
    }

    /// Returns the windows listed in the root's `_NET_CLIENT_LIST`.
    /// # Errors
    ///
    /// Errors if the property is missing.
    pub fn get_client_list(&self) -> Result<Vec<xlib::Window>, XlibError> {
        self.get_property_longs(self.root, self.atoms.NetClientList, xlib::XA_WINDOW)
    }

    /// Returns whether the window manager lists `atom` in `_NET_SUPPORTED`.
    #[must_use]
    pub fn is_supported(&self, atom: xlib::Atom) -> bool {
        self.get_property_longs(self.root, self.atoms.NetSupported, xlib::XA_ATOM)
            .map(|supported| supported.contains(&atom))
            .unwrap_or_default()
    }

    /// Queries the pointer relative to a window.
    /// # Errors
    ///
    /// Errors if the pointer is on another screen than the window.
    // `XQueryPointer`: https://tronche.com/gui/x/xlib/window-information/XQueryPointer.html
    pub fn query_pointer(&self, window: xlib::Window) -> Result<PointerQuery, XlibError> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x_return: c_int = 0;
        let mut root_y_return: c_int = 0;
        let mut win_x_return: c_int = 0;
        let mut win_y_return: c_int = 0;
        let mut mask_return: c_uint = 0;
        let success = unsafe {
            (self.xlib.XQueryPointer)(
                self.display,
                window,
                &mut root_return,
                &mut child_return,
                &mut root_x_return,
                &mut root_y_return,
                &mut win_x_return,
                &mut win_y_return,
                &mut mask_return,
            )
        };
        if success == 0 {
            return Err(XlibError::RootWindowNotFound);
        }
        Ok(PointerQuery {
            child: child_return,
            root_x: root_x_return,
            root_y: root_y_return,
            win_x: win_x_return,
            win_y: win_y_return,
        })
    }

    /// Returns the child of the root under the cursor, if any.
    /// # Errors
    ///
    /// Will error if root window cannot be found.
    pub fn get_toplevel_under_cursor(&self) -> Result<Option<xlib::Window>, XlibError> {
        let child = self.query_pointer(self.root)?.child;
        Ok((child != 0).then_some(child))
    }

    /// Returns the managed window under the cursor. Frames and other windows added by the
    /// window manager are descended into until a window from the client list shows up.
    /// # Errors
    ///
    /// Will error if root window cannot be found or the client list cannot be read.
    pub fn get_cursor_window(&self) -> Result<Option<xlib::Window>, XlibError> {
        let clients = self.get_client_list()?;
        let mut window = self.root;
        loop {
            let child = self.query_pointer(window)?.child;
            if child == 0 {
                return Ok(None);
            }
            if clients.contains(&child) {
                return Ok(Some(child));
            }
            window = child;
        }
    }

    // Internal functions.

    /// Returns the position relative to the parent, the size and the border width of a window.
    // `XGetGeometry`: https://tronche.com/gui/x/xlib/window-information/XGetGeometry.html
    fn get_geometry(&self, window: xlib::Window) -> Result<((i32, i32), i32, i32, i32), XlibError> {
        let mut root_return: xlib::Window = 0;
        let mut x_return: c_int = 0;
        let mut y_return: c_int = 0;
        let mut width_return: c_uint = 0;
        let mut height_return: c_uint = 0;
        let mut border_width_return: c_uint = 0;
        let mut depth_return: c_uint = 0;
        unsafe {
            let status = (self.xlib.XGetGeometry)(
                self.display,
                window,
                &mut root_return,
                &mut x_return,
                &mut y_return,
                &mut width_return,
                &mut height_return,
                &mut border_width_return,
                &mut depth_return,
            );
            if status == 0 {
                return Err(XlibError::FailedStatus);
            }
        }
        Ok((
            (x_return, y_return),
            width_return as i32,
            height_return as i32,
            border_width_return as i32,
        ))
    }

    /// Returns the parent of a window.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    // `XFree`: https://tronche.com/gui/x/xlib/display/XFree.html
    fn get_parent(&self, window: xlib::Window) -> Result<xlib::Window, XlibError> {
        unsafe {
            let mut root_return: xlib::Window = std::mem::zeroed();
            let mut parent_return: xlib::Window = std::mem::zeroed();
            let mut array: *mut xlib::Window = std::mem::zeroed();
            let mut length: c_uint = std::mem::zeroed();
            let status: xlib::Status = (self.xlib.XQueryTree)(
                self.display,
                window,
                &mut root_return,
                &mut parent_return,
                &mut array,
                &mut length,
            );
            if !array.is_null() {
                (self.xlib.XFree)(array.cast());
            }
            match status {
                0 => Err(XlibError::FailedStatus),
                _ => Ok(parent_return),
            }
        }
    }

    /// Returns a 32 bit list property of a window.
    /// # Errors
    ///
    /// Errors if window status = 0.
    // `XGetWindowProperty`: https://tronche.com/gui/x/xlib/window-information/XGetWindowProperty.html
    fn get_property_longs(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Result<Vec<c_ulong>, XlibError> {
        let mut format_return: i32 = 0;
        let mut nitems_return: c_ulong = 0;
        let mut type_return: xlib::Atom = 0;
        let mut bytes_after_return: c_ulong = 0;
        let mut prop_return: *mut c_uchar = unsafe { std::mem::zeroed() };
        unsafe {
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut type_return,
                &mut format_return,
                &mut nitems_return,
                &mut bytes_after_return,
                &mut prop_return,
            );
            if status != i32::from(xlib::Success) || prop_return.is_null() {
                return Err(XlibError::FailedStatus);
            }
            // Format 32 items are handed out as longs, whatever their size on the wire.
            let values = if format_return == 32 {
                slice::from_raw_parts(prop_return.cast::<c_ulong>(), nitems_return as usize)
                    .to_vec()
            } else {
                vec![]
            };
            (self.xlib.XFree)(prop_return.cast());
            Ok(values)
        }
    }
}
