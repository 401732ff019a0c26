use std::ffi::CString;
use x11_dl::xlib;

// Specifications can be found here:
// https://specifications.freedesktop.org/wm-spec/1.3/ar01s03.html

#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub struct XAtom {
    pub NetSupported: xlib::Atom,
    pub NetClientList: xlib::Atom,
    pub NetMoveresizeWindow: xlib::Atom,
}

impl XAtom {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        Self {
            NetSupported: from(xlib, dpy, "_NET_SUPPORTED"),
            NetClientList: from(xlib, dpy, "_NET_CLIENT_LIST"),
            NetMoveresizeWindow: from(xlib, dpy, "_NET_MOVERESIZE_WINDOW"),
        }
    }

    pub const fn get_name(&self, atom: xlib::Atom) -> &str {
        match atom {
            a if a == self.NetSupported => "_NET_SUPPORTED",
            a if a == self.NetClientList => "_NET_CLIENT_LIST",
            a if a == self.NetMoveresizeWindow => "_NET_MOVERESIZE_WINDOW",
            _ => "(UNKNOWN)",
        }
    }
}

fn from(xlib: &xlib::Xlib, dpy: *mut xlib::Display, s: &str) -> xlib::Atom {
    let name = CString::new(s).unwrap_or_default();
    unsafe { (xlib.XInternAtom)(dpy, name.as_ptr(), xlib::False) }
}
