//! `XWrap` setters.
use crate::XWrap;
use std::os::raw::c_long;
use x11_dl::xlib;

const SOURCE_PAGER: c_long = 2;

/// The fields of a `_NET_MOVERESIZE_WINDOW` request. Fields left at `None` are not changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResize {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl MoveResize {
    /// First data item of the request: gravity, which fields are present and who is asking.
    ///
    /// `StaticGravity` makes the window manager take the position as the position of the
    /// client window, not its frame.
    pub fn flags(&self) -> c_long {
        let present = [self.x, self.y, self.w, self.h]
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_some())
            .fold(0, |flags, (i, _)| flags | (1 << (8 + i)));
        c_long::from(xlib::StaticGravity) | present | (SOURCE_PAGER << 12)
    }
}

impl XWrap {
    // Public functions.

    /// Asks the window manager to move and/or resize a window.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    pub fn send_moveresize(&self, window: xlib::Window, request: MoveResize) {
        let mut msg: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
        msg.type_ = xlib::ClientMessage;
        msg.window = window;
        msg.message_type = self.atoms.NetMoveresizeWindow;
        msg.format = 32;
        msg.data.set_long(0, request.flags());
        msg.data.set_long(1, c_long::from(request.x.unwrap_or_default()));
        msg.data.set_long(2, c_long::from(request.y.unwrap_or_default()));
        msg.data.set_long(3, c_long::from(request.w.unwrap_or_default()));
        msg.data.set_long(4, c_long::from(request.h.unwrap_or_default()));
        let mut ev: xlib::XEvent = msg.into();
        unsafe {
            (self.xlib.XSendEvent)(
                self.display,
                self.root,
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut ev,
            );
        }
        self.flush();
    }
}
