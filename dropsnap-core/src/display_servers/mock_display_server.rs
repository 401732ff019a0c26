//! A display server that behaves like a lazy, slightly broken window manager.
use super::DisplayServer;
use crate::errors::{Result, SnapError};
use crate::models::{Handle, WindowHandle, Xyhw};
use std::cell::{Cell, RefCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Move(i32, i32),
    Resize(i32, i32),
    MoveResize(Xyhw),
}

#[derive(Clone, Debug, Default)]
pub struct MockWindow {
    pub geometry: Xyhw,
    /// Decoration insets: left, top, right, bottom.
    pub frame: (i32, i32, i32, i32),
    /// Like fluxbox, grow the window by this many pixels every time it is moved.
    pub move_grows_by: i32,
    /// Resize increments from `WM_NORMAL_HINTS` (terminal cells).
    pub size_increment: Option<(i32, i32)>,
    /// Requests are accepted but never applied.
    pub frozen: bool,
    /// Every query fails.
    pub broken: bool,
}

impl MockWindow {
    pub fn at(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            geometry: Xyhw::new(x, y, w, h),
            ..Self::default()
        }
    }

    fn decorated(&self) -> Xyhw {
        let (left, top, right, bottom) = self.frame;
        Xyhw::new(
            self.geometry.x() - left,
            self.geometry.y() - top,
            self.geometry.w() + left + right,
            self.geometry.h() + top + bottom,
        )
    }

    fn constrain(&self, w: i32, h: i32) -> (i32, i32) {
        match self.size_increment {
            Some((inc_w, inc_h)) => (w - w % inc_w, h - h % inc_h),
            None => (w, h),
        }
    }

    fn apply(&mut self, request: Request) {
        if self.frozen {
            return;
        }
        match request {
            Request::Move(x, y) => {
                self.geometry.set_x(x);
                self.geometry.set_y(y);
                self.geometry.set_h(self.geometry.h() + self.move_grows_by);
            }
            Request::Resize(w, h) => {
                let (w, h) = self.constrain(w, h);
                self.geometry.set_w(w);
                self.geometry.set_h(h);
            }
            Request::MoveResize(xyhw) => {
                let (w, h) = self.constrain(xyhw.w(), xyhw.h());
                self.geometry = Xyhw::new(xyhw.x(), xyhw.y(), w, h + self.move_grows_by);
            }
        }
    }
}

/// Requests are queued and only applied once somebody queries the display again, so callers
/// have to poll to observe them.
pub struct MockDisplayServer<H: Handle> {
    windows: RefCell<Vec<(WindowHandle<H>, MockWindow)>>,
    icons: RefCell<Vec<(WindowHandle<H>, Xyhw)>>,
    pending: RefCell<Vec<(WindowHandle<H>, Request)>>,
    pub requests: RefCell<Vec<(WindowHandle<H>, Request)>>,
    pointer: Cell<(i32, i32)>,
}

impl<H: Handle> Default for MockDisplayServer<H> {
    fn default() -> Self {
        Self {
            windows: RefCell::new(vec![]),
            icons: RefCell::new(vec![]),
            pending: RefCell::new(vec![]),
            requests: RefCell::new(vec![]),
            pointer: Cell::new((0, 0)),
        }
    }
}

impl<H: Handle> MockDisplayServer<H> {
    pub fn add_window(&self, handle: H, window: MockWindow) -> WindowHandle<H> {
        let handle = WindowHandle(handle);
        self.windows.borrow_mut().push((handle, window));
        handle
    }

    pub fn add_icon(&self, handle: H, geometry: Xyhw) -> WindowHandle<H> {
        let handle = WindowHandle(handle);
        self.icons.borrow_mut().push((handle, geometry));
        handle
    }

    pub fn set_pointer(&self, x: i32, y: i32) {
        self.pointer.set((x, y));
    }

    pub fn update_window(&self, handle: &WindowHandle<H>, update: impl FnOnce(&mut MockWindow)) {
        if let Some((_, w)) = self.windows.borrow_mut().iter_mut().find(|(h, _)| h == handle) {
            update(w);
        }
    }

    /// Current geometry without applying anything still in flight.
    pub fn geometry_of(&self, handle: &WindowHandle<H>) -> Xyhw {
        self.windows
            .borrow()
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, w)| w.geometry)
            .unwrap_or_default()
    }

    pub fn requests_for(&self, handle: &WindowHandle<H>) -> Vec<Request> {
        self.requests
            .borrow()
            .iter()
            .filter(|(h, _)| h == handle)
            .map(|(_, r)| *r)
            .collect()
    }

    fn push(&self, handle: &WindowHandle<H>, request: Request) -> Result<()> {
        self.lookup(handle)?;
        self.requests.borrow_mut().push((*handle, request));
        self.pending.borrow_mut().push((*handle, request));
        Ok(())
    }

    fn apply_pending(&self) {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let mut windows = self.windows.borrow_mut();
        for (handle, request) in pending {
            if let Some((_, w)) = windows.iter_mut().find(|(h, _)| *h == handle) {
                w.apply(request);
            }
        }
    }

    fn lookup(&self, handle: &WindowHandle<H>) -> Result<MockWindow> {
        let windows = self.windows.borrow();
        match windows.iter().find(|(h, _)| h == handle) {
            Some((_, w)) if w.broken => Err(SnapError::Protocol(format!("BadDrawable {handle:?}"))),
            Some((_, w)) => Ok(w.clone()),
            None => Err(SnapError::Protocol(format!("BadWindow {handle:?}"))),
        }
    }

    fn query(&self, handle: &WindowHandle<H>) -> Result<MockWindow> {
        self.apply_pending();
        self.lookup(handle)
    }
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn window_geometry(&self, handle: &WindowHandle<H>) -> Result<Xyhw> {
        Ok(self.query(handle)?.geometry)
    }

    fn window_decorated_geometry(&self, handle: &WindowHandle<H>) -> Result<Xyhw> {
        Ok(self.query(handle)?.decorated())
    }

    fn request_move(&self, handle: &WindowHandle<H>, x: i32, y: i32) -> Result<()> {
        self.push(handle, Request::Move(x, y))
    }

    fn request_resize(&self, handle: &WindowHandle<H>, w: i32, h: i32) -> Result<()> {
        self.push(handle, Request::Resize(w, h))
    }

    fn request_move_resize(&self, handle: &WindowHandle<H>, geometry: Xyhw) -> Result<()> {
        self.push(handle, Request::MoveResize(geometry))
    }

    fn managed_windows(&self) -> Result<Vec<WindowHandle<H>>> {
        Ok(self.windows.borrow().iter().map(|(h, _)| *h).collect())
    }

    fn window_under_pointer(&self) -> Result<Option<WindowHandle<H>>> {
        self.apply_pending();
        let (x, y) = self.pointer.get();
        Ok(self
            .windows
            .borrow()
            .iter()
            .rev()
            .find(|(_, w)| w.geometry.contains_point(x, y))
            .map(|(h, _)| *h))
    }

    fn toplevel_under_pointer(&self) -> Result<Option<WindowHandle<H>>> {
        let (x, y) = self.pointer.get();
        let icon = self
            .icons
            .borrow()
            .iter()
            .rev()
            .find(|(_, g)| g.contains_point(x, y))
            .map(|(h, _)| *h);
        match icon {
            Some(icon) => Ok(Some(icon)),
            None => self.window_under_pointer(),
        }
    }

    fn pointer_position_within(&self, handle: &WindowHandle<H>) -> Result<(i32, i32)> {
        let geometry = self.query(handle)?.geometry;
        let (x, y) = self.pointer.get();
        Ok((x - geometry.x(), y - geometry.y()))
    }
}
