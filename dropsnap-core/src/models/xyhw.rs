//! Window rectangles and their edges.
#![allow(clippy::module_name_repetitions)]
use super::Direction;
use serde::{Deserialize, Serialize};

/// Window placement, x,y from top left. Width and height are never negative.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub struct Xyhw {
    x: i32,
    y: i32,
    h: i32,
    w: i32,
}

/// Modifiable struct that can be used to generate an Xyhw struct. x,y from top left.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub struct XyhwBuilder {
    pub x: i32,
    pub y: i32,
    pub h: i32,
    pub w: i32,
}

impl From<XyhwBuilder> for Xyhw {
    fn from(xywh: XyhwBuilder) -> Self {
        let mut b = Self {
            x: xywh.x,
            y: xywh.y,
            w: xywh.w,
            h: xywh.h,
        };
        b.update_limits();
        b
    }
}

impl Xyhw {
    #[must_use]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        XyhwBuilder { x, y, h, w }.into()
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
    #[must_use]
    pub const fn h(&self) -> i32 {
        self.h
    }
    #[must_use]
    pub const fn w(&self) -> i32 {
        self.w
    }

    pub fn set_x(&mut self, value: i32) {
        self.x = value;
    }
    pub fn set_y(&mut self, value: i32) {
        self.y = value;
    }
    pub fn set_h(&mut self, value: i32) {
        self.h = value;
        self.update_limits();
    }
    pub fn set_w(&mut self, value: i32) {
        self.w = value;
        self.update_limits();
    }

    fn update_limits(&mut self) {
        if self.h < 0 {
            self.h = 0;
        }
        if self.w < 0 {
            self.w = 0;
        }
    }

    #[must_use]
    pub const fn same_size(&self, other: &Self) -> bool {
        self.w == other.w && self.h == other.h
    }

    #[must_use]
    pub const fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let max_x = self.x + self.w;
        let max_y = self.y + self.h;
        (self.x <= x && x <= max_x) && (self.y <= y && y <= max_y)
    }

    /// Coordinate of the given edge: y for top, y + h for bottom, x for left and x + w for right.
    pub const fn edge_pos(&self, dir: Direction) -> i32 {
        match dir {
            Direction::Top => self.y,
            Direction::Bottom => self.y + self.h,
            Direction::Left => self.x,
            Direction::Right => self.x + self.w,
        }
    }

    /// Whether the projections of both rectangles on the axis orthogonal to `dir` share a
    /// non-empty range. Touching ranges do not count.
    pub const fn overlaps_across(&self, other: &Self, dir: Direction) -> bool {
        let (start, end, other_start, other_end) = if dir.is_horizontal() {
            (self.y, self.y + self.h, other.y, other.y + other.h)
        } else {
            (self.x, self.x + self.w, other.x, other.x + other.w)
        };
        start < other_end && other_start < end
    }

    /// Classify a point, relative to this rectangle's origin, into one of the four triangles
    /// formed by the rectangle's diagonals.
    ///
    /// X addresses coordinates from the top-left, so the diagonal running from the top-left to
    /// the bottom-right corner has a positive slope.
    pub fn side_of(&self, x: i32, y: i32) -> Direction {
        let (w, h) = (self.w, self.h);
        if w == 0 {
            return if y < h / 2 {
                Direction::Top
            } else {
                Direction::Bottom
            };
        }
        if h == 0 {
            return if x < w / 2 {
                Direction::Left
            } else {
                Direction::Right
            };
        }

        let slope = f64::from(h) / f64::from(w);
        let tl_to_br = (slope * f64::from(x)) as i32;
        let bl_to_tr = (-slope * f64::from(x)) as i32 + h;

        if x < w / 2 {
            if y <= tl_to_br {
                Direction::Top
            } else if y >= bl_to_tr {
                Direction::Bottom
            } else {
                Direction::Left
            }
        } else if y <= bl_to_tr {
            Direction::Top
        } else if y >= tl_to_br {
            Direction::Bottom
        } else {
            Direction::Right
        }
    }
}
