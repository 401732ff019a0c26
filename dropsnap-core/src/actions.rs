//! What happens to the windows when a dragged window is dropped on a drop zone.
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::{Result, SnapError};
use crate::models::{Direction, Handle, WindowHandle, Xyhw};
use crate::utils::move_resize::move_resize_window;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Rearranges the target window and the window dropped onto it.
///
/// Actions are named after what they do to the *incoming* window: `SplitTop` gives it the top
/// half of the target, `ShoveLeft` puts it next to the target on the left.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Halve the target; the incoming window takes the half on this side.
    Split(Direction),
    /// Exchange the geometries of both windows.
    Swap,
    /// Place the incoming window against this side of the target, leaving the target alone.
    Shove(Direction),
}

impl Action {
    pub const ALL: [Self; 9] = [
        Self::Split(Direction::Top),
        Self::Split(Direction::Right),
        Self::Split(Direction::Bottom),
        Self::Split(Direction::Left),
        Self::Swap,
        Self::Shove(Direction::Top),
        Self::Shove(Direction::Right),
        Self::Shove(Direction::Bottom),
        Self::Shove(Direction::Left),
    ];

    /// Applies the action to `target` and the `incoming` window that was dropped on it.
    ///
    /// # Errors
    ///
    /// Errors if reading a geometry or reconfiguring one of the windows fails. Earlier
    /// reconfigurations are not undone.
    pub async fn apply<H, S>(
        self,
        server: &S,
        config: &impl Config,
        target: &WindowHandle<H>,
        incoming: &WindowHandle<H>,
    ) -> Result<()>
    where
        H: Handle,
        S: DisplayServer<H>,
    {
        tracing::debug!("{}: target {:?}, incoming {:?}", self, target, incoming);
        match self {
            Self::Split(dir) => split(server, config, target, incoming, dir).await,
            Self::Swap => swap(server, config, target, incoming).await,
            Self::Shove(dir) => shove(server, config, target, incoming, dir).await,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split(dir) => write!(f, "Split{dir}"),
            Self::Swap => f.write_str("Swap"),
            Self::Shove(dir) => write!(f, "Shove{dir}"),
        }
    }
}

impl FromStr for Action {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.to_string() == s)
            .ok_or_else(|| SnapError::UnknownAction(s.to_string()))
    }
}

impl TryFrom<String> for Action {
    type Error = SnapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

/// Actions by the name a drop zone is bound with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionTable(BTreeMap<String, Action>);

impl Default for ActionTable {
    fn default() -> Self {
        Self(
            Action::ALL
                .into_iter()
                .map(|action| (action.to_string(), action))
                .collect(),
        )
    }
}

impl ActionTable {
    pub fn get(&self, name: &str) -> Option<Action> {
        self.0.get(name).copied()
    }

    /// Binds `name` to `action`, returning the action that was bound to it before.
    pub fn bind(&mut self, name: impl Into<String>, action: Action) -> Option<Action> {
        self.0.insert(name.into(), action)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the half of `geometry` on the `dir` side and the remaining half. Odd sizes give the
/// extra pixel to the top or right half.
fn halves(geometry: &Xyhw, dir: Direction) -> (Xyhw, Xyhw) {
    let (x, y, w, h) = (geometry.x(), geometry.y(), geometry.w(), geometry.h());
    if dir.is_horizontal() {
        let left_w = w / 2;
        let right_w = w - left_w;
        let left = Xyhw::new(x, y, left_w, h);
        let right = Xyhw::new(x + left_w, y, right_w, h);
        if dir == Direction::Left {
            (left, right)
        } else {
            (right, left)
        }
    } else {
        let bottom_h = h / 2;
        let top_h = h - bottom_h;
        let top = Xyhw::new(x, y, w, top_h);
        let bottom = Xyhw::new(x, y + top_h, w, bottom_h);
        if dir == Direction::Top {
            (top, bottom)
        } else {
            (bottom, top)
        }
    }
}

async fn split<H, S>(
    server: &S,
    config: &impl Config,
    target: &WindowHandle<H>,
    incoming: &WindowHandle<H>,
    dir: Direction,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let geometry = server.window_geometry(target)?;
    let (near, far) = halves(&geometry, dir);

    // The bottom (or right) half is always configured first.
    if matches!(dir, Direction::Bottom | Direction::Right) {
        move_resize_window(server, config, incoming, near).await?;
        move_resize_window(server, config, target, far).await
    } else {
        move_resize_window(server, config, target, far).await?;
        move_resize_window(server, config, incoming, near).await
    }
}

async fn swap<H, S>(
    server: &S,
    config: &impl Config,
    target: &WindowHandle<H>,
    incoming: &WindowHandle<H>,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let target_geometry = server.window_geometry(target)?;
    let incoming_geometry = server.window_geometry(incoming)?;

    move_resize_window(server, config, target, incoming_geometry).await?;
    move_resize_window(server, config, incoming, target_geometry)
        .await
        .map_err(|err| {
            tracing::error!(
                "swap: {:?} already took the place of {:?}: {}",
                target,
                incoming,
                err
            );
            err
        })
}

async fn shove<H, S>(
    server: &S,
    config: &impl Config,
    target: &WindowHandle<H>,
    incoming: &WindowHandle<H>,
    dir: Direction,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let t = server.window_geometry(target)?;
    let i = server.window_geometry(incoming)?;
    let geometry = match dir {
        Direction::Top => Xyhw::new(t.x(), t.y() - i.h(), t.w(), i.h()),
        Direction::Bottom => Xyhw::new(t.x(), t.y() + t.h(), t.w(), i.h()),
        Direction::Left => Xyhw::new(t.x() - i.w(), t.y(), i.w(), t.h()),
        Direction::Right => Xyhw::new(t.x() + t.w(), t.y(), i.w(), t.h()),
    };
    move_resize_window(server, config, incoming, geometry).await
}
