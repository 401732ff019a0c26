use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::{Result, StateError};
use crate::models::{Direction, Handle, WindowHandle, Xyhw};
use crate::utils::adjacency::find_adjacent;
use crate::utils::move_resize::{move_window, resize_window};

/// An edge drag in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDragState<H: Handle> {
    pub target: WindowHandle<H>,
    /// The edge of `target` being dragged.
    pub direction: Direction,
    /// Windows sharing the dragged edge, resolved once when the drag started.
    pub adjacent: Vec<WindowHandle<H>>,
    pub last_x: i32,
    pub last_y: i32,
}

impl<H: Handle> ResizeDragState<H> {
    /// Pointer travel since the last sample along the dragged edge's axis, positive when the
    /// target grows.
    fn delta(&self, x: i32, y: i32) -> i32 {
        let travel = if self.direction.is_horizontal() {
            x - self.last_x
        } else {
            y - self.last_y
        };
        travel * self.direction.sign()
    }
}

/// Resizes the window under the pointer by dragging the edge closest to the pointer, and keeps
/// every window that shared that edge flush against it.
#[derive(Debug)]
pub struct ResizeDragHandler<H: Handle> {
    state: Option<ResizeDragState<H>>,
}

impl<H: Handle> Default for ResizeDragHandler<H> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<H: Handle> ResizeDragHandler<H> {
    pub fn state(&self) -> Option<&ResizeDragState<H>> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Starts dragging the edge of the window under the pointer. Returns `false` if there is no
    /// window under the pointer.
    ///
    /// # Errors
    ///
    /// Errors with [`StateError::AlreadyDragging`] if a drag is in progress, or if the display
    /// server fails.
    pub async fn drag_start<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        x: i32,
        y: i32,
    ) -> Result<bool> {
        if self.state.is_some() {
            return Err(StateError::AlreadyDragging.into());
        }
        let Some(target) = server.window_under_pointer()? else {
            tracing::debug!("resize drag: no window under the pointer at {}x{}", x, y);
            return Ok(false);
        };

        let geometry = server.window_geometry(&target)?;
        let (local_x, local_y) = server.pointer_position_within(&target)?;
        let direction = geometry.side_of(local_x, local_y);

        let candidates: Vec<(WindowHandle<H>, Xyhw)> = server
            .managed_windows()?
            .into_iter()
            .filter(|handle| handle != &target)
            .filter_map(|handle| match server.window_geometry(&handle) {
                Ok(geometry) => Some((handle, geometry)),
                Err(err) => {
                    tracing::warn!("resize drag: skipping {:?}: {}", handle, err);
                    None
                }
            })
            .collect();
        let adjacent = find_adjacent(
            &geometry,
            direction,
            &candidates,
            config.adjacency_epsilon(),
        );
        tracing::debug!(
            "resize drag: {} edge of {:?}, adjacent: {:?}",
            direction,
            target,
            adjacent
        );

        self.state = Some(ResizeDragState {
            target,
            direction,
            adjacent,
            last_x: x,
            last_y: y,
        });
        Ok(true)
    }

    /// Follows the pointer while live resizing is enabled.
    ///
    /// # Errors
    ///
    /// Errors if the dragged window could not be resized, which also ends the drag. Failures
    /// on adjacent windows are only logged.
    pub async fn drag_step<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        x: i32,
        y: i32,
    ) -> Result<()> {
        if !config.live_resize() {
            return Ok(());
        }
        self.step(server, config, x, y).await
    }

    /// Ends the drag. Releasing within `drag_threshold` pixels of the last sample counts as a
    /// click and changes nothing.
    ///
    /// # Errors
    ///
    /// See [`ResizeDragHandler::drag_step`].
    pub async fn drag_end<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        x: i32,
        y: i32,
    ) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        let result = if state.delta(x, y).abs() > config.drag_threshold() {
            self.step(server, config, x, y).await
        } else {
            tracing::trace!("resize drag: released at {}x{} without moving", x, y);
            Ok(())
        };
        self.state = None;
        result
    }

    async fn step<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        x: i32,
        y: i32,
    ) -> Result<()> {
        // Taken out so that a failure on the target leaves the handler idle.
        let Some(mut state) = self.state.take() else {
            return Ok(());
        };
        let dir = state.direction;
        let delta = state.delta(x, y);

        let realized = match resize_target(server, config, &state.target, dir, delta).await {
            Ok(realized) => realized,
            Err(err) => {
                tracing::error!(
                    "resize drag: aborted, cannot resize {:?}: {}",
                    state.target,
                    err
                );
                return Err(err);
            }
        };

        for adjacent in &state.adjacent {
            if let Err(err) =
                resize_direction(server, config, adjacent, dir.opposite(), -realized).await
            {
                tracing::warn!("resize drag: failed to resize {:?}: {}", adjacent, err);
            }
            if let Err(err) = adjoin_edge(server, config, &state.target, adjacent, dir).await {
                tracing::warn!("resize drag: failed to adjoin {:?}: {}", adjacent, err);
            }
        }

        state.last_x = x;
        state.last_y = y;
        self.state = Some(state);
        Ok(())
    }
}

/// Resizes the dragged window and returns how far its edge actually moved, which size hints can
/// make differ from `px`.
async fn resize_target<H, S>(
    server: &S,
    config: &impl Config,
    target: &WindowHandle<H>,
    dir: Direction,
    px: i32,
) -> Result<i32>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let before = server.window_geometry(target)?;
    resize_direction(server, config, target, dir, px).await?;
    let after = server.window_geometry(target)?;
    Ok((after.edge_pos(dir) - before.edge_pos(dir)) * dir.sign())
}

/// Grows (or shrinks, for negative `px`) a window by moving its `dir` edge, keeping the
/// opposite edge where it is.
///
/// # Errors
///
/// Errors if the display server fails, or the window could not be moved back into place.
pub async fn resize_direction<H, S>(
    server: &S,
    config: &impl Config,
    handle: &WindowHandle<H>,
    dir: Direction,
    px: i32,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    if px == 0 {
        return Ok(());
    }
    let before = server.window_geometry(handle)?;
    let (w, h) = if dir.is_horizontal() {
        ((before.w() + px).max(0), before.h())
    } else {
        (before.w(), (before.h() + px).max(0))
    };
    resize_window(server, config, handle, w, h).await?;

    // Resizing keeps the origin, which moves the right and bottom edges.
    let anchor = dir.opposite();
    let after = server.window_geometry(handle)?;
    let drift = after.edge_pos(anchor) - before.edge_pos(anchor);
    if drift == 0 {
        return Ok(());
    }
    let (x, y) = if dir.is_horizontal() {
        (after.x() - drift, after.y())
    } else {
        (after.x(), after.y() - drift)
    };
    move_window(server, config, handle, x, y).await
}

/// Moves `incoming` along the axis of `dir` so that its opposite edge lines up with the `dir`
/// edge of `target`.
///
/// # Errors
///
/// Errors if the display server fails or the window did not move.
pub async fn adjoin_edge<H, S>(
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
    let target_geometry = server.window_geometry(target)?;
    let incoming_geometry = server.window_geometry(incoming)?;
    let delta = target_geometry.edge_pos(dir) - incoming_geometry.edge_pos(dir.opposite());
    if delta == 0 {
        return Ok(());
    }
    let (x, y) = if dir.is_horizontal() {
        (incoming_geometry.x() + delta, incoming_geometry.y())
    } else {
        (incoming_geometry.x(), incoming_geometry.y() + delta)
    };
    move_window(server, config, incoming, x, y).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::display_servers::{MockDisplayServer, MockWindow};
    use crate::errors::SnapError;
    use crate::models::MockHandle;

    type Server = MockDisplayServer<MockHandle>;

    /// Two windows side by side, the pointer on the shared edge of the left one.
    fn side_by_side() -> (Server, WindowHandle<MockHandle>, WindowHandle<MockHandle>) {
        let server = Server::default();
        let left = server.add_window(1, MockWindow::at(0, 0, 100, 100));
        let right = server.add_window(2, MockWindow::at(100, 0, 100, 100));
        server.set_pointer(98, 50);
        (server, left, right)
    }

    #[tokio::test(start_paused = true)]
    async fn drag_start_picks_the_edge_and_adjacent_windows() {
        let (server, left, right) = side_by_side();
        let third = server.add_window(3, MockWindow::at(0, 300, 200, 100));
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();

        assert!(handler.drag_start(&server, &config, 98, 50).await.unwrap());

        let state = handler.state().unwrap();
        assert_eq!(state.target, left);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.adjacent, vec![right]);
        assert!(!state.adjacent.contains(&third));
    }

    #[tokio::test(start_paused = true)]
    async fn drag_start_without_a_window_stays_idle() {
        let (server, _, _) = side_by_side();
        server.set_pointer(500, 500);
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();

        assert!(!handler.drag_start(&server, &config, 500, 500).await.unwrap());
        assert!(!handler.is_dragging());
    }

    #[tokio::test(start_paused = true)]
    async fn second_drag_start_is_rejected() {
        let (server, left, _) = side_by_side();
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        server.set_pointer(150, 2);
        let result = handler.drag_start(&server, &config, 150, 2).await;

        assert!(matches!(
            result,
            Err(SnapError::State(StateError::AlreadyDragging))
        ));
        assert_eq!(handler.state().unwrap().target, left);
    }

    #[tokio::test(start_paused = true)]
    async fn drag_step_keeps_the_shared_edge_flush() {
        let (server, left, right) = side_by_side();
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        handler.drag_step(&server, &config, 118, 50).await.unwrap();

        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 120, 100));
        assert_eq!(server.geometry_of(&right), Xyhw::new(120, 0, 80, 100));
        assert_eq!(handler.state().unwrap().last_x, 118);
    }

    #[tokio::test(start_paused = true)]
    async fn dragging_a_left_edge_keeps_the_right_edge_in_place() {
        let server = Server::default();
        let left = server.add_window(1, MockWindow::at(0, 0, 100, 100));
        let right = server.add_window(2, MockWindow::at(100, 0, 100, 100));
        server.set_pointer(102, 50);
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 102, 50).await.unwrap();
        assert_eq!(handler.state().unwrap().direction, Direction::Left);

        handler.drag_step(&server, &config, 82, 50).await.unwrap();

        assert_eq!(server.geometry_of(&right), Xyhw::new(80, 0, 120, 100));
        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 80, 100));
    }

    #[tokio::test(start_paused = true)]
    async fn size_hints_on_an_adjacent_window_are_covered_by_adjoining() {
        let (server, left, right) = side_by_side();
        server.update_window(&right, |w| w.size_increment = Some((10, 1)));
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        handler.drag_step(&server, &config, 113, 50).await.unwrap();

        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 115, 100));
        assert_eq!(server.geometry_of(&right), Xyhw::new(115, 0, 80, 100));
    }

    #[tokio::test(start_paused = true)]
    async fn adjacent_windows_follow_the_edge_the_target_settled_on() {
        let (server, left, right) = side_by_side();
        server.update_window(&left, |w| w.size_increment = Some((10, 1)));
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        handler.drag_step(&server, &config, 113, 50).await.unwrap();

        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 110, 100));
        assert_eq!(server.geometry_of(&right), Xyhw::new(110, 0, 90, 100));
    }

    #[tokio::test(start_paused = true)]
    async fn adjacent_failures_do_not_stop_the_drag() {
        let (server, left, right) = side_by_side();
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();
        server.update_window(&right, |w| w.broken = true);

        handler.drag_step(&server, &config, 118, 50).await.unwrap();

        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 120, 100));
        assert!(handler.is_dragging());
    }

    #[tokio::test(start_paused = true)]
    async fn target_failure_ends_the_drag() {
        let (server, left, _) = side_by_side();
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();
        server.update_window(&left, |w| w.broken = true);

        let result = handler.drag_step(&server, &config, 118, 50).await;

        assert!(matches!(result, Err(SnapError::Protocol(_))));
        assert!(!handler.is_dragging());
    }

    #[tokio::test(start_paused = true)]
    async fn release_within_the_threshold_is_a_click() {
        let (server, left, right) = side_by_side();
        let config = TestConfig::default();
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        handler.drag_end(&server, &config, 100, 50).await.unwrap();

        assert!(!handler.is_dragging());
        assert!(server.requests_for(&left).is_empty());
        assert!(server.requests_for(&right).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn release_applies_the_whole_drag_without_live_resize() {
        let (server, left, right) = side_by_side();
        let config = TestConfig {
            live_resize: false,
            ..TestConfig::default()
        };
        let mut handler = ResizeDragHandler::default();
        handler.drag_start(&server, &config, 98, 50).await.unwrap();

        handler.drag_step(&server, &config, 108, 50).await.unwrap();
        assert!(server.requests_for(&left).is_empty());

        handler.drag_end(&server, &config, 118, 50).await.unwrap();

        assert!(!handler.is_dragging());
        assert_eq!(server.geometry_of(&left), Xyhw::new(0, 0, 120, 100));
        assert_eq!(server.geometry_of(&right), Xyhw::new(120, 0, 80, 100));
    }

    #[tokio::test(start_paused = true)]
    async fn resize_direction_by_zero_does_nothing() {
        let (server, left, _) = side_by_side();
        let config = TestConfig::default();

        resize_direction(&server, &config, &left, Direction::Top, 0)
            .await
            .unwrap();

        assert!(server.requests_for(&left).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn resize_direction_top_moves_the_window_up() {
        let server = Server::default();
        let handle = server.add_window(1, MockWindow::at(0, 100, 100, 100));
        let config = TestConfig::default();

        resize_direction(&server, &config, &handle, Direction::Top, 30)
            .await
            .unwrap();

        assert_eq!(server.geometry_of(&handle), Xyhw::new(0, 70, 100, 130));
    }

    #[tokio::test(start_paused = true)]
    async fn adjoin_edge_moves_along_one_axis_only() {
        let server = Server::default();
        let target = server.add_window(1, MockWindow::at(0, 0, 100, 100));
        let incoming = server.add_window(2, MockWindow::at(40, 130, 100, 100));
        let config = TestConfig::default();

        adjoin_edge(&server, &config, &target, &incoming, Direction::Bottom)
            .await
            .unwrap();

        assert_eq!(server.geometry_of(&incoming), Xyhw::new(40, 100, 100, 100));
    }
}
