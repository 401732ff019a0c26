use std::time::Duration;

/// Tunables for the gesture engine. The values are heuristics tuned against window manager
/// behaviour, so they are never hard coded.
pub trait Config {
    /// Pixel tolerance for declaring two window edges as touching.
    fn adjacency_epsilon(&self) -> i32;

    /// Pointer travel (in pixels) a resize drag must exceed on release to count as a resize
    /// rather than a click.
    fn drag_threshold(&self) -> i32;

    /// Resize on every pointer motion instead of only on release.
    fn live_resize(&self) -> bool;

    /// How long to wait for the window manager to apply a request.
    fn move_resize_timeout(&self) -> Duration;

    /// Delay between two geometry polls.
    fn poll_interval(&self) -> Duration;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
pub struct TestConfig {
    pub adjacency_epsilon: i32,
    pub drag_threshold: i32,
    pub live_resize: bool,
}

#[cfg(test)]
impl Default for TestConfig {
    fn default() -> Self {
        Self {
            adjacency_epsilon: 2,
            drag_threshold: 2,
            live_resize: true,
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn adjacency_epsilon(&self) -> i32 {
        self.adjacency_epsilon
    }
    fn drag_threshold(&self) -> i32 {
        self.drag_threshold
    }
    fn live_resize(&self) -> bool {
        self.live_resize
    }
    fn move_resize_timeout(&self) -> Duration {
        Duration::from_millis(30)
    }
    fn poll_interval(&self) -> Duration {
        Duration::from_millis(1)
    }
}
