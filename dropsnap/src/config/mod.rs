//! `dropsnap` general configuration

mod checks;
mod default;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// General configuration
///
/// # Example
///
/// In `config.toml`
///
/// ```toml
/// adjacency_epsilon = 4
/// live_resize = false
/// log_level = "dropsnap_core=debug,info"
/// ```
///
/// Missing keys keep their default value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Edges closer than this many pixels are treated as touching.
    pub adjacency_epsilon: i32,
    /// Releasing a resize drag within this many pixels is a click.
    pub drag_threshold: i32,
    pub live_resize: bool,
    pub move_resize_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub log_level: String,
}

impl dropsnap_core::Config for Config {
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
        Duration::from_millis(self.move_resize_timeout_ms)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
