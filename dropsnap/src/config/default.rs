use super::Config;

impl Default for Config {
    fn default() -> Self {
        Self {
            adjacency_epsilon: 2,
            drag_threshold: 2,
            live_resize: true,
            move_resize_timeout_ms: 30,
            poll_interval_ms: 1,
            log_level: "info".to_owned(),
        }
    }
}
