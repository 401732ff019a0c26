use super::Config;
use tracing_subscriber::EnvFilter;

impl Config {
    /// Returns a description of every setting that would make the gesture engine misbehave.
    pub fn check(&self, verbose: bool) -> Vec<String> {
        let mut problems = Vec::new();
        if verbose {
            println!("Checking tolerances.");
        }
        if self.adjacency_epsilon < 0 {
            problems.push(format!(
                "adjacency_epsilon must not be negative, got {}",
                self.adjacency_epsilon
            ));
        }
        if self.drag_threshold < 0 {
            problems.push(format!(
                "drag_threshold must not be negative, got {}",
                self.drag_threshold
            ));
        }

        if verbose {
            println!("Checking timings.");
        }
        if self.poll_interval_ms == 0 {
            problems.push("poll_interval_ms must be at least 1".to_owned());
        }
        if self.poll_interval_ms >= self.move_resize_timeout_ms {
            problems.push(format!(
                "poll_interval_ms ({}) must be shorter than move_resize_timeout_ms ({})",
                self.poll_interval_ms, self.move_resize_timeout_ms
            ));
        }

        if let Some(problem) = self.check_log_level(verbose) {
            problems.push(problem);
        }
        problems
    }

    pub fn check_log_level(&self, verbose: bool) -> Option<String> {
        if verbose {
            println!("Trying to parse log_level.");
        }
        match EnvFilter::builder().parse(&self.log_level) {
            Ok(_) => None,
            Err(err) => Some(format!("Log level is invalid: {err}")),
        }
    }
}
