//! Service lifecycle state.

use std::time::{Duration, Instant};

/// Start time of the running service.
///
/// Captured once when the HTTP server is built and handed to handlers
/// through the shared state; never reset while the process lives.
#[derive(Debug, Clone, Copy)]
pub struct ServiceClock {
    started_at: Instant,
}

impl ServiceClock {
    /// Starts the clock now.
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Uptime rendered by [`format_uptime`].
    pub fn uptime_label(&self) -> String {
        format_uptime(self.uptime())
    }
}

/// Renders a duration as `1h2m3s`, dropping trailing zero units.
///
/// `45s`, `2m5s`, `3m`, `1h2m`, `1h`. Sub-second precision is discarded.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut label = if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        return format!("{}s", seconds);
    };

    if label.ends_with("m0s") {
        label.truncate(label.len() - 2);
    }
    if label.ends_with("h0m") {
        label.truncate(label.len() - 2);
    }
    label
}
