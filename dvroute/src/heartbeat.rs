use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Periodic full-table advertisement, independent of any table change.
///
/// Times are offsets from an arbitrary epoch chosen by the host, they only need to be monotonic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    interval: Duration,
    last_broadcast: Duration,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_broadcast: Duration::ZERO,
        }
    }

    /// Returns true, and restarts the period, if a heartbeat is due at `now`
    pub fn poll(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_broadcast) >= self.interval {
            self.last_broadcast = now;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_broadcast(&self) -> Duration {
        self.last_broadcast
    }
}
