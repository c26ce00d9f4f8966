//! Sliding-window bookkeeping for throttling expensive provider calls.
//!
//! The window never rejects a caller. It only reports how long the caller must
//! wait before the oldest recorded call leaves the window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SlidingWindow {
    max_calls: usize,
    window: Duration,
    timestamps: VecDeque<Instant>,
}

impl SlidingWindow {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            window,
            timestamps: VecDeque::new(),
        }
    }

    /// Drop timestamps older than the trailing window.
    pub fn prune(&mut self, now: Instant) {
        while let Some(oldest) = self.timestamps.front() {
            if now.saturating_duration_since(*oldest) < self.window {
                break;
            }
            self.timestamps.pop_front();
        }
    }

    /// Wait required before another call may start, or `None` if one may start now.
    pub fn wait_time(&mut self, now: Instant) -> Option<Duration> {
        self.prune(now);
        if self.timestamps.len() < self.max_calls {
            return None;
        }
        let oldest = *self.timestamps.front()?;
        let elapsed = now.saturating_duration_since(oldest);
        let wait = self.window.saturating_sub(elapsed);
        (!wait.is_zero()).then_some(wait)
    }

    pub fn record(&mut self, at: Instant) {
        self.timestamps.push_back(at);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
