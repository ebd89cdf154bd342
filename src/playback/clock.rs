// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame poll scheduling.
//!
//! Media "time changed" notifications are too coarse to stop exactly on a
//! click point, so the player samples the media clock once per frame. The
//! host calls [`PollLoop::due`] with its frame instant; tests pass synthetic
//! instants.

use std::time::{Duration, Instant};

pub const DEFAULT_POLL_HZ: u32 = 60;

#[derive(Debug, Clone)]
pub struct PollLoop {
    interval: Duration,
    last: Option<Instant>,
    running: bool,
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_HZ)
    }
}

impl PollLoop {
    pub fn new(hz: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / hz.max(1) as f64),
            last: None,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)schedule the loop. The next frame is due immediately.
    pub fn start(&mut self) {
        self.running = true;
        self.last = None;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a poll should run at `now`. Consumes the slot when it does.
    pub fn due(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the next poll, for scheduling a repaint.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(match self.last {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }
}
