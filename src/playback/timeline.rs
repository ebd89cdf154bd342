// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline scrubbing and step derivation.
//!
//! The scrub control and the media clock share the range `[0, duration]`,
//! so mapping between them is a clamp. The interesting part is working out
//! which click point comes next after an arbitrary jump.

use crate::models::{ClickPoint, TIMESTAMP_EPSILON};
use std::sync::Arc;

/// Marker drawn on the scrub bar for one click point.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub point_id: String,
    pub order: u32,
    /// Horizontal position along the bar, 0 to 100.
    pub percent: f64,
}

/// Media time for a scrub control value.
pub fn scrub_to_time(value: f64, duration: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, duration.max(0.0))
}

/// Scrub control value for a media time.
pub fn time_to_scrub(time: f64, duration: f64) -> f64 {
    scrub_to_time(time, duration)
}

/// Index of the first click point at or after `time` (within epsilon).
///
/// `points` must be sorted by ascending timestamp. Returns `points.len()`
/// when every point lies behind `time`.
pub fn step_index_for_time(points: &[Arc<ClickPoint>], time: f64) -> usize {
    points
        .iter()
        .position(|p| p.timestamp >= time - TIMESTAMP_EPSILON)
        .unwrap_or(points.len())
}

pub fn tick_marks(points: &[Arc<ClickPoint>], duration: f64) -> Vec<TickMark> {
    points
        .iter()
        .map(|p| TickMark {
            point_id: p.id.clone(),
            order: p.order,
            percent: if duration > 0.0 {
                p.timestamp / duration * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Guards against seek feedback loops.
///
/// Raised when a seek is issued and lowered only by the media engine's own
/// seek-completed notification, so a "time changed" handler cannot answer a
/// programmatic seek with another seek.
#[derive(Debug, Clone, Default)]
pub struct SeekGuard {
    seeking: bool,
}

impl SeekGuard {
    pub fn begin(&mut self) {
        self.seeking = true;
    }

    pub fn complete(&mut self) {
        self.seeking = false;
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn points(timestamps: &[f64]) -> Vec<Arc<ClickPoint>> {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &t)| Arc::new(ClickPoint::new(t, Point::new(50.0, 50.0), i as u32 + 1)))
            .collect()
    }

    #[test]
    fn test_step_index_forward_search() {
        let points = points(&[2.0, 5.0, 9.0]);
        assert_eq!(step_index_for_time(&points, 0.0), 0);
        assert_eq!(step_index_for_time(&points, 3.0), 1);
        assert_eq!(step_index_for_time(&points, 5.0), 1);
        assert_eq!(step_index_for_time(&points, 5.03), 1);
        assert_eq!(step_index_for_time(&points, 5.2), 2);
        assert_eq!(step_index_for_time(&points, 9.5), 3);
        assert_eq!(step_index_for_time(&[], 1.0), 0);
    }

    #[test]
    fn test_tick_marks() {
        let points = points(&[2.0, 5.0]);
        let marks = tick_marks(&points, 10.0);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].percent, 20.0);
        assert_eq!(marks[1].percent, 50.0);
        assert_eq!(marks[1].order, 2);
        assert_eq!(tick_marks(&points, 0.0)[1].percent, 0.0);
    }

    #[test]
    fn test_scrub_clamps() {
        assert_eq!(scrub_to_time(-1.0, 10.0), 0.0);
        assert_eq!(scrub_to_time(12.0, 10.0), 10.0);
        assert_eq!(scrub_to_time(f64::NAN, 10.0), 0.0);
        assert_eq!(time_to_scrub(4.5, 10.0), 4.5);
    }

    #[test]
    fn test_seek_guard() {
        let mut guard = SeekGuard::default();
        assert!(!guard.is_seeking());
        guard.begin();
        assert!(guard.is_seeking());
        guard.complete();
        assert!(!guard.is_seeking());
    }
}
