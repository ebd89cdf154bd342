// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project document.
//!
//! A `DemoProject` is the whole click-through demo: the recorded video, its
//! ordered click points and presentation settings. Click points are held
//! behind `Arc` so cloning the document for an undo snapshot shares every
//! point, and editing one point copies only that point.

use super::click_point::{ClickPoint, PulseSpeed, MAX_CLICK_POINTS, TIMESTAMP_EPSILON};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The recorded video a demo is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: String,
    /// Declared duration in seconds.
    pub duration: f64,
    /// Native width in pixels; authoritative for area scaling.
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Presentation settings shared by every click point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoSettings {
    pub show_step_counter: bool,
    pub hotspot_color: String,
    pub default_pulse_speed: PulseSpeed,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            show_step_counter: true,
            hotspot_color: "#3b82f6".to_string(),
            default_pulse_speed: PulseSpeed::Normal,
        }
    }
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoProject {
    pub id: String,
    #[serde(default)]
    pub sequence: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub video: VideoInfo,
    #[serde(default)]
    pub click_points: Vec<Arc<ClickPoint>>,
    #[serde(default)]
    pub settings: DemoSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A broken document invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    TooManyClickPoints(usize),
    OrderNotContiguous,
    OrderDisagreesWithTimestamp,
    DuplicateTimestamp { first: String, second: String },
    TimestampOutOfRange { id: String, timestamp: f64 },
    PositionOutOfRange { id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooManyClickPoints(n) => {
                write!(f, "{} click points exceeds the limit of {}", n, MAX_CLICK_POINTS)
            }
            Violation::OrderNotContiguous => write!(f, "click point order is not 1..N"),
            Violation::OrderDisagreesWithTimestamp => {
                write!(f, "click point order does not follow timestamps")
            }
            Violation::DuplicateTimestamp { first, second } => {
                write!(f, "click points {} and {} share a timestamp", first, second)
            }
            Violation::TimestampOutOfRange { id, timestamp } => {
                write!(f, "click point {} at {:.2}s lies outside the video", id, timestamp)
            }
            Violation::PositionOutOfRange { id } => {
                write!(f, "click point {} is positioned outside the frame", id)
            }
        }
    }
}

impl std::error::Error for Violation {}

impl DemoProject {
    /// Create an empty project for a freshly recorded video.
    pub fn new_for_video(id: String, title: String, video: VideoInfo) -> Self {
        let now = Utc::now();
        Self {
            id,
            sequence: 0,
            title,
            description: None,
            video,
            click_points: Vec::new(),
            settings: DemoSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn point_count(&self) -> usize {
        self.click_points.len()
    }

    pub fn find(&self, id: &str) -> Option<&ClickPoint> {
        self.click_points.iter().find(|p| p.id == id).map(|p| p.as_ref())
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.click_points.iter().position(|p| p.id == id)
    }

    /// Mutable access to one point, copying it first if a snapshot shares it.
    pub fn point_mut(&mut self, id: &str) -> Option<&mut ClickPoint> {
        self.click_points
            .iter_mut()
            .find(|p| p.id == id)
            .map(Arc::make_mut)
    }

    /// Whether some point other than `except` sits within the timestamp
    /// epsilon of `timestamp`.
    pub fn timestamp_taken(&self, timestamp: f64, except: Option<&str>) -> Option<&ClickPoint> {
        self.click_points
            .iter()
            .filter(|p| Some(p.id.as_str()) != except)
            .find(|p| p.collides_with(timestamp))
            .map(|p| p.as_ref())
    }

    /// Sort by timestamp and renumber `order` to 1..N.
    pub fn resequence(&mut self) {
        self.click_points.sort_by(|a, b| {
            a.timestamp
                .total_cmp(&b.timestamp)
                .then(a.order.cmp(&b.order))
        });
        self.renumber();
    }

    /// Renumber `order` to 1..N following the current list order.
    pub fn renumber(&mut self) {
        for (index, point) in self.click_points.iter_mut().enumerate() {
            let order = index as u32 + 1;
            if point.order != order {
                Arc::make_mut(point).order = order;
            }
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check every document invariant.
    pub fn validate(&self) -> Result<(), Violation> {
        let count = self.click_points.len();
        if count > MAX_CLICK_POINTS {
            return Err(Violation::TooManyClickPoints(count));
        }

        let mut orders: Vec<u32> = self.click_points.iter().map(|p| p.order).collect();
        orders.sort_unstable();
        if orders.iter().enumerate().any(|(i, &o)| o != i as u32 + 1) {
            return Err(Violation::OrderNotContiguous);
        }

        for point in &self.click_points {
            if !(0.0..=self.video.duration).contains(&point.timestamp) {
                return Err(Violation::TimestampOutOfRange {
                    id: point.id.clone(),
                    timestamp: point.timestamp,
                });
            }
            let in_frame = |v: f64| (0.0..=100.0).contains(&v);
            if !in_frame(point.position.x) || !in_frame(point.position.y) {
                return Err(Violation::PositionOutOfRange {
                    id: point.id.clone(),
                });
            }
        }

        let mut by_order: Vec<&ClickPoint> = self.click_points.iter().map(|p| p.as_ref()).collect();
        by_order.sort_by_key(|p| p.order);
        for pair in by_order.windows(2) {
            let gap = pair[1].timestamp - pair[0].timestamp;
            if gap.abs() < TIMESTAMP_EPSILON {
                return Err(Violation::DuplicateTimestamp {
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
            if gap < 0.0 {
                return Err(Violation::OrderDisagreesWithTimestamp);
            }
        }

        Ok(())
    }
}
