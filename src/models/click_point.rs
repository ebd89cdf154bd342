// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Click point data structures.
//!
//! A click point is a hotspot pinned to a video timestamp. Its position lives
//! in percent-space while its hit area is measured in the video's native
//! pixels, so the two are scaled differently when rendered.

use serde::{Deserialize, Serialize};

/// Maximum number of click points a single project may hold.
pub const MAX_CLICK_POINTS: usize = 50;

/// Two click points closer than this (in seconds) are considered the same
/// instant.
pub const TIMESTAMP_EPSILON: f64 = 0.05;

/// Radius of a freshly placed circular hotspot, in native video pixels.
pub const DEFAULT_RADIUS: f64 = 30.0;

/// A 2D point in percent-space (0.0 to 100.0 on each axis).
///
/// Also used for percent-space deltas such as a label offset, where negative
/// components are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both components into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset_by(self, delta: Point) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    pub fn delta_from(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Interactive region of a click point, centered on its position.
///
/// Dimensions are in the video's native pixel space, not percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClickArea {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Default for ClickArea {
    fn default() -> Self {
        ClickArea::Circle {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Pulse animation speed of the hotspot marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl PulseSpeed {
    pub const ALL: [PulseSpeed; 3] = [PulseSpeed::Slow, PulseSpeed::Normal, PulseSpeed::Fast];

    /// Length of one pulse cycle in seconds.
    pub fn animation_duration(self) -> f64 {
        match self {
            PulseSpeed::Slow => 2.0,
            PulseSpeed::Normal => 1.5,
            PulseSpeed::Fast => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PulseSpeed::Slow => "Slow",
            PulseSpeed::Normal => "Normal",
            PulseSpeed::Fast => "Fast",
        }
    }
}

/// Visual style of a click point's description label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionStyle {
    pub background_color: String,
    pub text_color: String,
    pub font_size: f32,
}

impl Default for DescriptionStyle {
    fn default() -> Self {
        Self {
            background_color: "#1f2937".to_string(),
            text_color: "#ffffff".to_string(),
            font_size: 14.0,
        }
    }
}

/// A hotspot that gates playback until the viewer clicks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickPoint {
    pub id: String,
    /// Seconds into the video.
    pub timestamp: f64,
    pub position: Point,
    pub area: ClickArea,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Label placement relative to `position`, in percent-space.
    #[serde(default)]
    pub description_offset: Point,
    #[serde(default)]
    pub description_style: DescriptionStyle,
    /// 1-based rank within the project.
    pub order: u32,
    #[serde(default)]
    pub pulse_speed: PulseSpeed,
}

impl ClickPoint {
    /// Create a click point with default area, style and label placement.
    pub fn new(timestamp: f64, position: Point, order: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            position: position.clamped(),
            area: ClickArea::default(),
            description: None,
            description_offset: Point::new(0.0, 8.0),
            description_style: DescriptionStyle::default(),
            order,
            pulse_speed: PulseSpeed::default(),
        }
    }

    /// Absolute percent-space location of the description label.
    pub fn label_position(&self) -> Point {
        self.position.offset_by(self.description_offset)
    }

    /// Whether `timestamp` falls within [`TIMESTAMP_EPSILON`] of this point.
    pub fn collides_with(&self, timestamp: f64) -> bool {
        (self.timestamp - timestamp).abs() < TIMESTAMP_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_clamps_position() {
        let point = ClickPoint::new(1.0, Point::new(-5.0, 140.0), 1);
        assert_eq!(point.position, Point::new(0.0, 100.0));
        assert_eq!(point.area, ClickArea::Circle { radius: 30.0 });
        assert_eq!(point.pulse_speed, PulseSpeed::Normal);
    }

    #[test]
    fn test_collision_window() {
        let point = ClickPoint::new(5.0, Point::new(50.0, 50.0), 1);
        assert!(point.collides_with(5.03));
        assert!(point.collides_with(4.96));
        assert!(!point.collides_with(5.10));
    }

    #[test]
    fn test_area_wire_tag() {
        let circle = serde_json::to_value(ClickArea::Circle { radius: 12.0 }).unwrap();
        assert_eq!(circle, serde_json::json!({"type": "circle", "radius": 12.0}));

        let rect: ClickArea =
            serde_json::from_str(r#"{"type":"rectangle","width":40.0,"height":20.0}"#).unwrap();
        assert_eq!(rect, ClickArea::Rectangle { width: 40.0, height: 20.0 });
    }

    #[test]
    fn test_pulse_speed_table() {
        assert_eq!(PulseSpeed::Slow.animation_duration(), 2.0);
        assert_eq!(PulseSpeed::Normal.animation_duration(), 1.5);
        assert_eq!(PulseSpeed::Fast.animation_duration(), 1.0);
        assert_eq!(serde_json::to_string(&PulseSpeed::Fast).unwrap(), "\"fast\"");
    }

    #[test]
    fn test_label_follows_position() {
        let mut point = ClickPoint::new(1.0, Point::new(10.0, 10.0), 1);
        point.description_offset = Point::new(5.0, -2.0);
        assert_eq!(point.label_position(), Point::new(15.0, 8.0));
        point.position = Point::new(20.0, 20.0);
        assert_eq!(point.label_position(), Point::new(25.0, 18.0));
    }
}
