// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! pixel coordinates and percent-space coordinates, plus hit testing of
//! click areas. Nothing here clamps: callers clamp when the result is a
//! position.

use crate::models::click_point::{ClickArea, Point};

/// Rendered size of the video container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and greater than zero, so percent conversion is defined.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Convert a pixel offset into a percentage of `container`.
pub fn to_percent(px: f64, container: f64) -> f64 {
    px / container * 100.0
}

/// Convert a percentage of `container` into a pixel offset.
pub fn to_pixel(pct: f64, container: f64) -> f64 {
    pct / 100.0 * container
}

/// Ratio between the displayed width and the video's native width.
///
/// Area dimensions are stored in native pixels; multiply by this to draw or
/// hit-test them at the current display size.
pub fn get_scale(display_width: f64, original_width: f64) -> f64 {
    if original_width > 0.0 {
        display_width / original_width
    } else {
        1.0
    }
}

/// Convert container-relative pixel coordinates to percent-space.
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, container: Size) -> Point {
    Point {
        x: to_percent(pixel_x, container.width),
        y: to_percent(pixel_y, container.height),
    }
}

/// Convert percent-space coordinates to container-relative pixels.
pub fn denormalize_coordinates(point: &Point, container: Size) -> (f64, f64) {
    (
        to_pixel(point.x, container.width),
        to_pixel(point.y, container.height),
    )
}

/// Test whether `pointer` lands inside `area` centered at `center`.
///
/// Both points are container-relative pixels; `scale` comes from
/// [`get_scale`].
pub fn area_contains(area: &ClickArea, center: (f64, f64), pointer: (f64, f64), scale: f64) -> bool {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;
    match *area {
        ClickArea::Circle { radius } => {
            let r = radius * scale;
            dx * dx + dy * dy <= r * r
        }
        ClickArea::Rectangle { width, height } => {
            dx.abs() <= width * scale / 2.0 && dy.abs() <= height * scale / 2.0
        }
    }
}

/// Pixel extents (width, height) of `area` at the given scale.
pub fn area_extent(area: &ClickArea, scale: f64) -> (f64, f64) {
    match *area {
        ClickArea::Circle { radius } => (radius * 2.0 * scale, radius * 2.0 * scale),
        ClickArea::Rectangle { width, height } => (width * scale, height * scale),
    }
}
