// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document model: the project and its click points.

pub mod click_point;
pub mod project;

pub use click_point::{
    ClickArea, ClickPoint, DescriptionStyle, Point, PulseSpeed, MAX_CLICK_POINTS, TIMESTAMP_EPSILON,
};
pub use project::{DemoProject, DemoSettings, VideoInfo, Violation};
