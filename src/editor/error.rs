// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Validation rejections returned by authoring operations.
//!
//! A rejected operation leaves the document untouched.

use crate::models::MAX_CLICK_POINTS;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The project already holds the maximum number of click points.
    MaxClickPointsReached,
    /// Another click point sits within the timestamp epsilon.
    DuplicateTimestamp { requested: f64, existing: f64 },
    /// The timestamp is not inside `[0, duration]`.
    TimestampOutOfRange { timestamp: f64, duration: f64 },
    /// The position has a NaN or infinite component.
    InvalidPosition,
    ClickPointNotFound(String),
    /// A drag move or end arrived with no drag in progress.
    NoActiveDrag,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::MaxClickPointsReached => {
                write!(f, "max reached: a demo can hold at most {} click points", MAX_CLICK_POINTS)
            }
            EditError::DuplicateTimestamp {
                requested,
                existing,
            } => write!(
                f,
                "duplicate timestamp: {:.2}s is too close to the click point at {:.2}s",
                requested, existing
            ),
            EditError::TimestampOutOfRange {
                timestamp,
                duration,
            } => write!(
                f,
                "timestamp {:.2}s is outside the video (0.00s to {:.2}s)",
                timestamp, duration
            ),
            EditError::InvalidPosition => write!(f, "position is not a finite coordinate"),
            EditError::ClickPointNotFound(id) => write!(f, "click point {} not found", id),
            EditError::NoActiveDrag => write!(f, "no drag in progress"),
        }
    }
}

impl std::error::Error for EditError {}
