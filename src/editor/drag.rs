// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer capture for dragging hotspots and their labels.
//!
//! The host reports pointer positions in container-relative pixels,
//! whatever the input device. On begin we remember how far the pointer sat
//! from the dragged item's rendered center so later moves keep that same
//! grip instead of snapping the center under the cursor.

use crate::models::Point;
use crate::util::geometry::{denormalize_coordinates, normalize_coordinates, Size};

/// Anchor between the pointer and the dragged item's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerCapture {
    anchor: (f64, f64),
    container: Size,
}

impl PointerCapture {
    /// Capture the pointer against an item currently centered at `center`.
    pub fn begin(pointer: (f64, f64), center: Point, container: Size) -> Self {
        let (cx, cy) = denormalize_coordinates(&center, container);
        Self {
            anchor: (pointer.0 - cx, pointer.1 - cy),
            container,
        }
    }

    /// Percent-space center for the item given a new pointer position,
    /// clamped to the frame.
    pub fn center_for(&self, pointer: (f64, f64)) -> Point {
        normalize_coordinates(
            pointer.0 - self.anchor.0,
            pointer.1 - self.anchor.1,
            self.container,
        )
        .clamped()
    }

    pub fn container(&self) -> Size {
        self.container
    }
}

/// What a drag is moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Point(String),
    Label(String),
}

impl DragTarget {
    pub fn id(&self) -> &str {
        match self {
            DragTarget::Point(id) | DragTarget::Label(id) => id,
        }
    }
}

/// An in-progress drag. Presentation state only until it is committed.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub target: DragTarget,
    pub capture: PointerCapture,
    /// Item center when the drag began.
    pub origin: Point,
    /// Item center as of the latest pointer move.
    pub preview: Point,
}

impl DragSession {
    pub fn new(target: DragTarget, pointer: (f64, f64), center: Point, container: Size) -> Self {
        Self {
            target,
            capture: PointerCapture::begin(pointer, center, container),
            origin: center,
            preview: center,
        }
    }

    pub fn move_to(&mut self, pointer: (f64, f64)) -> Point {
        self.preview = self.capture.center_for(pointer);
        self.preview
    }

    pub fn moved(&self) -> bool {
        self.preview != self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_preserved() {
        let container = Size::new(200.0, 100.0);
        // Center at (100, 50) px; grab it 4px right and 2px down.
        let mut session = DragSession::new(
            DragTarget::Point("a".to_string()),
            (104.0, 52.0),
            Point::new(50.0, 50.0),
            container,
        );
        let center = session.move_to((124.0, 52.0));
        assert!((center.x - 60.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
        assert!(session.moved());
    }

    #[test]
    fn test_moves_are_clamped() {
        let container = Size::new(200.0, 100.0);
        let mut session = DragSession::new(
            DragTarget::Label("a".to_string()),
            (100.0, 50.0),
            Point::new(50.0, 50.0),
            container,
        );
        assert_eq!(session.move_to((-500.0, 900.0)), Point::new(0.0, 100.0));
        assert_eq!(session.target.id(), "a");
    }
}
