// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Authoring controller.
//!
//! `Editor` owns the project while it is being authored. Every mutation is
//! validated first, then snapshotted into the history, then applied, so a
//! rejected edit never touches the document and an accepted one is always
//! one undo away. Persistence is someone else's job: the editor only raises
//! the dirty flag and bumps a revision counter.

use super::drag::{DragSession, DragTarget};
use super::error::EditError;
use super::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::models::{
    ClickArea, ClickPoint, DemoProject, DescriptionStyle, Point, PulseSpeed, MAX_CLICK_POINTS,
};
use crate::util::geometry::Size;
use std::sync::Arc;

pub struct Editor {
    project: DemoProject,
    history: History<DemoProject>,
    dirty: bool,
    revision: u64,
    selection: Vec<String>,
    point_drag: Option<DragSession>,
    label_drag: Option<DragSession>,
}

impl Editor {
    pub fn new(project: DemoProject) -> Self {
        Self::with_history_limit(project, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(project: DemoProject, limit: usize) -> Self {
        Self {
            project,
            history: History::new(limit),
            dirty: false,
            revision: 0,
            selection: Vec::new(),
            point_drag: None,
            label_drag: None,
        }
    }

    pub fn project(&self) -> &DemoProject {
        &self.project
    }

    pub fn into_project(self) -> DemoProject {
        self.project
    }

    /// Whether there are edits not yet acknowledged by a save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Increments on every mutation, undo and redo included.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record that `revision` was persisted. Dirty stays set if edits
    /// landed after that revision was captured.
    pub fn mark_saved(&mut self, revision: u64) {
        if revision == self.revision {
            self.dirty = false;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Snapshot, apply, and flag the document as changed.
    fn commit(&mut self, apply: impl FnOnce(&mut DemoProject)) {
        self.history.push(self.project.clone());
        apply(&mut self.project);
        self.project.touch();
        self.mark_changed();
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    fn require(&self, id: &str) -> Result<&ClickPoint, EditError> {
        self.project
            .find(id)
            .ok_or_else(|| EditError::ClickPointNotFound(id.to_string()))
    }

    fn check_timestamp(&self, timestamp: f64, except: Option<&str>) -> Result<(), EditError> {
        let duration = self.project.video.duration;
        if !timestamp.is_finite() || timestamp < 0.0 || timestamp > duration {
            return Err(EditError::TimestampOutOfRange {
                timestamp,
                duration,
            });
        }
        if let Some(existing) = self.project.timestamp_taken(timestamp, except) {
            return Err(EditError::DuplicateTimestamp {
                requested: timestamp,
                existing: existing.timestamp,
            });
        }
        Ok(())
    }

    /// Add a click point at `timestamp`, returning its id.
    pub fn add_click_point(&mut self, timestamp: f64, position: Point) -> Result<String, EditError> {
        if self.project.point_count() >= MAX_CLICK_POINTS {
            log::warn!("Rejected click point at {:.2}s: limit reached", timestamp);
            return Err(EditError::MaxClickPointsReached);
        }
        if !position.is_finite() {
            return Err(EditError::InvalidPosition);
        }
        self.check_timestamp(timestamp, None)?;

        let order = self.project.point_count() as u32 + 1;
        let mut point = ClickPoint::new(timestamp, position, order);
        point.pulse_speed = self.project.settings.default_pulse_speed;
        let id = point.id.clone();

        self.commit(|project| {
            project.click_points.push(Arc::new(point));
            project.resequence();
        });
        log::info!(
            "Added click point at {:.2}s, total: {}",
            timestamp,
            self.project.point_count()
        );
        Ok(id)
    }

    /// Move a click point to a new timestamp, re-sorting the sequence.
    pub fn set_timestamp(&mut self, id: &str, timestamp: f64) -> Result<(), EditError> {
        if self.require(id)?.timestamp == timestamp {
            return Ok(());
        }
        self.check_timestamp(timestamp, Some(id))?;
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.timestamp = timestamp;
            }
            project.resequence();
        });
        Ok(())
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), EditError> {
        let current = self.require(id)?.position;
        if !position.is_finite() {
            return Err(EditError::InvalidPosition);
        }
        let position = position.clamped();
        if current == position {
            return Ok(());
        }
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.position = position;
            }
        });
        Ok(())
    }

    pub fn set_description(&mut self, id: &str, description: Option<String>) -> Result<(), EditError> {
        let description = description.filter(|text| !text.trim().is_empty());
        if self.require(id)?.description == description {
            return Ok(());
        }
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.description = description;
            }
        });
        Ok(())
    }

    pub fn set_area(&mut self, id: &str, area: ClickArea) -> Result<(), EditError> {
        if self.require(id)?.area == area {
            return Ok(());
        }
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.area = area;
            }
        });
        Ok(())
    }

    pub fn set_pulse_speed(&mut self, id: &str, speed: PulseSpeed) -> Result<(), EditError> {
        if self.require(id)?.pulse_speed == speed {
            return Ok(());
        }
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.pulse_speed = speed;
            }
        });
        Ok(())
    }

    pub fn set_description_style(&mut self, id: &str, style: DescriptionStyle) -> Result<(), EditError> {
        if self.require(id)?.description_style == style {
            return Ok(());
        }
        self.commit(|project| {
            if let Some(point) = project.point_mut(id) {
                point.description_style = style;
            }
        });
        Ok(())
    }

    /// Apply one style to every click point as a single undoable edit.
    pub fn bulk_update_description_style(&mut self, style: DescriptionStyle) -> usize {
        let count = self.project.point_count();
        if count == 0 {
            return 0;
        }
        self.commit(|project| {
            for point in project.click_points.iter_mut() {
                Arc::make_mut(point).description_style = style.clone();
            }
        });
        log::info!("Applied description style to {} click points", count);
        count
    }

    pub fn delete_click_point(&mut self, id: &str) -> Result<(), EditError> {
        self.delete_click_points(&[id.to_string()]).map(|_| ())
    }

    /// Delete every listed click point that exists, as one edit.
    pub fn delete_click_points(&mut self, ids: &[String]) -> Result<usize, EditError> {
        let doomed = self
            .project
            .click_points
            .iter()
            .filter(|p| ids.contains(&p.id))
            .count();
        if doomed == 0 {
            let missing = ids.first().cloned().unwrap_or_default();
            return Err(EditError::ClickPointNotFound(missing));
        }
        self.commit(|project| {
            project.click_points.retain(|p| !ids.contains(&p.id));
            project.click_points.sort_by_key(|p| p.order);
            project.renumber();
        });
        self.selection.clear();
        self.cancel_drags();
        log::info!(
            "Deleted {} click points, total: {}",
            doomed,
            self.project.point_count()
        );
        Ok(doomed)
    }

    pub fn delete_selected(&mut self) -> Result<usize, EditError> {
        let ids = self.selection.clone();
        self.delete_click_points(&ids)
    }

    pub fn delete_all(&mut self) -> usize {
        let count = self.project.point_count();
        if count == 0 {
            return 0;
        }
        self.commit(|project| project.click_points.clear());
        self.selection.clear();
        self.cancel_drags();
        log::info!("Deleted all {} click points", count);
        count
    }

    /// Restore the document as it was before the latest edit.
    pub fn undo(&mut self) -> bool {
        let current = self.project.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.project = previous;
                self.after_history_jump();
                log::info!("Undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self) -> bool {
        let current = self.project.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.project = next;
                self.after_history_jump();
                log::info!("Redo");
                true
            }
            None => false,
        }
    }

    fn after_history_jump(&mut self) {
        self.selection.clear();
        self.cancel_drags();
        self.mark_changed();
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    /// Replace the selection with a single point.
    pub fn select(&mut self, id: &str) {
        if self.project.find(id).is_some() {
            self.selection = vec![id.to_string()];
        }
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if let Some(index) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(index);
        } else if self.project.find(id).is_some() {
            self.selection.push(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn cancel_drags(&mut self) {
        self.point_drag = None;
        self.label_drag = None;
    }

    /// Pointer-down on a click point. Supersedes any point drag in progress.
    pub fn begin_point_drag(
        &mut self,
        id: &str,
        pointer: (f64, f64),
        container: Size,
    ) -> Result<(), EditError> {
        let center = self.require(id)?.position;
        if !container.is_positive() {
            return Err(EditError::InvalidPosition);
        }
        self.point_drag = Some(DragSession::new(
            DragTarget::Point(id.to_string()),
            pointer,
            center,
            container,
        ));
        self.select(id);
        Ok(())
    }

    /// Pointer-move during a point drag. Returns the clamped preview center.
    pub fn drag_point(&mut self, pointer: (f64, f64)) -> Result<Point, EditError> {
        self.point_drag
            .as_mut()
            .map(|session| session.move_to(pointer))
            .ok_or(EditError::NoActiveDrag)
    }

    /// Pointer-up: commit the dragged position as one undoable edit.
    ///
    /// Returns whether anything changed.
    pub fn end_point_drag(&mut self) -> Result<bool, EditError> {
        let session = self.point_drag.take().ok_or(EditError::NoActiveDrag)?;
        if !session.preview.is_finite() {
            return Err(EditError::InvalidPosition);
        }
        if !session.moved() {
            return Ok(false);
        }
        let id = session.target.id().to_string();
        self.require(&id)?;
        self.commit(|project| {
            if let Some(point) = project.point_mut(&id) {
                point.position = session.preview;
            }
        });
        log::debug!(
            "Moved click point {} to ({:.1}, {:.1})",
            id,
            session.preview.x,
            session.preview.y
        );
        Ok(true)
    }

    /// Pointer-down on a description label. Independent of point drags.
    pub fn begin_label_drag(
        &mut self,
        id: &str,
        pointer: (f64, f64),
        container: Size,
    ) -> Result<(), EditError> {
        let center = self.require(id)?.label_position();
        if !container.is_positive() {
            return Err(EditError::InvalidPosition);
        }
        self.label_drag = Some(DragSession::new(
            DragTarget::Label(id.to_string()),
            pointer,
            center,
            container,
        ));
        Ok(())
    }

    /// Pointer-move during a label drag. Returns the label's absolute
    /// preview position.
    pub fn drag_label(&mut self, pointer: (f64, f64)) -> Result<Point, EditError> {
        self.label_drag
            .as_mut()
            .map(|session| session.move_to(pointer))
            .ok_or(EditError::NoActiveDrag)
    }

    /// Pointer-up: store the label placement relative to its point.
    pub fn end_label_drag(&mut self) -> Result<bool, EditError> {
        let session = self.label_drag.take().ok_or(EditError::NoActiveDrag)?;
        if !session.preview.is_finite() {
            return Err(EditError::InvalidPosition);
        }
        if !session.moved() {
            return Ok(false);
        }
        let id = session.target.id().to_string();
        let anchor = self.require(&id)?.position;
        let offset = session.preview.delta_from(anchor);
        self.commit(|project| {
            if let Some(point) = project.point_mut(&id) {
                point.description_offset = offset;
            }
        });
        Ok(true)
    }

    pub fn is_dragging(&self) -> bool {
        self.point_drag.is_some() || self.label_drag.is_some()
    }

    /// Where to draw a point: its drag preview if it is being dragged,
    /// otherwise its stored position.
    pub fn display_position(&self, point: &ClickPoint) -> Point {
        match &self.point_drag {
            Some(session) if session.target.id() == point.id => session.preview,
            _ => point.position,
        }
    }

    /// Where to draw a point's label, following an in-progress point drag.
    pub fn display_label_position(&self, point: &ClickPoint) -> Point {
        match &self.label_drag {
            Some(session) if session.target.id() == point.id => session.preview,
            _ => self.display_position(point).offset_by(point.description_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoInfo;

    fn editor() -> Editor {
        let video = VideoInfo {
            id: "vid".to_string(),
            duration: 60.0,
            width: 1920,
            height: 1080,
            thumbnail: None,
        };
        Editor::new(DemoProject::new_for_video(
            "p1".to_string(),
            "Demo".to_string(),
            video,
        ))
    }

    fn orders(editor: &Editor) -> Vec<u32> {
        let mut orders: Vec<u32> = editor.project().click_points.iter().map(|p| p.order).collect();
        orders.sort_unstable();
        orders
    }

    fn center() -> Point {
        Point::new(50.0, 50.0)
    }

    #[test]
    fn test_add_assigns_order_and_sorts() {
        let mut editor = editor();
        editor.add_click_point(5.0, center()).unwrap();
        editor.add_click_point(2.0, center()).unwrap();
        editor.add_click_point(9.0, center()).unwrap();

        let project = editor.project();
        let timestamps: Vec<f64> = project.click_points.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![2.0, 5.0, 9.0]);
        assert_eq!(orders(&editor), vec![1, 2, 3]);
        assert_eq!(project.click_points[0].area, ClickArea::Circle { radius: 30.0 });
        assert!(editor.is_dirty());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_max_points_boundary() {
        let mut editor = editor();
        for i in 0..49 {
            editor.add_click_point(i as f64, center()).unwrap();
        }
        assert_eq!(editor.project().point_count(), 49);
        editor.add_click_point(49.0, center()).unwrap();
        assert_eq!(editor.project().point_count(), 50);

        let before = editor.project().clone();
        assert_eq!(
            editor.add_click_point(55.0, center()),
            Err(EditError::MaxClickPointsReached)
        );
        assert_eq!(editor.project(), &before);
    }

    #[test]
    fn test_duplicate_timestamp_boundary() {
        let mut editor = editor();
        editor.add_click_point(5.0, center()).unwrap();
        let revision = editor.revision();

        assert!(matches!(
            editor.add_click_point(5.03, center()),
            Err(EditError::DuplicateTimestamp { .. })
        ));
        assert_eq!(editor.revision(), revision);
        assert!(editor.add_click_point(5.10, center()).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_input() {
        let mut editor = editor();
        assert!(matches!(
            editor.add_click_point(61.0, center()),
            Err(EditError::TimestampOutOfRange { .. })
        ));
        assert_eq!(
            editor.add_click_point(1.0, Point::new(f64::NAN, 10.0)),
            Err(EditError::InvalidPosition)
        );
        assert!(!editor.can_undo());

        let id = editor.add_click_point(1.0, Point::new(120.0, -3.0)).unwrap();
        assert_eq!(editor.project().find(&id).unwrap().position, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_order_contiguity_through_adds_and_deletes() {
        let mut editor = editor();
        let mut ids = Vec::new();
        for t in [3.0, 1.0, 7.0, 5.0, 9.0] {
            ids.push(editor.add_click_point(t, center()).unwrap());
            let n = editor.project().point_count() as u32;
            assert_eq!(orders(&editor), (1..=n).collect::<Vec<_>>());
        }
        editor.delete_click_point(&ids[2]).unwrap();
        assert_eq!(orders(&editor), vec![1, 2, 3, 4]);
        editor.delete_click_points(&[ids[0].clone(), ids[4].clone()]).unwrap();
        assert_eq!(orders(&editor), vec![1, 2]);
        assert!(editor.project().validate().is_ok());
        editor.delete_all();
        assert!(orders(&editor).is_empty());
    }

    #[test]
    fn test_delete_missing_point_is_rejected() {
        let mut editor = editor();
        editor.add_click_point(1.0, center()).unwrap();
        let revision = editor.revision();
        assert!(matches!(
            editor.delete_click_point("nope"),
            Err(EditError::ClickPointNotFound(_))
        ));
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut editor = editor();
        let a = editor.add_click_point(1.0, center()).unwrap();
        let b = editor.add_click_point(2.0, center()).unwrap();
        editor.select(&a);
        editor.toggle_selection(&b);
        assert_eq!(editor.selection().len(), 2);
        assert_eq!(editor.delete_selected(), Ok(2));
        assert!(editor.selection().is_empty());
        assert_eq!(editor.project().point_count(), 0);
    }

    #[test]
    fn test_undo_redo_idempotence() {
        let mut editor = editor();
        editor.add_click_point(1.0, center()).unwrap();
        let before = editor.project().clone();

        let id = editor.add_click_point(4.0, center()).unwrap();
        editor.set_description(&id, Some("Open settings".to_string())).unwrap();
        let after = editor.project().clone();

        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.project(), &before);
        assert!(editor.redo());
        assert!(editor.redo());
        assert_eq!(editor.project(), &after);
        assert!(!editor.redo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut editor = editor();
        let revision = editor.revision();
        assert!(!editor.undo());
        assert_eq!(editor.revision(), revision);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_undo_marks_dirty() {
        let mut editor = editor();
        editor.add_click_point(1.0, center()).unwrap();
        editor.mark_saved(editor.revision());
        assert!(!editor.is_dirty());
        editor.undo();
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_bulk_style_is_one_undo_step() {
        let mut editor = editor();
        let colors = ["#ff0000", "#00ff00", "#0000ff"];
        for (i, color) in colors.iter().enumerate() {
            let id = editor.add_click_point(i as f64 + 1.0, center()).unwrap();
            let style = DescriptionStyle {
                background_color: color.to_string(),
                ..DescriptionStyle::default()
            };
            editor.set_description_style(&id, style).unwrap();
        }

        let uniform = DescriptionStyle {
            background_color: "#000000".to_string(),
            text_color: "#ffff00".to_string(),
            font_size: 18.0,
        };
        assert_eq!(editor.bulk_update_description_style(uniform.clone()), 3);
        assert!(editor
            .project()
            .click_points
            .iter()
            .all(|p| p.description_style == uniform));

        assert!(editor.undo());
        let restored: Vec<String> = editor
            .project()
            .click_points
            .iter()
            .map(|p| p.description_style.background_color.clone())
            .collect();
        assert_eq!(restored, vec!["#ff0000", "#00ff00", "#0000ff"]);
    }

    #[test]
    fn test_drag_commits_only_on_release() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, Point::new(50.0, 50.0)).unwrap();
        let container = Size::new(1000.0, 500.0);
        let undo_depth = editor.history.undo_len();
        let revision = editor.revision();

        // Grab 10px right of the rendered center at (500, 250).
        editor.begin_point_drag(&id, (510.0, 250.0), container).unwrap();
        let preview = editor.drag_point((610.0, 300.0)).unwrap();
        assert!((preview.x - 60.0).abs() < 1e-9);
        assert!((preview.y - 60.0).abs() < 1e-9);
        editor.drag_point((2000.0, 300.0)).unwrap();

        let point = editor.project().find(&id).unwrap().clone();
        assert_eq!(point.position, Point::new(50.0, 50.0));
        assert_eq!(editor.display_position(&point).x, 100.0);
        assert_eq!(editor.revision(), revision);

        assert_eq!(editor.end_point_drag(), Ok(true));
        assert_eq!(editor.history.undo_len(), undo_depth + 1);
        assert_eq!(editor.project().find(&id).unwrap().position.x, 100.0);
        assert_eq!(editor.drag_point((0.0, 0.0)), Err(EditError::NoActiveDrag));

        editor.undo();
        assert_eq!(editor.project().find(&id).unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_click_without_move_does_not_commit() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, center()).unwrap();
        let revision = editor.revision();
        editor.begin_point_drag(&id, (500.0, 250.0), Size::new(1000.0, 500.0)).unwrap();
        assert_eq!(editor.end_point_drag(), Ok(false));
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_label_drag_stores_offset() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, Point::new(20.0, 20.0)).unwrap();
        let container = Size::new(100.0, 100.0);
        let label = editor.project().find(&id).unwrap().label_position();

        editor
            .begin_label_drag(&id, (label.x, label.y), container)
            .unwrap();
        editor.drag_label((40.0, 10.0)).unwrap();
        assert!(editor.end_label_drag().unwrap());

        let point = editor.project().find(&id).unwrap().clone();
        assert!((point.description_offset.x - 20.0).abs() < 1e-9);
        assert!((point.description_offset.y + 10.0).abs() < 1e-9);

        // Moving the point carries the label along.
        editor.set_position(&id, Point::new(30.0, 30.0)).unwrap();
        let label = editor.project().find(&id).unwrap().label_position();
        assert!((label.x - 50.0).abs() < 1e-9);
        assert!((label.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_timestamp_resorts() {
        let mut editor = editor();
        let first = editor.add_click_point(1.0, center()).unwrap();
        editor.add_click_point(2.0, center()).unwrap();
        assert!(matches!(
            editor.set_timestamp(&first, 2.01),
            Err(EditError::DuplicateTimestamp { .. })
        ));
        editor.set_timestamp(&first, 3.0).unwrap();
        let point = editor.project().find(&first).unwrap();
        assert_eq!(point.order, 2);
        // Re-setting a point to its own timestamp is not a collision.
        let revision = editor.revision();
        let undo_depth = editor.history.undo_len();
        assert!(editor.set_timestamp(&first, 3.0).is_ok());
        assert_eq!(editor.revision(), revision);
        assert_eq!(editor.history.undo_len(), undo_depth);
    }

    #[test]
    fn test_set_position_unchanged_is_noop() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, Point::new(40.0, 60.0)).unwrap();
        let revision = editor.revision();
        editor.set_position(&id, Point::new(40.0, 60.0)).unwrap();
        assert_eq!(editor.revision(), revision);

        editor.set_position(&id, Point::new(120.0, 60.0)).unwrap();
        assert_eq!(editor.project().find(&id).unwrap().position, Point::new(100.0, 60.0));
        // Out of range again clamps to the same stored value.
        let revision = editor.revision();
        editor.set_position(&id, Point::new(150.0, 60.0)).unwrap();
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_drag_rejects_empty_container() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, center()).unwrap();
        let revision = editor.revision();

        assert_eq!(
            editor.begin_point_drag(&id, (0.0, 0.0), Size::new(0.0, 0.0)),
            Err(EditError::InvalidPosition)
        );
        assert_eq!(
            editor.begin_label_drag(&id, (0.0, 0.0), Size::new(200.0, 0.0)),
            Err(EditError::InvalidPosition)
        );
        assert!(!editor.is_dragging());
        assert_eq!(editor.revision(), revision);
        assert!(editor.project().validate().is_ok());
    }

    #[test]
    fn test_drag_to_non_finite_pointer_is_not_committed() {
        let mut editor = editor();
        let id = editor.add_click_point(1.0, center()).unwrap();
        let revision = editor.revision();

        editor.begin_point_drag(&id, (500.0, 250.0), Size::new(1000.0, 500.0)).unwrap();
        editor.drag_point((f64::NAN, 250.0)).unwrap();
        assert_eq!(editor.end_point_drag(), Err(EditError::InvalidPosition));
        assert!(!editor.is_dragging());
        assert_eq!(editor.revision(), revision);
        assert_eq!(editor.project().find(&id).unwrap().position, center());

        let json = crate::io::serialization::to_json(editor.project()).unwrap();
        assert!(crate::io::serialization::from_json(&json).is_ok());
    }

    #[test]
    fn test_mark_saved_ignores_stale_revision() {
        let mut editor = editor();
        editor.add_click_point(1.0, center()).unwrap();
        let saved = editor.revision();
        editor.add_click_point(2.0, center()).unwrap();
        editor.mark_saved(saved);
        assert!(editor.is_dirty());
        editor.mark_saved(editor.revision());
        assert!(!editor.is_dirty());
    }
}
