// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Debounced autosave.
//!
//! Each change re-arms a single timer; only when edits stop for the whole
//! delay does a save run. A failed save leaves the editor dirty and keeps
//! the document as is.

use super::store::{ProjectStore, StoreError};
use crate::editor::Editor;
use std::time::{Duration, Instant};

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Autosave {
    delay: Duration,
    deadline: Option<Instant>,
    seen_revision: u64,
    last_error: Option<String>,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl Autosave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            seen_revision: 0,
            last_error: None,
        }
    }

    /// Start watching a freshly loaded editor.
    pub fn reset(&mut self, editor: &Editor) {
        self.deadline = None;
        self.seen_revision = editor.revision();
        self.last_error = None;
    }

    /// Re-arm the timer. Any pending deadline is replaced, never stacked.
    pub fn notify_change(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Message from the most recent failed save, cleared by a success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Call once per frame. Arms the timer when the editor's revision moved
    /// and saves once the deadline passes.
    pub fn poll(
        &mut self,
        now: Instant,
        editor: &mut Editor,
        store: &dyn ProjectStore,
    ) -> Option<Result<(), StoreError>> {
        if editor.revision() != self.seen_revision {
            self.seen_revision = editor.revision();
            self.notify_change(now);
        }
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.save_now(editor, store)),
            _ => None,
        }
    }

    /// Save immediately, cancelling any pending timer.
    pub fn save_now(&mut self, editor: &mut Editor, store: &dyn ProjectStore) -> Result<(), StoreError> {
        self.deadline = None;
        let revision = editor.revision();
        self.seen_revision = revision;
        let id = editor.project().id.clone();
        match store.save_project(&id, editor.project()) {
            Ok(()) => {
                editor.mark_saved(revision);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to save project {}: {}", id, err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
