// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! External collaborators: project persistence, media lookup and usage
//! logging.
//!
//! The core only sees these traits. The file-backed implementations here
//! are what the bundled host shell uses.

use crate::models::DemoProject;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    /// The stored document parsed but breaks a document invariant.
    Invalid(String),
    Backend(anyhow::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "project {} not found", id),
            StoreError::Invalid(reason) => write!(f, "project is invalid: {}", reason),
            StoreError::Backend(err) => write!(f, "storage error: {:#}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Backend(err)
    }
}

pub trait ProjectStore {
    fn load_project(&self, id: &str) -> Result<DemoProject, StoreError>;
    fn save_project(&self, id: &str, project: &DemoProject) -> Result<(), StoreError>;
}

pub trait MediaResolver {
    /// Playable URL for a video, or `None` if it is unknown.
    fn resolve_media_url(&self, video_id: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageEvent {
    Start,
    Complete,
}

impl UsageEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageEvent::Start => "start",
            UsageEvent::Complete => "complete",
        }
    }
}

/// Fire-and-forget usage analytics. Callers drop any error.
pub trait UsageLogger {
    fn log_usage_event(&self, project_id: &str, event: UsageEvent) -> anyhow::Result<()>;
}

/// Stores each project as `<id>.json` under a directory.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    root: PathBuf,
}

impl FileProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

impl ProjectStore for FileProjectStore {
    fn load_project(&self, id: &str) -> Result<DemoProject, StoreError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let project = super::serialization::import_json(&path)?;
        project
            .validate()
            .map_err(|v| StoreError::Invalid(v.to_string()))?;
        log::info!(
            "Loaded project {} with {} click points",
            id,
            project.point_count()
        );
        Ok(project)
    }

    fn save_project(&self, id: &str, project: &DemoProject) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        std::fs::create_dir_all(&self.root).map_err(anyhow::Error::from)?;
        // Write then rename so a failed write never truncates the last save.
        let tmp = path.with_extension("json.tmp");
        super::serialization::export_json(project, &tmp)?;
        std::fs::rename(&tmp, &path).map_err(anyhow::Error::from)?;
        log::info!("Saved project {} to {}", id, path.display());
        Ok(())
    }
}

/// Resolves a video id to a file under a media directory.
#[derive(Debug, Clone)]
pub struct FileMediaResolver {
    root: PathBuf,
}

impl FileMediaResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MediaResolver for FileMediaResolver {
    fn resolve_media_url(&self, video_id: &str) -> Option<String> {
        let entries = std::fs::read_dir(&self.root).ok()?;
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .find(|path| path.file_stem().and_then(|s| s.to_str()) == Some(video_id))
            .map(|path| format!("file://{}", path.display()))
    }
}

/// Writes usage events through the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogUsageLogger;

impl UsageLogger for LogUsageLogger {
    fn log_usage_event(&self, project_id: &str, event: UsageEvent) -> anyhow::Result<()> {
        log::info!("usage: project={} event={}", project_id, event.as_str());
        Ok(())
    }
}
