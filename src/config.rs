// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Read from the YAML file named by `CLICKTHRU_CONFIG`, else
//! `clickthru.yaml` in the working directory. Every field is optional.

use crate::models::VideoInfo;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "CLICKTHRU_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "clickthru.yaml";

/// Video assumed for a new demo before real media metadata is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultVideo {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for DefaultVideo {
    fn default() -> Self {
        Self {
            duration: 30.0,
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history_limit: usize,
    pub autosave_delay_ms: u64,
    pub poll_hz: u32,
    pub projects_dir: PathBuf,
    pub media_dir: PathBuf,
    pub default_video: DefaultVideo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: crate::editor::history::DEFAULT_HISTORY_LIMIT,
            autosave_delay_ms: 3000,
            poll_hz: crate::playback::clock::DEFAULT_POLL_HZ,
            projects_dir: PathBuf::from("projects"),
            media_dir: PathBuf::from("media"),
            default_video: DefaultVideo::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from the environment-selected or default path; a missing file
    /// yields the defaults.
    pub fn discover() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Video metadata for a brand new demo.
    pub fn placeholder_video(&self, id: String) -> VideoInfo {
        VideoInfo {
            id,
            duration: self.default_video.duration,
            width: self.default_video.width,
            height: self.default_video.height,
            thumbnail: None,
        }
    }
}
