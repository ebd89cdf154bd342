// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles exporting and importing project documents in YAML
//! and JSON formats. The JSON form is the wire shape external persistence
//! must round-trip.

use crate::models::DemoProject;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialize a project to its JSON wire shape.
pub fn to_json(data: &DemoProject) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Parse a project from its JSON wire shape.
pub fn from_json(json: &str) -> Result<DemoProject> {
    Ok(serde_json::from_str(json)?)
}

/// Export project data to YAML format.
pub fn export_yaml(data: &DemoProject, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export project data to JSON format.
pub fn export_json(data: &DemoProject, path: &Path) -> Result<()> {
    let json = to_json(data)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Import project data from YAML format.
pub fn import_yaml(path: &Path) -> Result<DemoProject> {
    let yaml = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import project data from JSON format.
pub fn import_json(path: &Path) -> Result<DemoProject> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    from_json(&json)
}

/// Import by file extension (`.json`, `.yaml`, `.yml`).
pub fn import_any(path: &Path) -> Result<DemoProject> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

/// Export by file extension (`.json`, `.yaml`, `.yml`).
pub fn export_any(data: &DemoProject, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClickArea, ClickPoint, Point, VideoInfo};
    use std::sync::Arc;

    fn sample() -> DemoProject {
        let video = VideoInfo {
            id: "vid-1".to_string(),
            duration: 12.5,
            width: 1280,
            height: 720,
            thumbnail: Some("thumb.png".to_string()),
        };
        let mut project = DemoProject::new_for_video("demo-1".to_string(), "Signup".to_string(), video);
        let mut rect = ClickPoint::new(3.0, Point::new(25.0, 75.0), 1);
        rect.area = ClickArea::Rectangle {
            width: 120.0,
            height: 40.0,
        };
        rect.description = Some("Press Sign up".to_string());
        project.click_points.push(Arc::new(rect));
        project
            .click_points
            .push(Arc::new(ClickPoint::new(7.0, Point::new(60.0, 10.0), 2)));
        project
    }

    #[test]
    fn test_json_wire_roundtrip_preserves_area_tag() {
        let project = sample();
        let json = to_json(&project).unwrap();
        assert!(json.contains("\"type\": \"rectangle\""));
        assert!(json.contains("\"type\": \"circle\""));
        assert_eq!(from_json(&json).unwrap(), project);
    }

    #[test]
    fn test_file_export_import() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample();

        let yaml_path = dir.path().join("demo.yaml");
        export_any(&project, &yaml_path).unwrap();
        assert_eq!(import_any(&yaml_path).unwrap(), project);

        let json_path = dir.path().join("demo.json");
        export_any(&project, &json_path).unwrap();
        assert_eq!(import_any(&json_path).unwrap(), project);

        assert!(export_any(&project, &dir.path().join("demo.txt")).is_err());
    }
}
