// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Thumbnail loading.
//!
//! The host shell draws the video's thumbnail behind the click points. A
//! thumbnail that fails to load is not an error for the demo itself; the
//! caller logs and carries on without a backdrop.

use anyhow::{Context, Result};
use std::path::Path;

/// Decoded RGBA image ready to upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).with_context(|| format!("opening {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Load a thumbnail, swallowing failures.
pub fn load_thumbnail(path: &Path) -> Option<LoadedImage> {
    match load_image(path) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("Thumbnail unavailable: {:#}", e);
            None
        }
    }
}
