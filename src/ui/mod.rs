// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the host shell.

pub mod canvas;
pub mod properties;
pub mod timeline;
pub mod toolbar;

/// Parse `#rrggbb` or `#rrggbbaa`. Falls back to `fallback` on bad input.
pub fn parse_hex_color(hex: &str, fallback: egui::Color32) -> egui::Color32 {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => egui::Color32::from_rgb(r, g, b),
            _ => fallback,
        },
        8 => match (channel(0), channel(2), channel(4), channel(6)) {
            (Some(r), Some(g), Some(b), Some(a)) => egui::Color32::from_rgba_unmultiplied(r, g, b, a),
            _ => fallback,
        },
        _ => fallback,
    }
}

pub fn to_hex_color(color: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Largest rect with the video's aspect ratio, centered in `available`.
pub fn fit_rect(available: egui::Rect, video_width: u32, video_height: u32) -> egui::Rect {
    let video_aspect = video_width.max(1) as f32 / video_height.max(1) as f32;
    let available_aspect = available.width() / available.height().max(1.0);

    let size = if video_aspect > available_aspect {
        // Video is wider - fit to width
        egui::vec2(available.width(), available.width() / video_aspect)
    } else {
        // Video is taller - fit to height
        egui::vec2(available.height() * video_aspect, available.height())
    };
    egui::Rect::from_center_size(available.center(), size)
}
