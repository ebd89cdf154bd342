// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! A slider spanning `[0, duration]` with a tick for every click point, plus
//! the playback transport buttons.

use clickthru::playback::{PlaybackState, TickMark};
use clickthru::util::time::format_timestamp;

/// Transport button pressed by the user.
pub enum TransportAction {
    None,
    Start,
    Advance,
    Restart,
}

/// Draw the scrubber. Returns the new time if the user moved it.
pub fn show_scrubber(ui: &mut egui::Ui, time: f64, duration: f64, ticks: &[TickMark]) -> Option<f64> {
    let mut value = time;
    let mut scrubbed = None;

    ui.horizontal(|ui| {
        ui.label(format_timestamp(time));
        ui.spacing_mut().slider_width = (ui.available_width() - 70.0).max(50.0);
        let response = ui.add(
            egui::Slider::new(&mut value, 0.0..=duration.max(0.0))
                .show_value(false)
                .trailing_fill(true),
        );
        ui.label(format_timestamp(duration));

        // Ticks sit under the rail, independent of the thumb.
        let rail = response.rect;
        let painter = ui.painter();
        for tick in ticks {
            let x = rail.left() + (tick.percent as f32 / 100.0) * rail.width();
            painter.line_segment(
                [egui::pos2(x, rail.bottom() - 3.0), egui::pos2(x, rail.bottom() + 3.0)],
                egui::Stroke::new(2.0, egui::Color32::from_rgb(250, 180, 40)),
            );
        }

        if response.changed() {
            scrubbed = Some(value);
        }
    });

    scrubbed
}

/// Play / advance / restart buttons and the step counter.
pub fn show_transport(ui: &mut egui::Ui, state: &PlaybackState, step_label: Option<&str>) -> TransportAction {
    let mut action = TransportAction::None;
    ui.horizontal(|ui| {
        let can_start = matches!(state, PlaybackState::Init);
        if ui.add_enabled(can_start, egui::Button::new("▶ Play")).clicked() {
            action = TransportAction::Start;
        }
        let waiting = matches!(state, PlaybackState::Waiting);
        if ui.add_enabled(waiting, egui::Button::new("⏭ Next step")).clicked() {
            action = TransportAction::Advance;
        }
        if ui.button("⟲ Restart").clicked() {
            action = TransportAction::Restart;
        }

        ui.separator();
        let status = match state {
            PlaybackState::Init => "Ready",
            PlaybackState::Playing => "Playing",
            PlaybackState::Waiting => "Click the highlighted area to continue",
            PlaybackState::Complete => "Complete",
            PlaybackState::Error(_) => "Media error",
        };
        ui.label(egui::RichText::new(status).italics());
        if let Some(label) = step_label {
            ui.separator();
            ui.label(label);
        }
    });
    action
}
