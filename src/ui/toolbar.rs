// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with mode and tool selection.

use crate::app::{Mode, Tool};

/// Display the toolbar with mode and tool selection buttons.
pub fn show(ui: &mut egui::Ui, mode: &mut Mode, current_tool: &mut Tool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");
        ui.selectable_value(mode, Mode::Authoring, "✏ Author");
        ui.selectable_value(mode, Mode::Playback, "▶ Preview");

        if *mode != Mode::Authoring {
            return;
        }

        ui.separator();
        ui.label("Tools:");

        if ui.selectable_label(*current_tool == Tool::Select, "⬆ Select").clicked() {
            *current_tool = Tool::Select;
        }
        if ui.selectable_label(*current_tool == Tool::AddPoint, "⊕ Click point").clicked() {
            *current_tool = Tool::AddPoint;
        }

        ui.separator();

        let tool_text = match current_tool {
            Tool::Select => "Click to select, drag a hotspot or its label to move it",
            Tool::AddPoint => "Click the frame to add a click point at the current time",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });
}
