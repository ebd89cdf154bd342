// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Click point properties panel.
//!
//! Lists the project's click points and edits the selected one. Text and
//! numeric fields are buffered here and only emitted as an edit when the
//! user finishes with the field, so one edit maps to one undo step.

use super::{parse_hex_color, to_hex_color};
use clickthru::editor::Editor;
use clickthru::models::{ClickArea, ClickPoint, DescriptionStyle, PulseSpeed};
use clickthru::util::time::format_timestamp;

pub enum PropertiesAction {
    None,
    Select(String),
    Delete(String),
    DeleteSelected,
    SetDescription(String, Option<String>),
    SetTimestamp(String, f64),
    SetArea(String, ClickArea),
    SetPulseSpeed(String, PulseSpeed),
    SetStyle(String, DescriptionStyle),
    ApplyStyleToAll(DescriptionStyle),
}

/// Field values being edited for the selected point.
#[derive(Default)]
pub struct PropertiesBuffer {
    id: Option<String>,
    description: String,
    timestamp: f64,
    area: Option<ClickArea>,
    style: DescriptionStyle,
}

impl PropertiesBuffer {
    fn sync(&mut self, point: &ClickPoint) {
        if self.id.as_deref() == Some(point.id.as_str()) {
            return;
        }
        self.id = Some(point.id.clone());
        self.description = point.description.clone().unwrap_or_default();
        self.timestamp = point.timestamp;
        self.area = Some(point.area);
        self.style = point.description_style.clone();
    }

    /// Drop buffered values so they reload from the document.
    pub fn invalidate(&mut self) {
        self.id = None;
    }
}

pub fn show(ui: &mut egui::Ui, editor: &Editor, buffer: &mut PropertiesBuffer) -> PropertiesAction {
    let mut action = PropertiesAction::None;
    let project = editor.project();

    ui.heading("Click points");
    ui.label(format!("{} of {}", project.point_count(), clickthru::models::MAX_CLICK_POINTS));
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("click_point_list")
        .max_height(220.0)
        .show(ui, |ui| {
            for point in &project.click_points {
                let text = format!(
                    "#{}  {}  {}",
                    point.order,
                    format_timestamp(point.timestamp),
                    point.description.as_deref().unwrap_or("")
                );
                if ui.selectable_label(editor.is_selected(&point.id), text).clicked() {
                    action = PropertiesAction::Select(point.id.clone());
                }
            }
        });

    ui.separator();

    let selection = editor.selection();
    if selection.len() > 1 {
        ui.label(format!("{} click points selected", selection.len()));
        if ui.button("🗑 Delete selected").clicked() {
            action = PropertiesAction::DeleteSelected;
        }
        return action;
    }

    let Some(point) = selection.first().and_then(|id| project.find(id)) else {
        ui.label(egui::RichText::new("Select a click point to edit it").weak());
        return action;
    };
    buffer.sync(point);
    let id = point.id.clone();

    egui::Grid::new("click_point_fields")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Time");
            let response = ui.add(
                egui::DragValue::new(&mut buffer.timestamp)
                    .speed(0.01)
                    .clamp_range(0.0..=project.video.duration)
                    .suffix(" s"),
            );
            if (response.drag_stopped() || response.lost_focus()) && buffer.timestamp != point.timestamp {
                action = PropertiesAction::SetTimestamp(id.clone(), buffer.timestamp);
            }
            ui.end_row();

            ui.label("Description");
            let response = ui.text_edit_singleline(&mut buffer.description);
            if response.lost_focus() {
                let text = buffer.description.trim().to_string();
                let description = if text.is_empty() { None } else { Some(text) };
                if description != point.description {
                    action = PropertiesAction::SetDescription(id.clone(), description);
                }
            }
            ui.end_row();

            ui.label("Area");
            let mut area = buffer.area.unwrap_or(point.area);
            ui.horizontal(|ui| {
                if ui.radio(matches!(area, ClickArea::Circle { .. }), "Circle").clicked() {
                    area = ClickArea::default();
                    action = PropertiesAction::SetArea(id.clone(), area);
                }
                if ui.radio(matches!(area, ClickArea::Rectangle { .. }), "Rectangle").clicked() {
                    area = ClickArea::Rectangle {
                        width: 120.0,
                        height: 60.0,
                    };
                    action = PropertiesAction::SetArea(id.clone(), area);
                }
            });
            ui.end_row();

            ui.label("Size (px)");
            let committed = ui
                .horizontal(|ui| {
                    let mut done = false;
                    let mut field = |ui: &mut egui::Ui, value: &mut f64| {
                        let r = ui.add(egui::DragValue::new(value).speed(1.0).clamp_range(4.0..=2000.0));
                        done |= r.drag_stopped() || r.lost_focus();
                    };
                    match &mut area {
                        ClickArea::Circle { radius } => field(ui, radius),
                        ClickArea::Rectangle { width, height } => {
                            field(ui, width);
                            field(ui, height);
                        }
                    }
                    done
                })
                .inner;
            buffer.area = Some(area);
            if committed && area != point.area {
                action = PropertiesAction::SetArea(id.clone(), area);
            }
            ui.end_row();

            ui.label("Pulse");
            let mut speed = point.pulse_speed;
            egui::ComboBox::from_id_source("pulse_speed")
                .selected_text(speed.label())
                .show_ui(ui, |ui| {
                    for option in PulseSpeed::ALL {
                        ui.selectable_value(&mut speed, option, option.label());
                    }
                });
            if speed != point.pulse_speed {
                action = PropertiesAction::SetPulseSpeed(id.clone(), speed);
            }
            ui.end_row();
        });

    ui.separator();
    ui.label("Label style");
    ui.horizontal(|ui| {
        let mut background = parse_hex_color(&buffer.style.background_color, egui::Color32::BLACK);
        if ui.color_edit_button_srgba(&mut background).changed() {
            buffer.style.background_color = to_hex_color(background);
        }
        ui.label("Background");
        let mut text = parse_hex_color(&buffer.style.text_color, egui::Color32::WHITE);
        if ui.color_edit_button_srgba(&mut text).changed() {
            buffer.style.text_color = to_hex_color(text);
        }
        ui.label("Text");
    });
    ui.add(egui::Slider::new(&mut buffer.style.font_size, 8.0..=48.0).text("Font size"));
    ui.horizontal(|ui| {
        let edited = buffer.style != point.description_style;
        if ui.add_enabled(edited, egui::Button::new("Apply")).clicked() {
            action = PropertiesAction::SetStyle(id.clone(), buffer.style.clone());
        }
        if ui.button("Apply to all").clicked() {
            action = PropertiesAction::ApplyStyleToAll(buffer.style.clone());
        }
    });

    ui.separator();
    if ui.button("🗑 Delete click point").clicked() {
        action = PropertiesAction::Delete(id);
    }

    action
}
