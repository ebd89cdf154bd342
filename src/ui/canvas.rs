// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video canvas for authoring and playback.
//!
//! Both modes draw the video frame (its thumbnail here) letterboxed into the
//! available space and overlay click points on top. Pointer positions are
//! reported to the app in pixels relative to the video rect, which is the
//! container the core's percent-space is measured against.

use super::{fit_rect, parse_hex_color};
use crate::app::Tool;
use clickthru::editor::Editor;
use clickthru::models::{ClickArea, ClickPoint, Point};
use clickthru::playback::{MediaElement, PlaybackState, Player};
use clickthru::util::geometry::{area_contains, area_extent, get_scale, normalize_coordinates, to_pixel, Size};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    AddPoint(Point),
    Select(String),
    ToggleSelect(String),
    Deselect,
    BeginPointDrag {
        id: String,
        pointer: (f64, f64),
        container: Size,
    },
    BeginLabelDrag {
        id: String,
        pointer: (f64, f64),
        container: Size,
    },
    DragMove((f64, f64)),
    DragEnd,
    PlaybackClick {
        pointer: (f64, f64),
        display: Size,
    },
}

enum Hit {
    Point(String),
    Label(String),
}

fn relative(pos: egui::Pos2, rect: egui::Rect) -> (f64, f64) {
    ((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

fn screen_pos(point: Point, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + to_pixel(point.x, rect.width() as f64) as f32,
        rect.min.y + to_pixel(point.y, rect.height() as f64) as f32,
    )
}

fn container_of(rect: egui::Rect) -> Size {
    Size::new(rect.width() as f64, rect.height() as f64)
}

fn draw_backdrop(painter: &egui::Painter, rect: egui::Rect, thumbnail: Option<&egui::TextureHandle>) {
    match thumbnail {
        Some(texture) => {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No preview",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(90),
            );
        }
    }
}

/// Draw a click point's area and order badge at `center`.
fn draw_point(
    painter: &egui::Painter,
    point: &ClickPoint,
    center: egui::Pos2,
    scale: f64,
    color: egui::Color32,
    selected: bool,
) {
    let stroke_color = if selected { egui::Color32::YELLOW } else { color };
    let stroke = egui::Stroke::new(if selected { 3.0 } else { 2.0 }, stroke_color);
    let fill = color.gamma_multiply(0.25);
    match point.area {
        ClickArea::Circle { radius } => {
            let r = (radius * scale) as f32;
            painter.circle_filled(center, r, fill);
            painter.circle_stroke(center, r, stroke);
        }
        ClickArea::Rectangle { .. } => {
            let (w, h) = area_extent(&point.area, scale);
            let rect = egui::Rect::from_center_size(center, egui::vec2(w as f32, h as f32));
            painter.rect_filled(rect, 4.0, fill);
            painter.rect_stroke(rect, 4.0, stroke);
        }
    }
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        point.order.to_string(),
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
}

/// Expanding, fading ring around the active point.
fn draw_pulse(painter: &egui::Painter, point: &ClickPoint, center: egui::Pos2, scale: f64, color: egui::Color32, time: f64) {
    let duration = point.pulse_speed.animation_duration();
    let phase = ((time % duration) / duration) as f32;
    let ring = color.gamma_multiply(1.0 - phase);
    let stroke = egui::Stroke::new(2.0, ring);
    match point.area {
        ClickArea::Circle { radius } => {
            let r = (radius * scale) as f32;
            painter.circle_stroke(center, r * (1.0 + 0.6 * phase), stroke);
        }
        ClickArea::Rectangle { .. } => {
            let (w, h) = area_extent(&point.area, scale);
            let rect = egui::Rect::from_center_size(center, egui::vec2(w as f32, h as f32))
                .expand(12.0 * phase);
            painter.rect_stroke(rect, 4.0, stroke);
        }
    }
}

/// Draw the description label, returning its screen rect.
fn draw_label(painter: &egui::Painter, point: &ClickPoint, at: egui::Pos2) -> Option<egui::Rect> {
    let text = point.description.as_ref()?;
    let style = &point.description_style;
    let text_color = parse_hex_color(&style.text_color, egui::Color32::WHITE);
    let background = parse_hex_color(&style.background_color, egui::Color32::from_gray(30));
    let galley = painter.layout_no_wrap(
        text.clone(),
        egui::FontId::proportional(style.font_size),
        text_color,
    );
    let padding = egui::vec2(6.0, 3.0);
    let rect = egui::Rect::from_center_size(at, galley.size() + padding * 2.0);
    painter.rect_filled(rect, 4.0, background);
    painter.galley(rect.min + padding, galley, text_color);
    Some(rect)
}

/// Authoring canvas: place, select and drag click points and labels.
pub fn show_authoring(
    ui: &mut egui::Ui,
    editor: &Editor,
    current_tool: Tool,
    thumbnail: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let project = editor.project();
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = fit_rect(response.rect, project.video.width, project.video.height);
    draw_backdrop(&painter, rect, thumbnail);

    let container = container_of(rect);
    let scale = get_scale(container.width, project.video.width as f64);
    let color = parse_hex_color(&project.settings.hotspot_color, egui::Color32::LIGHT_BLUE);

    let mut label_rects = Vec::new();
    for point in &project.click_points {
        let center = screen_pos(editor.display_position(point), rect);
        draw_point(&painter, point, center, scale, color, editor.is_selected(&point.id));
        let label_at = screen_pos(editor.display_label_position(point), rect);
        if let Some(label_rect) = draw_label(&painter, point, label_at) {
            label_rects.push((point.id.clone(), label_rect));
        }
    }

    // Topmost first: labels, then points in reverse draw order.
    let hit_test = |pos: egui::Pos2| -> Option<Hit> {
        if let Some((id, _)) = label_rects.iter().rev().find(|(_, r)| r.contains(pos)) {
            return Some(Hit::Label(id.clone()));
        }
        let pointer = relative(pos, rect);
        project
            .click_points
            .iter()
            .rev()
            .find(|p| {
                let center = relative(screen_pos(editor.display_position(p), rect), rect);
                area_contains(&p.area, center, pointer, scale)
            })
            .map(|p| Hit::Point(p.id.clone()))
    };

    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            let pointer = relative(pos, rect);
            return match hit_test(pos) {
                Some(Hit::Label(id)) => CanvasAction::BeginLabelDrag {
                    id,
                    pointer,
                    container,
                },
                Some(Hit::Point(id)) => CanvasAction::BeginPointDrag {
                    id,
                    pointer,
                    container,
                },
                None => CanvasAction::None,
            };
        }
    } else if response.drag_stopped() {
        if editor.is_dragging() {
            return CanvasAction::DragEnd;
        }
    } else if response.dragged() {
        if let (true, Some(pos)) = (editor.is_dragging(), response.interact_pointer_pos()) {
            return CanvasAction::DragMove(relative(pos, rect));
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let toggle = ui.input(|i| i.modifiers.command);
            return match hit_test(pos) {
                Some(Hit::Point(id)) | Some(Hit::Label(id)) if toggle => CanvasAction::ToggleSelect(id),
                Some(Hit::Point(id)) | Some(Hit::Label(id)) => CanvasAction::Select(id),
                None if current_tool == Tool::AddPoint && rect.contains(pos) => {
                    let (x, y) = relative(pos, rect);
                    CanvasAction::AddPoint(normalize_coordinates(x, y, container).clamped())
                }
                None => CanvasAction::Deselect,
            };
        }
    }

    CanvasAction::None
}

/// Playback canvas. Only the point being waited on is drawn or clickable.
pub fn show_playback<M: MediaElement>(
    ui: &mut egui::Ui,
    player: &Player<M>,
    thumbnail: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let project = player.project();
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
    let rect = fit_rect(response.rect, project.video.width, project.video.height);
    draw_backdrop(&painter, rect, thumbnail);

    let container = container_of(rect);
    let scale = get_scale(container.width, project.video.width as f64);
    let color = parse_hex_color(&project.settings.hotspot_color, egui::Color32::LIGHT_BLUE);

    if let Some(point) = player.active_point() {
        let center = screen_pos(point.position, rect);
        let time = ui.input(|i| i.time);
        draw_pulse(&painter, point, center, scale, color, time);
        draw_point(&painter, point, center, scale, color, false);
        draw_label(&painter, point, screen_pos(point.label_position(), rect));
        ui.ctx().request_repaint();
    }

    let banner = match player.state() {
        PlaybackState::Init => Some("Press Play to start the demo"),
        PlaybackState::Complete => Some("Demo complete"),
        _ => None,
    };
    if let Some(text) = banner {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(22.0),
            egui::Color32::from_gray(220),
        );
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if rect.contains(pos) {
                return CanvasAction::PlaybackClick {
                    pointer: relative(pos, rect),
                    display: container,
                };
            }
        }
    }

    CanvasAction::None
}
