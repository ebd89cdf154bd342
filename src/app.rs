// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! `DemoApp` is the host shell around the click-through engine. It owns the
//! state the engine works on: the authoring `Editor`, the playback `Player`
//! when previewing, the autosave timer and the collaborators. Every frame
//! it feeds UI actions into the engine and drives the playback poll.

use crate::ui::{canvas, properties, timeline, toolbar};
use clickthru::config::Config;
use clickthru::editor::Editor;
use clickthru::io::autosave::Autosave;
use clickthru::io::media::load_thumbnail;
use clickthru::io::serialization;
use clickthru::io::store::{FileMediaResolver, FileProjectStore, LogUsageLogger, MediaResolver, ProjectStore};
use clickthru::models::DemoProject;
use clickthru::playback::{PlaybackState, Player, SimulatedMedia};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Instant;

/// Which side of the app has the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Authoring,
    Playback,
}

/// Current authoring tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    AddPoint,
}

/// Result of background project loading.
struct LoadedProject {
    project: DemoProject,
    thumbnail: Option<clickthru::io::media::LoadedImage>,
}

/// Main application state.
pub struct DemoApp {
    config: Config,
    store: FileProjectStore,
    media_resolver: FileMediaResolver,

    mode: Mode,
    current_tool: Tool,

    /// Authoring state for the loaded project
    editor: Option<Editor>,

    /// Playback state while previewing
    player: Option<Player<SimulatedMedia>>,

    autosave: Autosave,

    /// Authoring playhead, where new click points are placed
    playhead: f64,

    properties: properties::PropertiesBuffer,

    thumbnail: Option<egui::TextureHandle>,

    /// Receiver for background project loading
    loader: Option<Receiver<Result<LoadedProject, String>>>,

    /// Inline message from the last rejected operation
    status: Option<String>,

    last_frame: Option<Instant>,
}

impl DemoApp {
    pub fn new(config: Config) -> Self {
        let store = FileProjectStore::new(config.projects_dir.clone());
        let media_resolver = FileMediaResolver::new(config.media_dir.clone());
        let autosave = Autosave::new(config.autosave_delay());
        Self {
            config,
            store,
            media_resolver,
            mode: Mode::Authoring,
            current_tool: Tool::Select,
            editor: None,
            player: None,
            autosave,
            playhead: 0.0,
            properties: properties::PropertiesBuffer::default(),
            thumbnail: None,
            loader: None,
            status: None,
            last_frame: None,
        }
    }

    /// Install a project for authoring, replacing whatever was loaded.
    fn install_project(&mut self, project: DemoProject) {
        log::info!(
            "Opened project {} ({} click points)",
            project.id,
            project.point_count()
        );
        let editor = Editor::with_history_limit(project, self.config.history_limit);
        self.autosave.reset(&editor);
        self.editor = Some(editor);
        self.player = None;
        self.mode = Mode::Authoring;
        self.playhead = 0.0;
        self.properties.invalidate();
        self.status = None;
    }

    fn new_project(&mut self, thumbnail: Option<PathBuf>) {
        let id = uuid::Uuid::new_v4().to_string();
        let mut video = self.config.placeholder_video(id.clone());
        self.thumbnail = None;
        if let Some(path) = thumbnail {
            video.thumbnail = Some(path.to_string_lossy().to_string());
        }
        let project = DemoProject::new_for_video(id, "Untitled demo".to_string(), video);
        self.open_in_background(move || Ok(project));
    }

    /// Load a project and its thumbnail off the UI thread.
    fn open_in_background<F>(&mut self, load: F)
    where
        F: FnOnce() -> Result<DemoProject, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        std::thread::spawn(move || {
            let result = load().map(|mut project| {
                let thumbnail = project
                    .video
                    .thumbnail
                    .as_ref()
                    .and_then(|path| load_thumbnail(std::path::Path::new(path)));
                // The thumbnail is the recorded frame, so it carries the
                // video's native size when none was declared.
                if let Some(img) = &thumbnail {
                    if project.click_points.is_empty() {
                        project.video.width = img.width;
                        project.video.height = img.height;
                    }
                }
                LoadedProject { project, thumbnail }
            });
            let _ = sender.send(result);
        });
    }

    fn import_project(&mut self, path: PathBuf) {
        self.open_in_background(move || {
            let project = serialization::import_any(&path).map_err(|e| format!("{:#}", e))?;
            project.validate().map_err(|v| v.to_string())?;
            Ok(project)
        });
    }

    fn open_stored_project(&mut self, id: String) {
        let store = self.store.clone();
        self.open_in_background(move || store.load_project(&id).map_err(|e| e.to_string()));
    }

    fn export_project(&mut self, path: PathBuf) {
        if let Some(editor) = &self.editor {
            match serialization::export_any(editor.project(), &path) {
                Ok(()) => log::info!("Exported project to {}", path.display()),
                Err(e) => {
                    log::error!("Failed to export project: {:#}", e);
                    self.status = Some(format!("Export failed: {:#}", e));
                }
            }
        }
    }

    fn save(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            if let Err(e) = self.autosave.save_now(editor, &self.store) {
                self.status = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn undo(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            if editor.undo() {
                self.properties.invalidate();
            }
        }
    }

    fn redo(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            if editor.redo() {
                self.properties.invalidate();
            }
        }
    }

    fn delete_selected(&mut self) {
        let outcome = match self.editor.as_mut() {
            Some(editor) if !editor.selection().is_empty() => editor_result(editor.delete_selected()),
            _ => return,
        };
        self.report(outcome);
    }

    fn report(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.status = None,
            Err(message) => {
                self.properties.invalidate();
                self.status = Some(message);
            }
        }
    }

    /// Hand a copy of the authored document to a fresh player.
    fn enter_playback(&mut self) {
        let Some(editor) = &self.editor else {
            self.mode = Mode::Authoring;
            return;
        };
        let project = editor.project().clone();
        match self.media_resolver.resolve_media_url(&project.video.id) {
            Some(url) => log::info!("Previewing against {}", url),
            None => log::info!("No media for video {}, using simulated playback", project.video.id),
        }
        let media = SimulatedMedia::loaded(project.video.duration);
        let player = Player::new(project, media)
            .with_usage_logger(Box::new(LogUsageLogger))
            .with_poll_rate(self.config.poll_hz);
        self.player = Some(player);
    }

    fn leave_playback(&mut self) {
        // Dropping the player cancels its poll loop.
        self.player = None;
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.loader = None;
        match result {
            Ok(loaded) => {
                self.thumbnail = loaded.thumbnail.map(|img| {
                    let size = [img.width as usize, img.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                    ctx.load_texture("thumbnail", color_image, egui::TextureOptions::LINEAR)
                });
                self.install_project(loaded.project);
            }
            Err(e) => {
                log::error!("Failed to open project: {}", e);
                self.status = Some(e);
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.mode != Mode::Authoring {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.delete_selected();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.redo();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S)) {
            self.save();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(editor) = self.editor.as_mut() {
                editor.clear_selection();
            }
            self.current_tool = Tool::Select;
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Demo").clicked() {
                        self.new_project(None);
                        ui.close_menu();
                    }
                    if ui.button("New Demo from Thumbnail...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp"])
                            .pick_file()
                        {
                            self.new_project(Some(path));
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Project...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Projects", &["json"])
                            .set_directory(self.store.root())
                            .pick_file()
                        {
                            if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                                self.open_stored_project(id.to_string());
                            }
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Projects", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_project(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let loaded = self.editor.is_some();
                    if ui.add_enabled(loaded, egui::Button::new("Save (Ctrl+S)")).clicked() {
                        self.save();
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(loaded, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("demo.yaml")
                                    .save_file()
                                {
                                    self.export_project(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("demo.json")
                                    .save_file()
                                {
                                    self.export_project(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let authoring = self.mode == Mode::Authoring;
                    let can_undo = authoring && self.editor.as_ref().is_some_and(|e| e.can_undo());
                    if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                        self.undo();
                        ui.close_menu();
                    }
                    let can_redo = authoring && self.editor.as_ref().is_some_and(|e| e.can_redo());
                    if ui.add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)")).clicked() {
                        self.redo();
                        ui.close_menu();
                    }

                    ui.separator();

                    let has_selection = authoring
                        && self.editor.as_ref().is_some_and(|e| !e.selection().is_empty());
                    if ui.add_enabled(has_selection, egui::Button::new("Delete Selected")).clicked() {
                        self.delete_selected();
                        ui.close_menu();
                    }
                    let has_points = authoring
                        && self.editor.as_ref().is_some_and(|e| e.project().point_count() > 0);
                    if ui.add_enabled(has_points, egui::Button::new("Delete All Click Points")).clicked() {
                        if let Some(editor) = self.editor.as_mut() {
                            editor.delete_all();
                            self.properties.invalidate();
                        }
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.editor {
                    Some(editor) => {
                        ui.label(&editor.project().title);
                        ui.separator();
                        if editor.is_dirty() {
                            ui.label(egui::RichText::new("● Unsaved changes").color(egui::Color32::from_rgb(230, 170, 60)));
                        } else {
                            ui.label("Saved");
                        }
                        if let Some(err) = self.autosave.last_error() {
                            ui.separator();
                            ui.label(egui::RichText::new(format!("Autosave failed: {}", err)).color(egui::Color32::LIGHT_RED));
                        }
                    }
                    None => {
                        ui.label("No project loaded");
                    }
                }
                if let Some(message) = &self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
                }
            });
        });
    }

    fn authoring_ui(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let duration = editor.project().video.duration;

        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| properties::show(ui, editor, &mut self.properties))
            .inner;

        let ticks = clickthru::playback::timeline::tick_marks(&editor.project().click_points, duration);
        let scrubbed = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| timeline::show_scrubber(ui, self.playhead, duration, &ticks))
            .inner;
        if let Some(time) = scrubbed {
            self.playhead = time;
        }

        let thumbnail = self.thumbnail.as_ref();
        let tool = self.current_tool;
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show_authoring(ui, editor, tool, thumbnail))
            .inner;

        self.apply_properties_action(properties_action);
        self.apply_canvas_action(canvas_action);
    }

    fn apply_properties_action(&mut self, action: properties::PropertiesAction) {
        use properties::PropertiesAction;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let outcome = match action {
            PropertiesAction::None => return,
            PropertiesAction::Select(id) => {
                editor.select(&id);
                Ok(())
            }
            PropertiesAction::Delete(id) => editor_result(editor.delete_click_point(&id)),
            PropertiesAction::DeleteSelected => editor_result(editor.delete_selected()),
            PropertiesAction::SetDescription(id, text) => editor_result(editor.set_description(&id, text)),
            PropertiesAction::SetTimestamp(id, t) => editor_result(editor.set_timestamp(&id, t)),
            PropertiesAction::SetArea(id, area) => editor_result(editor.set_area(&id, area)),
            PropertiesAction::SetPulseSpeed(id, speed) => editor_result(editor.set_pulse_speed(&id, speed)),
            PropertiesAction::SetStyle(id, style) => editor_result(editor.set_description_style(&id, style)),
            PropertiesAction::ApplyStyleToAll(style) => {
                editor.bulk_update_description_style(style);
                Ok(())
            }
        };
        self.report(outcome);
    }

    fn apply_canvas_action(&mut self, action: canvas::CanvasAction) {
        use canvas::CanvasAction;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let outcome = match action {
            CanvasAction::None | CanvasAction::PlaybackClick { .. } => return,
            CanvasAction::AddPoint(position) => {
                let result = editor.add_click_point(self.playhead, position).map(|id| editor.select(&id));
                editor_result(result)
            }
            CanvasAction::Select(id) => {
                editor.select(&id);
                Ok(())
            }
            CanvasAction::ToggleSelect(id) => {
                editor.toggle_selection(&id);
                Ok(())
            }
            CanvasAction::Deselect => {
                editor.clear_selection();
                Ok(())
            }
            CanvasAction::BeginPointDrag { id, pointer, container } => {
                editor_result(editor.begin_point_drag(&id, pointer, container))
            }
            CanvasAction::BeginLabelDrag { id, pointer, container } => {
                editor_result(editor.begin_label_drag(&id, pointer, container))
            }
            CanvasAction::DragMove(pointer) => {
                if editor.drag_point(pointer).is_err() {
                    let _ = editor.drag_label(pointer);
                }
                return;
            }
            CanvasAction::DragEnd => {
                let moved = editor.end_point_drag().or_else(|_| editor.end_label_drag());
                editor_result(moved)
            }
        };
        self.report(outcome);
    }

    fn playback_ui(&mut self, ctx: &egui::Context, now: Instant, dt: f64) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        if matches!(player.state(), PlaybackState::Playing) {
            player.media_mut().advance(dt);
        }
        player.on_frame(now);
        if let Some(wait) = player.poll_loop().until_next(now) {
            if matches!(player.state(), PlaybackState::Playing) {
                ctx.request_repaint_after(wait);
            }
        }

        if let PlaybackState::Error(err) = player.state().clone() {
            let mut retry = false;
            let mut back = false;
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("This demo could not be played");
                        ui.label(err.to_string());
                        ui.add_space(10.0);
                        retry = ui.button("Retry").clicked();
                        back = ui.button("Back to editing").clicked();
                    });
                });
            });
            if retry {
                let duration = player.project().video.duration;
                player.reload(SimulatedMedia::loaded(duration));
            }
            if back {
                self.mode = Mode::Authoring;
                self.leave_playback();
            }
            return;
        }

        let duration = player.duration();
        let ticks = player.tick_marks();
        let step_label = player.step_label();
        let (transport, scrubbed) = egui::TopBottomPanel::bottom("playback_timeline")
            .show(ctx, |ui| {
                let transport = timeline::show_transport(ui, player.state(), step_label.as_deref());
                let scrubbed = timeline::show_scrubber(ui, player.current_time(), duration, &ticks);
                (transport, scrubbed)
            })
            .inner;

        let thumbnail = self.thumbnail.as_ref();
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show_playback(ui, player, thumbnail))
            .inner;

        let result = match transport {
            timeline::TransportAction::Start => player.start(),
            timeline::TransportAction::Advance => player.advance(),
            timeline::TransportAction::Restart => player.restart(),
            timeline::TransportAction::None => Ok(()),
        };
        let result = result.and_then(|()| match scrubbed {
            Some(value) => player.on_scrub(value).map(|_| ()),
            None => Ok(()),
        });
        let result = result.and_then(|()| match canvas_action {
            canvas::CanvasAction::PlaybackClick { pointer, display } => player.click(pointer, display).map(|_| ()),
            _ => Ok(()),
        });
        if let Err(e) = result {
            log::warn!("Playback action rejected: {}", e);
        }
    }

    fn welcome(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    if self.loader.is_some() {
                        ui.spinner();
                        ui.label("Loading project...");
                        return;
                    }
                    ui.heading(
                        egui::RichText::new("Click-through demos")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("File → New Demo, or open an existing project")
                            .color(egui::Color32::from_gray(160)),
                    );
                });
            });
        });
    }
}

fn editor_result<T, E: std::fmt::Display>(result: Result<T, E>) -> Result<(), String> {
    result.map(|_| ()).map_err(|e| e.to_string())
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        self.poll_loader(ctx);
        if self.loader.is_some() {
            ctx.request_repaint();
        }

        if let Some(editor) = self.editor.as_mut() {
            if let Some(Err(e)) = self.autosave.poll(now, editor, &self.store) {
                log::warn!("Autosave will retry on the next edit: {}", e);
            }
            if let Some(deadline) = self.autosave.deadline() {
                ctx.request_repaint_after(deadline.saturating_duration_since(now));
            }
        }

        self.menu_bar(ctx);

        let previous_mode = self.mode;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.mode, &mut self.current_tool);
        });
        if self.mode != previous_mode {
            match self.mode {
                Mode::Playback => self.enter_playback(),
                Mode::Authoring => self.leave_playback(),
            }
        }

        self.handle_shortcuts(ctx);
        self.status_bar(ctx);

        if self.editor.is_none() {
            self.welcome(ctx);
            return;
        }

        match self.mode {
            Mode::Authoring => self.authoring_ui(ctx),
            Mode::Playback => self.playback_ui(ctx, now, dt),
        }
    }
}
