// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the annotation [`Session`] to the window: it turns
//! toolbar, canvas and keyboard input into session calls, asks the user
//! for confirmation where work could be lost, and reports errors.

use crate::error::AnnotatorError;
use crate::models::annotation::Point;
use crate::models::editor::{AddPoint, UndoAction};
use crate::session::{Direction, Navigation, SaveOutcome, Session};
use crate::ui::{canvas, classes, toolbar};
use std::path::PathBuf;

const SHORTCUTS: &[(&str, &str)] = &[
    ("A", "Previous image"),
    ("D", "Next image"),
    ("S", "Save annotation"),
    ("U", "Undo last point/polygon"),
    ("R", "Reset annotations"),
];

/// Main application state.
pub struct AnnotatorApp {
    session: Session,

    /// Texture of the current image, with the path it was built from
    image_texture: Option<egui::TextureHandle>,
    texture_path: Option<PathBuf>,

    /// Last window title sent to the viewport
    title: String,

    /// Message shown in the bottom status bar
    status: String,

    /// Whether the shortcut help window is open
    show_help: bool,
}

impl Default for AnnotatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotatorApp {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            image_texture: None,
            texture_path: None,
            title: String::new(),
            status: "Load a labels file to begin.".to_string(),
            show_help: true,
        }
    }

    /// Ask for a labels file and load it.
    fn open_labels(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .pick_file()
        else {
            return;
        };

        match self.session.open_label_set(&path) {
            Ok(()) => {
                self.status = format!("Loaded {} classes.", self.session.registry().len());
                if self.session.images().is_empty() {
                    self.status.push_str(" Now load your image folder.");
                }
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Ask for an image folder and open it.
    fn open_folder(&mut self) {
        let Some(path) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        match self.session.open_image_folder(&path) {
            Ok(()) => {
                self.status = format!(
                    "Opened {} images from {}",
                    self.session.images().len(),
                    path.display()
                );
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn save(&mut self) {
        match self.session.save_current_annotation() {
            Ok(SaveOutcome::Saved { json, txt }) => {
                self.status = format!("Saved {} and {}", json.display(), txt.display());
            }
            Ok(SaveOutcome::NothingToSave) => {
                self.status = "Nothing to save.".to_string();
            }
            Ok(SaveOutcome::NoImage) => {}
            Err(e) => self.report_error(&e),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        match self.session.advance(direction) {
            Ok(Navigation::Moved { index }) => {
                self.status = format!("Image {} of {}", index + 1, self.session.images().len());
            }
            Ok(Navigation::AtFirst) => self.status = "This is the first image.".to_string(),
            Ok(Navigation::AtLast) => self.status = "This is the last image.".to_string(),
            Ok(Navigation::NoImages) => {}
            Err(e) => self.report_error(&e),
        }
    }

    fn undo(&mut self) {
        match self.session.undo() {
            UndoAction::RemovedPoint => self.status = "Removed last point.".to_string(),
            UndoAction::RemovedPolygon => self.status = "Removed last polygon.".to_string(),
            UndoAction::Nothing => {}
        }
    }

    fn reset(&mut self) {
        if self.session.current_image().is_none() {
            return;
        }
        if confirm("Confirm", "Clear all annotations for this image?") {
            self.session.reset();
            self.status = "Cleared annotations for this image.".to_string();
        }
    }

    fn add_point(&mut self, point: Point) {
        if let Some(AddPoint::Closed) = self.session.add_point(point) {
            self.status = format!(
                "Closed '{}' polygon ({} on this image)",
                self.session.active_label(),
                self.session.editor().committed().len()
            );
        }
    }

    /// Log an error and show it in a native dialog.
    fn report_error(&mut self, error: &AnnotatorError) {
        log::error!("{}", error);
        self.status = error.to_string();
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Error")
            .set_description(error.to_string())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    /// Keep the texture in step with the session's current image.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let current = self.session.current_image().map(|image| image.path.clone());
        if current == self.texture_path {
            return;
        }

        self.image_texture = self.session.current_image().map(|image| {
            let size = [image.width as usize, image.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
            ctx.load_texture("current_image", color_image, egui::TextureOptions::LINEAR)
        });
        self.texture_path = current;
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = match (self.session.current_path(), self.session.position()) {
            (Some(path), Some((index, count))) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                format!("SegLabel - {} ({}/{})", name, index, count)
            }
            _ => "SegLabel".to_string(),
        };
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let pressed = |key| ctx.input(|i| i.key_pressed(key));
        if pressed(egui::Key::A) {
            self.navigate(Direction::Backward);
        } else if pressed(egui::Key::D) {
            self.navigate(Direction::Forward);
        } else if pressed(egui::Key::S) {
            self.save();
        } else if pressed(egui::Key::U) {
            self.undo();
        } else if pressed(egui::Key::R) {
            self.reset();
        }
    }

    /// Offer to save committed polygons when the window is closing.
    fn handle_close(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if self.session.has_unsaved_committed()
            && confirm("Save", "Save annotations before exiting?")
        {
            self.save();
        }
    }
}

/// Ask a yes/no question in a native dialog.
fn confirm(title: &str, description: &str) -> bool {
    let result = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    matches!(result, rfd::MessageDialogResult::Yes)
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_close(ctx);
        self.handle_shortcuts(ctx);

        // Toolbar
        let has_image = self.session.current_path().is_some();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, has_image))
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::LoadLabels => self.open_labels(),
            toolbar::ToolbarAction::LoadFolder => self.open_folder(),
            toolbar::ToolbarAction::Previous => self.navigate(Direction::Backward),
            toolbar::ToolbarAction::Next => self.navigate(Direction::Forward),
            toolbar::ToolbarAction::Save => self.save(),
            toolbar::ToolbarAction::Undo => self.undo(),
            toolbar::ToolbarAction::Reset => self.reset(),
            toolbar::ToolbarAction::Help => self.show_help = true,
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        // Class list (left side)
        let classes_action = egui::SidePanel::left("classes")
            .default_width(200.0)
            .show(ctx, |ui| {
                classes::show(ui, self.session.registry(), self.session.active_label())
            })
            .inner;

        match classes_action {
            classes::ClassesAction::Select(label) => {
                self.session.select_class(&label);
            }
            classes::ClassesAction::SetColor(label, color) => {
                self.session.set_class_color(&label, color);
            }
            classes::ClassesAction::None => {}
        }

        self.sync_texture(ctx);
        self.sync_title(ctx);

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.session, self.image_texture.as_ref()))
            .inner;

        if let canvas::CanvasAction::AddPoint(point) = canvas_action {
            self.add_point(point);
        }

        egui::Window::new("Shortcut Keys")
            .open(&mut self.show_help)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                for (key, description) in SHORTCUTS {
                    ui.horizontal(|ui| {
                        ui.strong(*key);
                        ui.label(*description);
                    });
                }
            });
    }
}
