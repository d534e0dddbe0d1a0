// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and annotation.
//!
//! This module provides the main canvas area where users view the current
//! image and click out polygon vertices. Clicks are reported in image
//! pixel coordinates. The image is shown at its native size inside a scroll
//! area, so one screen point is one image pixel and the close threshold
//! looks the same on every image.

use crate::models::annotation::Point;
use crate::models::classes::Rgb;
use crate::models::editor::EditorState;
use crate::session::Session;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    AddPoint(Point),
}

/// Maps between image pixels and the on-screen image, drawn unscaled.
struct ImageTransform {
    origin: egui::Pos2,
}

impl ImageTransform {
    fn at(origin: egui::Pos2) -> Self {
        Self { origin }
    }

    /// Screen rectangle covering an image of the given size.
    fn image_rect(&self, width: u32, height: u32) -> egui::Rect {
        egui::Rect::from_min_size(self.origin, egui::vec2(width as f32, height as f32))
    }

    fn to_image(&self, pos: egui::Pos2) -> Point {
        Point::new(
            (pos.x - self.origin.x) as f64,
            (pos.y - self.origin.y) as f64,
        )
    }

    fn to_screen(&self, point: &Point) -> egui::Pos2 {
        egui::pos2(
            self.origin.x + point.x as f32,
            self.origin.y + point.y as f32,
        )
    }
}

/// Display the main canvas area and handle mouse clicks.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    image_texture: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some(image)) = (image_texture, session.current_image()) else {
            show_placeholder(ui, session);
            return;
        };

        // Native size; large images scroll instead of being scaled down
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let size = egui::vec2(image.width as f32, image.height as f32);
                let (allocated, response) = ui.allocate_exact_size(size, egui::Sense::click());
                let transform = ImageTransform::at(allocated.min);
                let image_rect = transform.image_rect(image.width, image.height);

                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        if image_rect.contains(pos) {
                            action = CanvasAction::AddPoint(transform.to_image(pos));
                        }
                    }
                }

                let painter = ui.painter();
                let registry = session.registry();

                for polygon in session.editor().committed() {
                    let screen: Vec<egui::Pos2> =
                        polygon.points.iter().map(|p| transform.to_screen(p)).collect();
                    draw_committed(painter, &screen, registry.color_of(&polygon.label));
                }

                let in_progress: Vec<egui::Pos2> = session
                    .editor()
                    .in_progress()
                    .iter()
                    .map(|p| transform.to_screen(p))
                    .collect();
                draw_in_progress(painter, &in_progress);
            });
    });

    // Status line under the canvas
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Class: {}", session.active_label()));
        ui.separator();
        let editor = session.editor();
        match editor.state() {
            EditorState::Drawing => {
                ui.label(format!("Drawing: {} points", editor.in_progress().len()))
            }
            EditorState::Idle => ui.label(format!("{} polygons", editor.committed().len())),
        };
        ui.separator();
        match session.current_path() {
            Some(path) => ui.label(path.display().to_string()),
            None => ui.label("No folder loaded"),
        };
    });

    action
}

fn show_placeholder(ui: &mut egui::Ui, session: &Session) {
    let hint = if session.registry().is_empty() {
        "Load a labels file to begin annotating"
    } else if session.images().is_empty() {
        "Now load your image folder"
    } else {
        "Image could not be opened"
    };

    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("SegLabel")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.add_space(20.0);
            ui.label(egui::RichText::new(hint).color(egui::Color32::from_gray(180)));
        });
    });
}

/// Outline stroke for a committed polygon of the given class color.
fn class_stroke(color: Rgb) -> egui::Stroke {
    egui::Stroke::new(2.0, egui::Color32::from_rgb(color[0], color[1], color[2]))
}

/// Draw a closed polygon in its class color.
fn draw_committed(painter: &egui::Painter, points: &[egui::Pos2], color: Rgb) {
    if points.is_empty() {
        return;
    }
    let stroke = class_stroke(color);

    for i in 0..points.len() {
        let next = (i + 1) % points.len();
        painter.line_segment([points[i], points[next]], stroke);
    }

    for point in points {
        painter.circle_filled(*point, 3.0, stroke.color);
    }
}

/// Draw the open path of the polygon being drawn.
fn draw_in_progress(painter: &egui::Painter, points: &[egui::Pos2]) {
    for pair in points.windows(2) {
        painter.line_segment(
            [pair[0], pair[1]],
            egui::Stroke::new(2.0, egui::Color32::BLUE),
        );
    }
    for point in points {
        painter.circle_filled(*point, 3.0, egui::Color32::RED);
    }
}
