// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the annotation commands.

/// Command picked from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    LoadLabels,
    LoadFolder,
    Previous,
    Next,
    Save,
    Undo,
    Reset,
    Help,
}

/// Display the toolbar and return the command that was clicked.
pub fn show(ui: &mut egui::Ui, has_image: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("Load Labels").clicked() {
            action = ToolbarAction::LoadLabels;
        }
        if ui.button("Load Folder").clicked() {
            action = ToolbarAction::LoadFolder;
        }

        ui.separator();

        if ui.add_enabled(has_image, egui::Button::new("◀ Previous (A)")).clicked() {
            action = ToolbarAction::Previous;
        }
        if ui.add_enabled(has_image, egui::Button::new("Next (D) ▶")).clicked() {
            action = ToolbarAction::Next;
        }

        ui.separator();

        if ui.add_enabled(has_image, egui::Button::new("Save (S)")).clicked() {
            action = ToolbarAction::Save;
        }
        if ui.add_enabled(has_image, egui::Button::new("Undo (U)")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(has_image, egui::Button::new("Reset (R)")).clicked() {
            action = ToolbarAction::Reset;
        }

        ui.separator();

        if ui.button("Help").clicked() {
            action = ToolbarAction::Help;
        }

        ui.separator();
        ui.label(
            egui::RichText::new("Click to add vertices, click near the first vertex to close")
                .italics()
                .weak(),
        );
    });

    action
}
