// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class list and color legend.

use crate::models::classes::{ClassRegistry, Rgb};

/// Result of interacting with the class panel.
pub enum ClassesAction {
    None,
    Select(String),
    SetColor(String, Rgb),
}

/// Display the class list with a color swatch per class.
///
/// Clicking a name makes it the active class; clicking a swatch opens a
/// color picker for that class.
pub fn show(ui: &mut egui::Ui, registry: &ClassRegistry, active_label: &str) -> ClassesAction {
    let mut action = ClassesAction::None;

    ui.heading("Classes");
    ui.separator();

    if registry.is_empty() {
        ui.label(egui::RichText::new("No labels loaded").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, label) in registry.labels().iter().enumerate() {
            // Duplicated labels share a color and selection
            if registry.resolve(label) != Some(i) {
                continue;
            }

            ui.horizontal(|ui| {
                let mut color = registry.color_of(label);
                if ui.color_edit_button_srgb(&mut color).changed() {
                    action = ClassesAction::SetColor(label.clone(), color);
                }
                if ui.selectable_label(label == active_label, label.as_str()).clicked() {
                    action = ClassesAction::Select(label.clone());
                }
            });
        }
    });

    action
}
