// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class registry.
//!
//! Holds the ordered list of class labels read from a labels file and the
//! display color assigned to each of them.

use crate::config::FALLBACK_COLOR;
use crate::error::AnnotatorError;
use std::collections::HashMap;

/// An RGB color.
pub type Rgb = [u8; 3];

/// Colors assigned to labels by position, wrapping around.
pub const PALETTE: [Rgb; 30] = [
    [0xFF, 0xCC, 0xCC],
    [0xCC, 0xFF, 0xCC],
    [0xCC, 0xCC, 0xFF],
    [0xFF, 0xFF, 0xCC],
    [0xFF, 0xCC, 0xFF],
    [0xCC, 0xE5, 0xFF],
    [0xE6, 0xFF, 0xCC],
    [0xFF, 0xDA, 0xCC],
    [0xD9, 0xCC, 0xFF],
    [0xFF, 0xB3, 0xBA],
    [0xB3, 0xFF, 0xBA],
    [0xBA, 0xE1, 0xFF],
    [0xFF, 0xDF, 0xBA],
    [0xEA, 0xD1, 0xDC],
    [0xD5, 0xE8, 0xD4],
    [0xFF, 0xF2, 0xCC],
    [0xF8, 0xCE, 0xCC],
    [0xD4, 0xE1, 0xF5],
    [0xF5, 0xE1, 0xD4],
    [0xCC, 0xE8, 0xF4],
    [0xFF, 0xD6, 0xE7],
    [0xD6, 0xFF, 0xD6],
    [0xD6, 0xD6, 0xFF],
    [0xFF, 0xF0, 0xD6],
    [0xFF, 0xD6, 0xF0],
    [0xE6, 0xD6, 0xFF],
    [0xD6, 0xFF, 0xF6],
    [0xF0, 0xFF, 0xD6],
    [0xFF, 0xD6, 0xCC],
    [0xCC, 0xE6, 0xFF],
];

/// Ordered class labels with their display colors.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    labels: Vec<String>,
    colors: HashMap<String, Rgb>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry with the non-empty, trimmed lines given.
    ///
    /// The registry is left untouched when no labels remain.
    pub fn load_labels<I, S>(&mut self, lines: I) -> Result<(), AnnotatorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(AnnotatorError::EmptyLabelSet);
        }

        let mut colors = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            // Later lines win the color; positions stay so class ids match the file
            if colors.insert(label.clone(), PALETTE[i % PALETTE.len()]).is_some() {
                log::warn!("Duplicate label '{}' at line {}", label, i + 1);
            }
        }

        log::info!("Loaded {} class labels", labels.len());
        self.labels = labels;
        self.colors = colors;
        Ok(())
    }

    /// Overwrite the color of a known label. Unknown labels are ignored.
    pub fn set_color(&mut self, label: &str, color: Rgb) {
        if let Some(entry) = self.colors.get_mut(label) {
            *entry = color;
        }
    }

    /// Display color of a label, or the fallback gray if it is unknown.
    pub fn color_of(&self, label: &str) -> Rgb {
        self.colors.get(label).copied().unwrap_or(FALLBACK_COLOR)
    }

    /// Position of a label in the registry, if present.
    pub fn resolve(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Position of a label in the registry, falling back to class 0.
    pub fn index_of(&self, label: &str) -> usize {
        self.resolve(label).unwrap_or(0)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn first(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
