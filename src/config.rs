// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application defaults.
//!
//! SegLabel has no configuration file or command line flags. Everything
//! tunable lives here as a default value.

use crate::models::classes::Rgb;

/// Format version tag written into every structured annotation file.
pub const FORMAT_VERSION: &str = "1.0";

/// Color used for labels that are not in the class registry.
pub const FALLBACK_COLOR: Rgb = [0xDD, 0xDD, 0xDD];

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [1350.0, 820.0];

/// Minimum window size.
pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Tunable settings for the annotation session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatorConfig {
    /// Distance in image pixels below which a click closes the polygon.
    pub close_threshold: f64,
    /// Name of the annotations directory created inside the image folder.
    pub annotations_dir: String,
    /// Lowercase image file extensions picked up from a folder.
    pub image_extensions: Vec<String>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            close_threshold: 10.0,
            annotations_dir: "annotations".to_string(),
            image_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

impl AnnotatorConfig {
    /// Check whether a file extension names a supported image type.
    pub fn is_image_extension(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.image_extensions.iter().any(|e| *e == extension)
    }
}
