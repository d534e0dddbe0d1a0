// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image folder listing and image loading.
//!
//! This module finds the images in a folder and decodes them into RGBA
//! buffers suitable for uploading as egui textures.

use crate::config::AnnotatorConfig;
use crate::error::AnnotatorError;
use std::path::{Path, PathBuf};

/// A decoded image owned by the session while it is displayed.
pub struct LoadedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major.
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// File name of the image including its extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage, AnnotatorError> {
    let img = image::open(path).map_err(|source| AnnotatorError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    log::info!("Loaded image: {} ({}x{})", path.display(), width, height);

    Ok(LoadedImage {
        path: path.to_path_buf(),
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// List supported images directly inside `folder`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn list_images(folder: &Path, config: &AnnotatorConfig) -> Result<Vec<PathBuf>, AnnotatorError> {
    let entries = std::fs::read_dir(folder).map_err(|source| AnnotatorError::FolderRead {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.is_image_extension(ext))
        })
        .collect();

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Base file name of an image with its extension stripped.
pub fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
