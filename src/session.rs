// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session state and navigation.
//!
//! A [`Session`] owns everything the annotator works on: the class
//! registry, the ordered image list with its cursor, the decoded image on
//! screen and the polygon editor. It holds no UI types, so the whole
//! workflow can be driven from tests without a display.

use crate::config::AnnotatorConfig;
use crate::error::AnnotatorError;
use crate::io::labels::read_labels;
use crate::io::media::{image_stem, list_images, load_image, LoadedImage};
use crate::io::serialization::{
    encode_flat, encode_structured, read_structured, write_flat, write_structured,
};
use crate::models::annotation::Point;
use crate::models::classes::{ClassRegistry, Rgb};
use crate::models::editor::{AddPoint, PolygonEditor, UndoAction};
use std::path::{Path, PathBuf};

/// Label given to polygons drawn before any labels file is loaded.
const UNLABELED: &str = "0";

/// Navigation direction through the image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Cursor moved to the given index.
    Moved { index: usize },
    /// Already on the first image.
    AtFirst,
    /// Already on the last image.
    AtLast,
    /// No image folder is open.
    NoImages,
}

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No image is loaded.
    NoImage,
    /// Nothing drawn; existing files are left alone.
    NothingToSave,
    /// Both annotation files were written.
    Saved { json: PathBuf, txt: PathBuf },
}

/// State of an annotation session.
pub struct Session {
    config: AnnotatorConfig,
    registry: ClassRegistry,
    active_class: Option<String>,
    images: Vec<PathBuf>,
    cursor: usize,
    annotations_dir: Option<PathBuf>,
    /// Decoded image under the cursor, dropped on every image switch.
    image: Option<LoadedImage>,
    editor: PolygonEditor,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnnotatorConfig::default())
    }

    pub fn with_config(config: AnnotatorConfig) -> Self {
        let editor = PolygonEditor::new(config.close_threshold);
        Self {
            config,
            registry: ClassRegistry::new(),
            active_class: None,
            images: Vec::new(),
            cursor: 0,
            annotations_dir: None,
            image: None,
            editor,
        }
    }

    /// Load a labels file, replacing the class registry.
    ///
    /// On failure the previous registry stays in place.
    pub fn open_label_set(&mut self, path: &Path) -> Result<(), AnnotatorError> {
        let registry = read_labels(path)?;
        self.active_class = registry.first().map(str::to_string);
        self.registry = registry;
        log::info!("Opened labels file {}", path.display());
        Ok(())
    }

    /// Open a folder of images and show the first one.
    ///
    /// On a listing failure the current session is left untouched.
    pub fn open_image_folder(&mut self, folder: &Path) -> Result<(), AnnotatorError> {
        let images = list_images(folder, &self.config)?;
        if images.is_empty() {
            return Err(AnnotatorError::NoImagesFound {
                path: folder.to_path_buf(),
            });
        }

        let annotations_dir = folder.join(&self.config.annotations_dir);
        std::fs::create_dir_all(&annotations_dir).map_err(|source| {
            AnnotatorError::AnnotationsDir {
                path: annotations_dir.clone(),
                source,
            }
        })?;

        self.save_before_leaving();

        log::info!("Opened {} images in {}", images.len(), folder.display());
        self.images = images;
        self.cursor = 0;
        self.annotations_dir = Some(annotations_dir);
        self.load_current_image()
    }

    /// Decode the image under the cursor and load its saved polygons.
    ///
    /// An unreadable annotation file is logged and skipped.
    pub fn load_current_image(&mut self) -> Result<(), AnnotatorError> {
        self.image = None;
        self.editor.clear();

        let Some(path) = self.images.get(self.cursor).cloned() else {
            return Ok(());
        };
        self.image = Some(load_image(&path)?);

        if let Some((json_path, _)) = self.annotation_paths() {
            match read_structured(&json_path, &self.registry) {
                Ok(Some(polygons)) => {
                    log::info!(
                        "Loaded {} polygons from {}",
                        polygons.len(),
                        json_path.display()
                    );
                    self.editor.load_committed(polygons);
                }
                Ok(None) => {}
                Err(e) => log::warn!("{}", e),
            }
        }
        Ok(())
    }

    /// Write the structured and flat annotation files for the current image.
    ///
    /// The JSON file is written first; if it fails the text file is not
    /// attempted. Saving with nothing drawn never touches existing files.
    pub fn save_current_annotation(&self) -> Result<SaveOutcome, AnnotatorError> {
        let Some(image) = &self.image else {
            return Ok(SaveOutcome::NoImage);
        };
        if self.editor.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        let Some((json_path, txt_path)) = self.annotation_paths() else {
            return Ok(SaveOutcome::NoImage);
        };

        let committed = self.editor.committed();
        let record = encode_structured(committed, &image.file_name(), image.width, image.height);
        write_structured(&json_path, &record)?;

        let flat = encode_flat(committed, image.width, image.height, &self.registry);
        write_flat(&txt_path, &flat)?;

        log::info!("Saved annotations for {}", image_stem(&image.path));
        Ok(SaveOutcome::Saved {
            json: json_path,
            txt: txt_path,
        })
    }

    /// Move to the neighbouring image, saving the current one first.
    ///
    /// A failed save is logged and does not stop the move. If the new image
    /// cannot be decoded the error is returned with the cursor already moved.
    pub fn advance(&mut self, direction: Direction) -> Result<Navigation, AnnotatorError> {
        if self.images.is_empty() {
            return Ok(Navigation::NoImages);
        }

        let last = self.images.len() - 1;
        let target = match direction {
            Direction::Forward if self.cursor < last => self.cursor + 1,
            Direction::Forward => return Ok(Navigation::AtLast),
            Direction::Backward if self.cursor > 0 => self.cursor - 1,
            Direction::Backward => return Ok(Navigation::AtFirst),
        };

        self.save_before_leaving();
        self.cursor = target.min(last);
        self.load_current_image()?;
        Ok(Navigation::Moved { index: self.cursor })
    }

    fn save_before_leaving(&self) {
        if let Err(e) = self.save_current_annotation() {
            log::warn!("Failed to save before navigation: {}", e);
        }
    }

    /// Whether the current image has committed polygons worth saving on exit.
    pub fn has_unsaved_committed(&self) -> bool {
        !self.editor.committed().is_empty()
    }

    /// Forward a click in image pixel coordinates to the editor.
    ///
    /// Ignored while no image is loaded.
    pub fn add_point(&mut self, point: Point) -> Option<AddPoint> {
        self.image.as_ref()?;
        let label = self.active_label().to_string();
        Some(self.editor.add_point(point, &label))
    }

    pub fn undo(&mut self) -> UndoAction {
        self.editor.undo()
    }

    /// Clear every polygon on the current image. The caller confirms first.
    pub fn reset(&mut self) {
        self.editor.reset();
    }

    /// Make `label` the class used for newly closed polygons.
    ///
    /// Returns false if the label is not in the registry.
    pub fn select_class(&mut self, label: &str) -> bool {
        if self.registry.resolve(label).is_none() {
            return false;
        }
        self.active_class = Some(label.to_string());
        true
    }

    /// Label used when the next polygon closes.
    pub fn active_label(&self) -> &str {
        self.active_class.as_deref().unwrap_or(UNLABELED)
    }

    pub fn set_class_color(&mut self, label: &str, color: Rgb) {
        self.registry.set_color(label, color);
    }

    /// Paths of the JSON and text files for the current image.
    pub fn annotation_paths(&self) -> Option<(PathBuf, PathBuf)> {
        let dir = self.annotations_dir.as_ref()?;
        let stem = image_stem(self.images.get(self.cursor)?);
        Some((
            dir.join(format!("{}.json", stem)),
            dir.join(format!("{}.txt", stem)),
        ))
    }

    /// One-based position of the cursor and the number of images.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.images.is_empty() {
            None
        } else {
            Some((self.cursor() + 1, self.images.len()))
        }
    }

    pub fn current_image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.images.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn editor(&self) -> &PolygonEditor {
        &self.editor
    }
}
