// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the annotation core.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which on-disk representation an annotation write was producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    /// Pixel-space JSON shape list.
    Structured,
    /// Normalized YOLO segmentation text.
    Flat,
}

impl fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationFormat::Structured => write!(f, "JSON"),
            AnnotationFormat::Flat => write!(f, "TXT"),
        }
    }
}

/// Errors that can occur while loading labels, images and annotations.
#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// The labels file contained no non-empty lines
    #[error("Labels file is empty")]
    EmptyLabelSet,

    /// The labels file could not be read
    #[error("Failed to read labels file {path:?}: {source}")]
    LabelsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image folder could not be listed
    #[error("Failed to read folder {path:?}: {source}")]
    FolderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image folder holds no supported images
    #[error("No images found in {path:?}")]
    NoImagesFound { path: PathBuf },

    /// The annotations directory could not be created
    #[error("Failed to create annotations directory {path:?}: {source}")]
    AnnotationsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pixel data could not be decoded
    #[error("Failed to open image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A prior annotation file exists but could not be read or parsed
    #[error("Failed to load annotation {path:?}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing one of the annotation files failed
    #[error("Failed to save {format} annotation {path:?}: {source}")]
    AnnotationWrite {
        format: AnnotationFormat,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
