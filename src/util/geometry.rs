// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate normalization and
//! polygon bounding boxes.

use crate::models::annotation::Point;

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Bounding box of a point set, or `None` if it is empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        Some(points.iter().skip(1).fold(init, |b, p| Self {
            x_min: b.x_min.min(p.x),
            y_min: b.y_min.min(p.y),
            x_max: b.x_max.max(p.x),
            y_max: b.y_max.max(p.y),
        }))
    }

    /// Center, width and height, each normalized by the image size.
    pub fn normalized_center_size(&self, width: u32, height: u32) -> [f64; 4] {
        let (cx, cy) = normalize_coordinates(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            width,
            height,
        );
        let (w, h) = normalize_coordinates(
            self.x_max - self.x_min,
            self.y_max - self.y_min,
            width,
            height,
        );
        [cx, cy, w, h]
    }
}

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: u32, height: u32) -> (f64, f64) {
    (pixel_x / width as f64, pixel_y / height as f64)
}
