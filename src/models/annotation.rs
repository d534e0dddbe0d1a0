// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the point and polygon types shared by the editor,
//! the annotation codec and the canvas.

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A class-labeled polygon.
///
/// The label is held by name, so it may stop resolving if the labels file
/// changes after the polygon was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub label: String,
    pub points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon with the given label and vertices.
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}
