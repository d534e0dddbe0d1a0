// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Polygon editing state for the current image.
//!
//! The editor collects clicked points into an in-progress polygon and
//! commits it once the user clicks back near its first vertex.

use super::annotation::{Point, Polygon};

/// Minimum number of vertices before a polygon can be closed.
const MIN_CLOSE_VERTICES: usize = 3;

/// Whether a polygon is currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Drawing,
}

/// Effect of a single click on the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPoint {
    /// First vertex of a new polygon.
    Started,
    /// Vertex appended to the in-progress polygon.
    Extended,
    /// In-progress polygon committed; the click itself was not kept.
    Closed,
}

/// What an undo removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoAction {
    RemovedPoint,
    RemovedPolygon,
    Nothing,
}

/// Committed polygons plus the in-progress one for a single image.
#[derive(Debug, Clone)]
pub struct PolygonEditor {
    in_progress: Vec<Point>,
    committed: Vec<Polygon>,
    close_threshold: f64,
}

impl PolygonEditor {
    pub fn new(close_threshold: f64) -> Self {
        Self {
            in_progress: Vec::new(),
            committed: Vec::new(),
            close_threshold,
        }
    }

    pub fn state(&self) -> EditorState {
        if self.in_progress.is_empty() {
            EditorState::Idle
        } else {
            EditorState::Drawing
        }
    }

    /// Handle a click at `point`, committing with `active_label` on close.
    pub fn add_point(&mut self, point: Point, active_label: &str) -> AddPoint {
        if let Some(first) = self.in_progress.first() {
            if self.in_progress.len() >= MIN_CLOSE_VERTICES
                && point.distance_to(first) < self.close_threshold
            {
                let points = std::mem::take(&mut self.in_progress);
                self.committed.push(Polygon::new(active_label, points));
                log::info!(
                    "Committed '{}' polygon, total: {}",
                    active_label,
                    self.committed.len()
                );
                return AddPoint::Closed;
            }
        }

        self.in_progress.push(point);
        log::debug!(
            "Added point at ({:.1}, {:.1}), total points: {}",
            point.x,
            point.y,
            self.in_progress.len()
        );
        if self.in_progress.len() == 1 {
            AddPoint::Started
        } else {
            AddPoint::Extended
        }
    }

    /// Remove the last in-progress point, or the last committed polygon
    /// when nothing is being drawn.
    pub fn undo(&mut self) -> UndoAction {
        if self.in_progress.pop().is_some() {
            UndoAction::RemovedPoint
        } else if self.committed.pop().is_some() {
            UndoAction::RemovedPolygon
        } else {
            UndoAction::Nothing
        }
    }

    /// Drop every polygon for the image. Callers confirm with the user first.
    pub fn reset(&mut self) {
        self.in_progress.clear();
        self.committed.clear();
    }

    /// Prepare for a new image.
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Replace the committed set with polygons read from disk.
    pub fn load_committed(&mut self, polygons: Vec<Polygon>) {
        self.in_progress.clear();
        self.committed = polygons;
    }

    pub fn committed(&self) -> &[Polygon] {
        &self.committed
    }

    pub fn in_progress(&self) -> &[Point] {
        &self.in_progress
    }

    /// True when there is neither a committed nor an in-progress polygon.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.in_progress.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> PolygonEditor {
        PolygonEditor::new(10.0)
    }

    fn triangle(editor: &mut PolygonEditor, label: &str, offset: f64) {
        editor.add_point(Point::new(offset, offset), label);
        editor.add_point(Point::new(offset + 50.0, offset), label);
        editor.add_point(Point::new(offset + 50.0, offset + 50.0), label);
        assert_eq!(
            editor.add_point(Point::new(offset + 1.0, offset + 1.0), label),
            AddPoint::Closed
        );
    }

    #[test]
    fn test_close_near_first_point() {
        let mut editor = editor();
        assert_eq!(editor.add_point(Point::new(10.0, 10.0), "dog"), AddPoint::Started);
        assert_eq!(editor.add_point(Point::new(90.0, 10.0), "dog"), AddPoint::Extended);
        assert_eq!(editor.add_point(Point::new(90.0, 40.0), "dog"), AddPoint::Extended);
        assert_eq!(editor.state(), EditorState::Drawing);

        assert_eq!(editor.add_point(Point::new(12.0, 12.0), "dog"), AddPoint::Closed);

        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.in_progress().is_empty());
        assert_eq!(editor.committed().len(), 1);
        let polygon = &editor.committed()[0];
        assert_eq!(polygon.label, "dog");
        assert_eq!(
            polygon.points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(90.0, 40.0)
            ]
        );
    }

    #[test]
    fn test_no_close_with_two_points() {
        let mut editor = editor();
        editor.add_point(Point::new(10.0, 10.0), "cat");
        editor.add_point(Point::new(50.0, 10.0), "cat");
        assert_eq!(editor.add_point(Point::new(11.0, 11.0), "cat"), AddPoint::Extended);
        assert_eq!(editor.in_progress().len(), 3);
        assert!(editor.committed().is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut editor = editor();
        editor.add_point(Point::new(0.0, 0.0), "cat");
        editor.add_point(Point::new(50.0, 0.0), "cat");
        editor.add_point(Point::new(50.0, 50.0), "cat");

        // Exactly on the threshold does not close
        assert_eq!(editor.add_point(Point::new(10.0, 0.0), "cat"), AddPoint::Extended);
        assert_eq!(editor.add_point(Point::new(6.0, 8.0), "cat"), AddPoint::Extended);
        assert_eq!(editor.add_point(Point::new(5.0, 5.0), "cat"), AddPoint::Closed);
        assert_eq!(editor.committed()[0].points.len(), 5);
    }

    #[test]
    fn test_points_are_not_clamped() {
        let mut editor = editor();
        editor.add_point(Point::new(-20.0, 5000.0), "cat");
        assert_eq!(editor.in_progress(), &[Point::new(-20.0, 5000.0)]);
    }

    #[test]
    fn test_undo_removes_points_then_polygons() {
        let mut editor = editor();
        triangle(&mut editor, "cat", 0.0);
        editor.add_point(Point::new(200.0, 200.0), "cat");
        editor.add_point(Point::new(250.0, 200.0), "cat");

        assert_eq!(editor.undo(), UndoAction::RemovedPoint);
        assert_eq!(editor.undo(), UndoAction::RemovedPoint);
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.committed().len(), 1);

        assert_eq!(editor.undo(), UndoAction::RemovedPolygon);
        assert!(editor.committed().is_empty());
        assert_eq!(editor.undo(), UndoAction::Nothing);
    }

    #[test]
    fn test_undo_n_times_empties_committed_set() {
        let mut editor = editor();
        for i in 0..4 {
            triangle(&mut editor, "cat", i as f64 * 100.0);
        }
        assert_eq!(editor.committed().len(), 4);

        for _ in 0..4 {
            assert_eq!(editor.undo(), UndoAction::RemovedPolygon);
        }
        assert!(editor.committed().is_empty());
        assert_eq!(editor.undo(), UndoAction::Nothing);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut editor = editor();
        triangle(&mut editor, "cat", 0.0);
        editor.add_point(Point::new(300.0, 300.0), "cat");

        editor.reset();
        assert!(editor.is_empty());
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_load_committed_replaces_set() {
        let mut editor = editor();
        triangle(&mut editor, "cat", 0.0);
        editor.add_point(Point::new(300.0, 300.0), "cat");

        editor.load_committed(vec![Polygon::new("dog", vec![Point::new(1.0, 2.0)])]);
        assert!(editor.in_progress().is_empty());
        assert_eq!(editor.committed().len(), 1);
        assert_eq!(editor.committed()[0].label, "dog");
    }
}
