// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labels file reading.

use crate::error::AnnotatorError;
use crate::models::classes::ClassRegistry;
use std::path::Path;

/// Read a labels file (one class per line) into a fresh registry.
pub fn read_labels(path: &Path) -> Result<ClassRegistry, AnnotatorError> {
    let text = std::fs::read_to_string(path).map_err(|source| AnnotatorError::LabelsRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut registry = ClassRegistry::new();
    registry.load_labels(text.lines())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_labels_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("classes.txt");
        std::fs::write(&path, "cat\r\n\ndog\n  bird \n").unwrap();

        let registry = read_labels(&path).unwrap();
        assert_eq!(registry.labels(), &["cat", "dog", "bird"]);
    }

    #[test]
    fn test_read_empty_labels_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("classes.txt");
        std::fs::write(&path, "\n \n").unwrap();

        assert!(matches!(read_labels(&path), Err(AnnotatorError::EmptyLabelSet)));
    }

    #[test]
    fn test_read_missing_labels_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let result = read_labels(&temp.path().join("missing.txt"));
        assert!(matches!(result, Err(AnnotatorError::LabelsRead { .. })));
    }
}
