// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for classes, polygons and the per-image editor.

pub mod annotation;
pub mod classes;
pub mod editor;
