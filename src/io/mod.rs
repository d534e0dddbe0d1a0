// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, label lists and annotation files.

pub mod labels;
pub mod media;
pub mod serialization;
