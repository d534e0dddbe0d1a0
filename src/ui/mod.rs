// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the SegLabel application.

pub mod canvas;
pub mod classes;
pub mod toolbar;
