// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! SegLabel - polygon annotation for segmentation datasets
//!
//! A desktop application for drawing class-labeled polygons over a folder
//! of images and saving them as JSON shape lists and YOLO segmentation
//! text files.

mod app;
mod config;
mod error;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::AnnotatorApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE)
            .with_title("SegLabel"),
        ..Default::default()
    };

    eframe::run_native(
        "SegLabel",
        options,
        Box::new(|_cc| Ok(Box::new(AnnotatorApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
