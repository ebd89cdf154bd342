// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! clickthru - click-through demo authoring and playback
//!
//! A desktop shell for placing gated hotspots over a recorded product video
//! and previewing the resulting demo.

mod app;
mod ui;

use anyhow::Result;
use app::DemoApp;
use clickthru::config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::discover()?;
    log::info!(
        "Projects in {}, media in {}",
        config.projects_dir.display(),
        config.media_dir.display()
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("clickthru - Click-through Demos"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "clickthru",
        options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
