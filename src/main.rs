//! Video Annotator
//!
//! Desktop tool for scrubbing a video frame by frame and attaching timestamped,
//! categorized labels.

mod app;
mod components;
mod hotkeys;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

fn main() {
    video_annotator::logging::init();
    tracing::info!("starting video annotator");

    // Configure the window
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Video Annotator")
                .with_inner_size(LogicalSize::new(1280.0, 860.0))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    // Launch the Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
