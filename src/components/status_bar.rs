use dioxus::prelude::*;
use video_annotator::constants::*;

/// Last status message plus the cursor info line.
#[component]
pub fn StatusBar(message: String, is_error: bool, frame_label: String, time_label: String, fps: u32) -> Element {
    let message_color = if is_error { ACCENT_ERROR } else { TEXT_DIM };
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 22px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM};",
            span {
                style: "color: {message_color}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                "{message}"
            }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "{fps} fps" }
                span { "{frame_label}" }
                span { "{time_label}" }
            }
        }
    }
}
