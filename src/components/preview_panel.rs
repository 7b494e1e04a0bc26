use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use dioxus::prelude::*;
use image::ImageFormat;
use std::io::Cursor;
use video_annotator::constants::*;
use video_annotator::core::DisplayFrame;

/// Encode a display frame as a PNG data URI for an `img` tag.
pub fn frame_data_uri(frame: &DisplayFrame) -> Option<String> {
    let mut png = Cursor::new(Vec::new());
    if let Err(err) = frame.image.write_to(&mut png, ImageFormat::Png) {
        tracing::warn!(index = frame.index, error = %err, "failed to encode preview frame");
        return None;
    }
    Some(format!("data:image/png;base64,{}", BASE64.encode(png.into_inner())))
}

#[component]
pub fn PreviewPanel(
    image_src: Option<String>,
    box_width: u32,
    box_height: u32,
    source_width: u32,
    source_height: u32,
    fps: u32,
) -> Element {
    let has_frame = image_src.is_some();
    let src = image_src.unwrap_or_default();
    rsx! {
        div {
            style: "display: flex; flex-direction: column; background-color: {BG_DEEPEST}; border: 1px solid {BORDER_SUBTLE}; border-radius: 6px; overflow: hidden;",

            div {
                style: "
                    display: grid; grid-template-columns: auto 1fr auto; align-items: center;
                    height: 32px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                ",
                span {
                    style: "grid-column: 1; font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;",
                    "Preview"
                }
                div {
                    style: "grid-column: 3; justify-self: end; display: flex; align-items: center; gap: 6px; font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};",
                    if has_frame {
                        span { "{source_width} x {source_height}" }
                        span { style: "color: {TEXT_MUTED};", "@" }
                        span { "{fps}" }
                    }
                }
            }

            div {
                style: "width: {box_width}px; height: {box_height}px; display: flex; align-items: center; justify-content: center; background-color: #000;",
                if has_frame {
                    img {
                        src: "{src}",
                        style: "display: block; max-width: 100%; max-height: 100%;",
                        draggable: "false",
                    }
                } else {
                    div {
                        style: "display: flex; flex-direction: column; align-items: center; gap: 12px; color: {TEXT_DIM};",
                        div {
                            style: "width: 48px; height: 48px; border: 1px solid {BORDER_DEFAULT}; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 14px;",
                            "?"
                        }
                        span { style: "font-size: 12px;", "No video loaded" }
                    }
                }
            }
        }
    }
}
