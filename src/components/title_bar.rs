use dioxus::prelude::*;
use video_annotator::constants::*;

#[component]
pub fn TitleBar(
    video_name: String,
    on_open_video: EventHandler<MouseEvent>,
    on_load_annotations: EventHandler<MouseEvent>,
    on_export: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Video Annotator" }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_open_video.call(e),
                    "Open Video"
                }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_load_annotations.call(e),
                    "Load Annotations"
                }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_export.call(e),
                    "Export CSV"
                }
            }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "{video_name}" }
        }
    }
}
