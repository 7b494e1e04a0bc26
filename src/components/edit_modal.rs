use dioxus::prelude::*;

use super::annotation_form::{CategorySelect, TextInput};
use video_annotator::constants::*;
use video_annotator::state::{Annotation, AnnotationId, Category};

#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub id: AnnotationId,
    pub category: Category,
    pub text: String,
    pub comment: String,
}

/// Modal editor for one annotation. Frame and time are shown read-only.
#[component]
pub fn EditModal(
    annotation: Annotation,
    on_save: EventHandler<EditRequest>,
    on_cancel: EventHandler<()>,
) -> Element {
    let id = annotation.id;
    let mut category = use_signal(|| annotation.category);
    let mut text = use_signal(|| annotation.text.clone());
    let mut comment = use_signal(|| annotation.comment.clone());
    let frame_number = annotation.frame_number;
    let time_label = video_annotator::utils::format_timecode(annotation.time_instant);

    let save = move || {
        on_save.call(EditRequest {
            id,
            category: category(),
            text: text(),
            comment: comment(),
        })
    };

    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.5);
                display: flex; align-items: center; justify-content: center;
                z-index: 2000;
            ",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "
                    width: 420px; background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.5);
                    display: flex; flex-direction: column; gap: 12px;
                ",
                onclick: move |e| e.stop_propagation(),
                onkeydown: move |e: KeyboardEvent| {
                    e.stop_propagation();
                    if e.key() == Key::Escape {
                        on_cancel.call(());
                    }
                },

                h3 { style: "margin: 0; font-size: 16px; color: {TEXT_PRIMARY};", "Edit Annotation" }
                span {
                    style: "font-size: 11px; color: {TEXT_MUTED}; font-family: 'SF Mono', Consolas, monospace;",
                    "Frame {frame_number} at {time_label}"
                }
                div {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    span { style: "font-size: 10px; color: {TEXT_MUTED};", "Category" }
                    CategorySelect { value: category(), on_change: move |value| category.set(value) }
                }
                TextInput {
                    label: "Annotation",
                    value: text(),
                    on_input: move |value| text.set(value),
                    on_enter: move |_| save(),
                }
                TextInput {
                    label: "Comment",
                    value: comment(),
                    on_input: move |value| comment.set(value),
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 8px;",
                    button {
                        style: "padding: 6px 14px; background: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        style: "padding: 6px 14px; background: {ACCENT_OK}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                        onclick: move |_| save(),
                        "Save"
                    }
                }
            }
        }
    }
}
