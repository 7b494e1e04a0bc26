use dioxus::prelude::*;
use video_annotator::constants::*;
use video_annotator::state::{AnnotationId, TableRow};

#[component]
fn RowButton(label: &'static str, on_click: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "collapse-btn",
            style: "
                background: transparent; border: 1px solid {BORDER_DEFAULT}; color: {TEXT_SECONDARY};
                font-size: 11px; cursor: pointer; padding: 2px 8px; border-radius: 4px;
            ",
            onclick: move |e| {
                e.stop_propagation();
                on_click.call(e);
            },
            "{label}"
        }
    }
}

/// Annotation list in frame order.
#[component]
pub fn AnnotationTable(
    rows: Vec<TableRow>,
    on_jump: EventHandler<AnnotationId>,
    on_edit: EventHandler<AnnotationId>,
    on_delete: EventHandler<AnnotationId>,
) -> Element {
    let header_style = format!(
        "text-align: left; padding: 6px 8px; font-size: 10px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px; border-bottom: 1px solid {BORDER_DEFAULT};"
    );
    let cell_style = format!("padding: 6px 8px; font-size: 12px; color: {TEXT_PRIMARY}; border-bottom: 1px solid {BORDER_SUBTLE};");
    let count = rows.len();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; min-height: 0; flex: 1; background-color: {BG_ELEVATED}; border: 1px solid {BORDER_SUBTLE}; border-radius: 6px; overflow: hidden;",
            div {
                style: "display: flex; justify-content: space-between; padding: 8px 12px; background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};",
                span { style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "Annotations" }
                span { style: "font-size: 11px; color: {TEXT_DIM};", "{count}" }
            }
            div {
                style: "flex: 1; overflow-y: auto;",
                if rows.is_empty() {
                    div { style: "padding: 16px; font-size: 12px; color: {TEXT_DIM};", "No annotations yet" }
                } else {
                    table {
                        style: "width: 100%; border-collapse: collapse;",
                        thead {
                            tr {
                                th { style: "{header_style}", "Frame" }
                                th { style: "{header_style}", "Time" }
                                th { style: "{header_style}", "Category" }
                                th { style: "{header_style}", "Annotation" }
                                th { style: "{header_style}", "" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr {
                                    key: "{row.id.0}",
                                    style: "cursor: pointer;",
                                    ondoubleclick: move |_| on_jump.call(row.id),
                                    td { style: "{cell_style} font-family: 'SF Mono', Consolas, monospace;", "{row.frame_number}" }
                                    td { style: "{cell_style} font-family: 'SF Mono', Consolas, monospace;", "{row.time_label}" }
                                    td {
                                        style: "{cell_style}",
                                        span {
                                            style: "display: inline-block; width: 8px; height: 8px; margin-right: 6px; border-radius: 2px; background-color: {row.color};",
                                        }
                                        "{row.category}"
                                    }
                                    td { style: "{cell_style}", "{row.preview}" }
                                    td {
                                        style: "{cell_style} white-space: nowrap;",
                                        div {
                                            style: "display: flex; gap: 4px; justify-content: flex-end;",
                                            RowButton { label: "Jump", on_click: move |_| on_jump.call(row.id) }
                                            RowButton { label: "Edit", on_click: move |_| on_edit.call(row.id) }
                                            RowButton { label: "Delete", on_click: move |_| on_delete.call(row.id) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
