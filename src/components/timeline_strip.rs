use dioxus::prelude::*;
use video_annotator::constants::*;
use video_annotator::timeline::DrawOp;

/// SVG rendition of the timeline draw list. Clicking reports the x offset
/// inside the strip.
#[component]
pub fn TimelineStrip(ops: Vec<DrawOp>, width: f64, height: f64, on_click: EventHandler<f64>) -> Element {
    rsx! {
        div {
            style: "width: {width}px; height: {height}px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; overflow: hidden; background-color: {BG_BASE}; cursor: pointer;",
            onclick: move |e: MouseEvent| on_click.call(e.element_coordinates().x),
            svg {
                width: "{width}",
                height: "{height}",
                view_box: "0 0 {width} {height}",
                style: "display: block; pointer-events: none;",
                for (index, op) in ops.into_iter().enumerate() {
                    match op {
                        DrawOp::Background { width, height, fill } => rsx! {
                            rect { key: "{index}", x: "0", y: "0", width: "{width}", height: "{height}", fill: "{fill}" }
                        },
                        DrawOp::Marker { annotation_id, x0, y0, x1, y1, fill, outline } => {
                            let marker_width = x1 - x0;
                            let marker_height = y1 - y0;
                            rsx! {
                                rect {
                                    key: "marker-{annotation_id.0}",
                                    x: "{x0}",
                                    y: "{y0}",
                                    width: "{marker_width}",
                                    height: "{marker_height}",
                                    fill: "{fill}",
                                    stroke: "{outline}",
                                    stroke_width: "1",
                                }
                            }
                        }
                        DrawOp::Cursor { x, height, stroke, stroke_width } => rsx! {
                            line {
                                key: "{index}",
                                x1: "{x}",
                                y1: "0",
                                x2: "{x}",
                                y2: "{height}",
                                stroke: "{stroke}",
                                stroke_width: "{stroke_width}",
                            }
                        },
                    }
                }
            }
        }
    }
}
