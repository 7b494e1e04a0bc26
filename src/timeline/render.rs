use crate::constants::{
    TIMELINE_BACKGROUND, TIMELINE_CURSOR_COLOR, TIMELINE_CURSOR_WIDTH, TIMELINE_MARKER_HALF_WIDTH,
    TIMELINE_MARKER_MARGIN, TIMELINE_MARKER_OUTLINE,
};
use crate::state::{Annotation, AnnotationId};

/// A single drawing primitive in timeline pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Full-viewport background.
    Background {
        width: f64,
        height: f64,
        fill: &'static str,
    },
    /// Annotation marker rectangle from `(x0, y0)` to `(x1, y1)`.
    Marker {
        annotation_id: AnnotationId,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        fill: &'static str,
        outline: &'static str,
    },
    /// Vertical playback cursor line.
    Cursor {
        x: f64,
        height: f64,
        stroke: &'static str,
        stroke_width: f64,
    },
}

/// Map a frame to its horizontal pixel position.
pub fn frame_to_x(frame: u64, total_frames: u64, width: f64) -> f64 {
    (frame as f64 / total_frames as f64) * width
}

/// Build the timeline drawing: background, markers in store order, cursor on top.
/// Returns nothing until there is a video and the viewport has been laid out.
pub fn render<'a, I>(
    annotations: I,
    total_frames: u64,
    current_frame: u64,
    width: f64,
    height: f64,
) -> Vec<DrawOp>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    if total_frames == 0 || width <= 1.0 {
        return Vec::new();
    }

    let mut ops = vec![DrawOp::Background {
        width,
        height,
        fill: TIMELINE_BACKGROUND,
    }];

    for annotation in annotations {
        let x = frame_to_x(annotation.frame_number, total_frames, width);
        ops.push(DrawOp::Marker {
            annotation_id: annotation.id,
            x0: x - TIMELINE_MARKER_HALF_WIDTH,
            y0: TIMELINE_MARKER_MARGIN,
            x1: x + TIMELINE_MARKER_HALF_WIDTH,
            y1: height - TIMELINE_MARKER_MARGIN,
            fill: annotation.color(),
            outline: TIMELINE_MARKER_OUTLINE,
        });
    }

    ops.push(DrawOp::Cursor {
        x: frame_to_x(current_frame, total_frames, width),
        height,
        stroke: TIMELINE_CURSOR_COLOR,
        stroke_width: TIMELINE_CURSOR_WIDTH,
    });

    ops
}

/// Frame under a click at `x`, clamped to the video. `None` for the same
/// degenerate viewports `render` refuses to draw.
pub fn frame_at_x(x: f64, width: f64, total_frames: u64) -> Option<u64> {
    if total_frames == 0 || width <= 1.0 || !x.is_finite() {
        return None;
    }
    let target = ((x / width) * total_frames as f64).floor();
    let last = (total_frames - 1) as f64;
    Some(target.clamp(0.0, last) as u64)
}
