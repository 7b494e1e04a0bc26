//! Annotation timeline
//!
//! Pure mapping between frames and horizontal pixels:
//! - `render`: annotation set + cursor position to draw operations
//! - `frame_at_x`: click position back to a frame index

mod render;

pub use render::{frame_at_x, frame_to_x, render, DrawOp};
