//! Decode seam between the cursor and a concrete video library.

use image::RgbaImage;
use std::path::Path;

use crate::error::Result;

/// An open, read-only video resource. Dropping it releases the resource.
pub trait VideoSource {
    /// Total number of frames, 0 if unknown.
    fn frame_count(&self) -> u64;

    /// Native frame rate, `None` if the container does not report one.
    fn frame_rate(&self) -> Option<f64>;

    /// Source dimensions in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Position the stream so the next `read_frame` returns frame `index`.
    fn seek(&mut self, index: u64) -> Result<()>;

    /// Decode the next frame as RGBA. `Ok(None)` signals end of stream.
    fn read_frame(&mut self) -> Result<Option<RgbaImage>>;
}

/// Opens video resources.
pub trait VideoBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoSource>>;
}
