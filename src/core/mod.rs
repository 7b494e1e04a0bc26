pub mod csv_io;
pub mod frame;
pub mod video_source;
#[cfg(feature = "ffmpeg")]
mod video_decode;

pub use frame::{fit_to_box, DisplayFrame};
pub use video_source::{VideoBackend, VideoSource};
#[cfg(feature = "ffmpeg")]
pub use video_decode::FfmpegBackend;
