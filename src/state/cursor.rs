//! Video cursor: the open decode resource plus the playback position.

use image::RgbaImage;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_FPS;
use crate::core::{VideoBackend, VideoSource};
use crate::error::{AnnotatorError, Result};

/// Properties reported when a video is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub path: PathBuf,
    pub total_frames: u64,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

/// Observable cursor state, comparable between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub total_frames: u64,
    pub fps: u32,
    pub current_frame: u64,
    pub is_playing: bool,
}

/// Permission for one playback loop to advance the cursor. Any pause, seek,
/// step back or video change invalidates every ticket issued before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTick {
    /// Moved to this frame; schedule the next tick.
    Advanced(u64),
    /// Playback is over (paused, cancelled or at the last frame).
    Stopped,
}

pub struct VideoCursor {
    source: Option<Box<dyn VideoSource>>,
    path: Option<PathBuf>,
    total_frames: u64,
    fps: u32,
    fallback_fps: u32,
    current_frame: u64,
    is_playing: bool,
    generation: u64,
}

impl fmt::Debug for VideoCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoCursor")
            .field("path", &self.path)
            .field("open", &self.source.is_some())
            .field("total_frames", &self.total_frames)
            .field("fps", &self.fps)
            .field("current_frame", &self.current_frame)
            .field("is_playing", &self.is_playing)
            .finish()
    }
}

impl Default for VideoCursor {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl VideoCursor {
    pub fn new(fallback_fps: u32) -> Self {
        let fallback_fps = if fallback_fps == 0 { DEFAULT_FPS } else { fallback_fps };
        Self {
            source: None,
            path: None,
            total_frames: 0,
            fps: fallback_fps,
            fallback_fps,
            current_frame: 0,
            is_playing: false,
            generation: 0,
        }
    }

    /// Open `path`, releasing the current video first.
    pub fn open(&mut self, path: &Path, backend: &dyn VideoBackend) -> Result<VideoInfo> {
        self.release();

        let source = backend.open(path)?;
        let fps = source
            .frame_rate()
            .map(|rate| rate as u32)
            .filter(|fps| *fps > 0)
            .unwrap_or(self.fallback_fps);
        let (width, height) = source.dimensions();

        self.total_frames = source.frame_count();
        self.fps = fps;
        self.current_frame = 0;
        self.is_playing = false;
        self.path = Some(path.to_path_buf());
        self.source = Some(source);

        info!(
            path = %path.display(),
            total_frames = self.total_frames,
            fps,
            "video cursor ready"
        );

        Ok(VideoInfo {
            path: path.to_path_buf(),
            total_frames: self.total_frames,
            fps,
            width,
            height,
        })
    }

    /// Drop the decode resource and reset to the empty state.
    pub fn release(&mut self) {
        self.stop_playback();
        if let Some(source) = self.source.take() {
            drop(source);
            debug!(path = ?self.path, "video released");
        }
        self.path = None;
        self.total_frames = 0;
        self.current_frame = 0;
        self.fps = self.fallback_fps;
    }

    /// Seek the source to `index` and decode that frame.
    pub fn decode_frame(&mut self, index: u64) -> Result<RgbaImage> {
        let source = self.source.as_mut().ok_or_else(|| AnnotatorError::Decode {
            index,
            reason: "no video loaded".to_string(),
        })?;
        source.seek(index)?;
        source.read_frame()?.ok_or_else(|| AnnotatorError::Decode {
            index,
            reason: "end of stream".to_string(),
        })
    }

    /// Step one frame forward. At the last frame this only stops playback.
    pub fn advance(&mut self) -> u64 {
        if self.can_advance() {
            self.current_frame += 1;
        } else {
            self.stop_playback();
        }
        self.current_frame
    }

    /// Step one frame back. Manual navigation always stops playback.
    pub fn retreat(&mut self) -> u64 {
        self.stop_playback();
        if self.current_frame > 0 {
            self.current_frame -= 1;
        }
        self.current_frame
    }

    /// Jump to `index`, clamped to the video. Stops playback.
    pub fn seek(&mut self, index: u64) -> u64 {
        self.stop_playback();
        self.current_frame = index.min(self.last_frame());
        self.current_frame
    }

    pub fn set_fps(&mut self, value: i64) -> Result<()> {
        if value <= 0 || value > i64::from(u32::MAX) {
            warn!(value, fps = self.fps, "rejected frame rate");
            return Err(AnnotatorError::validation(format!(
                "FPS must be a positive integer (got {})",
                value
            )));
        }
        self.fps = value as u32;
        Ok(())
    }

    /// Start playback. Returns `None` if nothing can play or a loop already runs.
    pub fn play(&mut self) -> Option<PlaybackTicket> {
        if self.is_playing || !self.is_open() || !self.can_advance() {
            return None;
        }
        self.is_playing = true;
        self.generation += 1;
        Some(PlaybackTicket {
            generation: self.generation,
        })
    }

    pub fn pause(&mut self) {
        self.stop_playback();
    }

    pub fn toggle_playback(&mut self) -> Option<PlaybackTicket> {
        if self.is_playing {
            self.pause();
            None
        } else {
            self.play()
        }
    }

    /// One playback step for the loop holding `ticket`.
    pub fn tick(&mut self, ticket: PlaybackTicket) -> PlaybackTick {
        if !self.is_playing || ticket.generation != self.generation {
            return PlaybackTick::Stopped;
        }
        if self.can_advance() {
            self.current_frame += 1;
            PlaybackTick::Advanced(self.current_frame)
        } else {
            self.stop_playback();
            PlaybackTick::Stopped
        }
    }

    /// Delay between playback ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn current_time(&self) -> f64 {
        self.current_frame as f64 / f64::from(self.fps.max(1))
    }

    pub fn state(&self) -> CursorState {
        CursorState {
            total_frames: self.total_frames,
            fps: self.fps,
            current_frame: self.current_frame,
            is_playing: self.is_playing,
        }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn last_frame(&self) -> u64 {
        self.total_frames.saturating_sub(1)
    }

    fn can_advance(&self) -> bool {
        self.total_frames > 0 && self.current_frame < self.last_frame()
    }

    fn stop_playback(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            self.generation += 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Synthetic video: frame `i` is a 4x2 image whose red channel is `i % 256`.
    pub(crate) struct FakeSource {
        frames: u64,
        rate: Option<f64>,
        position: u64,
        fail_at: Option<u64>,
        released: Rc<RefCell<u32>>,
    }

    impl VideoSource for FakeSource {
        fn frame_count(&self) -> u64 {
            self.frames
        }

        fn frame_rate(&self) -> Option<f64> {
            self.rate
        }

        fn dimensions(&self) -> (u32, u32) {
            (4, 2)
        }

        fn seek(&mut self, index: u64) -> Result<()> {
            self.position = index;
            Ok(())
        }

        fn read_frame(&mut self) -> Result<Option<RgbaImage>> {
            if Some(self.position) == self.fail_at {
                return Err(AnnotatorError::Decode {
                    index: self.position,
                    reason: "corrupt".into(),
                });
            }
            if self.position >= self.frames {
                return Ok(None);
            }
            let red = (self.position % 256) as u8;
            self.position += 1;
            Ok(Some(RgbaImage::from_pixel(4, 2, Rgba([red, 0, 0, 255]))))
        }
    }

    impl Drop for FakeSource {
        fn drop(&mut self) {
            *self.released.borrow_mut() += 1;
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeBackend {
        pub frames: u64,
        pub rate: Option<f64>,
        pub fail_at: Option<u64>,
        pub released: Rc<RefCell<u32>>,
    }

    impl FakeBackend {
        pub(crate) fn new(frames: u64, rate: Option<f64>) -> Self {
            Self {
                frames,
                rate,
                ..Default::default()
            }
        }
    }

    impl VideoBackend for FakeBackend {
        fn open(&self, path: &Path) -> Result<Box<dyn VideoSource>> {
            if path.to_string_lossy().contains("missing") {
                return Err(AnnotatorError::VideoOpen {
                    path: path.to_path_buf(),
                    reason: "No such file".into(),
                });
            }
            Ok(Box::new(FakeSource {
                frames: self.frames,
                rate: self.rate,
                position: 0,
                fail_at: self.fail_at,
                released: self.released.clone(),
            }))
        }
    }

    fn open_cursor(frames: u64, rate: Option<f64>) -> VideoCursor {
        let mut cursor = VideoCursor::default();
        cursor
            .open(Path::new("clip.mp4"), &FakeBackend::new(frames, rate))
            .unwrap();
        cursor
    }

    #[test]
    fn test_open_reads_properties() {
        let mut cursor = VideoCursor::default();
        let info = cursor
            .open(Path::new("clip.mp4"), &FakeBackend::new(300, Some(29.97)))
            .unwrap();
        assert_eq!(info.total_frames, 300);
        assert_eq!(info.fps, 29);
        assert_eq!(cursor.current_frame(), 0);
        assert!(!cursor.is_playing());
        assert!(cursor.is_open());
    }

    #[test]
    fn test_open_falls_back_to_default_fps() {
        assert_eq!(open_cursor(10, None).fps(), 30);
        assert_eq!(open_cursor(10, Some(0.0)).fps(), 30);
    }

    #[test]
    fn test_open_releases_previous_source_first() {
        let backend = FakeBackend::new(100, Some(25.0));
        let mut cursor = VideoCursor::default();
        cursor.open(Path::new("a.mp4"), &backend).unwrap();
        cursor.seek(40);
        cursor.open(Path::new("b.mp4"), &backend).unwrap();
        assert_eq!(*backend.released.borrow(), 1);
        assert_eq!(cursor.current_frame(), 0);

        let err = cursor.open(Path::new("missing.mp4"), &backend).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert_eq!(*backend.released.borrow(), 2);
        assert!(!cursor.is_open());
        assert_eq!(cursor.total_frames(), 0);
    }

    #[test]
    fn test_seek_clamps_and_is_idempotent() {
        let mut cursor = open_cursor(300, Some(30.0));
        assert_eq!(cursor.seek(1000), 299);
        let once = cursor.state();
        cursor.seek(1000);
        assert_eq!(cursor.state(), once);
        assert_eq!(cursor.seek(12), 12);
    }

    #[test]
    fn test_advance_stops_at_last_frame() {
        let mut cursor = open_cursor(300, Some(30.0));
        cursor.seek(298);
        let ticket = cursor.play().unwrap();
        assert_eq!(cursor.advance(), 299);
        assert!(cursor.is_playing());
        assert_eq!(cursor.advance(), 299);
        assert!(!cursor.is_playing());
        assert_eq!(cursor.tick(ticket), PlaybackTick::Stopped);
    }

    #[test]
    fn test_retreat_stops_playback() {
        let mut cursor = open_cursor(300, Some(30.0));
        cursor.seek(10);
        cursor.play().unwrap();
        assert_eq!(cursor.retreat(), 9);
        assert!(!cursor.is_playing());
        cursor.seek(0);
        assert_eq!(cursor.retreat(), 0);
    }

    #[test]
    fn test_playback_runs_to_end_without_looping() {
        let mut cursor = open_cursor(5, Some(30.0));
        let ticket = cursor.play().unwrap();
        let mut frames = Vec::new();
        while let PlaybackTick::Advanced(frame) = cursor.tick(ticket) {
            frames.push(frame);
        }
        assert_eq!(frames, vec![1, 2, 3, 4]);
        assert!(!cursor.is_playing());
        assert_eq!(cursor.current_frame(), 4);
        assert!(cursor.play().is_none());
    }

    #[test]
    fn test_seek_cancels_scheduled_tick() {
        let mut cursor = open_cursor(300, Some(30.0));
        let ticket = cursor.play().unwrap();
        assert_eq!(cursor.tick(ticket), PlaybackTick::Advanced(1));
        cursor.seek(100);
        assert_eq!(cursor.tick(ticket), PlaybackTick::Stopped);
        assert_eq!(cursor.current_frame(), 100);

        // A new loop does not revive the old ticket.
        let fresh = cursor.play().unwrap();
        assert_eq!(cursor.tick(ticket), PlaybackTick::Stopped);
        assert_eq!(cursor.tick(fresh), PlaybackTick::Advanced(101));
    }

    #[test]
    fn test_play_twice_does_not_start_second_loop() {
        let mut cursor = open_cursor(300, Some(30.0));
        assert!(cursor.play().is_some());
        assert!(cursor.play().is_none());
        assert!(cursor.toggle_playback().is_none());
        assert!(!cursor.is_playing());
    }

    #[test]
    fn test_set_fps_validation() {
        let mut cursor = open_cursor(300, Some(30.0));
        cursor.seek(90);
        assert_eq!(cursor.current_time(), 3.0);
        cursor.set_fps(60).unwrap();
        assert_eq!(cursor.current_time(), 1.5);
        assert_eq!(cursor.tick_interval(), Duration::from_millis(16));
        assert!(cursor.set_fps(0).is_err());
        assert!(cursor.set_fps(-5).is_err());
        assert_eq!(cursor.fps(), 60);
    }

    #[test]
    fn test_decode_frame() {
        let mut cursor = open_cursor(300, Some(30.0));
        let image = cursor.decode_frame(7).unwrap();
        assert_eq!(image.get_pixel(0, 0).0[0], 7);
        assert!(cursor.decode_frame(300).is_err());
    }

    #[test]
    fn test_empty_video_is_inert() {
        let mut cursor = open_cursor(0, Some(30.0));
        assert_eq!(cursor.seek(10), 0);
        assert_eq!(cursor.advance(), 0);
        assert!(cursor.play().is_none());
    }
}
