//! Editing session: one video cursor, one annotation store and the frame on display.
//!
//! Every user-facing operation goes through `Session` so that the cursor, the store and
//! the derived views change together. Each successful mutation bumps `revision` and queues
//! a `SessionEvent` that the shell drains for status text.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::cursor::{PlaybackTick, PlaybackTicket, VideoCursor, VideoInfo};
use super::table::{self, TableRow};
use super::{Annotation, AnnotationId, AnnotationStore, Category};
use crate::config::{AppConfig, DeleteScope};
use crate::core::csv_io::{self, ExportSummary, ImportCounts};
use crate::core::{DisplayFrame, VideoBackend};
use crate::error::{AnnotatorError, Result};
use crate::timeline::{self, DrawOp};
use crate::utils::parse_i64_input;

/// Yes/no prompt raised before destructive operations.
pub trait Confirm {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str, &str) -> bool,
{
    fn confirm(&self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}

/// Result of an operation the user may decline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Applied(T),
    Declined,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    VideoOpened(VideoInfo),
    FrameChanged(u64),
    PlaybackStarted,
    PlaybackStopped,
    AnnotationAdded(AnnotationId),
    AnnotationUpdated(AnnotationId),
    AnnotationsRemoved(usize),
    AnnotationsImported(ImportCounts),
    AnnotationsExported(ExportSummary),
    FpsChanged(u32),
}

impl SessionEvent {
    /// Status bar text for events worth surfacing.
    pub fn status_text(&self) -> Option<String> {
        match self {
            SessionEvent::VideoOpened(info) => Some(format!(
                "Loaded {} ({} frames @ {} fps)",
                info.path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| info.path.display().to_string()),
                info.total_frames,
                info.fps
            )),
            SessionEvent::AnnotationAdded(id) => Some(format!("Added annotation {}", id)),
            SessionEvent::AnnotationUpdated(id) => Some(format!("Updated annotation {}", id)),
            SessionEvent::AnnotationsRemoved(count) => {
                Some(format!("Deleted {} annotation(s)", count))
            }
            SessionEvent::AnnotationsImported(counts) => Some(counts.summary()),
            SessionEvent::AnnotationsExported(summary) => Some(format!(
                "Annotations exported to {}",
                summary.path.display()
            )),
            SessionEvent::FpsChanged(fps) => Some(format!("FPS set to {}", fps)),
            SessionEvent::FrameChanged(_)
            | SessionEvent::PlaybackStarted
            | SessionEvent::PlaybackStopped => None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    cursor: VideoCursor,
    store: AnnotationStore,
    display: Option<DisplayFrame>,
    display_size: (u32, u32),
    delete_scope: DeleteScope,
    revision: u64,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            cursor: VideoCursor::new(config.fallback_fps),
            store: AnnotationStore::new(),
            display: None,
            display_size: (config.display_width, config.display_height),
            delete_scope: config.delete_scope,
            revision: 0,
            events: Vec::new(),
        }
    }

    /// Open a video. On success the store is cleared and frame 0 is displayed.
    pub fn open_video(&mut self, path: &Path, backend: &dyn VideoBackend) -> Result<VideoInfo> {
        self.display = None;
        let opened = self.cursor.open(path, backend);
        self.touch();
        let info = opened?;

        self.store.clear();
        self.refresh_display();
        self.emit(SessionEvent::VideoOpened(info.clone()));
        Ok(info)
    }

    /// Decode the cursor frame into the display. A decode failure keeps the
    /// previous image and reports `false`.
    pub fn refresh_display(&mut self) -> bool {
        let index = self.cursor.current_frame();
        if self.display.as_ref().map(|frame| frame.index) == Some(index) {
            return true;
        }
        match self.cursor.decode_frame(index) {
            Ok(image) => {
                let (width, height) = self.display_size;
                self.display = Some(DisplayFrame::fit(index, image, width, height));
                true
            }
            Err(err) => {
                debug!(index, error = %err, "frame decode failed, keeping previous display");
                false
            }
        }
    }

    pub fn seek(&mut self, frame: u64) -> u64 {
        let was_playing = self.cursor.is_playing();
        let frame = self.cursor.seek(frame);
        self.after_move(was_playing);
        frame
    }

    pub fn step_forward(&mut self) -> u64 {
        let was_playing = self.cursor.is_playing();
        let frame = self.cursor.advance();
        self.after_move(was_playing);
        frame
    }

    pub fn step_backward(&mut self) -> u64 {
        let was_playing = self.cursor.is_playing();
        let frame = self.cursor.retreat();
        self.after_move(was_playing);
        frame
    }

    /// Seek to the frame under a click on the timeline strip.
    pub fn timeline_click(&mut self, x: f64, width: f64) -> Option<u64> {
        let frame = timeline::frame_at_x(x, width, self.cursor.total_frames())?;
        Some(self.seek(frame))
    }

    pub fn jump_to(&mut self, id: AnnotationId) -> Result<u64> {
        let frame = self
            .store
            .get(id)
            .map(|annotation| annotation.frame_number)
            .ok_or(AnnotatorError::NotFound(id))?;
        Ok(self.seek(frame))
    }

    /// Start or stop playback. A returned ticket must drive the new tick loop.
    pub fn toggle_playback(&mut self) -> Option<PlaybackTicket> {
        let was_playing = self.cursor.is_playing();
        let ticket = self.cursor.toggle_playback();
        if was_playing != self.cursor.is_playing() {
            self.emit_playback_change(ticket.is_some());
        }
        ticket
    }

    pub fn pause(&mut self) {
        if self.cursor.is_playing() {
            self.cursor.pause();
            self.emit_playback_change(false);
        }
    }

    /// One step of a playback loop. The loop ends when this returns `Stopped`.
    pub fn playback_tick(&mut self, ticket: PlaybackTicket) -> PlaybackTick {
        let was_playing = self.cursor.is_playing();
        let tick = self.cursor.tick(ticket);
        match tick {
            PlaybackTick::Advanced(frame) => {
                if !self.refresh_display() {
                    self.cursor.pause();
                    self.emit_playback_change(false);
                    return PlaybackTick::Stopped;
                }
                self.emit(SessionEvent::FrameChanged(frame));
            }
            PlaybackTick::Stopped => {
                if was_playing && !self.cursor.is_playing() {
                    self.emit(SessionEvent::PlaybackStopped);
                }
            }
        }
        tick
    }

    /// Apply the fps entry field. Invalid input leaves the current rate in place.
    pub fn set_fps_input(&mut self, input: &str) -> Result<u32> {
        let value = parse_i64_input(input).ok_or_else(|| {
            warn!(input, "fps entry is not an integer");
            AnnotatorError::validation(format!("FPS must be a positive integer (got {:?})", input))
        })?;
        self.cursor.set_fps(value)?;
        let fps = self.cursor.fps();
        self.emit(SessionEvent::FpsChanged(fps));
        Ok(fps)
    }

    /// Annotate the current frame.
    pub fn add_annotation(
        &mut self,
        category: Category,
        text: &str,
        comment: &str,
    ) -> Result<AnnotationId> {
        if !self.cursor.is_open() {
            return Err(AnnotatorError::validation("Please load a video first!"));
        }
        let frame = self.cursor.current_frame();
        let time = self.cursor.current_time();
        let id = self.store.add(frame, time, category, text, comment)?.id;
        self.emit(SessionEvent::AnnotationAdded(id));
        Ok(id)
    }

    pub fn edit_annotation(
        &mut self,
        id: AnnotationId,
        category: Category,
        text: &str,
        comment: &str,
    ) -> Result<()> {
        self.store.update(id, category, text, comment)?;
        self.emit(SessionEvent::AnnotationUpdated(id));
        Ok(())
    }

    /// Delete after confirmation. Depending on the configured scope this removes the
    /// annotation alone or everything on its frame.
    pub fn delete_annotation(
        &mut self,
        id: AnnotationId,
        confirm: &dyn Confirm,
    ) -> Result<Outcome<usize>> {
        let frame = self
            .store
            .get(id)
            .map(|annotation| annotation.frame_number)
            .ok_or(AnnotatorError::NotFound(id))?;

        let message = match self.delete_scope {
            DeleteScope::Annotation => "Are you sure you want to delete this annotation?".to_string(),
            DeleteScope::Frame => format!(
                "Are you sure you want to delete all annotations on frame {}?",
                frame
            ),
        };
        if !confirm.confirm("Confirm Delete", &message) {
            return Ok(Outcome::Declined);
        }

        let removed = match self.delete_scope {
            DeleteScope::Annotation => {
                self.store.delete(id)?;
                1
            }
            DeleteScope::Frame => self.store.delete_frame(frame),
        };
        debug!(%id, frame, removed, "annotations deleted");
        self.emit(SessionEvent::AnnotationsRemoved(removed));
        Ok(Outcome::Applied(removed))
    }

    /// Replace the store with the contents of a CSV file. Asks before discarding
    /// existing annotations.
    pub fn import_csv(&mut self, path: &Path, confirm: &dyn Confirm) -> Result<Outcome<ImportCounts>> {
        if !self.cursor.is_open() {
            return Err(AnnotatorError::validation("Please load a video first!"));
        }
        let report = csv_io::read_annotations(path, self.cursor.total_frames())?;

        if !self.store.is_empty()
            && !confirm.confirm(
                "Confirm",
                "Loading annotations will replace current annotations. Continue?",
            )
        {
            return Ok(Outcome::Declined);
        }

        let counts = report.counts();
        self.store.replace_all(report.records);
        info!(loaded = counts.loaded, skipped = counts.skipped, "annotation set replaced");
        self.emit(SessionEvent::AnnotationsImported(counts));
        Ok(Outcome::Applied(counts))
    }

    pub fn export_csv(&mut self, path: &Path) -> Result<ExportSummary> {
        if self.store.is_empty() {
            return Err(AnnotatorError::validation("No annotations to export"));
        }
        let summary = csv_io::write_annotations(path, self.store.project_sorted())?;
        self.emit(SessionEvent::AnnotationsExported(summary.clone()));
        Ok(summary)
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        table::table_rows(&self.store)
    }

    pub fn timeline_ops(&self, width: f64, height: f64) -> Vec<DrawOp> {
        timeline::render(
            self.store.iter(),
            self.cursor.total_frames(),
            self.cursor.current_frame(),
            width,
            height,
        )
    }

    pub fn frame_label(&self) -> String {
        table::frame_label(self.cursor.current_frame(), self.cursor.total_frames())
    }

    pub fn time_label(&self) -> String {
        table::time_label(self.cursor.current_time())
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.store.get(id)
    }

    pub fn cursor(&self) -> &VideoCursor {
        &self.cursor
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn display(&self) -> Option<&DisplayFrame> {
        self.display.as_ref()
    }

    pub fn video_path(&self) -> Option<PathBuf> {
        self.cursor.path().map(Path::to_path_buf)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_delete_scope(&mut self, scope: DeleteScope) {
        self.delete_scope = scope;
    }

    fn after_move(&mut self, was_playing: bool) {
        self.refresh_display();
        if was_playing && !self.cursor.is_playing() {
            self.emit(SessionEvent::PlaybackStopped);
        }
        self.emit(SessionEvent::FrameChanged(self.cursor.current_frame()));
    }

    fn emit_playback_change(&mut self, started: bool) {
        self.emit(if started {
            SessionEvent::PlaybackStarted
        } else {
            SessionEvent::PlaybackStopped
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        self.touch();
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
