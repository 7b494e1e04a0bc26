//! End-to-end editing scenarios against a synthetic video.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;

use video_annotator::config::AppConfig;
use video_annotator::core::{VideoBackend, VideoSource};
use video_annotator::state::{Category, Outcome, PlaybackTick, Session};
use video_annotator::{AnnotatorError, ErrorKind, Result};

struct SyntheticVideo {
    frames: u64,
    position: u64,
    broken_frame: Option<u64>,
}

impl VideoSource for SyntheticVideo {
    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn frame_rate(&self) -> Option<f64> {
        Some(30.0)
    }

    fn dimensions(&self) -> (u32, u32) {
        (1920, 1080)
    }

    fn seek(&mut self, index: u64) -> Result<()> {
        self.position = index;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<RgbaImage>> {
        if Some(self.position) == self.broken_frame {
            return Err(AnnotatorError::Decode {
                index: self.position,
                reason: "invalid data found when processing input".into(),
            });
        }
        if self.position >= self.frames {
            return Ok(None);
        }
        self.position += 1;
        Ok(Some(RgbaImage::from_pixel(192, 108, Rgba([0, 0, 0, 255]))))
    }
}

struct SyntheticBackend {
    frames: u64,
    broken_frame: Option<u64>,
}

impl VideoBackend for SyntheticBackend {
    fn open(&self, _path: &Path) -> Result<Box<dyn VideoSource>> {
        Ok(Box::new(SyntheticVideo {
            frames: self.frames,
            position: 0,
            broken_frame: self.broken_frame,
        }))
    }
}

fn session_with_video(frames: u64) -> Session {
    let mut session = Session::new(&AppConfig::default());
    let backend = SyntheticBackend {
        frames,
        broken_frame: None,
    };
    session
        .open_video(Path::new("interview.mp4"), &backend)
        .unwrap();
    session
}

fn accept(_: &str, _: &str) -> bool {
    true
}

#[test]
fn test_annotate_and_export_single_row() {
    let mut session = session_with_video(300);
    assert_eq!(session.cursor().fps(), 30);
    let display = session.display().unwrap();
    assert_eq!((display.width(), display.height()), (640, 360));

    session.seek(90);
    session
        .add_annotation(Category::Event, "Door opens", "")
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotations.csv");
    let summary = session.export_csv(&path).unwrap();
    assert_eq!(summary.rows, 1);

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Frame Number,Time Instant (s),Annotation,Comment,Category",
            "90,3.0,Door opens,,Event",
        ]
    );
}

#[test]
fn test_advance_at_last_frame_stops() {
    let mut session = session_with_video(300);
    session.seek(299);
    session.toggle_playback();
    assert_eq!(session.step_forward(), 299);
    assert!(!session.cursor().is_playing());
}

#[test]
fn test_seek_beyond_end_is_idempotent() {
    let mut session = session_with_video(300);
    session.seek(1000);
    let first = session.cursor().state();
    session.seek(1000);
    assert_eq!(session.cursor().state(), first);
    assert_eq!(first.current_frame, 299);
}

#[test]
fn test_import_skips_out_of_range_and_coerces_category() {
    let mut session = session_with_video(100);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incoming.csv");
    fs::write(
        &path,
        "Frame Number,Time Instant (s),Annotation,Comment,Category\n\
         10,0.333,Kept,,Scene\n\
         150,5.0,Too late,,Event\n\
         20,0.667,Odd label,,Banana\n",
    )
    .unwrap();

    let outcome = session.import_csv(&path, &accept).unwrap();
    let Outcome::Applied(counts) = outcome else {
        panic!("import was declined");
    };
    assert_eq!((counts.loaded, counts.skipped), (2, 1));

    let rows = session.table_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, Category::Scene);
    assert_eq!(rows[1].category, Category::Other);
    assert_eq!(rows[1].color, "#DDA0DD");
}

#[test]
fn test_import_rejects_missing_columns() {
    let mut session = session_with_video(100);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "Frame Number,Annotation\n1,hello\n").unwrap();

    let err = session.import_csv(&path, &accept).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Time Instant (s)"));
    assert!(session.store().is_empty());
}

#[test]
fn test_export_import_round_trip() {
    let mut session = session_with_video(300);
    session.seek(200);
    session
        .add_annotation(Category::Action, "Runs, then stops", "says \"hi\"")
        .unwrap();
    session.seek(15);
    session
        .add_annotation(Category::Person, "Enters", "")
        .unwrap();
    session.seek(200);
    session
        .add_annotation(Category::Object, "Ball", "second on frame")
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.csv");
    session.export_csv(&path).unwrap();

    let mut reloaded = session_with_video(300);
    reloaded.import_csv(&path, &accept).unwrap();

    let original: Vec<_> = session
        .store()
        .project_sorted()
        .into_iter()
        .map(|annotation| {
            (
                annotation.frame_number,
                annotation.category,
                annotation.text.clone(),
                annotation.comment.clone(),
            )
        })
        .collect();
    let restored: Vec<_> = reloaded
        .store()
        .project_sorted()
        .into_iter()
        .map(|annotation| {
            (
                annotation.frame_number,
                annotation.category,
                annotation.text.clone(),
                annotation.comment.clone(),
            )
        })
        .collect();
    assert_eq!(original, restored);

    let times: Vec<f64> = reloaded
        .store()
        .project_sorted()
        .into_iter()
        .map(|annotation| annotation.time_instant)
        .collect();
    assert_eq!(times, vec![0.5, 6.667, 6.667]);
}

#[test]
fn test_seek_during_playback_cancels_scheduled_tick() {
    let mut session = session_with_video(300);
    let ticket = session.toggle_playback().unwrap();
    assert_eq!(session.playback_tick(ticket), PlaybackTick::Advanced(1));

    session.seek(100);
    assert_eq!(session.playback_tick(ticket), PlaybackTick::Stopped);
    assert_eq!(session.cursor().current_frame(), 100);
    assert!(!session.cursor().is_playing());
}

#[test]
fn test_timeline_follows_annotations_and_cursor() {
    let mut session = session_with_video(300);
    session.seek(150);
    session.add_annotation(Category::Scene, "Cut", "").unwrap();
    let ops = session.timeline_ops(500.0, 60.0);
    assert_eq!(ops.len(), 3);
    assert!(session.timeline_ops(1.0, 60.0).is_empty());
}

#[test]
fn test_failed_decode_keeps_display() {
    let mut session = Session::new(&AppConfig::default());
    let backend = SyntheticBackend {
        frames: 300,
        broken_frame: Some(42),
    };
    session.open_video(Path::new("broken.mp4"), &backend).unwrap();
    session.seek(41);
    session.seek(42);
    assert_eq!(session.cursor().current_frame(), 42);
    assert_eq!(session.display().map(|frame| frame.index), Some(41));
}
