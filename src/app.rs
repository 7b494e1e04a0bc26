//! Root application component
//!
//! Owns the editing `Session` in a signal, wires the components to session
//! operations and drives playback with one async task per started loop.

use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::Path;

use crate::components::{
    frame_data_uri, AnnotationForm, AnnotationTable, EditModal, EditRequest, PreviewPanel,
    StatusBar, TimelineStrip, TitleBar, Transport,
};
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use video_annotator::config::{config_dir, AppConfig};
use video_annotator::constants::*;
use video_annotator::core::FfmpegBackend;
use video_annotator::state::{
    AnnotationId, Category, Outcome, PlaybackTick, PlaybackTicket, Session, VideoInfo,
};
use video_annotator::{AnnotatorError, ErrorKind};

const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "avi", "mov", "mkv", "webm", "m4v"];

#[derive(Debug, Clone, PartialEq, Default)]
struct StatusLine {
    text: String,
    is_error: bool,
}

/// Native yes/no prompt.
fn ask(title: &str, message: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

fn show_error(err: &AnnotatorError) {
    let (title, level) = match err.kind() {
        ErrorKind::Validation => ("Warning", MessageLevel::Warning),
        _ => ("Error", MessageLevel::Error),
    };
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn show_info(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Success")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Move queued session events into the status line.
fn publish_events(mut session: Signal<Session>, mut status: Signal<StatusLine>) {
    let events = session.write().drain_events();
    if let Some(text) = events.iter().rev().find_map(|event| event.status_text()) {
        status.set(StatusLine {
            text,
            is_error: false,
        });
    }
}

fn report_error(mut status: Signal<StatusLine>, err: &AnnotatorError) {
    tracing::warn!(error = %err, kind = ?err.kind(), "operation failed");
    status.set(StatusLine {
        text: err.to_string(),
        is_error: true,
    });
    show_error(err);
}

/// Run one playback loop until the session stops it or the ticket goes stale.
fn spawn_playback(mut session: Signal<Session>, status: Signal<StatusLine>, ticket: PlaybackTicket) {
    spawn(async move {
        loop {
            let interval = session.peek().cursor().tick_interval();
            tokio::time::sleep(interval).await;
            let tick = session.write().playback_tick(ticket);
            publish_events(session, status);
            if tick == PlaybackTick::Stopped {
                break;
            }
        }
    });
}

fn remember_dir(mut config: Signal<AppConfig>, folder: &Path, path: &Path, video: bool) {
    let parent = path.parent().map(Path::to_path_buf);
    {
        let mut config = config.write();
        if video {
            config.last_video_dir = parent;
        } else {
            config.last_annotation_dir = parent;
        }
    }
    if let Err(err) = config.read().save(folder) {
        tracing::warn!(error = %err, "failed to save config");
    }
}

#[component]
pub fn App() -> Element {
    let config_folder = use_hook(config_dir);
    let config = use_signal({
        let folder = config_folder.clone();
        move || match AppConfig::load(&folder) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "config unreadable, using defaults");
                AppConfig::default()
            }
        }
    });
    let mut session = use_signal(|| Session::new(&config.peek()));
    let backend = use_hook(|| FfmpegBackend::new().map_err(|err| err.to_string()));
    let status = use_signal(|| match &backend {
        Ok(_) => StatusLine {
            text: "Ready".to_string(),
            is_error: false,
        },
        Err(reason) => StatusLine {
            text: reason.clone(),
            is_error: true,
        },
    });
    let mut video_info = use_signal(|| None::<VideoInfo>);
    let mut editing = use_signal(|| None::<AnnotationId>);
    let mut form_reset = use_signal(|| 0_u64);

    let (display_width, display_height, timeline_height) = {
        let config = config.read();
        (
            config.display_width,
            config.display_height,
            f64::from(config.timeline_height),
        )
    };
    let timeline_width = f64::from(display_width);

    // Snapshot everything the view needs from the session in one read.
    let (image_src, frame_label, time_label, rows, ops, cursor_state, is_open) = {
        let session = session.read();
        let cursor = session.cursor();
        (
            session.display().and_then(frame_data_uri),
            session.frame_label(),
            session.time_label(),
            session.table_rows(),
            session.timeline_ops(timeline_width, timeline_height),
            cursor.state(),
            cursor.is_open(),
        )
    };
    let video_name = video_info
        .read()
        .as_ref()
        .and_then(|info| info.path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (source_width, source_height) = video_info
        .read()
        .as_ref()
        .map(|info| (info.width, info.height))
        .unwrap_or((0, 0));
    let edit_target = editing().and_then(|id| session.read().annotation(id).cloned());
    let status_line = status();

    let mut toggle_playback = move || {
        let ticket = session.write().toggle_playback();
        publish_events(session, status);
        if let Some(ticket) = ticket {
            spawn_playback(session, status, ticket);
        }
    };
    let mut step_forward = move || {
        session.write().step_forward();
        publish_events(session, status);
    };
    let mut step_backward = move || {
        session.write().step_backward();
        publish_events(session, status);
    };

    let open_video = {
        let folder = config_folder.clone();
        let backend = backend.clone();
        move |_: MouseEvent| {
            let backend = match &backend {
                Ok(backend) => *backend,
                Err(reason) => {
                    report_error(status, &AnnotatorError::validation(reason.clone()));
                    return;
                }
            };
            let mut dialog = rfd::FileDialog::new()
                .set_title("Open Video")
                .add_filter("Video files", &VIDEO_EXTENSIONS)
                .add_filter("All files", &["*"]);
            if let Some(dir) = config.read().last_video_dir.clone() {
                dialog = dialog.set_directory(dir);
            }
            let Some(path) = dialog.pick_file() else {
                return;
            };
            editing.set(None);
            let opened = session.write().open_video(&path, &backend);
            match opened {
                Ok(info) => {
                    video_info.set(Some(info));
                    remember_dir(config, &folder, &path, true);
                    publish_events(session, status);
                }
                Err(err) => {
                    video_info.set(None);
                    session.write().drain_events();
                    report_error(status, &err);
                }
            }
        }
    };

    let load_annotations = {
        let folder = config_folder.clone();
        move |_: MouseEvent| {
            let mut dialog = rfd::FileDialog::new()
                .set_title("Load Annotations")
                .add_filter("CSV files", &["csv"]);
            if let Some(dir) = config.read().last_annotation_dir.clone() {
                dialog = dialog.set_directory(dir);
            }
            let Some(path) = dialog.pick_file() else {
                return;
            };
            let imported = session.write().import_csv(&path, &ask);
            match imported {
                Ok(Outcome::Applied(counts)) => {
                    remember_dir(config, &folder, &path, false);
                    publish_events(session, status);
                    show_info(&counts.summary());
                }
                Ok(Outcome::Declined) => {}
                Err(err) => report_error(status, &err),
            }
        }
    };

    let export = {
        let folder = config_folder.clone();
        move |_: MouseEvent| {
            if session.read().store().is_empty() {
                report_error(status, &AnnotatorError::validation("No annotations to export"));
                return;
            }
            let mut dialog = rfd::FileDialog::new()
                .set_title("Export Annotations")
                .add_filter("CSV files", &["csv"])
                .set_file_name(default_export_name(session.read().video_path().as_deref()));
            if let Some(dir) = config.read().last_annotation_dir.clone() {
                dialog = dialog.set_directory(dir);
            }
            let Some(path) = dialog.save_file() else {
                return;
            };
            let exported = session.write().export_csv(&path);
            match exported {
                Ok(summary) => {
                    remember_dir(config, &folder, &path, false);
                    publish_events(session, status);
                    show_info(&format!("Annotations exported to {}", summary.path.display()));
                }
                Err(err) => report_error(status, &err),
            }
        }
    };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                overflow: hidden; outline: none;
            ",
            tabindex: "0",
            onkeydown: move |e: KeyboardEvent| {
                let context = HotkeyContext {
                    video_loaded: is_open,
                    modal_open: editing().is_some(),
                };
                let modifiers = e.modifiers();
                match handle_hotkey(&e.key(), modifiers.ctrl(), modifiers.alt(), modifiers.meta(), &context) {
                    HotkeyResult::Action(action) => {
                        e.prevent_default();
                        match action {
                            HotkeyAction::PlayPause => toggle_playback(),
                            HotkeyAction::StepForward => step_forward(),
                            HotkeyAction::StepBackward => step_backward(),
                        }
                    }
                    HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
                }
            },

            TitleBar {
                video_name: video_name,
                on_open_video: open_video,
                on_load_annotations: load_annotations,
                on_export: export,
            }

            div {
                style: "flex: 1; display: flex; gap: 16px; padding: 16px; min-height: 0;",

                div {
                    style: "display: flex; flex-direction: column; width: {display_width}px; flex-shrink: 0;",
                    PreviewPanel {
                        image_src: image_src,
                        box_width: display_width,
                        box_height: display_height,
                        source_width: source_width,
                        source_height: source_height,
                        fps: cursor_state.fps,
                    }
                    Transport {
                        is_playing: cursor_state.is_playing,
                        current_frame: cursor_state.current_frame,
                        total_frames: cursor_state.total_frames,
                        fps: cursor_state.fps,
                        on_step_back: move |_| step_backward(),
                        on_toggle_play: move |_| toggle_playback(),
                        on_step_forward: move |_| step_forward(),
                        on_seek: move |frame: u64| {
                            session.write().seek(frame);
                            publish_events(session, status);
                        },
                        on_fps_commit: move |input: String| {
                            let result = session.write().set_fps_input(&input);
                            match result {
                                Ok(_) => publish_events(session, status),
                                Err(err) => tracing::warn!(error = %err, "fps entry rejected"),
                            }
                        },
                    }
                    TimelineStrip {
                        ops: ops,
                        width: timeline_width,
                        height: timeline_height,
                        on_click: move |x: f64| {
                            let seeked = session.write().timeline_click(x, timeline_width);
                            if seeked.is_some() {
                                publish_events(session, status);
                            }
                        },
                    }
                }

                div {
                    style: "flex: 1; display: flex; flex-direction: column; gap: 12px; min-width: 0; min-height: 0;",
                    AnnotationForm {
                        reset_token: form_reset(),
                        on_submit: move |(category, text, comment): (Category, String, String)| {
                            let added = session.write().add_annotation(category, &text, &comment);
                            match added {
                                Ok(_) => {
                                    form_reset += 1;
                                    publish_events(session, status);
                                }
                                Err(err) => report_error(status, &err),
                            }
                        },
                    }
                    AnnotationTable {
                        rows: rows,
                        on_jump: move |id: AnnotationId| {
                            let jumped = session.write().jump_to(id);
                            match jumped {
                                Ok(_) => publish_events(session, status),
                                Err(err) => report_error(status, &err),
                            }
                        },
                        on_edit: move |id: AnnotationId| {
                            session.write().pause();
                            publish_events(session, status);
                            editing.set(Some(id));
                        },
                        on_delete: move |id: AnnotationId| {
                            let deleted = session.write().delete_annotation(id, &ask);
                            match deleted {
                                Ok(_) => publish_events(session, status),
                                Err(err) => report_error(status, &err),
                            }
                        },
                    }
                }
            }

            StatusBar {
                message: status_line.text,
                is_error: status_line.is_error,
                frame_label: frame_label,
                time_label: time_label,
                fps: cursor_state.fps,
            }

            if let Some(annotation) = edit_target {
                EditModal {
                    key: "{annotation.id.0}",
                    annotation: annotation,
                    on_save: move |request: EditRequest| {
                        let updated = session
                            .write()
                            .edit_annotation(request.id, request.category, &request.text, &request.comment);
                        match updated {
                            Ok(()) => {
                                editing.set(None);
                                publish_events(session, status);
                            }
                            Err(err) => report_error(status, &err),
                        }
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }
    }
}

/// `<video stem>_annotations.csv`, or a generic name before a video is open.
fn default_export_name(video: Option<&Path>) -> String {
    video
        .and_then(Path::file_stem)
        .map(|stem| format!("{}_annotations.csv", stem.to_string_lossy()))
        .unwrap_or_else(|| "annotations.csv".to_string())
}
