use dioxus::prelude::*;
use video_annotator::constants::*;

/// Playback button
#[component]
pub(crate) fn PlaybackBtn(
    icon: &'static str,
    #[props(default = false)] primary: bool,
    on_click: EventHandler<MouseEvent>,
) -> Element {
    let bg = if primary { BG_HOVER } else { "transparent" };
    rsx! {
        button {
            class: "collapse-btn",
            style: "min-width: 26px; height: 26px; padding: 0 8px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; background-color: {bg}; color: {TEXT_SECONDARY}; font-size: 11px; cursor: pointer; display: flex; align-items: center; justify-content: center; transition: all 0.12s ease;",
            onclick: move |e| on_click.call(e),
            "{icon}"
        }
    }
}

/// Step/play buttons, frame slider and the fps entry.
#[component]
pub fn Transport(
    is_playing: bool,
    current_frame: u64,
    total_frames: u64,
    fps: u32,
    on_step_back: EventHandler<MouseEvent>,
    on_toggle_play: EventHandler<MouseEvent>,
    on_step_forward: EventHandler<MouseEvent>,
    on_seek: EventHandler<u64>,
    on_fps_commit: EventHandler<String>,
) -> Element {
    let mut fps_text = use_signal(|| fps.to_string());
    let mut last_fps = use_signal(|| fps);

    use_effect(move || {
        if fps != last_fps() {
            fps_text.set(fps.to_string());
            last_fps.set(fps);
        }
    });

    // Accepted values come back through the `fps` prop; rejected ones just revert.
    let mut commit_fps = move || {
        on_fps_commit.call(fps_text());
        fps_text.set(last_fps().to_string());
    };

    let slider_max = total_frames.saturating_sub(1);
    let play_label = if is_playing { "Pause" } else { "Play" };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; padding: 10px 0;",
            div {
                style: "display: flex; align-items: center; gap: 6px;",
                PlaybackBtn { icon: "<<", on_click: move |e| on_step_back.call(e) }
                PlaybackBtn { icon: play_label, primary: true, on_click: move |e| on_toggle_play.call(e) }
                PlaybackBtn { icon: ">>", on_click: move |e| on_step_forward.call(e) }
                div { style: "flex: 1;" }
                span { style: "font-size: 11px; color: {TEXT_MUTED};", "FPS" }
                input {
                    r#type: "text",
                    value: "{fps_text}",
                    style: "
                        width: 48px; padding: 4px 6px; font-size: 12px;
                        background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                        outline: none; user-select: text;
                    ",
                    oninput: move |e| fps_text.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        e.stop_propagation();
                        if e.key() == Key::Enter {
                            commit_fps();
                        }
                    },
                    onblur: move |_| {
                        if fps_text() != last_fps().to_string() {
                            commit_fps();
                        }
                    },
                }
            }
            input {
                r#type: "range",
                min: "0",
                max: "{slider_max}",
                value: "{current_frame}",
                disabled: total_frames == 0,
                style: "width: 100%;",
                oninput: move |e| {
                    if let Ok(frame) = e.value().parse::<u64>() {
                        on_seek.call(frame);
                    }
                },
            }
        }
    }
}
