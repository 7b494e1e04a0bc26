//! Hotkey system
//!
//! Centralized hotkey management for the annotator window.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines which hotkeys are active based on app state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions
//!
//! # Adding New Hotkeys
//!
//! 1. Add a variant to `HotkeyAction`
//! 2. Add the key binding in `handle_hotkey()`
//! 3. Handle the action in the App component's hotkey handler

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback.
    PlayPause,
    /// Show the next frame.
    StepForward,
    /// Show the previous frame.
    StepBackward,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a video is open
    pub video_loaded: bool,
    /// Whether a modal dialog is showing (suppresses transport keys)
    pub modal_open: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., modal open)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// Modified keys never match: Ctrl/Alt/Meta chords are left to the webview.
pub fn handle_hotkey(
    key: &Key,
    ctrl: bool,
    alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    if ctrl || alt || meta {
        return HotkeyResult::NoMatch;
    }

    let action = match key {
        Key::Character(c) if c == " " => HotkeyAction::PlayPause,
        Key::ArrowRight => HotkeyAction::StepForward,
        Key::ArrowLeft => HotkeyAction::StepBackward,
        _ => return HotkeyResult::NoMatch,
    };

    if context.modal_open || !context.video_loaded {
        return HotkeyResult::Suppressed;
    }
    HotkeyResult::Action(action)
}
