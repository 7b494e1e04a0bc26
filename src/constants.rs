//! Shared constants: UI colors, category palette, timeline geometry and display defaults.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_ERROR: &str = "#ef4444";
pub const ACCENT_OK: &str = "#22c55e";

pub const CATEGORY_EVENT_COLOR: &str = "#FF6B6B";
pub const CATEGORY_ACTION_COLOR: &str = "#4ECDC4";
pub const CATEGORY_OBJECT_COLOR: &str = "#45B7D1";
pub const CATEGORY_SCENE_COLOR: &str = "#96CEB4";
pub const CATEGORY_PERSON_COLOR: &str = "#FFEAA7";
pub const CATEGORY_OTHER_COLOR: &str = "#DDA0DD";

pub const TIMELINE_BACKGROUND: &str = "lightgray";
pub const TIMELINE_MARKER_OUTLINE: &str = "black";
pub const TIMELINE_CURSOR_COLOR: &str = "red";
/// Half width of an annotation marker in pixels.
pub const TIMELINE_MARKER_HALF_WIDTH: f64 = 2.0;
/// Vertical inset of annotation markers from the top and bottom edges.
pub const TIMELINE_MARKER_MARGIN: f64 = 10.0;
pub const TIMELINE_CURSOR_WIDTH: f64 = 3.0;

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_DISPLAY_WIDTH: u32 = 640;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 480;
pub const DEFAULT_TIMELINE_HEIGHT: u32 = 60;

/// Characters of annotation text shown in the table before truncation.
pub const TABLE_PREVIEW_CHARS: usize = 30;

pub const CSV_FRAME_NUMBER: &str = "Frame Number";
pub const CSV_TIME_INSTANT: &str = "Time Instant (s)";
pub const CSV_ANNOTATION: &str = "Annotation";
pub const CSV_COMMENT: &str = "Comment";
pub const CSV_CATEGORY: &str = "Category";

/// Required CSV columns, in export order.
pub const CSV_COLUMNS: [&str; 5] = [
    CSV_FRAME_NUMBER,
    CSV_TIME_INSTANT,
    CSV_ANNOTATION,
    CSV_COMMENT,
    CSV_CATEGORY,
];
