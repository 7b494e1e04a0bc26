//! UI components grouped by screen area.
mod annotation_form;
mod annotation_table;
mod edit_modal;
mod preview_panel;
mod status_bar;
mod timeline_strip;
mod title_bar;
mod transport;

pub use annotation_form::AnnotationForm;
pub use annotation_table::AnnotationTable;
pub use edit_modal::{EditModal, EditRequest};
pub use preview_panel::{frame_data_uri, PreviewPanel};
pub use status_bar::StatusBar;
pub use timeline_strip::TimelineStrip;
pub use title_bar::TitleBar;
pub use transport::Transport;
