//! State management module
//!
//! This module contains the data structures the editor mutates:
//! - Category / Annotation: a categorized label on one frame
//! - AnnotationStore: the in-memory annotation set
//! - VideoCursor: the open video and the playback position
//! - table: row projection for the annotation list
//! - Session: cursor + store + display frame, the entry point for every user action

mod annotation;
mod category;
mod cursor;
mod session;
mod store;
mod table;

pub use annotation::*;
pub use category::*;
pub use cursor::*;
pub use session::*;
pub use store::*;
pub use table::*;
