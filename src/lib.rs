//! Video Annotator
//!
//! Core model for frame-accurate manual video annotation:
//! - `state`: annotation store, video cursor, tabular projection and the session tying them together
//! - `core`: video decode seam, display frame fitting and CSV import/export
//! - `timeline`: pure timeline rendering and click-to-seek mapping
//!
//! The desktop shell lives in the binary target behind the `gui` feature.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod logging;
pub mod state;
pub mod timeline;
pub mod utils;

pub use error::{AnnotatorError, ErrorKind, Result};
