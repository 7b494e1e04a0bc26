use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// Store-assigned annotation identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A timestamped, categorized label attached to one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub frame_number: u64,
    /// Seconds, fixed at creation time
    pub time_instant: f64,
    pub category: Category,
    pub text: String,
    pub comment: String,
}

impl Annotation {
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// Annotation content before the store has assigned an id (import rows, store swaps).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub frame_number: u64,
    pub time_instant: f64,
    pub category: Category,
    pub text: String,
    pub comment: String,
}

impl AnnotationRecord {
    pub(crate) fn into_annotation(self, id: AnnotationId) -> Annotation {
        Annotation {
            id,
            frame_number: self.frame_number,
            time_instant: self.time_instant,
            category: self.category,
            text: self.text,
            comment: self.comment,
        }
    }
}
