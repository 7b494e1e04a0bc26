//! Row projection for the annotation list and the cursor info line.

use super::{AnnotationId, AnnotationStore, Category};
use crate::utils::{format_timecode, preview_text};

/// One display row of the annotation list.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: AnnotationId,
    pub frame_number: u64,
    pub time_label: String,
    pub category: Category,
    pub color: &'static str,
    pub preview: String,
}

/// Rows in frame order, ties kept in insertion order.
pub fn table_rows(store: &AnnotationStore) -> Vec<TableRow> {
    store
        .project_sorted()
        .into_iter()
        .map(|annotation| TableRow {
            id: annotation.id,
            frame_number: annotation.frame_number,
            time_label: format_timecode(annotation.time_instant),
            category: annotation.category,
            color: annotation.color(),
            preview: preview_text(&annotation.text),
        })
        .collect()
}

pub fn frame_label(current_frame: u64, total_frames: u64) -> String {
    format!("Frame: {} / {}", current_frame, total_frames)
}

pub fn time_label(seconds: f64) -> String {
    format!("Time: {}", format_timecode(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_frame_order() {
        let mut store = AnnotationStore::new();
        store.add(90, 3.0, Category::Event, "Door opens", "").unwrap();
        store.add(15, 0.5, Category::Person, "Enters", "").unwrap();

        let rows = table_rows(&store);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frame_number, 15);
        assert_eq!(rows[0].time_label, "00:00.500");
        assert_eq!(rows[0].color, Category::Person.color());
        assert_eq!(rows[1].time_label, "00:03.000");
        assert_eq!(rows[1].preview, "Door opens");
    }

    #[test]
    fn test_long_text_is_previewed() {
        let mut store = AnnotationStore::new();
        let text = "The quick brown fox jumps over the lazy dog";
        store.add(1, 0.0, Category::Other, text, "").unwrap();
        let rows = table_rows(&store);
        assert_eq!(rows[0].preview, "The quick brown fox jumps over...");
    }

    #[test]
    fn test_info_labels() {
        assert_eq!(frame_label(90, 300), "Frame: 90 / 300");
        assert_eq!(time_label(3.0), "Time: 00:03.000");
    }
}
