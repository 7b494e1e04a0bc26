//! In-memory annotation collection.

use tracing::debug;

use super::{Annotation, AnnotationId, AnnotationRecord, Category};
use crate::error::{AnnotatorError, Result};

/// Annotations in insertion order, with ids drawn from a counter that only grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation. The text is trimmed and must not be empty.
    pub fn add(
        &mut self,
        frame_number: u64,
        time_instant: f64,
        category: Category,
        text: &str,
        comment: &str,
    ) -> Result<&Annotation> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnnotatorError::validation("Please enter an annotation!"));
        }

        let id = self.allocate_id();
        self.annotations.push(Annotation {
            id,
            frame_number,
            time_instant,
            category,
            text: text.to_string(),
            comment: comment.trim().to_string(),
        });
        debug!(%id, frame_number, "annotation added");
        Ok(&self.annotations[self.annotations.len() - 1])
    }

    pub fn update(
        &mut self,
        id: AnnotationId,
        category: Category,
        text: &str,
        comment: &str,
    ) -> Result<&Annotation> {
        let annotation = self
            .annotations
            .iter_mut()
            .find(|annotation| annotation.id == id)
            .ok_or(AnnotatorError::NotFound(id))?;
        annotation.category = category;
        annotation.text = text.trim().to_string();
        annotation.comment = comment.trim().to_string();
        debug!(%id, "annotation updated");
        Ok(&*annotation)
    }

    /// Remove a single annotation by id.
    pub fn delete(&mut self, id: AnnotationId) -> Result<Annotation> {
        let index = self
            .annotations
            .iter()
            .position(|annotation| annotation.id == id)
            .ok_or(AnnotatorError::NotFound(id))?;
        Ok(self.annotations.remove(index))
    }

    /// Remove every annotation on `frame_number`, returning how many were dropped.
    pub fn delete_frame(&mut self, frame_number: u64) -> usize {
        let before = self.annotations.len();
        self.annotations
            .retain(|annotation| annotation.frame_number != frame_number);
        before - self.annotations.len()
    }

    /// Swap the whole set in one step. Every record receives a fresh id.
    pub fn replace_all(&mut self, records: Vec<AnnotationRecord>) {
        let mut replacement = Vec::with_capacity(records.len());
        for record in records {
            let id = self.allocate_id();
            replacement.push(record.into_annotation(id));
        }
        self.annotations = replacement;
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Annotations ordered by frame, keeping insertion order for equal frames.
    pub fn project_sorted(&self) -> Vec<&Annotation> {
        let mut sorted: Vec<&Annotation> = self.annotations.iter().collect();
        sorted.sort_by_key(|annotation| annotation.frame_number);
        sorted
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.id == id)
    }

    pub fn at_frame(&self, frame_number: u64) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.frame_number == frame_number)
    }

    /// Annotations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn allocate_id(&mut self) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn record(frame_number: u64, text: &str) -> AnnotationRecord {
        AnnotationRecord {
            frame_number,
            time_instant: frame_number as f64 / 30.0,
            category: Category::Event,
            text: text.to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let mut store = AnnotationStore::new();
        let err = store.add(3, 0.1, Category::Event, "   ", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_trims_and_assigns_ids() {
        let mut store = AnnotationStore::new();
        let first = store.add(90, 3.0, Category::Event, "  Door opens ", "").unwrap().id;
        let second = store.add(10, 0.33, Category::Person, "Walks in", "left side").unwrap().id;
        assert_ne!(first, second);
        assert_eq!(store.get(first).unwrap().text, "Door opens");
        assert_eq!(store.get(second).unwrap().comment, "left side");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = AnnotationStore::new();
        let a = store.add(1, 0.0, Category::Event, "a", "").unwrap().id;
        let b = store.add(2, 0.0, Category::Event, "b", "").unwrap().id;
        store.delete(a).unwrap();
        let c = store.add(3, 0.0, Category::Event, "c", "").unwrap().id;
        assert!(c > b);
        assert_ne!(c, a);
    }

    #[test]
    fn test_project_sorted_is_stable() {
        let mut store = AnnotationStore::new();
        store.add(50, 0.0, Category::Event, "late", "").unwrap();
        store.add(10, 0.0, Category::Event, "first tie", "").unwrap();
        store.add(30, 0.0, Category::Event, "middle", "").unwrap();
        store.add(10, 0.0, Category::Event, "second tie", "").unwrap();

        let texts: Vec<&str> = store
            .project_sorted()
            .into_iter()
            .map(|annotation| annotation.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first tie", "second tie", "middle", "late"]);
        // Store order itself is untouched.
        assert_eq!(store.as_slice()[0].text, "late");
    }

    #[test]
    fn test_update_changes_category_and_color() {
        let mut store = AnnotationStore::new();
        let id = store.add(5, 0.0, Category::Event, "x", "").unwrap().id;
        let updated = store.update(id, Category::Scene, "y", " note ").unwrap();
        assert_eq!(updated.color(), Category::Scene.color());
        assert_eq!(updated.text, "y");
        assert_eq!(updated.comment, "note");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = AnnotationStore::new();
        let err = store
            .update(AnnotationId(42), Category::Other, "x", "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_is_id_scoped() {
        let mut store = AnnotationStore::new();
        let a = store.add(7, 0.0, Category::Event, "a", "").unwrap().id;
        store.add(7, 0.0, Category::Action, "b", "").unwrap();
        store.delete(a).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.at_frame(7).count(), 1);
        assert!(store.delete(a).is_err());
    }

    #[test]
    fn test_delete_frame_removes_all_on_frame() {
        let mut store = AnnotationStore::new();
        store.add(7, 0.0, Category::Event, "a", "").unwrap();
        store.add(7, 0.0, Category::Action, "b", "").unwrap();
        store.add(8, 0.0, Category::Action, "c", "").unwrap();
        assert_eq!(store.delete_frame(7), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.delete_frame(7), 0);
    }

    #[test]
    fn test_add_then_delete_restores_set() {
        let mut store = AnnotationStore::new();
        store.add(1, 0.0, Category::Event, "a", "").unwrap();
        store.add(2, 0.0, Category::Event, "b", "").unwrap();
        let before = store.as_slice().to_vec();

        let id = store.add(2, 0.0, Category::Other, "temp", "").unwrap().id;
        store.delete(id).unwrap();
        assert_eq!(store.as_slice(), before.as_slice());
    }

    #[test]
    fn test_replace_all_assigns_fresh_ids() {
        let mut store = AnnotationStore::new();
        let old = store.add(1, 0.0, Category::Event, "old", "").unwrap().id;
        store.replace_all(vec![record(4, "x"), record(2, "y")]);

        assert_eq!(store.len(), 2);
        assert!(store.get(old).is_none());
        assert!(store.iter().all(|annotation| annotation.id > old));
        assert_eq!(store.as_slice()[0].text, "x");
    }
}
