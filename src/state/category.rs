use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    CATEGORY_ACTION_COLOR, CATEGORY_EVENT_COLOR, CATEGORY_OBJECT_COLOR, CATEGORY_OTHER_COLOR,
    CATEGORY_PERSON_COLOR, CATEGORY_SCENE_COLOR,
};

/// Fixed set of annotation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Event,
    Action,
    Object,
    Scene,
    Person,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Event,
        Category::Action,
        Category::Object,
        Category::Scene,
        Category::Person,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Event => "Event",
            Category::Action => "Action",
            Category::Object => "Object",
            Category::Scene => "Scene",
            Category::Person => "Person",
            Category::Other => "Other",
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Category::Event => CATEGORY_EVENT_COLOR,
            Category::Action => CATEGORY_ACTION_COLOR,
            Category::Object => CATEGORY_OBJECT_COLOR,
            Category::Scene => CATEGORY_SCENE_COLOR,
            Category::Person => CATEGORY_PERSON_COLOR,
            Category::Other => CATEGORY_OTHER_COLOR,
        }
    }

    /// Exact, case-sensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// Lookup that never fails: unknown labels become `Other`.
    pub fn from_label_or_other(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label_coerces_to_other() {
        assert_eq!(Category::from_label_or_other("Vehicle"), Category::Other);
        assert_eq!(Category::from_label_or_other("event"), Category::Other);
        assert_eq!(Category::from_label_or_other(""), Category::Other);
        assert_eq!(Category::from_label_or_other("Person"), Category::Person);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Category::Event.color(), "#FF6B6B");
        assert_eq!(Category::Other.color(), "#DDA0DD");
    }
}
