//! Student model.
//!
//! A student is the unit being placed: it carries identity, optional
//! gender, a set of trait tag references, and at most one class
//! assignment. `assigned_class_id = None` means the student sits in the
//! unassigned pool.

use serde::{Deserialize, Serialize};

/// Student gender.
///
/// Serialized lowercase (`"male"` / `"female"`) to match the board's
/// JSON snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A student on the placement board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique student identifier. Immutable once created.
    pub id: String,
    /// Display name. Non-empty after trimming.
    pub name: String,
    /// Gender, if recorded. Omitted from snapshots when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Ids of the trait tags attached to this student.
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Class this student is placed in, or `None` for the unassigned pool.
    ///
    /// Class ids are the numeric strings `"1"..=class_count`.
    #[serde(default)]
    pub assigned_class_id: Option<String>,
}

impl Student {
    /// Creates an unassigned student with no gender and no tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: None,
            tag_ids: Vec::new(),
            assigned_class_id: None,
        }
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets the tag ids.
    pub fn with_tags(mut self, tag_ids: Vec<String>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Places the student in a class.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.assigned_class_id = Some(class_id.into());
        self
    }

    /// Whether the student is placed in any class.
    pub fn is_assigned(&self) -> bool {
        self.assigned_class_id.is_some()
    }

    /// Whether the student is placed in the given class.
    pub fn is_in_class(&self, class_id: &str) -> bool {
        self.assigned_class_id.as_deref() == Some(class_id)
    }

    /// Whether the student carries the given tag.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|t| t == tag_id)
    }
}
