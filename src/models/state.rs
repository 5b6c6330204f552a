//! Board snapshot and settings.
//!
//! `AppState` is the complete board at one instant: the two scalar
//! settings plus every student, tag, and separation rule. It is the unit
//! of undo/redo, persistence, and import/export. Classes are not stored
//! as entities — class `"k"` is simply the set of students whose
//! `assigned_class_id` equals `"k"`.

use serde::{Deserialize, Serialize};

use super::{builtin_tags, SeparationRule, Student, TagDefinition};

/// Default number of classes on a fresh board.
pub const DEFAULT_CLASS_COUNT: u32 = 3;

/// School level setting.
///
/// Drives the per-class capacity used by sample generation. Serialized
/// as `"ELEMENTARY_MIDDLE"` / `"HIGH"` to match existing snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolLevel {
    ElementaryMiddle,
    High,
}

impl SchoolLevel {
    /// Statutory per-class capacity for this school level.
    ///
    /// Advisory only: manual placement may exceed it, sample generation
    /// fills classes to exactly this size.
    pub fn capacity_per_class(self) -> u32 {
        match self {
            SchoolLevel::ElementaryMiddle => 6,
            SchoolLevel::High => 7,
        }
    }

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            SchoolLevel::ElementaryMiddle => "초/중학교",
            SchoolLevel::High => "고등학교",
        }
    }
}

impl Default for SchoolLevel {
    fn default() -> Self {
        SchoolLevel::ElementaryMiddle
    }
}

/// A complete board snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// School level (capacity policy input).
    pub school_level: SchoolLevel,
    /// Number of classes displayed, ids `"1"..=class_count`.
    pub class_count: u32,
    /// All students, assigned or not.
    pub students: Vec<Student>,
    /// Tag definitions students may reference.
    pub tags: Vec<TagDefinition>,
    /// Active separation rules.
    pub separation_rules: Vec<SeparationRule>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            school_level: SchoolLevel::default(),
            class_count: DEFAULT_CLASS_COUNT,
            students: Vec::new(),
            tags: builtin_tags(),
            separation_rules: Vec::new(),
        }
    }
}

impl AppState {
    /// Class ids currently displayed: `"1"` through `class_count`.
    pub fn class_ids(&self) -> Vec<String> {
        (1..=self.class_count).map(|i| i.to_string()).collect()
    }

    /// Students placed in the given class.
    pub fn students_in_class(&self, class_id: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.is_in_class(class_id))
            .collect()
    }

    /// Students in the unassigned pool.
    pub fn unassigned_students(&self) -> Vec<&Student> {
        self.students.iter().filter(|s| !s.is_assigned()).collect()
    }

    /// Looks up a student by id.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Looks up a tag by id.
    pub fn tag(&self, id: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Students whose assigned class id falls outside `1..=class_count`.
    ///
    /// These appear after `class_count` is reduced below an occupied
    /// class; they stay assigned but are no longer displayed anywhere.
    pub fn orphaned_students(&self) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| match &s.assigned_class_id {
                None => false,
                Some(cid) => !matches!(
                    cid.parse::<u32>(),
                    Ok(n) if n >= 1 && n <= self.class_count
                ),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_default_state() {
        let s = AppState::default();
        assert_eq!(s.school_level, SchoolLevel::ElementaryMiddle);
        assert_eq!(s.class_count, 3);
        assert!(s.students.is_empty());
        assert_eq!(s.tags.len(), 8);
        assert!(s.separation_rules.is_empty());
        assert_eq!(s.class_ids(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_capacity_policy() {
        assert_eq!(SchoolLevel::ElementaryMiddle.capacity_per_class(), 6);
        assert_eq!(SchoolLevel::High.capacity_per_class(), 7);
    }

    #[test]
    fn test_class_membership_queries() {
        let mut s = AppState::default();
        s.students.push(Student::new("a", "가").with_class("1"));
        s.students.push(Student::new("b", "나").with_class("1"));
        s.students.push(Student::new("c", "다").with_class("2"));
        s.students.push(Student::new("d", "라"));

        assert_eq!(s.students_in_class("1").len(), 2);
        assert_eq!(s.students_in_class("2").len(), 1);
        assert_eq!(s.students_in_class("3").len(), 0);
        assert_eq!(s.unassigned_students().len(), 1);
        assert_eq!(s.student("c").unwrap().name, "다");
        assert!(s.student("z").is_none());
    }

    #[test]
    fn test_orphaned_students_after_shrink() {
        let mut s = AppState::default();
        s.students.push(Student::new("a", "가").with_class("3"));
        s.students.push(Student::new("b", "나").with_class("1"));
        assert!(s.orphaned_students().is_empty());

        s.class_count = 2;
        let orphans = s.orphaned_students();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, "a");
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut s = AppState::default();
        s.students
            .push(Student::new("s1", "김민준").with_gender(Gender::Male));

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["schoolLevel"], "ELEMENTARY_MIDDLE");
        assert_eq!(json["classCount"], 3);
        assert!(json["separationRules"].as_array().unwrap().is_empty());
        assert_eq!(json["students"][0]["assignedClassId"], serde_json::Value::Null);

        let back: AppState = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
