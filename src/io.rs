//! Snapshot import/export.
//!
//! A board snapshot travels as one JSON blob — the same shape for the
//! persistence record, project export, and project import. Import is
//! all-or-nothing: the payload either validates into a complete
//! [`AppState`] or is rejected without touching anything. `students`
//! and `tags` are required; `schoolLevel`, `classCount`, and
//! `separationRules` are backfilled with defaults when a partial or
//! older snapshot omits them.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    AppState, SchoolLevel, SeparationRule, Student, TagDefinition, DEFAULT_CLASS_COUNT,
};

/// Well-known key the persistence collaborator stores the snapshot under.
pub const STORAGE_KEY: &str = "classHelperData";

/// A rejected import. The in-memory board is untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Payload is not valid JSON or fields have the wrong shape.
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload parsed but lacks a required section.
    #[error("invalid snapshot format: missing {missing}")]
    InvalidFormat { missing: &'static str },
}

/// Shadow of [`AppState`] with every field optional, for validating
/// untrusted payloads before committing to the typed state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    school_level: Option<SchoolLevel>,
    class_count: Option<u32>,
    students: Option<Vec<Student>>,
    tags: Option<Vec<TagDefinition>>,
    separation_rules: Option<Vec<SeparationRule>>,
}

/// Serializes a snapshot as pretty-printed JSON.
pub fn to_json(state: &AppState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// Parses and validates a snapshot.
///
/// Rejects unparsable payloads and payloads missing `students` or
/// `tags`; backfills school level, class count, and rules with defaults.
pub fn from_json(payload: &str) -> Result<AppState, ImportError> {
    let raw: RawSnapshot = serde_json::from_str(payload)?;

    let students = raw
        .students
        .ok_or(ImportError::InvalidFormat { missing: "students" })?;
    let tags = raw
        .tags
        .ok_or(ImportError::InvalidFormat { missing: "tags" })?;

    Ok(AppState {
        school_level: raw.school_level.unwrap_or_default(),
        class_count: raw.class_count.unwrap_or(DEFAULT_CLASS_COUNT).max(1),
        students,
        tags,
        separation_rules: raw.separation_rules.unwrap_or_default(),
    })
}

/// Fallback state for a persistence record that is absent or unusable:
/// empty roster, built-in tags, default settings.
pub fn default_state() -> AppState {
    AppState::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Student};

    #[test]
    fn test_export_import_roundtrip() {
        let mut state = AppState::default();
        state.school_level = SchoolLevel::High;
        state.class_count = 4;
        state.students.push(
            Student::new("s1", "김민준")
                .with_gender(Gender::Male)
                .with_tags(vec!["aggression".into()])
                .with_class("2"),
        );
        state
            .separation_rules
            .push(SeparationRule::new("r1", vec!["s1".into(), "s2".into()]));

        let json = to_json(&state).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_import_requires_students_and_tags() {
        let no_students = r#"{"tags": []}"#;
        assert!(matches!(
            from_json(no_students),
            Err(ImportError::InvalidFormat { missing: "students" })
        ));

        let no_tags = r#"{"students": []}"#;
        assert!(matches!(
            from_json(no_tags),
            Err(ImportError::InvalidFormat { missing: "tags" })
        ));
    }

    #[test]
    fn test_import_backfills_defaults() {
        let partial = r#"{
            "students": [{"id": "s1", "name": "김민준"}],
            "tags": []
        }"#;
        let state = from_json(partial).unwrap();

        assert_eq!(state.school_level, SchoolLevel::ElementaryMiddle);
        assert_eq!(state.class_count, DEFAULT_CLASS_COUNT);
        assert!(state.separation_rules.is_empty());
        assert_eq!(state.students.len(), 1);
        assert!(!state.students[0].is_assigned());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(from_json("not json"), Err(ImportError::Parse(_))));
        assert!(matches!(
            from_json(r#"{"students": "oops", "tags": []}"#),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn test_default_state_has_builtin_tags() {
        let s = default_state();
        assert_eq!(s.tags.len(), 8);
        assert!(s.students.is_empty());
    }
}
