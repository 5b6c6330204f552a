//! Separation-conflict detection.
//!
//! Checks the current placement against the active separation rules.
//! Detection is advisory: it never blocks a move, it only annotates the
//! board for display. Recomputed on demand — the scan is cheap and rules
//! are expected to hold only a handful of students each, so a naive
//! pairwise pass per rule is adequate.

use std::collections::HashSet;

use crate::models::{SeparationRule, Student};

/// A detected separation violation: two rule members sharing a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The violated rule.
    pub rule_id: String,
    /// The class both students currently occupy.
    pub class_id: String,
    /// First member of the pair (lexicographically smaller id).
    pub student_a: String,
    /// Second member of the pair.
    pub student_b: String,
}

impl Conflict {
    fn new(rule_id: &str, class_id: &str, a: &str, b: &str) -> Self {
        // Normalize pair order so the same violation always compares equal.
        let (student_a, student_b) = if a <= b { (a, b) } else { (b, a) };
        Self {
            rule_id: rule_id.to_string(),
            class_id: class_id.to_string(),
            student_a: student_a.to_string(),
            student_b: student_b.to_string(),
        }
    }
}

/// Detects every pair of rule members currently sharing a class.
///
/// For each rule, every unordered pair of members whose
/// `assigned_class_id` is the same non-unassigned class is reported.
/// Members in different classes, unassigned members, and members that no
/// longer exist produce nothing.
pub fn detect_conflicts(students: &[Student], rules: &[SeparationRule]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for rule in rules {
        // Resolve members to their current placement; dropped ids vanish.
        let placed: Vec<(&str, &str)> = rule
            .student_ids
            .iter()
            .filter_map(|sid| {
                students
                    .iter()
                    .find(|s| &s.id == sid)
                    .and_then(|s| s.assigned_class_id.as_deref().map(|c| (s.id.as_str(), c)))
            })
            .collect();

        for (i, &(a, class_a)) in placed.iter().enumerate() {
            for &(b, class_b) in &placed[i + 1..] {
                if class_a == class_b {
                    conflicts.push(Conflict::new(&rule.id, class_a, a, b));
                }
            }
        }
    }

    conflicts
}

/// Flattens conflicts to the set of students involved in any violation.
///
/// Convenience for painting warning badges on student cards.
pub fn conflicted_student_ids(students: &[Student], rules: &[SeparationRule]) -> HashSet<String> {
    let mut ids = HashSet::new();
    for c in detect_conflicts(students, rules) {
        ids.insert(c.student_a);
        ids.insert(c.student_b);
    }
    ids
}
