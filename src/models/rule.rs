//! Separation rule model.
//!
//! A separation rule declares that no two of its members may share a
//! class at the same time. Rules are checked pairwise and advisorily by
//! the conflict detector; the store only guarantees the structural
//! invariant that a rule always has at least two members.

use serde::{Deserialize, Serialize};

/// Minimum number of members a rule is meaningful with.
pub const MIN_RULE_MEMBERS: usize = 2;

/// A pairwise-separation constraint over a set of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparationRule {
    /// Unique rule identifier.
    pub id: String,
    /// Member student ids, in selection order, without duplicates.
    pub student_ids: Vec<String>,
}

impl SeparationRule {
    /// Creates a rule. Membership validity is the store's concern.
    pub fn new(id: impl Into<String>, student_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            student_ids,
        }
    }

    /// Whether the rule covers the given student.
    pub fn contains(&self, student_id: &str) -> bool {
        self.student_ids.iter().any(|s| s == student_id)
    }

    /// Removes a student from the rule, returning whether the rule is
    /// still meaningful (two or more members remain).
    pub fn remove_member(&mut self, student_id: &str) -> bool {
        self.student_ids.retain(|s| s != student_id);
        self.student_ids.len() >= MIN_RULE_MEMBERS
    }
}
