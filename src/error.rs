//! Mutation-API error taxonomy.
//!
//! Validation rejections only: the offending call changes nothing and
//! the caller can branch on the variant. Operations against ids that no
//! longer exist are not errors — they are silent no-ops reported through
//! the operation's return value.

use thiserror::Error;

/// A rejected mutation. No state change occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Student name was empty after trimming.
    #[error("student name must not be empty")]
    EmptyName,

    /// Tag label was empty after trimming.
    #[error("tag label must not be empty")]
    EmptyLabel,

    /// A tag with this label already exists (exact, case-sensitive).
    #[error("tag label already exists: {label}")]
    DuplicateTag { label: String },

    /// A separation rule needs at least two distinct members.
    #[error("separation rule needs at least 2 distinct students, got {supplied}")]
    RuleTooSmall { supplied: usize },
}
