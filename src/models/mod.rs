//! Placement board domain models.
//!
//! Core data types for the board: students, trait tags, separation
//! rules, and the `AppState` snapshot that bundles them with the two
//! scalar settings (school level, class count).

mod rule;
mod state;
mod student;
mod tag;

pub use rule::{SeparationRule, MIN_RULE_MEMBERS};
pub use state::{AppState, SchoolLevel, DEFAULT_CLASS_COUNT};
pub use student::{Gender, Student};
pub use tag::{builtin_tags, pick_tag_color, TagColor, TagDefinition, TAG_COLORS};
