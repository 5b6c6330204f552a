//! Class placement board core.
//!
//! Board state & consistency engine for assigning a student roster to a
//! fixed number of classes: the canonical entity store, the mutation
//! API that keeps it valid, snapshot-based undo/redo, and the advisory
//! separation-conflict detector. Presentation, drag gestures, file
//! dialogs, and the remote analysis call are thin collaborators that
//! talk to this crate through [`ClassBoard`] and the `analysis` seam.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Student`, `TagDefinition`,
//!   `SeparationRule`, `AppState`, `SchoolLevel`
//! - **`board`**: `ClassBoard` mutation API, undo/redo history, sample
//!   roster generation
//! - **`conflict`**: Pairwise separation-violation detection
//! - **`io`**: Snapshot import/export with schema validation
//! - **`analysis`**: Typed report schema, prompt building, failure
//!   narratives for the remote analysis service
//!
//! # Design
//!
//! The board is single-threaded and event-driven: each mutation runs to
//! completion before the next, records exactly one whole-state snapshot
//! for undo, and either succeeds with an observable change or fails
//! with a typed signal. Soft constraints (separation, capacity) advise,
//! they never block.

pub mod analysis;
pub mod board;
pub mod conflict;
pub mod error;
pub mod ident;
pub mod io;
pub mod models;

pub use board::{ClassBoard, History, StudentDraft};
pub use conflict::{conflicted_student_ids, detect_conflicts, Conflict};
pub use error::BoardError;
pub use models::{
    builtin_tags, AppState, Gender, SchoolLevel, SeparationRule, Student, TagDefinition,
};
