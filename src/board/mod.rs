//! Board state and mutation API.
//!
//! `ClassBoard` owns the canonical `AppState` plus its undo/redo
//! history and exposes every mutation the operator can perform. Each
//! mutation is atomic from the caller's perspective and records exactly
//! one history entry — taken from the pre-mutation state, strictly
//! before the change applies. Operations against ids that no longer
//! exist are silent no-ops (no state change, no history entry); invalid
//! input is rejected with a typed [`BoardError`] before anything
//! mutates.
//!
//! The board is an explicit owned context, not a process-wide
//! singleton: multiple boards can coexist in one process and each is
//! independently testable.

mod history;
mod sample;

pub use history::History;
pub use sample::generate_students;

use log::debug;
use rand::Rng;

use crate::conflict::{detect_conflicts, Conflict};
use crate::error::BoardError;
use crate::ident;
use crate::models::{
    builtin_tags, pick_tag_color, AppState, Gender, SchoolLevel, SeparationRule, Student,
    TagDefinition, MIN_RULE_MEMBERS,
};

/// Input for [`ClassBoard::add_or_update_student`].
///
/// `id = None` creates a new student; `id = Some` updates the matching
/// student's name, gender, and tags while leaving placement untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub id: Option<String>,
    pub name: String,
    pub gender: Option<Gender>,
    pub tag_ids: Vec<String>,
}

impl StudentDraft {
    /// Draft for a new student with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Targets an existing student.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
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
}

/// The placement board: canonical state, mutations, undo/redo.
#[derive(Debug, Clone, Default)]
pub struct ClassBoard {
    state: AppState,
    history: History,
}

impl ClassBoard {
    /// Creates an empty board with default settings and built-in tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a previously persisted snapshot without a history entry.
    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            history: History::new(),
        }
    }

    // --- reads ---

    /// Current state, borrowed.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Independent copy of the current state (for persistence, export,
    /// or an analysis request).
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    pub fn school_level(&self) -> SchoolLevel {
        self.state.school_level
    }

    pub fn class_count(&self) -> u32 {
        self.state.class_count
    }

    pub fn students(&self) -> &[Student] {
        &self.state.students
    }

    pub fn tags(&self) -> &[TagDefinition] {
        &self.state.tags
    }

    pub fn separation_rules(&self) -> &[SeparationRule] {
        &self.state.separation_rules
    }

    /// Students placed in the given class.
    pub fn students_in_class(&self, class_id: &str) -> Vec<&Student> {
        self.state.students_in_class(class_id)
    }

    /// Students in the unassigned pool.
    pub fn unassigned_students(&self) -> Vec<&Student> {
        self.state.unassigned_students()
    }

    /// Students assigned to a class outside `1..=class_count`.
    pub fn orphaned_students(&self) -> Vec<&Student> {
        self.state.orphaned_students()
    }

    /// Current separation violations. Advisory, recomputed on demand.
    pub fn conflicts(&self) -> Vec<Conflict> {
        detect_conflicts(&self.state.students, &self.state.separation_rules)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- history ---

    fn record(&mut self) {
        self.history.record(self.state.clone());
    }

    /// Steps back one mutation. Safe no-op at the boundary.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.state = previous;
                debug!("undo applied, {} steps remain", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    /// Steps forward one undone mutation. Safe no-op at the boundary.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.state = next;
                debug!("redo applied, {} steps remain", self.history.redo_depth());
                true
            }
            None => false,
        }
    }

    // --- mutations ---

    /// Places a student in `target` class, or in the unassigned pool
    /// when `target` is `None`.
    ///
    /// Returns `false` (no state change, no history entry) when the
    /// student does not exist. Separation conflicts and capacity are
    /// advisory and never block the move.
    pub fn move_student(&mut self, student_id: &str, target: Option<&str>) -> bool {
        let Some(idx) = self.state.students.iter().position(|s| s.id == student_id) else {
            return false;
        };
        self.record();
        let student = &mut self.state.students[idx];
        student.assigned_class_id = target.filter(|t| !t.is_empty()).map(String::from);
        debug!("moved student {student_id} to {:?}", student.assigned_class_id);
        true
    }

    /// Creates a student or updates an existing one.
    ///
    /// The name is trimmed and must be non-empty. On create, the student
    /// receives a fresh id and starts unassigned. On update, only name,
    /// gender, and tags change — placement stays. Returns the affected
    /// student's id, or `None` when `draft.id` references a student that
    /// no longer exists (silent no-op).
    pub fn add_or_update_student(
        &mut self,
        draft: StudentDraft,
    ) -> Result<Option<String>, BoardError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyName);
        }

        match draft.id {
            Some(id) => {
                let Some(idx) = self.state.students.iter().position(|s| s.id == id) else {
                    return Ok(None);
                };
                self.record();
                let student = &mut self.state.students[idx];
                student.name = name.to_string();
                student.gender = draft.gender;
                student.tag_ids = draft.tag_ids;
                debug!("updated student {id}");
                Ok(Some(id))
            }
            None => {
                self.record();
                let id = ident::student_id();
                let mut student = Student::new(id.clone(), name);
                student.gender = draft.gender;
                student.tag_ids = draft.tag_ids;
                self.state.students.push(student);
                debug!("added student {id}");
                Ok(Some(id))
            }
        }
    }

    /// Deletes a student and cascades through the separation rules:
    /// the id is removed from every rule, and rules left with fewer
    /// than two members are deleted entirely.
    ///
    /// Returns `false` when the student does not exist.
    pub fn delete_student(&mut self, student_id: &str) -> bool {
        if !self.state.students.iter().any(|s| s.id == student_id) {
            return false;
        }
        self.record();
        self.state.students.retain(|s| s.id != student_id);
        self.state
            .separation_rules
            .retain_mut(|rule| rule.remove_member(student_id));
        debug!("deleted student {student_id}");
        true
    }

    /// Adds a tag with an explicit color pair.
    ///
    /// The label is trimmed, must be non-empty, and must not collide
    /// with an existing label (exact, case-sensitive). Returns the new
    /// tag's id.
    pub fn add_tag(
        &mut self,
        label: &str,
        color_bg: &str,
        color_text: &str,
    ) -> Result<String, BoardError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(BoardError::EmptyLabel);
        }
        if self.state.tags.iter().any(|t| t.label == label) {
            return Err(BoardError::DuplicateTag {
                label: label.to_string(),
            });
        }
        self.record();
        let id = ident::tag_id();
        self.state
            .tags
            .push(TagDefinition::new(id.clone(), label, color_bg, color_text));
        debug!("added tag {id} ({label})");
        Ok(id)
    }

    /// Adds a tag, picking its colors automatically: uniform random
    /// among palette colors with an unused background, falling back to
    /// the full palette once exhausted.
    pub fn add_tag_auto<R: Rng>(
        &mut self,
        label: &str,
        rng: &mut R,
    ) -> Result<String, BoardError> {
        let color = pick_tag_color(&self.state.tags, rng);
        self.add_tag(label, color.bg, color.text)
    }

    /// Deletes a tag and strips its id from every student.
    ///
    /// Returns `false` when the tag does not exist.
    pub fn delete_tag(&mut self, tag_id: &str) -> bool {
        if !self.state.tags.iter().any(|t| t.id == tag_id) {
            return false;
        }
        self.record();
        self.state.tags.retain(|t| t.id != tag_id);
        for student in &mut self.state.students {
            student.tag_ids.retain(|t| t != tag_id);
        }
        debug!("deleted tag {tag_id}");
        true
    }

    /// Adds a separation rule over the given students.
    ///
    /// Duplicate ids are collapsed (order preserved); fewer than two
    /// distinct members is rejected. Returns the new rule's id.
    pub fn add_separation_rule(
        &mut self,
        student_ids: Vec<String>,
    ) -> Result<String, BoardError> {
        let mut members: Vec<String> = Vec::with_capacity(student_ids.len());
        for id in student_ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        if members.len() < MIN_RULE_MEMBERS {
            return Err(BoardError::RuleTooSmall {
                supplied: members.len(),
            });
        }
        self.record();
        let id = ident::rule_id();
        self.state
            .separation_rules
            .push(SeparationRule::new(id.clone(), members));
        debug!("added separation rule {id}");
        Ok(id)
    }

    /// Deletes a separation rule unconditionally.
    ///
    /// Returns `false` when the rule does not exist.
    pub fn delete_separation_rule(&mut self, rule_id: &str) -> bool {
        if !self.state.separation_rules.iter().any(|r| r.id == rule_id) {
            return false;
        }
        self.record();
        self.state.separation_rules.retain(|r| r.id != rule_id);
        debug!("deleted separation rule {rule_id}");
        true
    }

    /// Changes the school level. No-op (and no history entry) when
    /// unchanged. Existing placements are not touched.
    pub fn set_school_level(&mut self, level: SchoolLevel) -> bool {
        if self.state.school_level == level {
            return false;
        }
        self.record();
        self.state.school_level = level;
        true
    }

    /// Changes the number of classes (clamped to at least 1). No-op
    /// when unchanged.
    ///
    /// Shrinking below an occupied class leaves its students assigned
    /// to the now-hidden class; [`ClassBoard::orphaned_students`]
    /// surfaces them.
    pub fn set_class_count(&mut self, count: u32) -> bool {
        let count = count.max(1);
        if self.state.class_count == count {
            return false;
        }
        self.record();
        self.state.class_count = count;
        true
    }

    /// Clears students and rules and restores the built-in tags.
    /// School level and class count are untouched.
    pub fn reset_data(&mut self) {
        self.record();
        self.state.students.clear();
        self.state.separation_rules.clear();
        self.state.tags = builtin_tags();
        debug!("board reset");
    }

    /// Replaces the entire state with the given snapshot (import,
    /// "load project"). One history entry; undo restores the previous
    /// board wholesale.
    pub fn load_data(&mut self, snapshot: AppState) {
        self.record();
        self.state = snapshot;
        debug!(
            "loaded snapshot: {} students, {} tags, {} rules",
            self.state.students.len(),
            self.state.tags.len(),
            self.state.separation_rules.len()
        );
    }

    /// Replaces the roster with a generated sample sized to the current
    /// settings. Rules are cleared and tags reset to the built-in set.
    /// Returns the number of students generated.
    pub fn load_sample_data<R: Rng>(&mut self, rng: &mut R) -> usize {
        self.record();
        self.state.tags = builtin_tags();
        self.state.separation_rules.clear();
        self.state.students = generate_students(
            self.state.school_level,
            self.state.class_count,
            &self.state.tags,
            rng,
        );
        debug!("generated {} sample students", self.state.students.len());
        self.state.students.len()
    }
}
