//! Snapshot-based undo/redo history.
//!
//! Two unbounded stacks of whole-board snapshots. `record` is called
//! with the pre-mutation state strictly before each mutation applies, so
//! the top of `past` is always "the state right before the most recent
//! change". Recording clears `future` — linear history, no redo
//! branches. Whole-state clones are a deliberate tradeoff: the board
//! holds at most a few hundred students, so copies are cheap and there
//! is no patch-application machinery to get wrong.

use std::collections::VecDeque;

use crate::models::AppState;

/// Undo/redo stacks over whole-board snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<AppState>,
    future: VecDeque<AppState>,
}

impl History {
    /// Creates empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pre-mutation state. Discards any redo branch.
    pub fn record(&mut self, current: AppState) {
        self.past.push(current);
        self.future.clear();
    }

    /// Steps back: returns the state to restore, archiving `current`
    /// for redo. `None` at the boundary.
    pub fn undo(&mut self, current: AppState) -> Option<AppState> {
        let previous = self.past.pop()?;
        self.future.push_front(current);
        Some(previous)
    }

    /// Steps forward: returns the state to restore, archiving `current`
    /// for undo. `None` at the boundary.
    pub fn redo(&mut self, current: AppState) -> Option<AppState> {
        let next = self.future.pop_front()?;
        self.past.push(current);
        Some(next)
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of recorded undo steps.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of available redo steps.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}
