//! Linear undo/redo history — two stacks of recorded actions.
//!
//! This component is action-agnostic: it moves actions between stacks and
//! never interprets what reversing one means. All of that lives in the
//! engine facade.

use crate::logbook::StudyLog;
use crate::task::Task;
use serde::{Deserialize, Serialize};

/// One reversible mutation. Each variant carries exactly the data its
/// reversal needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    TaskAdded {
        task: Task,
    },
    /// Completion is a compound effect: the popped task, the log entry it
    /// wrote, and the review task it enqueued.
    TaskCompleted {
        task: Task,
        log: StudyLog,
        review: Task,
    },
    DependencyAdded {
        prerequisite: String,
        dependent: String,
    },
}

#[derive(Debug, Default)]
pub struct UndoLog {
    undo: Vec<Action>,
    redo: Vec<Action>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new forward action invalidates any redo history.
    pub fn record(&mut self, action: Action) {
        self.undo.push(action);
        self.redo.clear();
    }

    pub fn undo(&mut self) -> Option<Action> {
        let action = self.undo.pop()?;
        self.redo.push(action.clone());
        Some(action)
    }

    pub fn redo(&mut self) -> Option<Action> {
        let action = self.redo.pop()?;
        self.undo.push(action.clone());
        Some(action)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
