//! StudyEngine — the facade that serializes access to the leaf components.
//!
//! Every public operation, reads included, runs under one exclusive
//! critical section over the whole component set, so no caller observes
//! another operation's intermediate state. Nothing blocks on I/O inside
//! the lock and there is no background work; sections are short-lived.
//!
//! Leaf components never call each other; all cross-component effects
//! (completion writes a log and enqueues a review, undo reverses compound
//! effects) are coordinated here.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::interval_index::{IntervalIndex, TimeInterval};
use crate::logbook::{LogBook, StudyLog};
use crate::plan::{WeeklyPlan, weekly_plan};
use crate::scheduler::TaskScheduler;
use crate::subject_graph::SubjectGraph;
use crate::task::{REVIEW_INTERVAL_DAYS, REVIEW_PRIORITY, Task, review_title};
use crate::undo::{Action, UndoLog};

#[derive(Debug, Clone, Copy)]
enum Clock {
    Wall,
    Fixed(NaiveDate),
}

impl Clock {
    fn today(self) -> NaiveDate {
        match self {
            Clock::Wall => Local::now().date_naive(),
            Clock::Fixed(date) => date,
        }
    }
}

#[derive(Debug, Default)]
struct EngineInner {
    scheduler: TaskScheduler,
    logbook: LogBook,
    graph: SubjectGraph,
    blocks: IntervalIndex,
    history: UndoLog,
}

#[derive(Debug)]
pub struct StudyEngine {
    inner: Mutex<EngineInner>,
    clock: Clock,
}

impl Default for StudyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyEngine {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(EngineInner::default()),
            clock: Clock::Wall,
        }
    }

    /// Pin "today" for deterministic behavior (tests, replayed sessions).
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            inner: Mutex::new(EngineInner::default()),
            clock: Clock::Fixed(today),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // Validation precedes mutation in every operation, so state behind
        // a poisoned lock is still coherent; recover instead of panicking.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a new pending task. Registers its subject with the graph and
    /// records an undoable action.
    pub fn submit_task(
        &self,
        title: &str,
        subject: &str,
        priority: i32,
        deadline: NaiveDate,
    ) -> Result<Task, EngineError> {
        require_field("title", title)?;
        require_field("subject", subject)?;

        let mut inner = self.lock();
        let task = inner.scheduler.submit(title, subject, priority, deadline);
        inner.graph.add_subject(subject);
        inner.history.record(Action::TaskAdded { task: task.clone() });
        info!(id = task.id, subject, priority, "task submitted");
        Ok(task)
    }

    pub fn peek_top(&self) -> Option<Task> {
        self.lock().scheduler.peek_top().cloned()
    }

    /// Pending tasks, highest priority first.
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().scheduler.list_all()
    }

    /// Complete the top task: removes it, writes one log entry, and
    /// enqueues one spaced-repetition review due in three days.
    pub fn complete_top(
        &self,
        duration_hours: f64,
        notes: Option<&str>,
    ) -> Result<Task, EngineError> {
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(EngineError::InvalidDuration {
                hours: duration_hours,
            });
        }
        let today = self.clock.today();

        let mut inner = self.lock();
        let task = inner.scheduler.complete_top()?;

        let description = match notes {
            Some(n) if !n.trim().is_empty() => format!("{}: {n}", task.title),
            _ => task.title.clone(),
        };
        let log = StudyLog::new(today, task.subject.clone(), duration_hours, description)?;
        inner.logbook.append(log.clone());

        let review = Task::new(
            inner.scheduler.allocate_id(),
            review_title(&task.title),
            task.subject.clone(),
            REVIEW_PRIORITY,
            today + Duration::days(REVIEW_INTERVAL_DAYS),
        )
        .as_review();
        inner.scheduler.insert(review.clone());

        inner.history.record(Action::TaskCompleted {
            task: task.clone(),
            log,
            review,
        });
        info!(id = task.id, hours = duration_hours, "task completed, review enqueued");
        Ok(task)
    }

    /// Record a study session directly, outside task completion. Not
    /// undoable, matching the reference behavior for manual log entries.
    pub fn insert_log(
        &self,
        subject: &str,
        duration_hours: f64,
        description: Option<&str>,
    ) -> Result<StudyLog, EngineError> {
        require_field("subject", subject)?;
        let log = StudyLog::new(
            self.clock.today(),
            subject,
            duration_hours,
            description.unwrap_or_default(),
        )?;

        let mut inner = self.lock();
        inner.logbook.append(log.clone());
        inner.graph.add_subject(subject);
        debug!(subject, hours = duration_hours, "session logged");
        Ok(log)
    }

    pub fn logs(&self) -> Vec<StudyLog> {
        self.lock().logbook.entries().to_vec()
    }

    /// Total logged hours per subject.
    pub fn summary_by_subject(&self) -> HashMap<String, f64> {
        self.lock().logbook.summary_by_subject()
    }

    /// Add the prerequisite -> dependent edge, creating both subjects.
    pub fn add_dependency(&self, prerequisite: &str, dependent: &str) -> Result<(), EngineError> {
        require_field("prerequisite", prerequisite)?;
        require_field("dependent", dependent)?;

        let mut inner = self.lock();
        let inserted = inner.graph.add_dependency(prerequisite, dependent);
        // Recording a duplicate add would let one undo delete a
        // pre-existing edge, so only real insertions enter the history.
        if inserted {
            inner.history.record(Action::DependencyAdded {
                prerequisite: prerequisite.to_string(),
                dependent: dependent.to_string(),
            });
            debug!(prerequisite, dependent, "dependency added");
        }
        Ok(())
    }

    /// Topological study order. `Ok(vec![])` for an empty graph;
    /// `CircularDependency` when subjects exist but no order does.
    pub fn study_path(&self) -> Result<Vec<String>, EngineError> {
        let inner = self.lock();
        let path = inner.graph.study_path();
        if path.is_empty() && inner.graph.subject_count() > 0 {
            return Err(EngineError::CircularDependency);
        }
        Ok(path)
    }

    /// All known subjects, sorted for stable output.
    pub fn subjects(&self) -> Vec<String> {
        let inner = self.lock();
        let mut subjects: Vec<String> = inner.graph.subjects().map(str::to_string).collect();
        subjects.sort();
        subjects
    }

    /// Reserve an unavailable block. `Ok(false)` means rejected as a
    /// conflict, which is an outcome, not an error.
    pub fn add_blocked_interval(
        &self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, EngineError> {
        let interval = TimeInterval::new(start, end)?;
        let mut inner = self.lock();
        let accepted = inner.blocks.insert(interval);
        debug!(%start, %end, accepted, "blocked interval");
        Ok(accepted)
    }

    /// Derived weekly report; never mutates the pending set.
    pub fn weekly_plan(&self, slots_per_day: Option<i64>) -> WeeklyPlan {
        let inner = self.lock();
        weekly_plan(&inner.scheduler.list_all(), slots_per_day)
    }

    /// Reverse the most recent recorded mutation and describe what changed.
    pub fn undo(&self) -> String {
        let mut inner = self.lock();
        let Some(action) = inner.history.undo() else {
            return "Nothing to undo.".to_string();
        };
        match action {
            Action::TaskAdded { task } => {
                // Already-removed tasks are fine; undo targets the exact id.
                inner.scheduler.remove(task.id);
                info!(id = task.id, "undo: task addition");
                format!("Undo: removed task '{}'.", task.title)
            }
            Action::TaskCompleted { task, log, review } => {
                // Full retraction: the review and the log entry completion
                // created go away with it.
                inner.scheduler.remove(review.id);
                if !inner.logbook.retract(&log) {
                    warn!(id = task.id, "undo: log entry for completion was already gone");
                }
                inner.scheduler.insert(task.clone());
                info!(id = task.id, "undo: task completion");
                format!(
                    "Undo: restored task '{}', retracted its log entry and review.",
                    task.title
                )
            }
            Action::DependencyAdded {
                prerequisite,
                dependent,
            } => {
                inner.graph.remove_dependency(&prerequisite, &dependent);
                info!(%prerequisite, %dependent, "undo: dependency");
                format!("Undo: removed dependency {prerequisite} -> {dependent}.")
            }
        }
    }

    /// Re-apply the most recently undone mutation and describe it.
    pub fn redo(&self) -> String {
        let mut inner = self.lock();
        let Some(action) = inner.history.redo() else {
            return "Nothing to redo.".to_string();
        };
        match action {
            Action::TaskAdded { task } => {
                let title = task.title.clone();
                inner.scheduler.insert(task);
                format!("Redo: task '{title}' added again.")
            }
            Action::TaskCompleted { task, log, review } => {
                inner.scheduler.remove(task.id);
                inner.logbook.append(log);
                inner.scheduler.insert(review);
                format!("Redo: task '{}' completed again.", task.title)
            }
            Action::DependencyAdded {
                prerequisite,
                dependent,
            } => {
                inner.graph.add_dependency(&prerequisite, &dependent);
                format!("Redo: dependency {prerequisite} -> {dependent} added again.")
            }
        }
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::EmptyField { field });
    }
    Ok(())
}
