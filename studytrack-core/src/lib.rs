//! studytrack-core: deterministic in-memory engine for personal study
//! planning.
//!
//! Four leaf components — a max-priority task scheduler, a subject
//! prerequisite graph, an interval-conflict index, and a linear undo/redo
//! log — composed behind one mutex-guarded facade (`StudyEngine`). The
//! engine is memory-resident only; transports and persistence are layers
//! on top.

pub mod engine;
pub mod error;
pub mod interval_index;
pub mod logbook;
pub mod plan;
pub mod scheduler;
pub mod subject_graph;
pub mod task;
pub mod undo;

pub use engine::StudyEngine;
pub use error::EngineError;
pub use interval_index::{IntervalIndex, TimeInterval};
pub use logbook::{LogBook, StudyLog};
pub use plan::{
    DEFAULT_SLOTS_PER_DAY, DayPlan, MAX_SLOTS_PER_DAY, PlanSlot, WEEKDAYS, WeeklyPlan, weekly_plan,
};
pub use scheduler::TaskScheduler;
pub use subject_graph::SubjectGraph;
pub use task::{REVIEW_INTERVAL_DAYS, REVIEW_PRIORITY, Task, review_title};
pub use undo::{Action, UndoLog};
