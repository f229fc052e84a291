//! Engine error taxonomy.
//!
//! Domain conditions are structured variants a caller can match on, not
//! stringly-typed errors: `EmptyQueue` must be distinguishable from
//! validation failures so an adapter can map them to different outward
//! signals. Conflicting interval insertions and cycle-free empty graphs are
//! *outcomes*, not errors, and never appear here.

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Completing a task with nothing pending.
    #[error("the task queue is empty")]
    EmptyQueue,

    /// A required text field was missing or blank.
    #[error("required field `{field}` is empty")]
    EmptyField { field: &'static str },

    /// Durations must be finite and non-negative; zero is allowed.
    #[error("invalid duration: {hours} hours")]
    InvalidDuration { hours: f64 },

    /// An interval's end must be strictly after its start.
    #[error("invalid interval: end {end} is not after start {start}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },

    /// Subjects exist but admit no topological order.
    #[error("circular dependency detected between subjects")]
    CircularDependency,
}
