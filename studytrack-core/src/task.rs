//! Task model + spaced-repetition review policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priority score given to every system-generated review task.
pub const REVIEW_PRIORITY: i32 = 85;

/// Days between completing a task and its follow-up review falling due.
pub const REVIEW_INTERVAL_DAYS: i64 = 3;

const REVIEW_PREFIX: &str = "Review: ";

/// A pending unit of study work.
///
/// Ids come from the scheduler's counter and are never reused or mutated.
/// We keep this small + serializable; any storage layer comes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    /// Subject name; a node in the dependency graph.
    pub subject: String,
    /// Higher score = more urgent.
    pub priority: i32,
    pub deadline: NaiveDate,
    /// True when system-generated as a spaced-repetition follow-up.
    pub review: bool,
}

impl Task {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        subject: impl Into<String>,
        priority: i32,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subject: subject.into(),
            priority,
            deadline,
            review: false,
        }
    }

    pub fn as_review(mut self) -> Self {
        self.review = true;
        self
    }
}

/// Title for the review spawned by completing a task with title `base`.
///
/// Strips one leading `"Review: "` prefix first, so completing a review
/// never produces `"Review: Review: ..."`.
pub fn review_title(base: &str) -> String {
    let stripped = base.strip_prefix(REVIEW_PREFIX).unwrap_or(base);
    format!("{REVIEW_PREFIX}{stripped}")
}
