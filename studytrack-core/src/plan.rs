//! Weekly plan report — a derived, read-only view over pending tasks.

use crate::task::Task;
use serde::Serialize;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const DEFAULT_SLOTS_PER_DAY: usize = 3;

/// Ceiling on requested slots per day; the plan is a day-scale report and
/// anything beyond hourly granularity is noise.
pub const MAX_SLOTS_PER_DAY: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSlot {
    pub task_id: u64,
    pub title: String,
    pub subject: String,
    pub priority: i32,
}

impl From<&Task> for PlanSlot {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            subject: task.subject.clone(),
            priority: task.priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub slots: Vec<PlanSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

/// Fill seven fixed days with `slots_per_day` slots each by cycling through
/// `tasks` (expected highest priority first) in order, wrapping around when
/// exhausted. The cycle index carries across day boundaries, so earlier
/// week positions always favor higher-priority tasks. Non-positive or
/// absent slot counts default to 3; requests above `MAX_SLOTS_PER_DAY` are
/// capped there; an empty task list yields seven empty days.
pub fn weekly_plan(tasks: &[Task], slots_per_day: Option<i64>) -> WeeklyPlan {
    let slots_per_day = match slots_per_day {
        Some(n) if n > 0 => n.min(MAX_SLOTS_PER_DAY as i64) as usize,
        _ => DEFAULT_SLOTS_PER_DAY,
    };

    let mut cursor = tasks.iter().cycle();
    let days = WEEKDAYS
        .into_iter()
        .map(|day| DayPlan {
            day,
            slots: cursor
                .by_ref()
                .take(slots_per_day)
                .map(PlanSlot::from)
                .collect(),
        })
        .collect();

    WeeklyPlan { days }
}
