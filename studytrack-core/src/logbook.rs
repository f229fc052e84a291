//! Study session log — append-only records + per-subject totals.

use crate::error::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable record of a finished study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyLog {
    pub date: NaiveDate,
    pub subject: String,
    pub duration_hours: f64,
    pub description: String,
}

impl StudyLog {
    /// Fails fast on a negative or non-finite duration; zero is allowed.
    pub fn new(
        date: NaiveDate,
        subject: impl Into<String>,
        duration_hours: f64,
        description: impl Into<String>,
    ) -> Result<Self, EngineError> {
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(EngineError::InvalidDuration {
                hours: duration_hours,
            });
        }
        Ok(Self {
            date,
            subject: subject.into(),
            duration_hours,
            description: description.into(),
        })
    }
}

#[derive(Debug, Default)]
pub struct LogBook {
    entries: Vec<StudyLog>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, log: StudyLog) {
        self.entries.push(log);
    }

    pub fn entries(&self) -> &[StudyLog] {
        &self.entries
    }

    /// Total logged hours per subject.
    pub fn summary_by_subject(&self) -> HashMap<String, f64> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for log in &self.entries {
            *totals.entry(log.subject.clone()).or_insert(0.0) += log.duration_hours;
        }
        totals
    }

    /// Remove the most recent entry equal to `log`.
    ///
    /// The log is append-only for every caller except undo-of-completion,
    /// which retracts the one entry that completion wrote.
    pub fn retract(&mut self, log: &StudyLog) -> bool {
        match self.entries.iter().rposition(|e| e == log) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
