//! TaskScheduler — max-priority queue over pending tasks.
//!
//! Backed by a `BinaryHeap` of entries ordered by priority score
//! (descending), with a monotone sequence number breaking ties in insertion
//! order. The tie-break is implementation-defined: callers may only rely on
//! "some valid highest-priority task".
//!
//! The scheduler also owns the task-id counter, so ids stay monotonic per
//! engine instance and tests can seed them.

use crate::error::EngineError;
use crate::task::Task;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct HeapEntry {
    task: Task,
    seq: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.task.priority == other.task.priority && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: highest priority wins, then oldest seq.
        self.task
            .priority
            .cmp(&other.task.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct TaskScheduler {
    heap: BinaryHeap<HeapEntry>,
    seq: u64,
    next_id: u64,
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Seed the id counter. Lets tests pin ids and keeps separate engine
    /// instances from colliding.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
            next_id: first_id,
        }
    }

    /// Mint the next task id. Also used by the facade for review tasks so
    /// every id flows through the same counter.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create and enqueue a new task. O(log n).
    pub fn submit(
        &mut self,
        title: impl Into<String>,
        subject: impl Into<String>,
        priority: i32,
        deadline: NaiveDate,
    ) -> Task {
        let task = Task::new(self.allocate_id(), title, subject, priority, deadline);
        self.insert(task.clone());
        task
    }

    /// Enqueue a fully-built task, keeping its existing id. Used for review
    /// tasks and for undo/redo reinsertion.
    pub fn insert(&mut self, task: Task) {
        self.seq += 1;
        self.heap.push(HeapEntry {
            task,
            seq: self.seq,
        });
    }

    /// Highest-priority pending task, if any. O(1).
    pub fn peek_top(&self) -> Option<&Task> {
        self.heap.peek().map(|e| &e.task)
    }

    /// Every pending task, highest priority first. Does not mutate.
    pub fn list_all(&self) -> Vec<Task> {
        let mut entries: Vec<&HeapEntry> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|e| e.task.clone()).collect()
    }

    /// Remove and return the top task. O(log n).
    pub fn complete_top(&mut self) -> Result<Task, EngineError> {
        self.heap
            .pop()
            .map(|e| e.task)
            .ok_or(EngineError::EmptyQueue)
    }

    /// Remove the exact task with this id, if still pending.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let entries = std::mem::take(&mut self.heap).into_vec();
        let mut removed = None;
        for entry in entries {
            if removed.is_none() && entry.task.id == id {
                removed = Some(entry.task);
            } else {
                self.heap.push(entry);
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
