//! Blocked time intervals — start-keyed BST with overlap rejection.
//!
//! The tree is deliberately unbalanced: block counts are day-scale, and
//! what matters is the overlap check along the descent path. Each node
//! tracks the maximum end time in its subtree, which a future range query
//! can lean on. There is no deletion; a blocked interval is permanent for
//! the process lifetime.

use crate::error::EngineError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Half-open time range [start, end); `end <= start` is rejected at
/// construction, so every held interval is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// [a, b) and [c, d) overlap iff `a < d && c < b`; a shared boundary is
    /// not an overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug)]
struct Node {
    interval: TimeInterval,
    max_end: NaiveTime,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(interval: TimeInterval) -> Self {
        Self {
            interval,
            max_end: interval.end,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct IntervalIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl IntervalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the interval if it overlaps nothing along its descent path.
    /// Returns false (and mutates nothing) on conflict.
    ///
    /// Two iterative passes: the first walks the path checking for overlap,
    /// the second re-walks it to bump subtree max-ends and place the node.
    pub fn insert(&mut self, interval: TimeInterval) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if node.interval.overlaps(&interval) {
                return false;
            }
            cur = if interval.start < node.interval.start {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        let mut slot = &mut self.root;
        loop {
            match slot {
                Some(node) => {
                    if interval.end > node.max_end {
                        node.max_end = interval.end;
                    }
                    slot = if interval.start < node.interval.start {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
                None => {
                    *slot = Some(Box::new(Node::new(interval)));
                    break;
                }
            }
        }
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
