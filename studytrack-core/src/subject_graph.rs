//! Subject prerequisite graph + topological study path (Kahn's algorithm).

use std::collections::{HashMap, VecDeque};

/// Directed graph of subject prerequisites.
///
/// Adjacency maps each subject to the subjects that depend on it. A subject
/// exists the moment anything references it, so the key set doubles as the
/// subject set.
#[derive(Debug, Default)]
pub struct SubjectGraph {
    adj: HashMap<String, Vec<String>>,
}

impl SubjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the subject exists. Idempotent.
    pub fn add_subject(&mut self, name: &str) {
        self.adj.entry(name.to_string()).or_default();
    }

    /// Add the edge prerequisite -> dependent, creating both endpoints.
    /// Parallel edges are deduplicated; returns whether a new edge was
    /// actually inserted.
    pub fn add_dependency(&mut self, prerequisite: &str, dependent: &str) -> bool {
        self.add_subject(dependent);
        let out = self.adj.entry(prerequisite.to_string()).or_default();
        if out.iter().any(|d| d == dependent) {
            return false;
        }
        out.push(dependent.to_string());
        true
    }

    /// Remove the edge if present; absent edges are a no-op so undo stays
    /// clean.
    pub fn remove_dependency(&mut self, prerequisite: &str, dependent: &str) {
        if let Some(out) = self.adj.get_mut(prerequisite) {
            out.retain(|d| d != dependent);
        }
    }

    /// Topological order over all known subjects via in-degree counting.
    ///
    /// Empty when a cycle exists (the caller disambiguates that from an
    /// empty graph by checking `subject_count`). Order among in-degree ties
    /// is unspecified.
    pub fn study_path(&self) -> Vec<String> {
        let mut in_degree: HashMap<&str, usize> =
            self.adj.keys().map(|s| (s.as_str(), 0)).collect();
        for targets in self.adj.values() {
            for t in targets {
                if let Some(d) = in_degree.get_mut(t.as_str()) {
                    *d += 1;
                }
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(s, _)| *s)
            .collect();
        let mut path = Vec::with_capacity(self.adj.len());

        while let Some(u) = queue.pop_front() {
            path.push(u.to_string());
            if let Some(targets) = self.adj.get(u) {
                for v in targets {
                    if let Some(d) = in_degree.get_mut(v.as_str()) {
                        *d -= 1;
                        if *d == 0 {
                            queue.push_back(v.as_str());
                        }
                    }
                }
            }
        }

        if path.len() != self.adj.len() {
            // Unvisited subjects form a cycle; report, don't partially resolve.
            return Vec::new();
        }
        path
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.adj.keys().map(String::as_str)
    }

    pub fn subject_count(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }
}
