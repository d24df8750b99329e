// Snapshot management for stepping back through replayed lines

use crate::interpreter::formula::Verdict;
use crate::memory::SymbolTable;
use std::collections::VecDeque;

/// Session state at the end of one replayed line
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub symbols: SymbolTable,
    /// One entry per assertion registered when the snapshot was taken
    pub verdicts: Vec<Verdict>,
    /// Number of lines replayed including this one
    pub lines_seen: usize,
}

/// Bounded history of per-line snapshots, oldest evicted first
#[derive(Debug)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    /// Add a snapshot, evicting the oldest when full
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.limit == 0 {
            return;
        }
        if self.snapshots.len() == self.limit {
            if let Some(evicted) = self.snapshots.pop_front() {
                tracing::trace!(line = evicted.lines_seen, "evicted snapshot from history");
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Drop the newest snapshot and return the one before it
    pub fn rewind(&mut self) -> Option<&Snapshot> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop_back();
        self.snapshots.back()
    }

    pub fn latest_mut(&mut self) -> Option<&mut Snapshot> {
        self.snapshots.back_mut()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
