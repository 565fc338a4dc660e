//! Bounded log of the command lines entered in a session.

use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};

/// Fixed-capacity, insertion-ordered window over past command lines.
///
/// Once `capacity` lines are stored, recording another one drops the oldest.
/// Entries are kept newest-last.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<OsString>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `line`, evicting the oldest entry when the log is full.
    pub fn record(&mut self, line: impl Into<OsString>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// Entries in insertion order. The iterator can be cloned to walk the log again.
    pub fn all(&self) -> impl Iterator<Item = &OsStr> + Clone + '_ {
        self.entries.iter().map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
