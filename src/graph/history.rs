//! `History` — a bounded undo stack of digraph snapshots.

use super::digraph::Digraph;
use super::snapshot::{RestoreReport, Snapshot};
use crate::config::{DigraphConfig, DEFAULT_HISTORY_DEPTH};
use crate::error::Result;
use core::hash::Hash;
use std::collections::VecDeque;

/// Stack of snapshots, newest on top.
///
/// Once `depth` snapshots are held, pushing drops the oldest one. A depth of
/// `0` never drops anything.
#[derive(Debug, Clone)]
pub struct History<V, E> {
    snapshots: VecDeque<Snapshot<V, E>>,
    depth: usize,
}

impl<V, E> History<V, E> {
    /// Creates a history retaining [`DEFAULT_HISTORY_DEPTH`] snapshots.
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }

    /// Creates a history retaining at most `depth` snapshots (`0` = unbounded).
    pub fn with_depth(depth: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(depth.min(DEFAULT_HISTORY_DEPTH)),
            depth,
        }
    }

    /// Creates a history using `config.history_depth`.
    pub fn with_config(config: &DigraphConfig) -> Self {
        Self::with_depth(config.history_depth)
    }

    /// Maximum number of retained snapshots, `0` meaning unbounded.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pushes a snapshot, evicting the oldest one if the history is full.
    pub fn push(&mut self, snapshot: Snapshot<V, E>) {
        if self.depth != 0 && self.snapshots.len() == self.depth {
            self.snapshots.pop_front();
            trace_event!(depth = self.depth, "history full, oldest snapshot dropped");
        }
        self.snapshots.push_back(snapshot);
    }

    /// Removes and returns the newest snapshot.
    pub fn pop(&mut self) -> Option<Snapshot<V, E>> {
        self.snapshots.pop_back()
    }

    /// The newest snapshot.
    pub fn peek(&self) -> Option<&Snapshot<V, E>> {
        self.snapshots.back()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl<V: Clone, E: Clone> History<V, E> {
    /// Records the current state of `graph`.
    pub fn checkpoint(&mut self, graph: &Digraph<V, E>) {
        self.push(graph.snapshot());
    }
}

impl<V: Eq + Hash + Clone, E: Clone + PartialEq> History<V, E> {
    /// Rolls `graph` back to the newest snapshot and discards it.
    ///
    /// Returns `Ok(None)` when there is nothing to undo.
    ///
    /// # Errors
    /// Propagates [`Digraph::restore`] errors; the snapshot stays on the stack
    /// and `graph` is unchanged.
    pub fn undo(&mut self, graph: &mut Digraph<V, E>) -> Result<Option<RestoreReport>> {
        let Some(snapshot) = self.snapshots.pop_back() else {
            return Ok(None);
        };
        match graph.restore(&snapshot) {
            Ok(report) => Ok(Some(report)),
            Err(error) => {
                self.snapshots.push_back(snapshot);
                Err(error)
            }
        }
    }
}

impl<V, E> Default for History<V, E> {
    fn default() -> Self {
        Self::new()
    }
}
