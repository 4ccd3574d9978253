//! `SharedDigraph` — a digraph shared between threads with serialized access.
//!
//! The digraph itself has no interior synchronization. This wrapper puts the
//! whole structure behind one mutex, so at most one call (read or write) is in
//! flight at any time and callers never observe a half-applied mutation.

use super::digraph::Digraph;
use super::history::History;
use super::snapshot::RestoreReport;
use crate::error::Result;
use core::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a mutex-guarded [`Digraph`].
pub struct SharedDigraph<V, E> {
    inner: Arc<Mutex<Digraph<V, E>>>,
}

impl<V, E> SharedDigraph<V, E> {
    /// Wraps an empty digraph.
    pub fn new() -> Self {
        Self::from(Digraph::new())
    }

    fn lock(&self) -> MutexGuard<'_, Digraph<V, E>> {
        // Digraph operations never partially apply, so a panic in some other
        // caller's closure leaves the structure consistent.
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn_event!("shared digraph lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Runs `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&Digraph<V, E>) -> R) -> R {
        f(&self.lock())
    }

    /// Runs `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut Digraph<V, E>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Unwraps the digraph if this is the last handle, otherwise returns `self`.
    ///
    /// # Errors
    /// Returns `self` unchanged while other clones are alive.
    pub fn try_into_inner(self) -> core::result::Result<Digraph<V, E>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<V: Clone, E: Clone> SharedDigraph<V, E> {
    /// Records the current state into `history` under the lock.
    pub fn checkpoint(&self, history: &mut History<V, E>) {
        history.checkpoint(&self.lock());
    }
}

impl<V: Eq + Hash + Clone, E: Clone + PartialEq> SharedDigraph<V, E> {
    /// Undoes to the newest snapshot in `history` under the lock.
    ///
    /// # Errors
    /// See [`History::undo`].
    pub fn undo(&self, history: &mut History<V, E>) -> Result<Option<RestoreReport>> {
        history.undo(&mut self.lock())
    }
}

impl<V, E> Clone for SharedDigraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> core::fmt::Debug for SharedDigraph<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedDigraph")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl<V, E> Default for SharedDigraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> From<Digraph<V, E>> for SharedDigraph<V, E> {
    fn from(graph: Digraph<V, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }
}
