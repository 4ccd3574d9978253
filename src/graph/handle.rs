//! Vertex and edge handles.
//!
//! A handle is a plain `Copy` value: the id of the digraph that issued it plus
//! a generational slot key. Validation against a digraph is three equality
//! checks (null, owner, live generation), no pointer chasing or type recovery.

use super::arena::SlotKey;
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a digraph instance. `0` is reserved for null handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

impl GraphId {
    pub(crate) const NULL: GraphId = GraphId(0);

    /// Allocates an id never handed out before in this process.
    pub(crate) fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle to a vertex of a [`Digraph`](super::Digraph).
///
/// Only valid against the digraph that returned it, and only until that
/// vertex is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub(crate) graph: GraphId,
    pub(crate) key: SlotKey,
}

/// Handle to an edge of a [`Digraph`](super::Digraph).
///
/// Only valid against the digraph that returned it, and only until that
/// edge (or one of its endpoints) is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub(crate) graph: GraphId,
    pub(crate) key: SlotKey,
}

impl Vertex {
    pub(crate) const fn new(graph: GraphId, key: SlotKey) -> Self {
        Self { graph, key }
    }

    /// A handle that refers to nothing; every digraph rejects it.
    pub const fn null() -> Self {
        Self::new(GraphId::NULL, SlotKey::new(u32::MAX, 0))
    }

    /// Returns `true` for [`Vertex::null`].
    pub fn is_null(self) -> bool {
        self.graph.is_null()
    }

    /// The digraph this handle was issued by.
    pub fn graph(self) -> GraphId {
        self.graph
    }
}

impl Edge {
    pub(crate) const fn new(graph: GraphId, key: SlotKey) -> Self {
        Self { graph, key }
    }

    /// A handle that refers to nothing; every digraph rejects it.
    pub const fn null() -> Self {
        Self::new(GraphId::NULL, SlotKey::new(u32::MAX, 0))
    }

    /// Returns `true` for [`Edge::null`].
    pub fn is_null(self) -> bool {
        self.graph.is_null()
    }

    /// The digraph this handle was issued by.
    pub fn graph(self) -> GraphId {
        self.graph
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::null()
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Vertex(null)");
        }
        write!(
            f,
            "Vertex({}:{}v{})",
            self.graph,
            self.key.index(),
            self.key.generation()
        )
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Edge(null)");
        }
        write!(
            f,
            "Edge({}:{}v{})",
            self.graph,
            self.key.index(),
            self.key.generation()
        )
    }
}
