//! Payload-level snapshots and diff-based restore.
//!
//! A [`Snapshot`] holds no handles, only payloads, so it outlives the
//! vertices and edges it was taken from and can be applied to any digraph.
//! [`Digraph::restore`] reconciles a live digraph against a snapshot in place:
//! entities present in both keep their handles.

use super::arena::SlotKey;
use super::digraph::{Digraph, VertexRecord};
use crate::error::{EdgeFault, GraphError, Result, VertexFault};
use core::hash::Hash;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One edge of a [`Snapshot`], identified by its endpoint payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeSnapshot<V, E> {
    /// Payload of the outbound (source) vertex.
    pub outbound: V,
    /// Payload of the inbound (destination) vertex.
    pub inbound: V,
    /// The edge payload.
    pub payload: E,
}

/// A deep copy of a digraph's payloads and structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<V, E> {
    /// Vertex payloads in vertex order.
    pub vertices: Vec<V>,
    /// Edges in edge order.
    pub edges: Vec<EdgeSnapshot<V, E>>,
}

impl<V, E> Snapshot<V, E> {
    /// Number of vertices captured.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges captured.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<V, E> Default for Snapshot<V, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// What [`Digraph::restore`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Vertices inserted because the snapshot had them and the digraph did not.
    pub vertices_added: usize,
    /// Vertices removed because the snapshot lacked them.
    pub vertices_removed: usize,
    /// Edges inserted.
    pub edges_added: usize,
    /// Edges removed, including those cascaded from removed vertices.
    pub edges_removed: usize,
    /// Edges kept whose payload was overwritten.
    pub edges_updated: usize,
}

impl RestoreReport {
    /// Returns `true` if the digraph already matched the snapshot.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

impl<V: Clone, E: Clone> Digraph<V, E> {
    /// Captures every vertex and edge payload.
    pub fn snapshot(&self) -> Snapshot<V, E> {
        let vertices = self
            .vertices
            .values()
            .map(|record| record.payload.clone())
            .collect();
        let edges = self
            .edges
            .values()
            .filter_map(|edge| {
                Some(EdgeSnapshot {
                    outbound: self.vertices.get(edge.outbound)?.payload.clone(),
                    inbound: self.vertices.get(edge.inbound)?.payload.clone(),
                    payload: edge.payload.clone(),
                })
            })
            .collect();
        Snapshot { vertices, edges }
    }
}

impl<V: Eq + Hash + Clone, E: Clone + PartialEq> Digraph<V, E> {
    /// Builds a new digraph holding exactly the contents of `snapshot`.
    ///
    /// # Errors
    /// See [`Digraph::restore`].
    pub fn from_snapshot(snapshot: &Snapshot<V, E>) -> Result<Self> {
        let mut graph = Self::with_capacity(snapshot.vertex_count(), snapshot.edge_count());
        graph.restore(snapshot)?;
        Ok(graph)
    }

    /// Reconciles this digraph with `snapshot`.
    ///
    /// Vertices and edges missing from the snapshot are removed, missing ones
    /// are inserted, and surviving edges take the snapshot's payload. Surviving
    /// handles stay valid.
    ///
    /// # Errors
    /// The snapshot is checked before anything changes:
    /// `InvalidVertex(Duplicate)` for a repeated vertex payload,
    /// `InvalidVertex(Unknown)` for an edge endpoint that is not a snapshot
    /// vertex, and `InvalidEdge(DuplicateConnection)` for a repeated ordered pair.
    pub fn restore(&mut self, snapshot: &Snapshot<V, E>) -> Result<RestoreReport> {
        validate(snapshot)?;
        let wanted_vertices: HashSet<&V> = snapshot.vertices.iter().collect();
        let mut report = RestoreReport::default();

        let doomed: Vec<SlotKey> = self
            .vertices
            .iter()
            .filter(|(_, record)| !wanted_vertices.contains(&record.payload))
            .map(|(key, _)| key)
            .collect();
        for key in doomed {
            if let Some((_, cascaded)) = self.detach_vertex(key) {
                report.vertices_removed += 1;
                report.edges_removed += cascaded;
            }
        }

        for payload in &snapshot.vertices {
            if !self.index.contains_key(payload) {
                let key = self.vertices.insert(VertexRecord {
                    payload: payload.clone(),
                    incidence: Vec::new(),
                });
                self.index.insert(payload.clone(), key);
                report.vertices_added += 1;
            }
        }

        let wanted_edges: HashMap<(SlotKey, SlotKey), &E> = snapshot
            .edges
            .iter()
            .filter_map(|edge| {
                let from = *self.index.get(&edge.outbound)?;
                let to = *self.index.get(&edge.inbound)?;
                Some(((from, to), &edge.payload))
            })
            .collect();

        let mut stale = Vec::new();
        let mut changed = Vec::new();
        for (key, edge) in self.edges.iter() {
            match wanted_edges.get(&(edge.outbound, edge.inbound)) {
                None => stale.push(key),
                Some(&payload) if *payload != edge.payload => changed.push((key, payload)),
                Some(_) => {}
            }
        }
        for key in stale {
            if self.detach_edge(key).is_some() {
                report.edges_removed += 1;
            }
        }
        for (key, payload) in changed {
            if let Some(edge) = self.edges.get_mut(key) {
                edge.payload = payload.clone();
                report.edges_updated += 1;
            }
        }

        for edge in &snapshot.edges {
            let (Some(&from), Some(&to)) = (self.index.get(&edge.outbound), self.index.get(&edge.inbound))
            else {
                continue;
            };
            if self.find_edge(from, to).is_none() {
                self.attach_edge(from, to, edge.payload.clone());
                report.edges_added += 1;
            }
        }

        debug_event!(
            graph = %self.id(),
            vertices_added = report.vertices_added,
            vertices_removed = report.vertices_removed,
            edges_added = report.edges_added,
            edges_removed = report.edges_removed,
            edges_updated = report.edges_updated,
            "digraph restored from snapshot"
        );
        Ok(report)
    }
}

/// Checks a snapshot for internal consistency.
fn validate<V: Eq + Hash, E>(snapshot: &Snapshot<V, E>) -> Result<()> {
    let mut vertices = HashSet::with_capacity(snapshot.vertices.len());
    for payload in &snapshot.vertices {
        if !vertices.insert(payload) {
            return Err(GraphError::InvalidVertex(VertexFault::Duplicate));
        }
    }

    let mut pairs = HashSet::with_capacity(snapshot.edges.len());
    for edge in &snapshot.edges {
        if !vertices.contains(&edge.outbound) || !vertices.contains(&edge.inbound) {
            return Err(GraphError::InvalidVertex(VertexFault::Unknown));
        }
        if !pairs.insert((&edge.outbound, &edge.inbound)) {
            return Err(GraphError::InvalidEdge(EdgeFault::DuplicateConnection));
        }
    }
    Ok(())
}
