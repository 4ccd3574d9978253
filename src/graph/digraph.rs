//! `Digraph` — a directed graph whose vertices and edges carry user payloads.
//!
//! Storage is two generational arenas plus a payload index:
//! - `vertices`: one record per vertex holding its payload and its incidence
//!   list (every edge touching it, outbound and inbound, in insertion order).
//! - `edges`: one record per edge holding its payload and both endpoints.
//! - `index`: payload -> vertex slot, which enforces payload uniqueness.
//!
//! The edge arena is the authoritative edge set, so enumerating edges never
//! double-counts an edge indexed from both endpoints. The incidence lists are
//! kept in lockstep with it by `attach_edge` / `detach_edge`, the only two
//! places that touch both levels.
//!
//! Every public operation validates all of its arguments before changing any
//! state, so a rejected call leaves the digraph untouched.

use super::arena::{Arena, SlotKey};
use super::handle::{Edge, GraphId, Vertex};
use crate::config::DigraphConfig;
use crate::error::{EdgeFault, GraphError, Result, VertexFault};
use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

#[derive(Clone)]
pub(crate) struct VertexRecord<V> {
    pub(crate) payload: V,
    pub(crate) incidence: Vec<SlotKey>,
}

#[derive(Clone)]
pub(crate) struct EdgeRecord<E> {
    pub(crate) payload: E,
    pub(crate) outbound: SlotKey,
    pub(crate) inbound: SlotKey,
}

/// A directed graph with payload-keyed vertices and at most one edge per
/// ordered vertex pair.
///
/// Handles returned by one digraph are rejected by every other digraph,
/// including clones of it.
pub struct Digraph<V, E> {
    id: GraphId,
    pub(crate) vertices: Arena<VertexRecord<V>>,
    pub(crate) edges: Arena<EdgeRecord<E>>,
    pub(crate) index: HashMap<V, SlotKey>,
}

impl<V, E> Digraph<V, E> {
    /// Creates an empty digraph.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty digraph with room for the given number of vertices and edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            id: GraphId::next(),
            vertices: Arena::with_capacity(vertices),
            edges: Arena::with_capacity(edges),
            index: HashMap::with_capacity(vertices),
        }
    }

    /// Creates an empty digraph sized from `config`.
    pub fn with_config(config: &DigraphConfig) -> Self {
        Self::with_capacity(config.vertex_capacity, config.edge_capacity)
    }

    /// The identity every handle from this digraph carries.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no vertices (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices. The order is stable as long as the digraph is not modified.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        let id = self.id;
        self.vertices.keys().map(move |key| Vertex::new(id, key))
    }

    /// All edges, each exactly once.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let id = self.id;
        self.edges.keys().map(move |key| Edge::new(id, key))
    }

    /// Returns `true` if `edge` is a live edge of this digraph.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        edge.graph == self.id && self.edges.contains_key(edge.key)
    }

    /// The payload of `vertex`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn vertex_payload(&self, vertex: Vertex) -> Result<&V> {
        self.vertex_record(vertex).map(|record| &record.payload)
    }

    /// The payload of `edge`.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if `edge` is null, foreign or stale.
    pub fn edge_payload(&self, edge: Edge) -> Result<&E> {
        self.edge_record(edge).map(|record| &record.payload)
    }

    /// Mutable access to the payload of `edge`.
    ///
    /// Unlike [`Digraph::replace_edge`] this does not check the new value
    /// against other edge payloads.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if `edge` is null, foreign or stale.
    pub fn edge_payload_mut(&mut self, edge: Edge) -> Result<&mut E> {
        let key = self.edge_key(edge)?;
        self.edges
            .get_mut(key)
            .map(|record| &mut record.payload)
            .ok_or(GraphError::InvalidEdge(EdgeFault::Stale))
    }

    /// The `(outbound, inbound)` endpoints of `edge`.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if `edge` is null, foreign or stale.
    pub fn endpoints(&self, edge: Edge) -> Result<(Vertex, Vertex)> {
        let record = self.edge_record(edge)?;
        Ok((self.vertex_handle(record.outbound), self.vertex_handle(record.inbound)))
    }

    /// Edges whose inbound endpoint is `vertex`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn incident_edges(&self, vertex: Vertex) -> Result<Vec<Edge>> {
        self.incidence_where(vertex, |edge, key| edge.inbound == key)
    }

    /// Edges whose outbound endpoint is `vertex`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn outbound_edges(&self, vertex: Vertex) -> Result<Vec<Edge>> {
        self.incidence_where(vertex, |edge, key| edge.outbound == key)
    }

    /// Every edge touching `vertex` in either direction, in insertion order.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn incidence(&self, vertex: Vertex) -> Result<Vec<Edge>> {
        self.incidence_where(vertex, |_, _| true)
    }

    /// Number of edges entering `vertex`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn in_degree(&self, vertex: Vertex) -> Result<usize> {
        self.incident_edges(vertex).map(|edges| edges.len())
    }

    /// Number of edges leaving `vertex`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn out_degree(&self, vertex: Vertex) -> Result<usize> {
        self.outbound_edges(vertex).map(|edges| edges.len())
    }

    /// Returns `true` if an edge runs from `outbound` to `inbound`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either vertex is null, foreign or stale.
    pub fn are_adjacent(&self, outbound: Vertex, inbound: Vertex) -> Result<bool> {
        self.edge_between(outbound, inbound).map(|edge| edge.is_some())
    }

    /// The edge running from `outbound` to `inbound`, if any.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either vertex is null, foreign or stale.
    pub fn edge_between(&self, outbound: Vertex, inbound: Vertex) -> Result<Option<Edge>> {
        let out_key = self.vertex_key(outbound)?;
        let in_key = self.vertex_key(inbound)?;
        Ok(self.find_edge(out_key, in_key).map(|key| self.edge_handle(key)))
    }

    /// The endpoint of `edge` that is not `vertex`. For a self loop that is
    /// `vertex` itself.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] / [`GraphError::InvalidEdge`] on invalid
    /// handles, and `InvalidEdge(NotIncident)` if `edge` does not touch `vertex`.
    pub fn opposite(&self, vertex: Vertex, edge: Edge) -> Result<Vertex> {
        let key = self.vertex_key(vertex)?;
        let record = self.edge_record(edge)?;
        if record.outbound == key {
            Ok(self.vertex_handle(record.inbound))
        } else if record.inbound == key {
            Ok(self.vertex_handle(record.outbound))
        } else {
            Err(self.reject(EdgeFault::NotIncident.into()))
        }
    }

    /// Connects `outbound` to `inbound` with a new edge carrying `payload`.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if either vertex is invalid, and
    /// `InvalidEdge(DuplicateConnection)` if the ordered pair is already connected.
    pub fn insert_edge(&mut self, outbound: Vertex, inbound: Vertex, payload: E) -> Result<Edge> {
        let out_key = self.vertex_key(outbound)?;
        let in_key = self.vertex_key(inbound)?;
        if self.find_edge(out_key, in_key).is_some() {
            return Err(self.reject(EdgeFault::DuplicateConnection.into()));
        }

        let key = self.attach_edge(out_key, in_key, payload);
        debug_event!(
            graph = %self.id,
            edge = key.index(),
            from = out_key.index(),
            to = in_key.index(),
            "edge inserted"
        );
        Ok(self.edge_handle(key))
    }

    /// Removes `edge` and returns its payload.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if `edge` is null, foreign or already removed.
    pub fn remove_edge(&mut self, edge: Edge) -> Result<E> {
        let key = self.edge_key(edge)?;
        let payload = self
            .detach_edge(key)
            .ok_or(GraphError::InvalidEdge(EdgeFault::Stale))?;
        debug_event!(graph = %self.id, edge = key.index(), "edge removed");
        Ok(payload)
    }

    /// Removes every vertex and edge. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.index.clear();
        debug_event!(graph = %self.id, "digraph cleared");
    }

    #[inline]
    pub(crate) fn vertex_handle(&self, key: SlotKey) -> Vertex {
        Vertex::new(self.id, key)
    }

    #[inline]
    pub(crate) fn edge_handle(&self, key: SlotKey) -> Edge {
        Edge::new(self.id, key)
    }

    fn reject(&self, error: GraphError) -> GraphError {
        trace_event!(graph = %self.id, %error, "operation rejected");
        error
    }

    /// Resolves a vertex handle, distinguishing null, foreign and stale handles.
    fn vertex_record(&self, vertex: Vertex) -> Result<&VertexRecord<V>> {
        if vertex.is_null() {
            return Err(self.reject(VertexFault::Null.into()));
        }
        if vertex.graph != self.id {
            return Err(self.reject(VertexFault::Foreign.into()));
        }
        self.vertices
            .get(vertex.key)
            .ok_or_else(|| self.reject(VertexFault::Stale.into()))
    }

    fn edge_record(&self, edge: Edge) -> Result<&EdgeRecord<E>> {
        if edge.is_null() {
            return Err(self.reject(EdgeFault::Null.into()));
        }
        if edge.graph != self.id {
            return Err(self.reject(EdgeFault::Foreign.into()));
        }
        self.edges
            .get(edge.key)
            .ok_or_else(|| self.reject(EdgeFault::Stale.into()))
    }

    pub(crate) fn vertex_key(&self, vertex: Vertex) -> Result<SlotKey> {
        self.vertex_record(vertex).map(|_| vertex.key)
    }

    pub(crate) fn edge_key(&self, edge: Edge) -> Result<SlotKey> {
        self.edge_record(edge).map(|_| edge.key)
    }

    fn incidence_where<F>(&self, vertex: Vertex, keep: F) -> Result<Vec<Edge>>
    where
        F: Fn(&EdgeRecord<E>, SlotKey) -> bool,
    {
        let record = self.vertex_record(vertex)?;
        Ok(record
            .incidence
            .iter()
            .copied()
            .filter(|&key| self.edges.get(key).is_some_and(|edge| keep(edge, vertex.key)))
            .map(|key| self.edge_handle(key))
            .collect())
    }

    /// Finds the edge for an ordered pair by scanning the outbound vertex's incidence list.
    pub(crate) fn find_edge(&self, outbound: SlotKey, inbound: SlotKey) -> Option<SlotKey> {
        let record = self.vertices.get(outbound)?;
        record.incidence.iter().copied().find(|&key| {
            self.edges
                .get(key)
                .is_some_and(|edge| edge.outbound == outbound && edge.inbound == inbound)
        })
    }

    /// Stores an edge and registers it with both endpoints. Endpoints must be live.
    pub(crate) fn attach_edge(&mut self, outbound: SlotKey, inbound: SlotKey, payload: E) -> SlotKey {
        let key = self.edges.insert(EdgeRecord {
            payload,
            outbound,
            inbound,
        });
        if let Some(record) = self.vertices.get_mut(outbound) {
            record.incidence.push(key);
        }
        // A self loop is listed once.
        if inbound != outbound {
            if let Some(record) = self.vertices.get_mut(inbound) {
                record.incidence.push(key);
            }
        }
        key
    }

    /// Drops an edge and unregisters it from both endpoints.
    pub(crate) fn detach_edge(&mut self, key: SlotKey) -> Option<E> {
        let edge = self.edges.remove(key)?;
        for endpoint in [edge.outbound, edge.inbound] {
            if let Some(record) = self.vertices.get_mut(endpoint) {
                record.incidence.retain(|&other| other != key);
            }
        }
        Some(edge.payload)
    }
}

impl<V: Eq + Hash, E> Digraph<V, E> {
    /// The vertex carrying `payload`, if any.
    pub fn vertex(&self, payload: &V) -> Option<Vertex> {
        self.index.get(payload).map(|&key| self.vertex_handle(key))
    }

    /// Returns `true` if some vertex carries `payload`.
    pub fn contains_vertex(&self, payload: &V) -> bool {
        self.index.contains_key(payload)
    }

    /// Connects the vertices carrying `outbound` and `inbound`.
    ///
    /// # Errors
    /// `InvalidVertex(Unknown)` if either payload has no vertex, and
    /// `InvalidEdge(DuplicateConnection)` if the pair is already connected.
    pub fn insert_edge_between(&mut self, outbound: &V, inbound: &V, payload: E) -> Result<Edge> {
        let out_vertex = self.lookup(outbound)?;
        let in_vertex = self.lookup(inbound)?;
        self.insert_edge(out_vertex, in_vertex, payload)
    }

    /// Removes `vertex` together with every edge touching it, returning its payload.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is null, foreign or stale.
    pub fn remove_vertex(&mut self, vertex: Vertex) -> Result<V> {
        let key = self.vertex_key(vertex)?;
        let (payload, cascaded) = self
            .detach_vertex(key)
            .ok_or(GraphError::InvalidVertex(VertexFault::Stale))?;
        debug_event!(
            graph = %self.id,
            vertex = key.index(),
            cascaded,
            "vertex removed"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = cascaded;
        Ok(payload)
    }

    fn lookup(&self, payload: &V) -> Result<Vertex> {
        self.vertex(payload)
            .ok_or_else(|| self.reject(VertexFault::Unknown.into()))
    }

    /// Drops a vertex and its incident edges. Returns the payload and the
    /// number of edges removed with it.
    pub(crate) fn detach_vertex(&mut self, key: SlotKey) -> Option<(V, usize)> {
        let incidence = std::mem::take(&mut self.vertices.get_mut(key)?.incidence);
        let cascaded = incidence
            .into_iter()
            .filter_map(|edge| self.detach_edge(edge))
            .count();
        let record = self.vertices.remove(key)?;
        self.index.remove(&record.payload);
        Some((record.payload, cascaded))
    }
}

impl<V: Eq + Hash + Clone, E> Digraph<V, E> {
    /// Adds a vertex carrying `payload`.
    ///
    /// # Errors
    /// `InvalidVertex(Duplicate)` if a vertex already carries an equal payload.
    pub fn insert_vertex(&mut self, payload: V) -> Result<Vertex> {
        if self.index.contains_key(&payload) {
            return Err(self.reject(VertexFault::Duplicate.into()));
        }
        let key = self.vertices.insert(VertexRecord {
            payload: payload.clone(),
            incidence: Vec::new(),
        });
        self.index.insert(payload, key);
        debug_event!(graph = %self.id, vertex = key.index(), "vertex inserted");
        Ok(self.vertex_handle(key))
    }

    /// Overwrites the payload of `vertex` in place and returns the old one.
    /// Handles and incidence are unaffected.
    ///
    /// # Errors
    /// [`GraphError::InvalidVertex`] if `vertex` is invalid, or
    /// `InvalidVertex(Duplicate)` if a different vertex already carries `replacement`.
    pub fn replace_vertex(&mut self, vertex: Vertex, replacement: V) -> Result<V> {
        let key = self.vertex_key(vertex)?;
        if self.index.get(&replacement).is_some_and(|&owner| owner != key) {
            return Err(self.reject(VertexFault::Duplicate.into()));
        }

        let old = match self.vertices.get_mut(key) {
            Some(record) => std::mem::replace(&mut record.payload, replacement.clone()),
            None => return Err(GraphError::InvalidVertex(VertexFault::Stale)),
        };
        self.index.remove(&old);
        self.index.insert(replacement, key);
        debug_event!(graph = %self.id, vertex = key.index(), "vertex payload replaced");
        Ok(old)
    }
}

impl<V, E: PartialEq> Digraph<V, E> {
    /// Overwrites the payload of `edge` in place and returns the old one.
    ///
    /// # Errors
    /// [`GraphError::InvalidEdge`] if `edge` is invalid, or
    /// `InvalidEdge(DuplicatePayload)` if a different edge already carries `replacement`.
    pub fn replace_edge(&mut self, edge: Edge, replacement: E) -> Result<E> {
        let key = self.edge_key(edge)?;
        if self
            .edges
            .iter()
            .any(|(other, record)| other != key && record.payload == replacement)
        {
            return Err(self.reject(EdgeFault::DuplicatePayload.into()));
        }

        let old = match self.edges.get_mut(key) {
            Some(record) => std::mem::replace(&mut record.payload, replacement),
            None => return Err(GraphError::InvalidEdge(EdgeFault::Stale)),
        };
        debug_event!(graph = %self.id, edge = key.index(), "edge payload replaced");
        Ok(old)
    }
}

impl<V, E> Default for Digraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy under a fresh [`GraphId`]: handles of the original are foreign to the copy.
impl<V: Clone, E: Clone> Clone for Digraph<V, E> {
    fn clone(&self) -> Self {
        Self {
            id: GraphId::next(),
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            index: self.index.clone(),
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Digraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<&V> = self.vertices.values().map(|record| &record.payload).collect();
        let edges: Vec<(&V, &V, &E)> = self
            .edges
            .values()
            .filter_map(|edge| {
                let from = &self.vertices.get(edge.outbound)?.payload;
                let to = &self.vertices.get(edge.inbound)?.payload;
                Some((from, to, &edge.payload))
            })
            .collect();
        f.debug_struct("Digraph")
            .field("id", &self.id)
            .field("vertices", &vertices)
            .field("edges", &edges)
            .finish()
    }
}
