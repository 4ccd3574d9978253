//! Error types shared by every digraph operation.

use thiserror::Error;

/// Why a vertex argument (or vertex payload) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFault {
    /// The handle is [`Vertex::null`](crate::Vertex::null).
    Null,
    /// The handle was issued by a different digraph.
    Foreign,
    /// The vertex has been removed.
    Stale,
    /// Another vertex already carries this payload.
    Duplicate,
    /// No vertex carries this payload.
    Unknown,
}

/// Why an edge argument (or edge payload) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeFault {
    /// The handle is [`Edge::null`](crate::Edge::null).
    Null,
    /// The handle was issued by a different digraph.
    Foreign,
    /// The edge has been removed.
    Stale,
    /// The ordered vertex pair is already connected.
    DuplicateConnection,
    /// Another edge already carries this payload.
    DuplicatePayload,
    /// The edge does not touch the given vertex.
    NotIncident,
}

impl VertexFault {
    fn describe(self) -> &'static str {
        match self {
            VertexFault::Null => "null vertex",
            VertexFault::Foreign => "vertex does not belong to this digraph",
            VertexFault::Stale => "vertex has been removed",
            VertexFault::Duplicate => "a vertex with this payload already exists",
            VertexFault::Unknown => "no vertex carries this payload",
        }
    }
}

impl EdgeFault {
    fn describe(self) -> &'static str {
        match self {
            EdgeFault::Null => "null edge",
            EdgeFault::Foreign => "edge does not belong to this digraph",
            EdgeFault::Stale => "edge has been removed",
            EdgeFault::DuplicateConnection => "an edge already connects these vertices",
            EdgeFault::DuplicatePayload => "an edge with this payload already exists",
            EdgeFault::NotIncident => "edge is not incident to the vertex",
        }
    }
}

/// Errors returned by [`Digraph`](crate::Digraph) operations.
///
/// Every failing operation is rejected before any state changes, so the
/// digraph is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GraphError {
    /// A vertex argument or vertex payload was rejected.
    #[error("invalid vertex: {}", .0.describe())]
    InvalidVertex(VertexFault),
    /// An edge argument or edge payload was rejected.
    #[error("invalid edge: {}", .0.describe())]
    InvalidEdge(EdgeFault),
}

impl GraphError {
    /// Returns `true` for [`GraphError::InvalidVertex`].
    pub fn is_vertex_error(&self) -> bool {
        matches!(self, GraphError::InvalidVertex(_))
    }

    /// Returns `true` for [`GraphError::InvalidEdge`].
    pub fn is_edge_error(&self) -> bool {
        matches!(self, GraphError::InvalidEdge(_))
    }

    /// Returns `true` when the rejection was a uniqueness violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidVertex(VertexFault::Duplicate)
                | GraphError::InvalidEdge(EdgeFault::DuplicateConnection | EdgeFault::DuplicatePayload)
        )
    }
}

impl From<VertexFault> for GraphError {
    fn from(fault: VertexFault) -> Self {
        GraphError::InvalidVertex(fault)
    }
}

impl From<EdgeFault> for GraphError {
    fn from(fault: EdgeFault) -> Self {
        GraphError::InvalidEdge(fault)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GraphError>;
