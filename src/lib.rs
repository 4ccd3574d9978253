//! # `digraph-adt` - Directed Graph Container
//!
//! A generic directed graph whose vertices and edges each wrap a user payload.
//! Vertices are keyed by payload (at most one vertex per distinct value) and
//! at most one edge may connect a given ordered vertex pair.
//!
//! ## Handles
//!
//! [`Vertex`] and [`Edge`] are small `Copy` handles: the [`GraphId`] of the
//! digraph that issued them plus a generational slot key. Every operation
//! validates its handles and reports why a handle was rejected:
//!
//! - **Null**: [`Vertex::null`] / [`Edge::null`]
//! - **Foreign**: issued by another digraph (clones included)
//! - **Stale**: the vertex or edge has since been removed, even if its slot
//!   has been reused
//!
//! ## Atomicity
//!
//! Every mutation validates all arguments first. A rejected call returns a
//! [`GraphError`] and leaves the digraph exactly as it was.
//!
//! ## Layers
//!
//! - [`Snapshot`] / [`Digraph::restore`]: payload-level copies and in-place
//!   reconciliation
//! - [`History`]: bounded undo stack
//! - [`SharedDigraph`]: one-mutex wrapper for multi-threaded callers
//!
//! ## Example
//!
//! ```rust
//! use digraph_adt::{Digraph, GraphError, VertexFault};
//!
//! let mut graph: Digraph<&str, &str> = Digraph::new();
//! let alice = graph.insert_vertex("alice").unwrap();
//! let bob = graph.insert_vertex("bob").unwrap();
//! let follows = graph.insert_edge(alice, bob, "follows").unwrap();
//!
//! assert!(graph.are_adjacent(alice, bob).unwrap());
//! assert!(!graph.are_adjacent(bob, alice).unwrap());
//! assert_eq!(graph.opposite(alice, follows), Ok(bob));
//!
//! assert_eq!(
//!     graph.insert_vertex("alice"),
//!     Err(GraphError::InvalidVertex(VertexFault::Duplicate))
//! );
//!
//! graph.remove_vertex(bob).unwrap();
//! assert_eq!(graph.edge_count(), 0);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod trace;

pub mod config;
pub mod error;
pub mod graph;

pub use config::DigraphConfig;
pub use error::{EdgeFault, GraphError, Result, VertexFault};
pub use graph::{
    Digraph, Edge, EdgeSnapshot, GraphId, History, RestoreReport, SharedDigraph, Snapshot, Vertex,
};

// Handles stay two words so they can be passed and stored by value.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<Vertex>() == 16);
    assert!(mem::size_of::<Edge>() == 16);
};
