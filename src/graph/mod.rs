//! The directed graph container and the layers built on top of it.
//!
//! - `digraph`: the container, its handles and queries
//! - `snapshot`: payload-level copies and diff-based restore
//! - `history`: bounded undo stack over snapshots
//! - `shared`: mutex-serialized access for multi-threaded callers

pub(crate) mod arena;
pub mod digraph;
pub mod handle;
pub mod history;
pub mod shared;
pub mod snapshot;

pub use digraph::Digraph;
pub use handle::{Edge, GraphId, Vertex};
pub use history::History;
pub use shared::SharedDigraph;
pub use snapshot::{EdgeSnapshot, RestoreReport, Snapshot};
