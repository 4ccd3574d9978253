//! Construction parameters for digraphs and undo histories.

use serde::{Deserialize, Serialize};

/// Default number of snapshots a [`History`](crate::History) retains.
pub const DEFAULT_HISTORY_DEPTH: usize = 32;

/// Capacity hints and limits.
///
/// Deserializes from any serde format; missing fields fall back to
/// [`DigraphConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigraphConfig {
    /// Vertex slots reserved up front.
    pub vertex_capacity: usize,
    /// Edge slots reserved up front.
    pub edge_capacity: usize,
    /// Snapshots kept by a history before the oldest is dropped. `0` keeps all.
    pub history_depth: usize,
}

impl DigraphConfig {
    /// Same as [`DigraphConfig::default`].
    pub const fn new() -> Self {
        Self {
            vertex_capacity: 0,
            edge_capacity: 0,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }

    /// Sets the vertex capacity hint.
    pub const fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Sets the edge capacity hint.
    pub const fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    /// Sets the history depth.
    pub const fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }
}

impl Default for DigraphConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DigraphConfig::new()
            .with_vertex_capacity(16)
            .with_edge_capacity(64)
            .with_history_depth(4);
        assert_eq!(config.vertex_capacity, 16);
        assert_eq!(config.edge_capacity, 64);
        assert_eq!(config.history_depth, 4);
        assert_eq!(DigraphConfig::default().history_depth, DEFAULT_HISTORY_DEPTH);
    }
}
