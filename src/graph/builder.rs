//! Graph construction and input validation

use crate::error::SpannerError;
use crate::graph::{EdgeId, ResidualGraph, Vertex, Weight};

/// Builder for incrementally constructing a validated `ResidualGraph`.
///
/// Endpoints outside `1..=n` and self-loops are rejected here, before the
/// algorithm ever sees the edge.
pub struct GraphBuilder {
    graph: ResidualGraph,
}

impl GraphBuilder {
    /// Create a builder for a graph over `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self::with_capacity(vertex_count, 0)
    }

    /// Create a builder with pre-allocated edge capacity
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            graph: ResidualGraph::with_capacity(vertex_count, edge_count),
        }
    }

    /// Add an undirected edge. Parallel edges are accepted and stay distinct.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, weight: Weight) -> Result<EdgeId, SpannerError> {
        let vertex_count = self.graph.vertex_count();
        for endpoint in [u, v] {
            if endpoint == 0 || endpoint as usize > vertex_count {
                return Err(SpannerError::EndpointOutOfRange {
                    vertex: endpoint,
                    vertex_count,
                });
            }
        }
        if u == v {
            return Err(SpannerError::SelfLoop { vertex: u });
        }
        Ok(self.graph.add_edge(u, v, weight))
    }

    /// Finish construction
    pub fn build(self) -> ResidualGraph {
        self.graph
    }
}
