//! Phase 2: vertex-cluster joining
//!
//! One final pass over the frozen cluster state: every vertex keeps a single
//! minimum-weight edge into each distinct final cluster and the rest of its
//! residual adjacency is retired. At most one spanner edge survives per
//! (vertex, final cluster) pair.

use std::collections::BTreeMap;

use crate::cluster::{closer, Candidate, ClusterState};
use crate::graph::{EdgeId, ResidualGraph, Vertex};

/// Join every vertex to its final clusters and drain the residual graph.
pub fn join_remaining(graph: &mut ResidualGraph, clusters: &ClusterState, spanner: &mut Vec<EdgeId>) {
    for v in graph.vertices() {
        let incident = graph.incident_edges(v);
        if incident.is_empty() {
            continue;
        }

        let mut best: BTreeMap<Vertex, Candidate> = BTreeMap::new();
        for &(id, neighbor, weight) in &incident {
            let center = clusters.center_of(neighbor);
            let candidate = (weight, neighbor, id);
            let entry = best.entry(center).or_insert(candidate);
            if closer(candidate, *entry) {
                *entry = candidate;
            }
        }

        for &(_, _, id) in best.values() {
            spanner.push(id);
        }
        graph.clear_vertex(v);
    }
}
