//! Spanner construction engine
//!
//! Wires the sampler, cluster state and the two phases together, times each
//! phase, and post-checks the bookkeeping invariants before handing the
//! result back.

use std::time::Instant;

use serde::Serialize;

use crate::cluster::sampling::CenterSampler;
use crate::cluster::{phase1, phase2, ClusterState};
use crate::config::Config;
use crate::error::SpannerError;
use crate::graph::{EdgeId, ResidualGraph, Vertex, Weight};

/// One selected spanner edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpannerEdge {
    pub u: Vertex,
    pub v: Vertex,
    pub weight: Weight,
}

/// Run diagnostics: per-phase edge counts and wall times in milliseconds
#[derive(Debug, Clone, Serialize)]
pub struct SpannerStats {
    /// Edges contributed by the cluster-formation rounds
    pub phase1_edges: usize,

    /// Edges contributed by the final joining pass
    pub phase2_edges: usize,

    pub phase1_ms: f64,
    pub phase2_ms: f64,
    pub total_ms: f64,
}

/// Result of a construction run. The edge list keeps Phase-1 edges first,
/// in selection order, followed by Phase-2 edges.
#[derive(Debug, Clone, Serialize)]
pub struct Spanner {
    pub vertex_count: usize,
    pub edges: Vec<SpannerEdge>,
    pub stats: SpannerStats,
}

impl Spanner {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Compute a `(2k - 1)`-spanner of `graph`, consuming it.
///
/// The residual graph must be fully drained by the end of Phase 2; that and
/// the append-once discipline of the edge list are verified before the
/// result is returned.
pub fn build_spanner(mut graph: ResidualGraph, config: &Config) -> Result<Spanner, SpannerError> {
    if config.k == 0 {
        return Err(SpannerError::InvalidStretch(0));
    }

    let vertex_count = graph.vertex_count();
    let mut clusters = ClusterState::new(vertex_count);
    let mut sampler = CenterSampler::new(vertex_count, config.k, config.seed);
    let mut selected: Vec<EdgeId> = Vec::new();

    log::info!(
        "Building a {}-spanner over {} vertices and {} edges (k = {}, retention {:.4})",
        2 * config.k - 1,
        vertex_count,
        graph.edge_count(),
        config.k,
        sampler.retention()
    );

    let phase1_start = Instant::now();
    phase1::form_clusters(&mut graph, &mut clusters, &mut sampler, &mut selected, config.k)?;
    let phase1_ms = elapsed_ms(phase1_start);
    let phase1_edges = selected.len();
    log::info!("Phase 1 selected {} edges in {:.3} ms", phase1_edges, phase1_ms);

    let phase2_start = Instant::now();
    phase2::join_remaining(&mut graph, &clusters, &mut selected);
    let phase2_ms = elapsed_ms(phase2_start);
    let phase2_edges = selected.len() - phase1_edges;
    log::info!("Phase 2 selected {} edges in {:.3} ms", phase2_edges, phase2_ms);

    verify_consumed(&graph, &selected)?;

    let edges = selected
        .iter()
        .map(|&id| {
            let record = graph.edge(id);
            SpannerEdge {
                u: record.u,
                v: record.v,
                weight: record.weight,
            }
        })
        .collect();

    Ok(Spanner {
        vertex_count,
        edges,
        stats: SpannerStats {
            phase1_edges,
            phase2_edges,
            phase1_ms,
            phase2_ms,
            total_ms: phase1_ms + phase2_ms,
        },
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

/// Post-run invariants: every selected handle is unique and no longer live,
/// and the residual graph is fully drained.
fn verify_consumed(graph: &ResidualGraph, selected: &[EdgeId]) -> Result<(), SpannerError> {
    let mut seen = vec![false; graph.edge_count()];
    for &id in selected {
        if seen[id.index()] {
            return Err(SpannerError::InvariantViolation(
                "edge appended to the spanner twice",
            ));
        }
        seen[id.index()] = true;
        if graph.is_live(id) {
            return Err(SpannerError::InvariantViolation(
                "spanner edge still live in the residual graph",
            ));
        }
    }
    if graph.live_edge_count() != 0 {
        return Err(SpannerError::InvariantViolation(
            "residual graph not exhausted after phase 2",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph_from(n: usize, edges: &[(Vertex, Vertex, Weight)]) -> ResidualGraph {
        let mut builder = GraphBuilder::with_capacity(n, edges.len());
        for &(u, v, w) in edges {
            builder.add_edge(u, v, w).unwrap();
        }
        builder.build()
    }

    fn normalized(spanner: &Spanner) -> Vec<(Vertex, Vertex, Weight)> {
        let mut edges: Vec<_> = spanner
            .edges
            .iter()
            .map(|e| (e.u.min(e.v), e.u.max(e.v), e.weight))
            .collect();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn identity_when_k_is_one() {
        let input = [(1, 2, 4), (2, 3, 1), (3, 4, 2), (1, 4, 9), (2, 4, 7)];
        let spanner = build_spanner(graph_from(4, &input), &Config::new(1, Some(7))).unwrap();
        assert_eq!(spanner.edge_count(), input.len());
        assert_eq!(spanner.stats.phase1_edges, 0);
        assert_eq!(spanner.stats.phase2_edges, input.len());
        let mut expected: Vec<_> = input.iter().map(|&(u, v, w)| (u.min(v), u.max(v), w)).collect();
        expected.sort_unstable();
        assert_eq!(normalized(&spanner), expected);
    }

    #[test]
    fn empty_graph_yields_empty_spanner() {
        let spanner = build_spanner(graph_from(5, &[]), &Config::new(3, Some(1))).unwrap();
        assert_eq!(spanner.vertex_count, 5);
        assert!(spanner.edges.is_empty());
        assert_eq!(spanner.stats.phase1_edges, 0);
        assert_eq!(spanner.stats.phase2_edges, 0);
    }

    #[test]
    fn parallel_edges_collapse_to_the_minimum_when_k_is_one() {
        let input = [(1, 2, 5), (1, 2, 3), (1, 2, 9)];
        let spanner = build_spanner(graph_from(2, &input), &Config::new(1, Some(0))).unwrap();
        assert_eq!(normalized(&spanner), vec![(1, 2, 3)]);
    }

    #[test]
    fn same_seed_reproduces_the_same_spanner() {
        let input = [
            (1, 2, 3),
            (2, 3, 1),
            (3, 4, 4),
            (4, 5, 1),
            (5, 6, 5),
            (6, 1, 9),
            (1, 4, 2),
            (2, 5, 8),
            (3, 6, 6),
        ];
        let a = build_spanner(graph_from(6, &input), &Config::new(2, Some(42))).unwrap();
        let b = build_spanner(graph_from(6, &input), &Config::new(2, Some(42))).unwrap();
        let edges_a: Vec<_> = a.edges.clone();
        let edges_b: Vec<_> = b.edges.clone();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn no_vertex_pair_is_spanned_twice() {
        let input = [
            (1, 2, 2),
            (1, 3, 5),
            (1, 4, 1),
            (1, 5, 8),
            (2, 3, 3),
            (2, 4, 9),
            (2, 5, 4),
            (3, 4, 7),
            (3, 5, 2),
            (4, 5, 6),
        ];
        for seed in 0..20 {
            let spanner = build_spanner(graph_from(5, &input), &Config::new(2, Some(seed))).unwrap();
            let mut pairs: Vec<_> = spanner.edges.iter().map(|e| (e.u.min(e.v), e.u.max(e.v))).collect();
            pairs.sort_unstable();
            let total = pairs.len();
            pairs.dedup();
            assert_eq!(pairs.len(), total, "duplicate pair with seed {seed}");
        }
    }

    #[test]
    fn rejects_zero_stretch() {
        let err = build_spanner(graph_from(2, &[(1, 2, 1)]), &Config::new(0, None)).unwrap_err();
        assert!(matches!(err, SpannerError::InvalidStretch(0)));
    }
}
