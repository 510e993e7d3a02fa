//! Phase 1: cluster formation rounds
//!
//! Each of the `k - 1` rounds resamples the surviving cluster centers,
//! reattaches or isolates every vertex left outside a sampled cluster, and
//! purges residual edges that became internal to a surviving cluster. Every
//! edge selected along the way is appended to the spanner and removed from
//! the residual graph in the same step.

use std::collections::BTreeMap;

use crate::cluster::sampling::CenterSampler;
use crate::cluster::{closer, Candidate, ClusterEdge, ClusterState};
use crate::error::SpannerError;
use crate::graph::{EdgeId, ResidualGraph, Vertex, Weight};

/// Run the `k - 1` cluster-formation rounds.
pub fn form_clusters(
    graph: &mut ResidualGraph,
    clusters: &mut ClusterState,
    sampler: &mut CenterSampler,
    spanner: &mut Vec<EdgeId>,
    k: u32,
) -> Result<(), SpannerError> {
    let mut completed = 0;
    for round in 1..k {
        run_round(graph, clusters, sampler, spanner)?;
        clusters.finish_round();
        completed += 1;
        log::debug!(
            "round {}: {} centers remain, {} cluster edges, {} live residual edges, {} spanner edges",
            round,
            clusters.previous_centers.len(),
            clusters.previous_cluster_edges.len(),
            graph.live_edge_count(),
            spanner.len()
        );
    }
    if completed != k - 1 {
        return Err(SpannerError::IncompleteRounds {
            completed,
            expected: k - 1,
        });
    }
    Ok(())
}

fn run_round(
    graph: &mut ResidualGraph,
    clusters: &mut ClusterState,
    sampler: &mut CenterSampler,
    spanner: &mut Vec<EdgeId>,
) -> Result<(), SpannerError> {
    resample_centers(clusters, sampler);
    for v in graph.vertices() {
        if clusters.in_sampled_cluster(v) {
            continue;
        }
        attach_vertex(graph, clusters, spanner, v)?;
    }
    purge_intra_cluster(graph, clusters)
}

/// Step 1: resample the previous round's centers and carry each cluster edge
/// whose anchor survived, reattaching the member to it. Edges whose cluster
/// dissolved are dropped.
fn resample_centers(clusters: &mut ClusterState, sampler: &mut CenterSampler) {
    clusters.begin_round();

    let previous = std::mem::take(&mut clusters.previous_centers);
    for &center in &previous {
        if sampler.keep() {
            clusters.mark_sampled(center);
        }
    }
    clusters.previous_centers = previous;

    let carried = std::mem::take(&mut clusters.previous_cluster_edges);
    for entry in carried {
        if clusters.is_sampled(entry.anchor) {
            clusters.set_center(entry.member, entry.anchor);
            clusters.current_cluster_edges.push(entry);
        } else if clusters.is_sampled(entry.member) {
            clusters.set_center(entry.anchor, entry.member);
            clusters.current_cluster_edges.push(ClusterEdge {
                edge: entry.edge,
                member: entry.anchor,
                anchor: entry.member,
            });
        }
    }
}

/// Steps 2-3: reattach or isolate a vertex whose cluster was not sampled
fn attach_vertex(
    graph: &mut ResidualGraph,
    clusters: &mut ClusterState,
    spanner: &mut Vec<EdgeId>,
    v: Vertex,
) -> Result<(), SpannerError> {
    let incident = graph.incident_edges(v);

    // Step 2: closest edge into a sampled cluster
    let mut join: Option<Candidate> = None;
    for &(id, neighbor, weight) in &incident {
        if clusters.in_sampled_cluster(neighbor) {
            let candidate = (weight, neighbor, id);
            if join.map_or(true, |best| closer(candidate, best)) {
                join = Some(candidate);
            }
        }
    }

    match join {
        None => isolate_vertex(graph, clusters, spanner, v, &incident),
        Some(join) => {
            join_sampled_cluster(graph, clusters, spanner, v, join, &incident);
            Ok(())
        }
    }
}

/// Step 3a: `v` touches no sampled cluster. Keep one minimum edge into each
/// adjacent (necessarily unsampled) cluster and retire the rest of `v`'s
/// residual adjacency for good.
fn isolate_vertex(
    graph: &mut ResidualGraph,
    clusters: &ClusterState,
    spanner: &mut Vec<EdgeId>,
    v: Vertex,
    incident: &[(EdgeId, Vertex, Weight)],
) -> Result<(), SpannerError> {
    let mut best: BTreeMap<Vertex, Candidate> = BTreeMap::new();
    for &(id, neighbor, weight) in incident {
        let center = clusters.center_of(neighbor);
        if clusters.is_sampled(center) {
            return Err(SpannerError::InvariantViolation(
                "vertex classified as isolated has a neighbor in a sampled cluster",
            ));
        }
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
    Ok(())
}

/// Step 3b: join the closest sampled cluster, then represent every cluster
/// reachable at least as cheaply as the join edge by its own minimum edge.
/// Edges into clusters that are not covered stay in the residual graph for
/// later rounds.
fn join_sampled_cluster(
    graph: &mut ResidualGraph,
    clusters: &mut ClusterState,
    spanner: &mut Vec<EdgeId>,
    v: Vertex,
    join: Candidate,
    incident: &[(EdgeId, Vertex, Weight)],
) {
    let (join_weight, join_neighbor, join_id) = join;
    let join_center = clusters.center_of(join_neighbor);

    clusters.set_center(v, join_center);
    spanner.push(join_id);
    clusters.current_cluster_edges.push(ClusterEdge {
        edge: join_id,
        member: v,
        anchor: join_neighbor,
    });
    graph.remove(join_id);

    // minimum edge from v into every cluster it still touches, old or new
    let mut best: BTreeMap<Vertex, Candidate> = BTreeMap::new();
    for &(id, neighbor, weight) in incident {
        if id == join_id {
            continue;
        }
        let center = clusters.center_of(neighbor);
        let candidate = (weight, neighbor, id);
        let entry = best.entry(center).or_insert(candidate);
        if closer(candidate, *entry) {
            *entry = candidate;
        }
    }

    // covered: reachable at least as cheaply as the join edge, plus the
    // joined cluster itself
    let covered: BTreeMap<Vertex, Candidate> = best
        .into_iter()
        .filter(|&(center, (weight, _, _))| center == join_center || weight <= join_weight)
        .collect();

    for &(id, neighbor, _) in incident {
        if id != join_id && covered.contains_key(&clusters.center_of(neighbor)) {
            graph.remove(id);
        }
    }
    for &(_, _, id) in covered.values() {
        spanner.push(id);
    }
}

/// Step 4: drop residual edges that are now internal to a surviving cluster.
/// They can never contribute an inter-cluster spanner edge and must not be
/// re-examined in later rounds.
fn purge_intra_cluster(
    graph: &mut ResidualGraph,
    clusters: &ClusterState,
) -> Result<(), SpannerError> {
    for v in graph.vertices() {
        if clusters.is_sampled(v) {
            continue;
        }
        let center = clusters.center_of(v);
        if !clusters.is_sampled(center) {
            continue;
        }
        for (id, neighbor, _) in graph.incident_edges(v) {
            if neighbor == center {
                return Err(SpannerError::InvariantViolation(
                    "cluster member still holds a residual edge to its own center",
                ));
            }
            if clusters.center_of(neighbor) == center {
                graph.remove(id);
            }
        }
    }
    Ok(())
}
