//! Plain-text graph input
//!
//! Format: one header line `n m`, then `m` lines `u v w` with endpoints in
//! `[1, n]` and non-negative integer weights. Blank lines are ignored.

use std::io::BufRead;

use itertools::Itertools;

use crate::error::SpannerError;
use crate::graph::builder::GraphBuilder;
use crate::graph::{ResidualGraph, Vertex, Weight};

/// Read a graph from any buffered source, rejecting anything inconsistent
/// with the declared vertex and edge counts.
pub fn read_graph<R: BufRead>(reader: R) -> Result<ResidualGraph, SpannerError> {
    let mut rows: Vec<(usize, String)> = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push((idx + 1, line));
    }

    let (header, edge_rows) = rows.split_first().ok_or_else(|| SpannerError::MalformedHeader {
        line: 1,
        found: String::new(),
    })?;
    let (n, m) = parse_header(header.0, &header.1)?;
    if edge_rows.len() != m {
        return Err(SpannerError::EdgeCountMismatch {
            declared: m,
            found: edge_rows.len(),
        });
    }

    let mut builder = GraphBuilder::with_capacity(n, m);
    for (line_no, row) in edge_rows {
        let (u, v, w) = parse_edge(*line_no, row)?;
        builder.add_edge(u, v, w)?;
    }
    let graph = builder.build();

    log::info!(
        "Loaded graph with {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    Ok(graph)
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize), SpannerError> {
    let fields = text
        .split_whitespace()
        .map(|token| token.parse::<usize>().ok())
        .collect_tuple();
    match fields {
        Some((Some(n), Some(m))) => Ok((n, m)),
        _ => Err(SpannerError::MalformedHeader {
            line,
            found: text.to_string(),
        }),
    }
}

fn parse_edge(line: usize, text: &str) -> Result<(Vertex, Vertex, Weight), SpannerError> {
    let malformed = || SpannerError::MalformedEdge {
        line,
        found: text.to_string(),
    };
    let (u, v, w) = text.split_whitespace().collect_tuple().ok_or_else(|| malformed())?;
    Ok((
        u.parse().map_err(|_| malformed())?,
        v.parse().map_err(|_| malformed())?,
        w.parse().map_err(|_| malformed())?,
    ))
}
