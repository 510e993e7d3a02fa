//! Result writing

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::spanner::Spanner;

/// Write the spanner in the plain-text exchange format: header
/// `n totalSpannerEdges`, one `u v w` line per edge, then five diagnostic
/// lines (per-phase edge counts, per-phase times in ms, total time in ms).
pub fn write_spanner<W: Write>(out: &mut W, spanner: &Spanner) -> Result<()> {
    writeln!(out, "{} {}", spanner.vertex_count, spanner.edge_count())?;
    for edge in &spanner.edges {
        writeln!(out, "{} {} {}", edge.u, edge.v, edge.weight)?;
    }

    let stats = &spanner.stats;
    writeln!(out, "{}", stats.phase1_edges)?;
    writeln!(out, "{}", stats.phase2_edges)?;
    writeln!(out, "{:.3}", stats.phase1_ms)?;
    writeln!(out, "{:.3}", stats.phase2_ms)?;
    writeln!(out, "{:.3}", stats.total_ms)?;

    Ok(())
}

/// Save run diagnostics as pretty-printed JSON
pub fn save_stats(spanner: &Spanner, path: &Path) -> Result<()> {
    log::info!("Saving run stats to {}", path.display());

    let summary = serde_json::json!({
        "vertex_count": spanner.vertex_count,
        "spanner_edges": spanner.edge_count(),
        "stats": spanner.stats,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spanner::{SpannerEdge, SpannerStats};

    #[test]
    fn writes_header_edges_and_diagnostics() {
        let spanner = Spanner {
            vertex_count: 3,
            edges: vec![
                SpannerEdge { u: 1, v: 2, weight: 4 },
                SpannerEdge { u: 2, v: 3, weight: 0 },
            ],
            stats: SpannerStats {
                phase1_edges: 1,
                phase2_edges: 1,
                phase1_ms: 0.5,
                phase2_ms: 0.25,
                total_ms: 0.75,
            },
        };

        let mut buffer = Vec::new();
        write_spanner(&mut buffer, &spanner).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 2 + 5);
        assert_eq!(lines[0], "3 2");
        assert_eq!(lines[1], "1 2 4");
        assert_eq!(lines[2], "2 3 0");
        assert_eq!(lines[3], "1");
        assert_eq!(lines[4], "1");
        assert_eq!(lines[5], "0.500");
        assert_eq!(lines[6], "0.250");
        assert_eq!(lines[7], "0.750");
    }

    #[test]
    fn empty_spanner_still_writes_a_header() {
        let spanner = Spanner {
            vertex_count: 7,
            edges: Vec::new(),
            stats: SpannerStats {
                phase1_edges: 0,
                phase2_edges: 0,
                phase1_ms: 0.0,
                phase2_ms: 0.0,
                total_ms: 0.0,
            },
        };

        let mut buffer = Vec::new();
        write_spanner(&mut buffer, &spanner).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("7 0\n"));
    }
}
