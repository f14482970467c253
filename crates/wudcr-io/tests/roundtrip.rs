//! Parse/format round-trip invariants across `wudcr-io`'s public API.
//!
//! These complement the unit tests inside each module: they exercise
//! the crate only through its public surface, the way a caller (the CLI
//! or a future embedder) would.

use wudcr_core::graph::{Disk, DiskGraph, Edge, NODISK};
use wudcr_io::IoError;

fn sample_graph() -> DiskGraph {
    let mut root = Disk::new(0, NODISK, 0);
    root.embedded = true;
    let mut child = Disk::new(1, 0, 1);
    child.embedded = true;
    child.x = 1.0;
    let mut grandchild = Disk::new(2, 0, 1);
    grandchild.embedded = true;
    grandchild.x = -1.0;
    grandchild.y = 1.0;
    DiskGraph::new(vec![root, child, grandchild])
}

#[test]
fn edge_list_text_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.edgelist");
    let edges = vec![
        Edge { from: 0, to: 1 },
        Edge { from: 1, to: 2 },
        Edge { from: 0, to: 3 },
    ];
    wudcr_io::write_edges_text(&path, &edges).unwrap();
    let back = wudcr_io::read_edges_text(&path).unwrap();
    assert_eq!(back, edges);
}

#[test]
fn json_snapshot_round_trips_through_auto_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.json");
    let graph = sample_graph();
    wudcr_io::write_graph_auto(&path, &graph).unwrap();
    let back = wudcr_io::read_graph_auto(&path).unwrap();
    assert_eq!(back.size(), graph.size());
    for (a, b) in back.disks().iter().zip(graph.disks().iter()) {
        assert_eq!(a.id, b.id);
        assert!((a.x - b.x).abs() < f64::EPSILON);
        assert!((a.y - b.y).abs() < f64::EPSILON);
    }
}

#[test]
fn cbor_snapshot_round_trips_through_auto_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.cbor");
    let graph = sample_graph();
    wudcr_io::write_graph_auto(&path, &graph).unwrap();
    let back = wudcr_io::read_graph_auto(&path).unwrap();
    assert_eq!(back.size(), graph.size());
}

#[test]
fn degree_list_reconstructs_the_expected_leaf_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.degrees");
    // Spine of 3 vertices with on-file degrees 3, 2, 3: after the
    // +1-at-the-ends correction (4, 2, 4) and the -2 per vertex, the
    // ends each carry two branches and the middle carries none.
    std::fs::write(&path, "3 2 3\n").unwrap();
    let leaves = wudcr_io::read_degrees_text(&path).unwrap();
    assert_eq!(leaves, vec![2, 0, 2]);
}

#[test]
fn dump_text_marks_failed_disks_distinctly_from_embedded_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.txt");
    let mut graph = sample_graph();
    {
        let d = graph.find_disk_mut(2).unwrap();
        d.fail = true;
        d.embedded = false;
    }
    wudcr_io::write_dump_text(&path, &graph).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("0 -> root"));
    assert!(text.contains("FAILED to place disk 2 -> 0"));
}

#[test]
fn stats_csv_header_appears_exactly_once_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.csv");
    let stats = wudcr_io::Stats {
        algorithm: wudcr_io::Algorithm::DynamicProgram,
        embed_order: wudcr_core::graph::EmbedOrder::DepthFirst,
        size: 3,
        spines: 3,
        success: true,
        duration_microseconds: 42,
    };
    wudcr_io::write_stats_csv(&path, &stats).unwrap();
    wudcr_io::write_stats_csv(&path, &stats).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Algorithm,"));
}

#[test]
fn reading_an_empty_edge_list_is_an_error_not_an_empty_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.edgelist");
    std::fs::write(&path, "").unwrap();
    assert!(matches!(
        wudcr_io::read_edges_text(&path),
        Err(IoError::Parse { .. })
    ));
}
