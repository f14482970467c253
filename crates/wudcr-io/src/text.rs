//! Plain-text edge-list and degree-list parsers/writers.

use std::fs;
use std::path::Path;

use wudcr_core::graph::{Edge, EdgeList};

use crate::error::IoError;

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn read_to_string(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}

/// Read a whitespace-separated `from to` edge list. Rejects empty input.
///
/// A trailing, unpaired integer is silently dropped rather than treated
/// as an error, matching the original's `readint(from) && readint(to)`
/// loop condition: the loop simply stops once a second token can't be
/// read.
pub fn read_edges_text<P: AsRef<Path>>(path: P) -> Result<EdgeList, IoError> {
    let path = path.as_ref();
    let text = read_to_string(path)?;

    let mut tokens = text.split_whitespace();
    let mut edges = EdgeList::new();
    loop {
        let Some(from) = tokens.next() else { break };
        let Some(to) = tokens.next() else { break };
        let from = from.parse().map_err(|_| IoError::Parse {
            path: display(path),
            message: format!("expected an integer vertex id, found {from:?}"),
        })?;
        let to = to.parse().map_err(|_| IoError::Parse {
            path: display(path),
            message: format!("expected an integer vertex id, found {to:?}"),
        })?;
        edges.push(Edge { from, to });
    }

    if edges.is_empty() {
        return Err(IoError::Parse {
            path: display(path),
            message: "edge list is empty".to_string(),
        });
    }

    Ok(edges)
}

/// Write an edge list in the same `from to` format `read_edges_text` reads.
pub fn write_edges_text<P: AsRef<Path>>(path: P, edges: &[Edge]) -> Result<(), IoError> {
    let path = path.as_ref();
    let mut out = String::with_capacity(edges.len() * 8);
    for e in edges {
        out.push_str(&e.from.to_string());
        out.push(' ');
        out.push_str(&e.to.to_string());
        out.push('\n');
    }
    fs::write(path, out).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}

/// Read whitespace-separated spine-vertex degrees and translate them into
/// per-spine-vertex leaf counts (`d_i - 2` for interior vertices, `d_i -
/// 1` for the two ends), rejecting any degree below 2.
pub fn read_degrees_text<P: AsRef<Path>>(path: P) -> Result<Vec<i32>, IoError> {
    let path_ref = path.as_ref();
    let text = read_to_string(path_ref)?;

    let mut degrees = Vec::new();
    for token in text.split_whitespace() {
        let d: i32 = token.parse().map_err(|_| IoError::Parse {
            path: display(path_ref),
            message: format!("expected an integer degree, found {token:?}"),
        })?;
        degrees.push(d);
    }

    let caterpillar = wudcr_core::graph::Caterpillar::from_degrees(degrees).ok_or_else(|| {
        IoError::Parse {
            path: display(path_ref),
            message: "caterpillar spine cannot have degree < 2".to_string(),
        }
    })?;

    Ok(caterpillar.leaves().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_simple_edge_list() {
        let f = write_temp("0 1\n1 2\n");
        let edges = read_edges_text(f.path()).unwrap();
        assert_eq!(edges, vec![Edge { from: 0, to: 1 }, Edge { from: 1, to: 2 }]);
    }

    #[test]
    fn empty_edge_list_is_rejected() {
        let f = write_temp("   \n");
        assert!(matches!(
            read_edges_text(f.path()),
            Err(IoError::Parse { .. })
        ));
    }

    #[test]
    fn non_numeric_token_is_a_parse_error() {
        let f = write_temp("0 one\n");
        assert!(matches!(
            read_edges_text(f.path()),
            Err(IoError::Parse { .. })
        ));
    }

    #[test]
    fn write_then_read_round_trips() {
        let edges = vec![Edge { from: 0, to: 1 }, Edge { from: 1, to: 2 }];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.txt");
        write_edges_text(&path, &edges).unwrap();
        let read_back = read_edges_text(&path).unwrap();
        assert_eq!(edges, read_back);
    }

    #[test]
    fn degree_list_translates_ends_and_rejects_low_degree() {
        let f = write_temp("2 2 2");
        let leaves = read_degrees_text(f.path()).unwrap();
        assert_eq!(leaves, vec![1, 0, 1]);

        // Only the two end degrees get the +1 correction; an interior
        // vertex of degree 1 stays below 2 and is rejected.
        let bad = write_temp("2 1 2");
        assert!(matches!(
            read_degrees_text(bad.path()),
            Err(IoError::Parse { .. })
        ));
    }

    #[test]
    fn degree_list_end_degree_one_is_corrected_not_rejected() {
        // End vertices get +1 before the `< 2` check, so a degree-1 end
        // is accepted: "1 3" -> [2, 4] -> leaves [0, 2].
        let f = write_temp("1 3");
        let leaves = read_degrees_text(f.path()).unwrap();
        assert_eq!(leaves, vec![0, 2]);
    }
}
