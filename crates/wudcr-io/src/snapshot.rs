//! JSON/CBOR serialization of [`DiskGraph`] snapshots, auto-dispatched
//! by file extension.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use wudcr_core::graph::DiskGraph;

use crate::error::IoError;

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Read a `DiskGraph` snapshot from JSON.
pub fn read_graph_json<P: AsRef<Path>>(path: P) -> Result<DiskGraph, IoError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })?;
    serde_json::from_reader(BufReader::new(f)).map_err(|e| IoError::Serde {
        path: display(path),
        message: e.to_string(),
    })
}

/// Write a `DiskGraph` snapshot as pretty-printed JSON.
pub fn write_graph_json<P: AsRef<Path>>(path: P, graph: &DiskGraph) -> Result<(), IoError> {
    let path = path.as_ref();
    let f = File::create(path).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, graph).map_err(|e| IoError::Serde {
        path: display(path),
        message: e.to_string(),
    })?;
    w.flush().map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}

/// Read a `DiskGraph` snapshot from CBOR.
pub fn read_graph_cbor<P: AsRef<Path>>(path: P) -> Result<DiskGraph, IoError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })?;
    let mut r = BufReader::new(f);
    ciborium::de::from_reader(&mut r).map_err(|e| IoError::Serde {
        path: display(path),
        message: e.to_string(),
    })
}

/// Write a `DiskGraph` snapshot as CBOR.
pub fn write_graph_cbor<P: AsRef<Path>>(path: P, graph: &DiskGraph) -> Result<(), IoError> {
    let path = path.as_ref();
    let f = File::create(path).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(graph, &mut w).map_err(|e| IoError::Serde {
        path: display(path),
        message: e.to_string(),
    })?;
    w.flush().map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}

/// Auto-detect read by extension (`.json` / `.cbor`, case-insensitive).
pub fn read_graph_auto<P: AsRef<Path>>(path: P) -> Result<DiskGraph, IoError> {
    let path = path.as_ref();
    match ext_lower(path).as_deref() {
        Some("json") => read_graph_json(path),
        Some("cbor") => read_graph_cbor(path),
        Some(other) => Err(IoError::Parse {
            path: display(path),
            message: format!("unsupported snapshot extension: {other} (expected .json or .cbor)"),
        }),
        None => Err(IoError::Parse {
            path: display(path),
            message: "path has no extension (expected .json or .cbor)".to_string(),
        }),
    }
}

/// Auto-detect write by extension, defaulting to JSON when unknown/missing.
pub fn write_graph_auto<P: AsRef<Path>>(path: P, graph: &DiskGraph) -> Result<(), IoError> {
    let path = path.as_ref();
    match ext_lower(path).as_deref() {
        Some("cbor") => write_graph_cbor(path, graph),
        _ => write_graph_json(path, graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wudcr_core::graph::Disk;

    fn sample_graph() -> DiskGraph {
        DiskGraph::new(vec![Disk::new(0, -1, 0), Disk::new(1, 0, 0)])
    }

    #[test]
    fn json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.json");
        let graph = sample_graph();
        write_graph_json(&path, &graph).unwrap();
        let back = read_graph_json(&path).unwrap();
        assert_eq!(back.size(), graph.size());
    }

    #[test]
    fn cbor_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.cbor");
        let graph = sample_graph();
        write_graph_cbor(&path, &graph).unwrap();
        let back = read_graph_cbor(&path).unwrap();
        assert_eq!(back.size(), graph.size());
    }

    #[test]
    fn auto_write_defaults_to_json_for_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.snapshot");
        write_graph_auto(&path, &sample_graph()).unwrap();
        // a JSON document starts with '{' once whitespace is trimmed.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.trim_start().starts_with('{'));
    }

    #[test]
    fn auto_read_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.bin");
        std::fs::write(&path, b"{}").unwrap();
        assert!(matches!(read_graph_auto(&path), Err(IoError::Parse { .. })));
    }
}
