//! The plain per-disk debug dump: one line per disk, either its lattice
//! coordinates or a failure marker.

use std::fs;
use std::path::Path;

use wudcr_core::graph::{DiskGraph, NODISK};

use crate::error::IoError;

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Write one line per disk: `id -> parent (x, y)` for an embedded disk,
/// or `FAILED to place disk id -> parent` for a failed one.
pub fn write_dump_text<P: AsRef<Path>>(path: P, graph: &DiskGraph) -> Result<(), IoError> {
    let path = path.as_ref();
    let mut out = String::with_capacity(graph.size() * 24);
    for disk in graph.disks() {
        if disk.parent_id == NODISK {
            if disk.fail {
                out.push_str(&format!("FAILED to place disk {} -> root\n", disk.id));
            } else {
                out.push_str(&format!(
                    "{} -> root ({}, {})\n",
                    disk.id, disk.x, disk.y
                ));
            }
        } else if disk.fail {
            out.push_str(&format!(
                "FAILED to place disk {} -> {}\n",
                disk.id, disk.parent_id
            ));
        } else {
            out.push_str(&format!(
                "{} -> {} ({}, {})\n",
                disk.id, disk.parent_id, disk.x, disk.y
            ));
        }
    }
    fs::write(path, out).map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wudcr_core::graph::Disk;

    #[test]
    fn embedded_disks_print_coordinates() {
        let mut root = Disk::new(0, NODISK, 0);
        root.embedded = true;
        let mut child = Disk::new(1, 0, 0);
        child.embedded = true;
        child.x = 1.0;
        child.y = 0.0;
        let graph = DiskGraph::new(vec![root, child]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        write_dump_text(&path, &graph).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("0 -> root"));
        assert!(text.contains("1 -> 0 (1, 0)"));
    }

    #[test]
    fn failed_disks_print_failure_marker() {
        let mut root = Disk::new(0, NODISK, 0);
        root.fail = true;
        let mut child = Disk::new(1, 0, 0);
        child.fail = true;
        let graph = DiskGraph::new(vec![root, child]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        write_dump_text(&path, &graph).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("FAILED to place disk 1 -> 0"));
    }
}
