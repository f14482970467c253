//! Turn a raw, unoriented edge list into a classified [`DiskGraph`].
//!
//! Classification proceeds path → caterpillar → lobster by repeated
//! leaf peeling: first confirm the edges form a single simple path,
//! then strip degree-1 vertices as leaves of their path neighbour, then
//! check what's left is still a path (a lobster's spine after removing
//! leaves and branches).

use std::fmt;

use crate::graph::{Disk, DiskGraph, DiskId, Edge, EdgeList, NODISK};

/// The recognised shape of an input graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphClass {
    /// A simple path: a caterpillar with no leaves at all.
    Path,
    Caterpillar,
    Lobster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// The input edge list was empty.
    Empty,
    /// Neither a path, caterpillar, nor lobster.
    Unrecognised,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Empty => write!(f, "input graph has no edges"),
            ClassifyError::Unrecognised => {
                write!(f, "input graph is neither a path, caterpillar, nor lobster")
            }
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Classify `edges` and build the corresponding [`DiskGraph`].
///
/// Strategy: try to recognise the whole edge list as a path (a leafless
/// caterpillar); otherwise peel off degree-1 vertices as leaves and
/// retry on the remaining trunk (a caterpillar); otherwise peel leaves
/// once more and retry (a lobster, spine + branches + leaves).
pub fn classify(mut edges: EdgeList) -> Result<(DiskGraph, GraphClass), ClassifyError> {
    if edges.is_empty() {
        return Err(ClassifyError::Empty);
    }

    if recognize_path(&mut edges) {
        let n = edges.len();
        return Ok((from_edge_list(&edges, n, n), GraphClass::Path));
    }

    let leaves = separate_leaves(&mut edges);

    if recognize_path(&mut edges[..leaves]) {
        let n = edges.len();
        return Ok((from_edge_list(&edges, leaves, n), GraphClass::Caterpillar));
    }

    let branches = separate_leaves(&mut edges[..leaves]);

    if recognize_path(&mut edges[..branches]) {
        // Among the edges peeled off across both rounds, ones attaching
        // directly to a spine vertex are depth-1 branches; the rest
        // (attaching to what just became a branch) are depth-2 leaves.
        let mut lo = branches;
        let mut hi = edges.len();
        while lo < hi {
            if is_spine_vertex(edges[lo].from, &edges, branches) {
                lo += 1;
            } else {
                hi -= 1;
                edges.swap(lo, hi);
            }
        }
        let new_leaves = lo;

        return Ok((
            from_edge_list(&edges, branches, new_leaves),
            GraphClass::Lobster,
        ));
    }

    Err(ClassifyError::Unrecognised)
}

fn is_spine_vertex(id: DiskId, edges: &[Edge], branches: usize) -> bool {
    edges[0].from == id || edges[..branches].iter().any(|e| e.to == id)
}

/// Recognise whether `edges` forms a simple path, reordering it in
/// place into traversal order (spine root first) if so.
fn recognize_path(edges: &mut [Edge]) -> bool {
    if edges.is_empty() {
        return true;
    }

    let mut front = 0usize;
    let mut back = edges.len();

    let mut last = edges[0].to;
    let mut next = last;
    loop {
        last = next;
        for i in front..back {
            if edges[i].from == last {
                next = edges[i].to;
                edges.swap(front, i);
                front += 1;
                break;
            }
            if edges[i].to == last {
                next = edges[i].from;
                edges[i] = Edge {
                    from: edges[i].to,
                    to: edges[i].from,
                };
                edges.swap(front, i);
                front += 1;
                break;
            }
        }
        if next == last {
            break;
        }
    }
    let cut = front;

    let mut start = edges[0].from;
    next = start;
    loop {
        start = next;
        for i in front..back {
            if edges[i].to == start {
                next = edges[i].from;
                back -= 1;
                edges.swap(back, i);
                break;
            }
            if edges[i].from == start {
                next = edges[i].to;
                edges[i] = Edge {
                    from: edges[i].to,
                    to: edges[i].from,
                };
                back -= 1;
                edges.swap(back, i);
                break;
            }
        }
        if next == start {
            break;
        }
    }

    if front != back {
        return false; // could not cover every edge with the two walks
    }

    edges.rotate_left(cut); // make the path continuous
    true
}

/// Find vertices appearing exactly once across `edges` and move their
/// incident edge (reoriented to point `to` the leaf) to the end of the
/// slice. Returns the boundary separating the non-leaf ("trunk") prefix
/// from the leaf suffix.
fn separate_leaves(edges: &mut [Edge]) -> usize {
    let mut vertices: Vec<DiskId> = Vec::with_capacity(edges.len() * 2);
    for e in edges.iter() {
        vertices.push(e.from);
        vertices.push(e.to);
    }
    vertices.sort_unstable();

    let mut new_end = edges.len();
    let n = vertices.len();
    let mut i = 0;
    while i < n {
        if i + 1 < n && vertices[i] == vertices[i + 1] {
            let v = vertices[i];
            while i < n && vertices[i] == v {
                i += 1;
            }
        } else {
            let v = vertices[i];
            let mut leaf_idx = None;
            for j in 0..new_end {
                if edges[j].to == v {
                    leaf_idx = Some(j);
                    break;
                }
                if edges[j].from == v {
                    edges[j] = Edge {
                        from: edges[j].to,
                        to: edges[j].from,
                    };
                    leaf_idx = Some(j);
                    break;
                }
            }
            let leaf_idx =
                leaf_idx.expect("a vertex appearing once must have an incident edge");
            new_end -= 1;
            edges.swap(leaf_idx, new_end);
            i += 1;
        }
    }
    new_end
}

/// Build a `DiskGraph` from an edge list ordered `[spine | branches |
/// leaves]`, with `branches`/`leaves` the boundaries between those
/// three tiers. Edges must point outward (`from` the parent, `to` the
/// child).
fn from_edge_list(edges: &[Edge], branches: usize, leaves: usize) -> DiskGraph {
    let mut disks = Vec::with_capacity(edges.len() + 1);
    let root_id = edges[0].from;
    disks.push(Disk::new(root_id, NODISK, 0));

    let mut last_spine_id = root_id;
    for (i, edge) in edges.iter().enumerate() {
        let (parent_id, depth) = if i < branches {
            let parent = last_spine_id;
            last_spine_id = edge.to;
            (parent, 0)
        } else if i < leaves {
            (edge.from, 1)
        } else {
            (edge.from, 2)
        };
        disks.push(Disk::new(edge.to, parent_id, depth));
    }

    let mut counts: std::collections::HashMap<DiskId, i32> = std::collections::HashMap::new();
    for d in &disks {
        if d.parent_id != NODISK {
            *counts.entry(d.parent_id).or_insert(0) += 1;
        }
    }
    for d in &mut disks {
        d.children_count = *counts.get(&d.id).unwrap_or(&0);
    }

    DiskGraph::new(disks)
}
