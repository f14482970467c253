//! Dynamic-programming decision/construction engine for weak unit-disk
//! contact representations (WUDCR) of lobster graphs on the triangular
//! lattice.
//!
//! This crate is a pure library: no file I/O, no CLI-facing types (see
//! `wudcr-io` and `wudcr-cli` for those). Its surface is
//! [`classify::classify`] (recognise a raw edge list as a path,
//! caterpillar, or lobster and build the [`graph::DiskGraph`]) followed
//! by [`embed_dynamic`] (decide whether that graph embeds, and in
//! constructive mode, write the embedding back onto it).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod classify;
pub mod dynamic;
pub mod fundament;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod queue;
pub mod signature;

pub use classify::{classify, ClassifyError, GraphClass};
pub use dynamic::{DynamicProblem, EmbedError};
pub use fundament::Fundament;
pub use geometry::{Coord, Dir, Rel};
pub use graph::{Disk, DiskGraph, DiskId, EmbedOrder, NODISK};
pub use grid::Grid;
pub use queue::ProblemQueue;
pub use signature::Signature;

use std::rc::Rc;

/// Run the dynamic program over `graph`: decide whether it admits a
/// weak unit-disk contact representation and, in `constructive` mode,
/// write the chosen embedding's coordinates back onto its disks.
///
/// Seeds the queue with the root problem, repeatedly expands the
/// deepest open problem until one reaches `graph.size()` (success) or
/// the queue empties (no embedding). `disk_order` only affects which
/// disk placements get explored in which sequence within a round — the
/// search itself always completes, or exhausts, regardless of order.
///
/// # Errors
/// Returns [`EmbedError::TooDeep`] if `graph` contains a disk whose
/// tree role depth exceeds 2 (not representable as a lobster); this
/// can only happen if `graph` was not built via [`classify::classify`].
pub fn embed_dynamic(
    graph: &mut DiskGraph,
    disk_order: EmbedOrder,
    constructive: bool,
) -> Result<bool, EmbedError> {
    let target_depth = graph.size() as u32;
    let shared = Rc::new(graph.clone());

    let mut queue = ProblemQueue::new();
    queue.push(DynamicProblem::root(shared, disk_order, constructive));

    let mut generated: u64 = 1;
    let mut expanded: u64 = 0;

    while !queue.is_empty() {
        if queue.top().depth() == target_depth {
            if constructive {
                queue.top().solution().apply(graph);
            }
            tracing::debug!(generated, expanded, "dynamic problem succeeded");
            return Ok(true);
        }

        let children = queue.top().subproblems()?;
        expanded += 1;
        queue.pop();

        for child in children {
            generated += 1;
            queue.push(child);
        }
    }

    for disk in graph.disks_mut() {
        disk.fail = true;
    }
    tracing::debug!(generated, expanded, "dynamic problem exhausted: no embedding");
    Ok(false)
}
