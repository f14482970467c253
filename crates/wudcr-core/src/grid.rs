//! Sparse triangular-grid storage, used to reconstruct an embedding and
//! to query occupied cells.

use crate::geometry::Coord;
use crate::graph::{DiskGraph, DiskId};
use std::collections::HashMap;

/// A sparse map from lattice coordinate to the disk occupying it.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    map: HashMap<Coord, DiskId>,
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<DiskId> {
        self.map.get(&coord).copied()
    }

    /// Store `disk` at `coord`. Panics if the cell is already occupied;
    /// the dynamic program's dominance/fundament bookkeeping is meant to
    /// guarantee placements are always into free cells.
    pub fn put(&mut self, coord: Coord, disk: DiskId) {
        let prior = self.map.insert(coord, disk);
        assert!(prior.is_none(), "grid cell {coord:?} already occupied");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Write every grid entry's coordinates back onto the matching disk:
    /// `grid_x`, `grid_sly`, the Cartesian projection, and `embedded =
    /// true`.
    pub fn apply(&self, graph: &mut DiskGraph) {
        for (&coord, &id) in &self.map {
            if let Some(disk) = graph.find_disk_mut(id) {
                disk.grid_x = coord.x;
                disk.grid_sly = coord.sly;
                let (x, y) = coord.to_cartesian();
                disk.x = x;
                disk.y = y;
                disk.embedded = true;
            }
        }
    }
}
