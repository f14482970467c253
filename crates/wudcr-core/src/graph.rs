//! The lobster/caterpillar graph model: [`Disk`] records and the owning
//! [`DiskGraph`], plus the compact [`Caterpillar`]/[`Lobster`] degree
//! representations used by the degree-list input format.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Unique vertex id within a [`DiskGraph`].
pub type DiskId = i32;

/// Sentinel for "no parent" (the spine root).
pub const NODISK: DiskId = -1;

/// A single unit disk: its place in the tree plus, once embedded, its
/// lattice/Cartesian coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub id: DiskId,
    pub parent_id: DiskId,
    /// Tree role depth: 0 = spine, 1 = branch, 2 = leaf.
    pub depth: u8,
    pub children_count: i32,
    pub embedded: bool,
    pub grid_x: i32,
    pub grid_sly: i32,
    pub x: f64,
    pub y: f64,
    pub fail: bool,
}

impl Disk {
    #[must_use]
    pub fn new(id: DiskId, parent_id: DiskId, depth: u8) -> Self {
        Self {
            id,
            parent_id,
            depth,
            children_count: 0,
            embedded: false,
            grid_x: 0,
            grid_sly: 0,
            x: 0.0,
            y: 0.0,
            fail: false,
        }
    }
}

/// One undirected edge in a yet-unclassified graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: DiskId,
    pub to: DiskId,
}

/// A list of edges describing a graph before it has been recognised as a
/// caterpillar or lobster; see [`crate::classify`].
pub type EdgeList = Vec<Edge>;

/// In depth-first order, explore all leaves immediately after their
/// parent branch; in breadth-first order, explore branches before leaves
/// on each spine. Precomputed as a plain index rather than an iterator
/// tied to the graph's lifetime, since the core also needs to mutate the
/// graph (writing coordinates) after traversal completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbedOrder {
    DepthFirst,
    BreadthFirst,
}

/// Owns the disks of one lobster/caterpillar instance and offers
/// traversal in [`EmbedOrder::DepthFirst`] or [`EmbedOrder::BreadthFirst`]
/// order.
///
/// Invariants: disks with `depth == 0` form a simple path under parent
/// order; every non-root disk's parent already appears in the vector;
/// each disk's `children_count` equals the number of disks whose parent
/// is it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiskGraph {
    disks: Vec<Disk>,
}

impl DiskGraph {
    #[must_use]
    pub fn new(disks: Vec<Disk>) -> Self {
        Self { disks }
    }

    #[must_use]
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn disks_mut(&mut self) -> &mut [Disk] {
        &mut self.disks
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.disks.len()
    }

    /// Number of spine (`depth == 0`) disks.
    #[must_use]
    pub fn length(&self) -> usize {
        self.disks.iter().filter(|d| d.depth == 0).count()
    }

    #[must_use]
    pub fn find_disk(&self, id: DiskId) -> Option<&Disk> {
        self.disks.iter().find(|d| d.id == id)
    }

    pub fn find_disk_mut(&mut self, id: DiskId) -> Option<&mut Disk> {
        self.disks.iter_mut().find(|d| d.id == id)
    }

    /// Return the disk ids in the order `embed_dynamic` should place them:
    /// spine first, then (depth-first) each spine's branches with their
    /// leaves interleaved, or (breadth-first) all of a spine's branches
    /// before any of its leaves.
    #[must_use]
    pub fn traversal_order(&self, order: EmbedOrder) -> Vec<DiskId> {
        // Primary grouping: which spine "slot" a disk belongs to (its own
        // index along the spine if it is a spine disk, or its spine
        // ancestor's index otherwise).
        let mut spine_slot: std::collections::HashMap<DiskId, usize> =
            std::collections::HashMap::new();
        let mut slot = 0usize;
        let mut parent = NODISK;
        loop {
            let next = self
                .disks
                .iter()
                .find(|d| d.depth == 0 && d.parent_id == parent);
            let Some(next) = next else { break };
            spine_slot.insert(next.id, slot);
            parent = next.id;
            slot += 1;
        }
        while spine_slot.len() < self.disks.len() {
            let disk = self
                .disks
                .iter()
                .find(|d| !spine_slot.contains_key(&d.id) && spine_slot.contains_key(&d.parent_id))
                .expect("every non-spine disk's parent chain terminates at the spine");
            let s = spine_slot[&disk.parent_id];
            spine_slot.insert(disk.id, s);
        }

        let mut order_ids: Vec<DiskId> = self.disks.iter().map(|d| d.id).collect();
        order_ids.sort_by(|&a_id, &b_id| {
            let a = self.find_disk(a_id).expect("known id");
            let b = self.find_disk(b_id).expect("known id");
            let sa = spine_slot[&a.id];
            let sb = spine_slot[&b.id];
            if sa != sb {
                return sa.cmp(&sb);
            }
            if a.depth > 0 && b.depth > 0 && matches!(order, EmbedOrder::DepthFirst) {
                let branch_of = |d: &Disk| if d.depth == 1 { d.id } else { d.parent_id };
                let ba = branch_of(a);
                let bb = branch_of(b);
                if ba != bb {
                    return ba.cmp(&bb);
                }
            }
            a.depth.cmp(&b.depth)
        });
        order_ids
    }

    /// Build the edge list representation of this graph, losing embedding
    /// coordinates.
    #[must_use]
    pub fn to_edge_list(&self) -> EdgeList {
        self.disks
            .iter()
            .filter(|d| d.parent_id != NODISK)
            .map(|d| Edge {
                from: d.parent_id,
                to: d.id,
            })
            .collect()
    }

    /// Build an unembedded `DiskGraph` from a caterpillar's leaf-count
    /// string.
    #[must_use]
    pub fn from_caterpillar(caterpillar: &Caterpillar) -> Self {
        let mut disks = Vec::with_capacity(caterpillar.count_vertices());
        let mut id: DiskId = 0;
        let mut spine_id = NODISK;

        for &leaves in caterpillar.leaves() {
            disks.push(Disk::new(id, spine_id, 0));
            spine_id = id;
            id += 1;

            for _ in 0..leaves {
                disks.push(Disk::new(id, spine_id, 1));
                id += 1;
            }
        }

        for d in &mut disks {
            d.children_count = disks.iter().filter(|c| c.parent_id == d.id).count() as i32;
        }

        Self::new(disks)
    }

    /// Build an unembedded `DiskGraph` from a lobster's spine/branch/leaf
    /// degree string.
    #[must_use]
    pub fn from_lobster(lobster: &Lobster) -> Self {
        let mut disks = Vec::with_capacity(lobster.count_vertices());
        let mut id: DiskId = 0;
        let mut spine_id = NODISK;

        for spine_node in lobster.spine() {
            disks.push(Disk::new(id, spine_id, 0));
            spine_id = id;
            id += 1;

            for &leaf_count in spine_node {
                if leaf_count == Lobster::NO_BRANCH {
                    continue;
                }
                disks.push(Disk::new(id, spine_id, 1));
                let branch_id = id;
                id += 1;

                for _ in 0..leaf_count {
                    disks.push(Disk::new(id, branch_id, 2));
                    id += 1;
                }
            }
        }

        for d in &mut disks {
            d.children_count = disks.iter().filter(|c| c.parent_id == d.id).count() as i32;
        }

        Self::new(disks)
    }
}

/// A shared, read-only traversal position into a [`DiskGraph`], replacing
/// the original's live iterator over mutable disks: the dynamic program
/// only ever needs each upcoming disk's `depth`, never its coordinates,
/// so a plain index into a precomputed order is sufficient and trivially
/// cloneable across the `Rc`-shared problem tree (see
/// [`crate::dynamic::DynamicProblem`]).
#[derive(Clone)]
pub struct Cursor {
    graph: Rc<DiskGraph>,
    order: Rc<Vec<DiskId>>,
    pos: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(graph: Rc<DiskGraph>, order: Rc<Vec<DiskId>>) -> Self {
        Self {
            graph,
            order,
            pos: 0,
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.pos >= self.order.len()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<DiskId> {
        self.order.get(self.pos).copied()
    }

    #[must_use]
    pub fn current_depth(&self) -> Option<u8> {
        self.current_id()
            .and_then(|id| self.graph.find_disk(id))
            .map(|d| d.depth)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[must_use]
    pub fn graph(&self) -> &DiskGraph {
        &self.graph
    }
}

/// A caterpillar as a run of spine leaf-counts: vertex `i` has
/// `leaves()[i]` leaves attached (already translated from the raw degree
/// representation, see [`crate::graph::Caterpillar::from_degrees`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caterpillar {
    leaves: Vec<i32>,
}

impl Caterpillar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, leaves: i32) {
        assert!(leaves >= 0);
        self.leaves.push(leaves);
    }

    #[must_use]
    pub fn count_vertices(&self) -> usize {
        self.count_spine() + self.leaves.iter().map(|&l| l as usize).sum::<usize>()
    }

    #[must_use]
    pub fn count_spine(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn leaves(&self) -> &[i32] {
        &self.leaves
    }

    /// Translate a sequence of spine vertex degrees (interior vertices
    /// have `leaves = degree - 2`, the two end vertices have
    /// `leaves = degree - 1`) into a `Caterpillar`. Returns `None` if any
    /// degree is below 2.
    #[must_use]
    pub fn from_degrees(mut degrees: Vec<i32>) -> Option<Self> {
        if let Some(first) = degrees.first_mut() {
            *first += 1;
        }
        if let Some(last) = degrees.last_mut() {
            *last += 1;
        }

        let mut caterpillar = Caterpillar::new();
        for d in degrees {
            if d < 2 {
                return None;
            }
            caterpillar.extend(d - 2);
        }
        Some(caterpillar)
    }
}

/// A compact lobster representation: a run of spine nodes, each with up
/// to 5 branches, each branch with a leaf count (`NO_BRANCH` marks an
/// unused branch slot).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lobster {
    spine: Vec<[i32; 5]>,
}

impl Lobster {
    pub const NO_BRANCH: i32 = -1;

    #[must_use]
    pub fn new(spine: Vec<[i32; 5]>) -> Self {
        Self { spine }
    }

    #[must_use]
    pub fn spine(&self) -> &[[i32; 5]] {
        &self.spine
    }

    #[must_use]
    pub fn count_spine(&self) -> usize {
        self.spine.len()
    }

    #[must_use]
    pub fn count_vertices(&self) -> usize {
        let mut count = self.count_spine();
        for node in &self.spine {
            for &branch in node {
                if branch != Self::NO_BRANCH {
                    // the branch vertex itself, plus its leaves
                    count += 1 + branch as usize;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caterpillar_degree_translation_rejects_low_degree() {
        // Only the two end degrees get the +1 correction; an interior
        // vertex of degree 1 stays below 2 and is rejected.
        assert!(Caterpillar::from_degrees(vec![2, 1, 2]).is_none());
    }

    #[test]
    fn caterpillar_end_degree_one_is_corrected_not_rejected() {
        // End vertices get +1 before the `< 2` check, so a degree-1 end
        // is accepted.
        let c = Caterpillar::from_degrees(vec![1, 3]).unwrap();
        assert_eq!(c.leaves(), &[0, 2]);
    }

    #[test]
    fn caterpillar_single_vertex_degree_one_ok() {
        // A lone vertex of degree 1 becomes both ends -> +2 -> leaves = 1.
        let c = Caterpillar::from_degrees(vec![1]).unwrap();
        assert_eq!(c.leaves(), &[1]);
    }

    #[test]
    fn from_caterpillar_builds_expected_shape() {
        let c = Caterpillar::from_degrees(vec![2, 2, 2]).unwrap();
        // ends: 2+1=3 -> leaves 1; middle: 2+0=2 -> leaves 0
        assert_eq!(c.leaves(), &[1, 0, 1]);
        let graph = DiskGraph::from_caterpillar(&c);
        assert_eq!(graph.length(), 3);
        assert_eq!(graph.size(), 5);
    }

    #[test]
    fn traversal_order_depth_first_interleaves_leaves() {
        let mut spine = vec![[Lobster::NO_BRANCH; 5]; 1];
        spine[0][0] = 2;
        let lobster = Lobster::new(spine);
        let graph = DiskGraph::from_lobster(&lobster);
        let order = graph.traversal_order(EmbedOrder::DepthFirst);
        // spine(0), branch(1), leaf(2), leaf(3)
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn to_edge_list_roundtrips_parent_structure() {
        let c = Caterpillar::from_degrees(vec![3, 2]).unwrap();
        let graph = DiskGraph::from_caterpillar(&c);
        let edges = graph.to_edge_list();
        assert_eq!(edges.len(), graph.size() - 1);
        for e in &edges {
            assert!(graph.find_disk(e.to).unwrap().parent_id == e.from);
        }
    }
}
