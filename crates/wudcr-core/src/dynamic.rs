//! Partial embedding states and their expansion into child states.

use std::fmt;
use std::rc::Rc;

use crate::fundament::{reachable_eventually, Fundament};
use crate::geometry::{all_dirs, forward_dirs, Coord, Dir};
use crate::graph::{Cursor, DiskGraph, EmbedOrder};
use crate::grid::Grid;
use crate::signature::Signature;

/// Errors raised while expanding a [`DynamicProblem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedError {
    /// The next disk to place has tree depth > 2: the input is not a
    /// lobster (or not a caterpillar/path), which this dynamic program
    /// cannot handle.
    TooDeep,
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::TooDeep => {
                write!(f, "dynamic program cannot embed graphs deeper than lobsters")
            }
        }
    }
}

impl std::error::Error for EmbedError {}

/// An instance of the dynamic-programming problem: the local
/// surroundings placed so far plus a position in the remaining input.
///
/// In constructive mode, every problem keeps an `Rc`-shared link to its
/// parent so a full solution can be reconstructed once a leaf of depth
/// `graph.size()` is reached. In decision mode (used only to answer
/// "is this embeddable", never to build one) no parent chain is kept at
/// all: `fundament`/`spine_head`/`branch_head`/`depth` are themselves
/// cheap `Copy` data, so there is nothing to save by pointing at a
/// parent instead of cloning forward, and it avoids the original's
/// (C++) non-owning raw-pointer parent, which has no safe Rust
/// equivalent once problems outlive the stack frame that produced them.
#[derive(Clone)]
pub struct DynamicProblem {
    fundament: Fundament,
    spine_head: Coord,
    branch_head: Coord,
    position: Cursor,
    depth: u32,
    constructive: bool,
    parent: Option<Rc<DynamicProblem>>,
    placement: Coord,
}

impl DynamicProblem {
    /// The root problem for `graph`: nothing placed yet. `spine_head` is
    /// fixed one step left of the origin so that the first disk (placed
    /// via the `Right` direction in [`DynamicProblem::subproblems`])
    /// lands exactly at `(0, 0)`.
    #[must_use]
    pub fn root(graph: Rc<DiskGraph>, order: EmbedOrder, constructive: bool) -> Self {
        let ids = Rc::new(graph.traversal_order(order));
        let position = Cursor::new(graph, ids);
        Self {
            fundament: Fundament::new(),
            spine_head: Coord::new(-1, 0),
            branch_head: Coord::new(0, 0),
            position,
            depth: 0,
            constructive,
            parent: None,
            placement: Coord::new(0, 0),
        }
    }

    #[must_use]
    pub fn fundament(&self) -> Fundament {
        self.fundament
    }

    #[must_use]
    pub fn spine_head(&self) -> Coord {
        self.spine_head
    }

    #[must_use]
    pub fn branch_head(&self) -> Coord {
        self.branch_head
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Compute new `(fundament, spine_head, branch_head, placement)` for
    /// placing the next disk in direction `dir` from the appropriate
    /// head, based on that disk's tree role depth.
    fn place(&self, dir: Dir) -> Result<(Fundament, Coord, Coord, Coord), EmbedError> {
        match self.position.current_depth() {
            Some(0) => {
                let placement = self.spine_head.step_dir(dir);
                let mut fundament = self.fundament;
                fundament.shift(dir);
                fundament.block(Coord::new(0, 0));
                Ok((fundament, placement, self.branch_head, placement))
            }
            Some(1) => {
                let placement = self.spine_head.step_dir(dir);
                let rel = Coord::new(
                    placement.x - self.spine_head.x,
                    placement.sly - self.spine_head.sly,
                );
                let mut fundament = self.fundament;
                fundament.block(rel);
                Ok((fundament, self.spine_head, placement, placement))
            }
            Some(2) => {
                let placement = self.branch_head.step_dir(dir);
                let rel = Coord::new(
                    placement.x - self.spine_head.x,
                    placement.sly - self.spine_head.sly,
                );
                let mut fundament = self.fundament;
                fundament.block(rel);
                Ok((fundament, self.spine_head, self.branch_head, placement))
            }
            _ => Err(EmbedError::TooDeep),
        }
    }

    fn child(&self, dir: Dir, shared_self: &Option<Rc<DynamicProblem>>) -> Result<Self, EmbedError> {
        let (fundament, spine_head, branch_head, placement) = self.place(dir)?;
        let mut position = self.position.clone();
        position.advance();
        let parent = if self.constructive {
            Some(Rc::clone(shared_self.as_ref().expect("constructive mode always builds shared_self")))
        } else {
            None
        };
        Ok(Self {
            fundament,
            spine_head,
            branch_head,
            position,
            depth: self.depth + 1,
            constructive: self.constructive,
            parent,
            placement,
        })
    }

    /// Enumerate the possible successor problems: placing the next disk
    /// in order at one of the free candidate directions.
    pub fn subproblems(&self) -> Result<Vec<DynamicProblem>, EmbedError> {
        let shared_self: Option<Rc<DynamicProblem>> = if self.constructive {
            Some(Rc::new(self.clone()))
        } else {
            None
        };

        if self.depth == 0 {
            // Arbitrarily fix the first disk at (0, 0) to break
            // translational symmetry; every placement is equally valid.
            return Ok(vec![self.child(Dir::Right, &shared_self)?]);
        }

        let disk_depth = match self.position.current_depth() {
            Some(d) => d,
            None => return Ok(Vec::new()),
        };

        let head = match disk_depth {
            2 => self.branch_head,
            0 | 1 => self.spine_head,
            _ => return Err(EmbedError::TooDeep),
        };

        let candidates: Vec<Dir> = if disk_depth == 0 {
            forward_dirs().to_vec()
        } else {
            all_dirs().to_vec()
        };

        let mut free = Vec::new();
        for dir in candidates {
            let c = head.step_dir(dir);
            let rel = Coord::new(c.x - self.spine_head.x, c.sly - self.spine_head.sly);
            if !self.fundament.blocked(rel) {
                free.push(dir);
            }
        }

        let mut children = Vec::with_capacity(free.len());
        for dir in free {
            children.push(self.child(dir, &shared_self)?);
        }
        Ok(children)
    }

    /// Construct the full grid embedding from this problem and its
    /// ancestors. Only meaningful in constructive mode; in decision mode
    /// this returns an empty [`Grid`] since no parent chain is kept.
    #[must_use]
    pub fn solution(&self) -> Grid {
        let mut grid = Grid::new();
        let mut placement = self.placement;
        let mut current_parent = self.parent.clone();
        while let Some(parent) = current_parent {
            let id = parent
                .position
                .current_id()
                .expect("parent's position points at the disk this child just placed");
            grid.put(placement, id);
            placement = parent.placement;
            current_parent = parent.parent.clone();
        }
        grid
    }

    /// The equivalence-class signature of this problem: depth, the
    /// reachability-normalized fundament, and the branch head relative
    /// to the spine head (only relevant while the next disk is a leaf).
    #[must_use]
    pub fn signature(&self) -> Signature {
        let mut head = Coord::new(0, 0);
        if self.position.current_depth() == Some(2) {
            head = Coord::new(
                self.branch_head.x - self.spine_head.x,
                self.branch_head.sly - self.spine_head.sly,
            );
        }
        let fundament = reachable_eventually(self.fundament, head, self.position.clone());
        Signature::new(self.depth, fundament, head)
    }
}

impl PartialEq for DynamicProblem {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
    }
}

impl Eq for DynamicProblem {}

impl PartialOrd for DynamicProblem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered purely by depth, so [`crate::queue::ProblemQueue`]'s
/// `BinaryHeap` always expands the deepest open problem next.
impl Ord for DynamicProblem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.depth.cmp(&other.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Disk;

    fn single_edge_graph() -> DiskGraph {
        DiskGraph::new(vec![Disk::new(0, -1, 0), Disk::new(1, 0, 0)])
    }

    #[test]
    fn root_problem_has_depth_zero() {
        let graph = Rc::new(single_edge_graph());
        let root = DynamicProblem::root(graph, EmbedOrder::DepthFirst, true);
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn root_subproblem_places_first_disk_at_origin() {
        let graph = Rc::new(single_edge_graph());
        let root = DynamicProblem::root(graph, EmbedOrder::DepthFirst, true);
        let children = root.subproblems().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].spine_head(), Coord::new(0, 0));
    }

    #[test]
    fn two_spine_disks_reach_full_depth_and_reconstruct() {
        let graph = Rc::new(single_edge_graph());
        let root = DynamicProblem::root(graph, EmbedOrder::DepthFirst, true);
        let first = root.subproblems().unwrap().into_iter().next().unwrap();
        let seconds = first.subproblems().unwrap();
        assert!(!seconds.is_empty());
        let solved = seconds.into_iter().next().unwrap();
        assert_eq!(solved.depth(), 2);
        let grid = solved.solution();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn decision_mode_keeps_no_parent_chain() {
        let graph = Rc::new(single_edge_graph());
        let root = DynamicProblem::root(graph, EmbedOrder::DepthFirst, false);
        let first = root.subproblems().unwrap().into_iter().next().unwrap();
        assert!(first.parent.is_none());
        assert!(first.solution().is_empty());
    }

    #[test]
    fn too_deep_disk_is_rejected() {
        let graph = Rc::new(DiskGraph::new(vec![
            Disk::new(0, -1, 0),
            Disk::new(1, 0, 1),
            Disk::new(2, 1, 2),
            Disk::new(3, 2, 3), // depth 3: not representable as a lobster
        ]));
        let root = DynamicProblem::root(graph, EmbedOrder::DepthFirst, true);
        let d1 = root.subproblems().unwrap().into_iter().next().unwrap();
        let d2 = d1.subproblems().unwrap().into_iter().next().unwrap();
        let d3 = d2.subproblems().unwrap().into_iter().next().unwrap();
        assert!(matches!(d3.subproblems(), Err(EmbedError::TooDeep)));
    }
}
