//! The fundament: a 25-bit mask describing which lattice cells within a
//! 2-step radius of the current spine head are blocked.
//!
//! Bit `index(x, sly) = 5*(sly + x + 2) + (x + 2)` represents cell
//! `(x, sly)` relative to the spine head, restricted to `-2 <= x <= 2`
//! and `-2 <= x + sly <= 2`. A set bit means the cell is blocked.
//! Out-of-range local coordinates are implicitly blocked.

use crate::geometry::{Coord, Dir};
use crate::graph::Cursor;
use crate::grid::Grid;

/// Bit 12 is local coordinate `(0, 0)`, i.e. the spine head itself.
const CENTER_BIT: u32 = 12;

/// The shift-and-mask constant used by [`Fundament::shift`]'s `Right`
/// and `RightDown` cases: clears the leftmost column of the new 25-cell
/// frame (bit positions 4, 9, 14, 19, 24).
const CLEAR_NEW_COLUMN: u32 = 0b0_1111_01111_01111_01111_01111;

/// A 25-bit occupancy mask over the local neighbourhood of the spine
/// head. A set bit means the corresponding local cell is blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Fundament {
    mask: u32,
}

impl Fundament {
    /// All cells free.
    #[must_use]
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    #[must_use]
    pub const fn from_mask(mask: u32) -> Self {
        Self { mask }
    }

    #[must_use]
    pub const fn mask(self) -> u32 {
        self.mask
    }

    /// For each local cell in range, set the bit iff `grid.at(spine_head
    /// + local)` is occupied.
    #[must_use]
    pub fn from_grid(grid: &Grid, spine_head: Coord) -> Self {
        let mut f = Self::new();
        for x in -2..=2 {
            for sly in (-x - 2)..=(2 - x) {
                let local = Coord::new(x, sly);
                let abs = Coord::new(spine_head.x + x, spine_head.sly + sly);
                if grid.at(abs).is_some() {
                    f.block(local);
                }
            }
        }
        f
    }

    /// Bit index for local coordinate `c`, or `-1` if out of the 25-cell
    /// window (treated as implicitly blocked).
    #[must_use]
    pub fn index(c: Coord) -> i32 {
        if (-2..=2).contains(&c.x) && (-2..=2).contains(&(c.x + c.sly)) {
            (c.sly + c.x + 2) * 5 + (c.x + 2)
        } else {
            -1
        }
    }

    /// Inverse of [`Fundament::index`]: the local coordinate at bit
    /// index `bit` (`0..25`).
    #[must_use]
    pub fn at(bit: u32) -> Coord {
        debug_assert!(bit < 25);
        let bit = bit as i32;
        let x = bit % 5 - 2;
        let sly = bit / 5 - x - 2;
        Coord::new(x, sly)
    }

    #[must_use]
    pub fn blocked(self, c: Coord) -> bool {
        let i = Self::index(c);
        i < 0 || (self.mask >> i) & 1 == 1
    }

    pub fn block(&mut self, c: Coord) {
        let i = Self::index(c);
        if i >= 0 {
            self.mask |= 1 << i;
        }
    }

    /// Reframe the mask so the cell previously in direction `dir` from
    /// the center becomes the new center. Only `Right`, `RightUp`,
    /// `RightDown` are legal (the spine is x-monotone). The new center
    /// cell is always left blocked afterwards.
    pub fn shift(&mut self, dir: Dir) {
        match dir {
            Dir::RightUp => self.mask >>= 5,
            Dir::Right => self.mask = (self.mask >> 6) & CLEAR_NEW_COLUMN,
            Dir::RightDown => self.mask = (self.mask >> 1) & CLEAR_NEW_COLUMN,
            _ => panic!("Fundament::shift only supports Right, RightUp, RightDown"),
        }
        self.mask |= 1 << CENTER_BIT;
    }

    /// BFS within unblocked cells of `self`, for `steps` hops from
    /// `from`. The returned mask uses *inverted* membership: cells
    /// unreachable within `steps` hops are set (blocked); `from` itself
    /// is always set in the result.
    #[must_use]
    pub fn reachable(self, from: Coord, steps: i32) -> Self {
        const NEAR: [Coord; 6] = [
            Coord::new(-1, 0),
            Coord::new(-1, 1),
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, -1),
            Coord::new(0, -1),
        ];

        let mut result = Self::from_mask(u32::MAX);
        let from_bit = Self::index(from);
        if from_bit >= 0 {
            result.mask &= !(1 << from_bit);
        }

        for _ in 0..steps {
            let mut mid = result;
            for bit in 0..25u32 {
                if (result.mask >> bit) & 1 == 0 {
                    let e = Self::at(bit);
                    for n in NEAR {
                        let next = Coord::new(e.x + n.x, e.sly + n.sly);
                        let ni = Self::index(next);
                        if ni >= 0 && !self.blocked(next) {
                            mid.mask &= !(1 << ni);
                        }
                    }
                }
            }
            result = mid;
        }

        if from_bit >= 0 {
            result.mask |= 1 << from_bit;
        }
        result
    }

    /// Same as [`Fundament::reachable`] for one step, but limited to the
    /// three forward (x-monotone) spine directions.
    #[must_use]
    pub fn reachable_by_spine(self, from: Coord) -> Self {
        let tos = [
            Coord::new(from.x, from.sly + 1),
            Coord::new(from.x + 1, from.sly),
            Coord::new(from.x + 1, from.sly - 1),
        ];

        let mut result = Self::from_mask(u32::MAX);
        for to in tos {
            let bit = Self::index(to);
            if bit >= 0 && !self.blocked(to) {
                result.mask &= !(1 << bit);
            }
        }
        result
    }
}

/// Candidate spine locations before any spine disk has been placed:
/// only the center (current spine head) is a candidate.
const INITIAL_SPINE_PLACES: u32 = 0x01ff_efff;

/// Normalize `base` with respect to reachability: starting from `head`
/// (relative to the spine head) while the remaining `position` disks are
/// embedded at `depth`, block every cell that cannot possibly be reached
/// by any legal completion of the embedding.
///
/// This collapses partial-solution states that differ only in
/// currently-irrelevant blocked cells into the same equivalence class,
/// which is what lets [`crate::queue::ProblemQueue`]'s dominance pruning
/// actually fire.
#[must_use]
pub fn reachable_eventually(base: Fundament, head: Coord, mut position: Cursor) -> Fundament {
    // Cells reachable by placing leaves next to the branch head.
    let leaf_reach = if position.current_depth() == Some(2) {
        let r = base.reachable(head, 1);
        while matches!(position.current_depth(), Some(d) if d >= 2) {
            position.advance();
        }
        r
    } else {
        Fundament::from_mask(u32::MAX)
    };

    // Cells reachable by placing further spine disks and their descendants.
    let mut ext_reach_mask = u32::MAX;
    let mut spine_places_mask = INITIAL_SPINE_PLACES;

    while !position.is_end() && spine_places_mask != u32::MAX {
        // Reach = deepest role (branch/leaf) attached to the current spine node.
        let mut reach = 0i32;
        while !position.is_end() && position.current_depth() != Some(0) {
            let d = i32::from(position.current_depth().expect("not at end"));
            reach = reach.max(d);
            position.advance();
        }

        for bit in 0..25u32 {
            if (spine_places_mask >> bit) & 1 == 0 {
                ext_reach_mask &= base.reachable(Fundament::at(bit), reach).mask();
            }
        }

        let mut next_spine_places_mask = u32::MAX;
        for bit in 0..25u32 {
            if (spine_places_mask >> bit) & 1 == 0 {
                next_spine_places_mask &= base.reachable_by_spine(Fundament::at(bit)).mask();
            }
        }

        ext_reach_mask &= next_spine_places_mask;
        spine_places_mask = next_spine_places_mask;

        if !position.is_end() {
            position.advance();
        }
    }

    Fundament::from_mask(leaf_reach.mask() & ext_reach_mask)
}
