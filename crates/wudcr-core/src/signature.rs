//! Equivalence classes of partial embedding problems.

use crate::fundament::Fundament;
use crate::geometry::Coord;

/// The identifying components of a partial dynamic-programming problem.
///
/// Two problems with equal signatures are interchangeable: any
/// completion of one efficiently yields a completion of the other. The
/// fundament is stored in canonical (mirror-normalized) form so that a
/// problem and its mirror image compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub depth: u32,
    pub fundament: Fundament,
    pub head: Coord,
}

impl Signature {
    /// Build a signature, normalizing `fundament`/`head` to whichever of
    /// the mask and its mirror image sorts lower as a plain integer.
    ///
    /// Mirroring swaps each local coordinate `(x, sly)` with
    /// `(x + sly, -sly)` (reflection across the spine axis); the bit-pair
    /// swap below implements that on the packed mask directly rather
    /// than round-tripping through [`Fundament::index`]/[`Fundament::at`].
    #[must_use]
    pub fn new(depth: u32, fundament: Fundament, head: Coord) -> Self {
        let mask = fundament.mask();
        let mut mirrored = mask;
        for x in 0..4 {
            for y in 0..(4 - x) {
                let upper = 5 + x * 6 + y * 5;
                let lower = 1 + x * 6 + y;
                let a = (mirrored >> upper) & 1;
                let b = (mirrored >> lower) & 1;
                mirrored = (mirrored & !(1 << upper)) | (b << upper);
                mirrored = (mirrored & !(1 << lower)) | (a << lower);
            }
        }

        if mirrored < mask {
            Self {
                depth,
                fundament: Fundament::from_mask(mirrored),
                head: Coord::new(head.x + head.sly, -head.sly),
            }
        } else {
            Self {
                depth,
                fundament,
                head,
            }
        }
    }

    /// `true` if this signature is at least as good as `rhs` for the
    /// purpose of reaching a solution: same depth, same head, and every
    /// cell blocked here is also blocked in `rhs` (so anything
    /// expandable from `rhs` is also expandable from here).
    ///
    /// Reflexive: every signature dominates itself.
    #[must_use]
    pub fn dominates(&self, rhs: &Signature) -> bool {
        if self.depth != rhs.depth || self.head != rhs.head {
            return false;
        }
        (self.fundament.mask() & rhs.fundament.mask()) == self.fundament.mask()
    }

    /// Ordering used by [`crate::queue::ProblemQueue`]'s closed set:
    /// groups signatures of equal depth and head together, and within
    /// those, orders by number of blocked cells, then by raw mask value.
    #[must_use]
    pub fn order_key(&self) -> (u32, i32, i32, u32, u32) {
        (
            self.depth,
            self.head.x,
            self.head.sly,
            self.fundament.mask().count_ones(),
            self.fundament.mask(),
        )
    }
}

impl PartialOrd for Signature {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Signature {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order_key().cmp(&other.order_key())
    }
}
