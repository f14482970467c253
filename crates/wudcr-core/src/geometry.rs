//! Geometric primitives for the triangular lattice.
//!
//! `Coord` locates a cell using a skewed y-axis (`sly`, "slash-y") so that
//! the six lattice neighbours of `(x, sly)` are reachable by single-unit
//! steps in six [`Dir`]ections. [`Rel`] directions are expressed relative
//! to some absolute direction (typically the direction the spine is
//! currently heading) rather than fixed to an axis.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A location on the infinite triangular lattice.
///
/// `sly` is a skewed y-axis: the six neighbours of `(x, sly)` are
/// `(x-1,sly)`, `(x-1,sly+1)`, `(x,sly+1)`, `(x,sly-1)`, `(x+1,sly-1)`,
/// `(x+1,sly)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub sly: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, sly: i32) -> Self {
        Self { x, sly }
    }

    /// Cartesian projection for rendering: `(x + 0.5*sly, (√3/2)*sly)`.
    #[must_use]
    pub fn to_cartesian(self) -> (f64, f64) {
        const SQRT3_OVER_2: f64 = 0.866_025_403_784_438_6;
        (
            f64::from(self.x) + 0.5 * f64::from(self.sly),
            SQRT3_OVER_2 * f64::from(self.sly),
        )
    }
}

impl Add<Coord> for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.sly + rhs.sly)
    }
}

/// An absolute step direction on the triangular grid, ordered cyclically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dir {
    LeftDown = 0,
    Left = 1,
    LeftUp = 2,
    RightUp = 3,
    Right = 4,
    RightDown = 5,
}

impl Dir {
    const ALL: [Dir; 6] = [
        Dir::LeftDown,
        Dir::Left,
        Dir::LeftUp,
        Dir::RightUp,
        Dir::Right,
        Dir::RightDown,
    ];

    #[must_use]
    pub fn from_index(i: u8) -> Dir {
        Self::ALL[usize::from(i % 6)]
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A relative step direction, composed with an absolute [`Dir`] to produce
/// a new absolute direction. `Here` denotes "no movement" and must be
/// handled explicitly by [`step`] rather than fed to `Dir + Rel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rel {
    Forward = 0,
    FwdDown = 1,
    BackDown = 2,
    Back = 3,
    BackUp = 4,
    FwdUp = 5,
    Here = 6,
}

impl Add<Rel> for Dir {
    type Output = Dir;

    /// `dir + rel = Dir((dir + rel) mod 6)`. Panics if `rel == Rel::Here`;
    /// use [`step`] with `Rel::Here` for "no movement" instead.
    fn add(self, rel: Rel) -> Dir {
        assert!(!matches!(rel, Rel::Here), "use Rel::Here only with step()");
        Dir::from_index(self.index() + rel as u8)
    }
}

impl Coord {
    #[must_use]
    pub fn step_dir(self, dir: Dir) -> Coord {
        match dir {
            Dir::Left => Coord::new(self.x - 1, self.sly),
            Dir::LeftUp => Coord::new(self.x - 1, self.sly + 1),
            Dir::LeftDown => Coord::new(self.x, self.sly - 1),
            Dir::RightUp => Coord::new(self.x, self.sly + 1),
            Dir::RightDown => Coord::new(self.x + 1, self.sly - 1),
            Dir::Right => Coord::new(self.x + 1, self.sly),
        }
    }
}

/// `step(c, dir, rel) = c` if `rel == Here`, else `c + (dir + rel)`.
#[must_use]
pub fn step(from: Coord, dir: Dir, rel: Rel) -> Coord {
    if matches!(rel, Rel::Here) {
        from
    } else {
        from.step_dir(dir + rel)
    }
}

/// The six absolute step directions, in the fixed enumeration order used
/// by [`crate::dynamic::DynamicProblem::subproblems`]:
/// `Left, LeftUp, LeftDown, Right, RightUp, RightDown`.
#[must_use]
pub const fn all_dirs() -> [Dir; 6] {
    [
        Dir::Left,
        Dir::LeftUp,
        Dir::LeftDown,
        Dir::Right,
        Dir::RightUp,
        Dir::RightDown,
    ]
}

/// The three forward (x-monotone) spine directions.
#[must_use]
pub const fn forward_dirs() -> [Dir; 3] {
    [Dir::Right, Dir::RightUp, Dir::RightDown]
}
