//! Lattice site coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Integer triple addressing one lattice site.
///
/// `n` and `m` count unit cells along the two lattice vectors, `l` selects a
/// site within the cell basis. Coordinates double as offsets: adding two
/// coordinates adds each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LatticeCoord {
    pub n: i32,
    pub m: i32,
    pub l: i32,
}

impl LatticeCoord {
    /// The zero offset
    pub const ZERO: LatticeCoord = LatticeCoord { n: 0, m: 0, l: 0 };

    pub const fn new(n: i32, m: i32, l: i32) -> Self {
        Self { n, m, l }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for LatticeCoord {
    type Output = LatticeCoord;

    fn add(self, rhs: LatticeCoord) -> LatticeCoord {
        LatticeCoord::new(self.n + rhs.n, self.m + rhs.m, self.l + rhs.l)
    }
}

impl AddAssign for LatticeCoord {
    fn add_assign(&mut self, rhs: LatticeCoord) {
        *self = *self + rhs;
    }
}

impl Sub for LatticeCoord {
    type Output = LatticeCoord;

    fn sub(self, rhs: LatticeCoord) -> LatticeCoord {
        LatticeCoord::new(self.n - rhs.n, self.m - rhs.m, self.l - rhs.l)
    }
}

impl Neg for LatticeCoord {
    type Output = LatticeCoord;

    fn neg(self) -> LatticeCoord {
        LatticeCoord::new(-self.n, -self.m, -self.l)
    }
}

impl From<(i32, i32, i32)> for LatticeCoord {
    fn from((n, m, l): (i32, i32, i32)) -> Self {
        Self::new(n, m, l)
    }
}

impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.n, self.m, self.l)
    }
}
