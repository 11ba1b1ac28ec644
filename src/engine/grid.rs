use std::fmt;

/// Cube coordinate on the hex grid. Components always sum to zero for a
/// well-formed coordinate; wire input is checked with `is_valid`.
///
/// The rules engine only ever needs six-neighbor adjacency; richer grid
/// queries (rings, ranges, outlines) live in the map layer outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// The six cube direction offsets.
pub const DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

impl CubeCoord {
    /// The town center.
    pub const ORIGIN: CubeCoord = CubeCoord { q: 0, r: 0, s: 0 };

    pub fn new(q: i32, r: i32, s: i32) -> Self {
        CubeCoord { q, r, s }
    }

    pub fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    pub fn neighbors(self) -> [CubeCoord; 6] {
        DIRECTIONS.map(|(dq, dr, ds)| CubeCoord {
            q: self.q + dq,
            r: self.r + dr,
            s: self.s + ds,
        })
    }

    pub fn is_adjacent_to(self, other: CubeCoord) -> bool {
        self.neighbors().contains(&other)
    }

    pub fn distance(self, other: CubeCoord) -> u32 {
        ((self.q - other.q).unsigned_abs()
            + (self.r - other.r).unsigned_abs()
            + (self.s - other.s).unsigned_abs())
            / 2
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.q, self.r, self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_valid_and_adjacent() {
        let center = CubeCoord::ORIGIN;
        let adjacent = center.neighbors();
        assert_eq!(adjacent.len(), 6);
        for n in adjacent {
            assert!(n.is_valid());
            assert!(center.is_adjacent_to(n));
            assert_eq!(center.distance(n), 1);
        }
    }

    #[test]
    fn validity_requires_zero_sum() {
        assert!(CubeCoord::new(2, -1, -1).is_valid());
        assert!(!CubeCoord::new(1, 1, 1).is_valid());
    }

    #[test]
    fn distance_is_symmetric() {
        let a = CubeCoord::new(2, -1, -1);
        let b = CubeCoord::new(-1, 2, -1);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.distance(a), 0);
    }
}
