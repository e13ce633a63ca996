//! Adjacency rules: which offsets lead from a tile to its neighbors.

use std::fmt;
use std::str::FromStr;

use tilepath_core::Point;

use crate::error::SearchError;

const SQUARE_4: [Point; 4] = [
    Point::new(0, -1), // up
    Point::new(0, 1),  // down
    Point::new(-1, 0), // left
    Point::new(1, 0),  // right
];

const SQUARE_8: [Point; 8] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

// "odd-r" offset layout: odd rows sit half a tile to the right, so the
// diagonal neighbors of an even row lean left and those of an odd row lean
// right. Mixing the tables up breaks adjacency symmetry.
const HEX_EVEN_ROW: [Point; 6] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
];

const HEX_ODD_ROW: [Point; 6] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(1, 1),
];

/// The neighbor-adjacency rule of a lattice.
///
/// Text tags parse case-insensitively: `SQUARE_4` (also `4`), `SQUARE_8`
/// (also `8`) and `HEX_6` (also `hex`, `6`). Anything else is rejected with
/// [`SearchError::UnknownTopology`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Up, down, left, right.
    #[cfg_attr(feature = "serde", serde(rename = "SQUARE_4"))]
    Square4,
    /// `Square4` plus the four diagonals.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "SQUARE_8"))]
    Square8,
    /// Six neighbors on a row-offset hexagonal lattice.
    #[cfg_attr(feature = "serde", serde(rename = "HEX_6"))]
    Hex6,
}

impl Topology {
    pub const ALL: [Topology; 3] = [Topology::Square4, Topology::Square8, Topology::Hex6];

    /// Offsets from `p` to each of its neighbors, in a fixed order.
    ///
    /// Only [`Hex6`](Topology::Hex6) looks at `p`, and only at its row
    /// parity. Results may land outside the grid; callers filter.
    pub fn offsets(self, p: Point) -> &'static [Point] {
        match self {
            Self::Square4 => &SQUARE_4,
            Self::Square8 => &SQUARE_8,
            Self::Hex6 if p.is_odd_row() => &HEX_ODD_ROW,
            Self::Hex6 => &HEX_EVEN_ROW,
        }
    }

    /// Neighbor positions of `p`, unfiltered.
    pub fn neighbors(self, p: Point) -> impl Iterator<Item = Point> {
        self.offsets(p).iter().map(move |&d| p + d)
    }

    /// Largest number of neighbors any tile can have.
    pub const fn max_degree(self) -> usize {
        match self {
            Self::Square4 => 4,
            Self::Square8 => 8,
            Self::Hex6 => 6,
        }
    }

    /// Canonical tag, as accepted by [`FromStr`].
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Square4 => "SQUARE_4",
            Self::Square8 => "SQUARE_8",
            Self::Hex6 => "HEX_6",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Topology {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase().replace('-', "_");
        match tag.as_str() {
            "SQUARE_4" | "SQUARE4" | "4" => Ok(Self::Square4),
            "SQUARE_8" | "SQUARE8" | "8" => Ok(Self::Square8),
            "HEX_6" | "HEX6" | "HEX" | "6" => Ok(Self::Hex6),
            _ => Err(SearchError::UnknownTopology(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        let p = Point::new(3, 3);
        assert_eq!(Topology::Square4.offsets(p).len(), 4);
        assert_eq!(Topology::Square8.offsets(p).len(), 8);
        assert_eq!(Topology::Hex6.offsets(p).len(), 6);
        assert_eq!(Topology::Hex6.offsets(Point::new(3, 4)).len(), 6);
        for t in Topology::ALL {
            assert_eq!(t.offsets(p).len(), t.max_degree());
        }
    }

    #[test]
    fn square8_extends_square4() {
        let p = Point::ZERO;
        let four = Topology::Square4.offsets(p);
        let eight = Topology::Square8.offsets(p);
        assert_eq!(&eight[..4], four);
        assert!(eight[4..].iter().all(|d| d.x != 0 && d.y != 0));
    }

    #[test]
    fn hex_tables_depend_on_row_parity() {
        assert_ne!(
            Topology::Hex6.offsets(Point::new(0, 0)),
            Topology::Hex6.offsets(Point::new(0, 1))
        );
        assert_eq!(
            Topology::Hex6.offsets(Point::new(0, 0)),
            Topology::Hex6.offsets(Point::new(7, 2))
        );
    }

    #[test]
    fn hex_adjacency_is_symmetric_across_rows() {
        // Every neighbor of p must list p back, whichever row p is on.
        for y in -2..3 {
            for x in -2..3 {
                let p = Point::new(x, y);
                for n in Topology::Hex6.neighbors(p) {
                    assert!(
                        Topology::Hex6.neighbors(n).any(|q| q == p),
                        "{n} does not list {p}"
                    );
                }
            }
        }
    }

    #[test]
    fn parse_tags() {
        assert_eq!("SQUARE_4".parse::<Topology>(), Ok(Topology::Square4));
        assert_eq!("square-8".parse::<Topology>(), Ok(Topology::Square8));
        assert_eq!(" hex ".parse::<Topology>(), Ok(Topology::Hex6));
        assert_eq!("6".parse::<Topology>(), Ok(Topology::Hex6));
        for t in Topology::ALL {
            assert_eq!(t.to_string().parse::<Topology>(), Ok(t));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            "TRIANGLE_3".parse::<Topology>(),
            Err(SearchError::UnknownTopology("TRIANGLE_3".into()))
        );
        assert!("".parse::<Topology>().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Topology::Hex6).unwrap(), "\"HEX_6\"");
        let t: Topology = serde_json::from_str("\"SQUARE_4\"").unwrap();
        assert_eq!(t, Topology::Square4);
    }
}
