//! Lattice coordinates.
//!
//! Coordinates are `(column, row)`: X grows right, Y grows down.

use std::fmt;
use std::ops::Add;

/// A tile coordinate, or an offset between two tiles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the point lies on an odd row. Negative rows use the
    /// mathematical parity, so `-1` is odd.
    #[inline]
    pub const fn is_odd_row(self) -> bool {
        self.y.rem_euclid(2) == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Applies a neighbor offset.
impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Every point of a `width × height` lattice, row by row.
pub(crate) fn row_major(width: i32, height: i32) -> impl Iterator<Item = Point> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
}
