//! The [`Grid`] type: a fixed-size lattice owning every [`Tile`].
//!
//! Tiles are stored densely in row-major order and created eagerly. The
//! dimensions never change after construction; resizing means building a
//! new `Grid`.

use std::fmt;

use crate::geom::{Point, row_major};
use crate::tile::Tile;

/// A width × height lattice of [`Tile`]s addressed by `(column, row)`.
///
/// Every lookup takes a [`Point`] and returns `None` outside the lattice,
/// since out-of-range coordinates show up routinely when applying neighbor
/// offsets near the border.
///
/// Deserialization goes through the same checks as [`Grid::new`], plus a
/// check that every tile sits at its own index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid of walkable tiles. Both dimensions must be at least 1.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < 1 || height < 1 {
            return Err(GridError::InvalidSize { width, height });
        }
        let tiles = row_major(width, height).map(Tile::new).collect();
        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Build a grid from a text picture: one line per row, `#` for a blocked
    /// tile and any other character for a walkable one.
    ///
    /// Leading and trailing blank lines are ignored.
    pub fn parse(picture: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => Vec::new(),
        };
        let width = rows.first().map_or(0, |l| l.chars().count());
        if let Some(bad) = rows.iter().position(|l| l.chars().count() != width) {
            return Err(GridError::RaggedRow {
                row: bad as i32,
                expected: width as i32,
                found: rows[bad].chars().count() as i32,
            });
        }
        let mut grid = Self::new(width as i32, rows.len() as i32)?;
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set_walkable(Point::new(x as i32, y as i32), false);
                }
            }
        }
        Ok(grid)
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: a grid holds at least one tile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Flat row-major index of `p`, or `None` out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Inverse of [`index`](Grid::index). `idx` must be below [`len`](Grid::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The tile at `p`, or `None` out of range.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `p`, or `None` out of range.
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Tile> {
        let i = self.index(p)?;
        Some(&mut self.tiles[i])
    }

    /// All tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Row-major iterator over the tiles.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Set walkability at `p`. Returns `false` when `p` is out of range.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> bool {
        match self.at_mut(p) {
            Some(t) => {
                t.set_walkable(walkable);
                true
            }
            None => false,
        }
    }

    /// Flip walkability at `p`, returning the new value, or `None` out of
    /// range.
    pub fn toggle_walkable(&mut self, p: Point) -> Option<bool> {
        self.at_mut(p).map(Tile::toggle_walkable)
    }

    /// Number of walkable tiles.
    pub fn count_walkable(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        let mut grid = Self::new(raw.width, raw.height)?;
        if raw.tiles.len() != grid.len() {
            return Err(GridError::TileCount {
                expected: grid.len(),
                found: raw.tiles.len(),
            });
        }
        for (index, (slot, tile)) in grid.tiles.iter_mut().zip(raw.tiles).enumerate() {
            if tile.pos() != slot.pos() {
                return Err(GridError::MisplacedTile {
                    index,
                    pos: tile.pos(),
                });
            }
            *slot = tile;
        }
        Ok(grid)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

/// Errors raised while building a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height below 1.
    InvalidSize { width: i32, height: i32 },
    /// A row of a text picture does not match the first row's width.
    RaggedRow { row: i32, expected: i32, found: i32 },
    /// A serialized grid whose tile list does not match its dimensions.
    TileCount { expected: usize, found: usize },
    /// A serialized tile stored at the wrong row-major index.
    MisplacedTile { index: usize, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "grid: invalid size {width}x{height}, both must be at least 1")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} tiles, expected {expected}"
            ),
            Self::TileCount { expected, found } => {
                write!(f, "grid: {found} tiles stored, expected {expected}")
            }
            Self::MisplacedTile { index, pos } => {
                write!(f, "grid: tile {pos} stored at index {index}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.len(), 12);
        let t = g.at(Point::new(3, 2)).unwrap();
        assert_eq!(t.pos(), Point::new(3, 2));
        assert!(t.is_walkable());
    }

    #[test]
    fn out_of_range_is_absent() {
        let mut g = Grid::new(2, 2).unwrap();
        assert!(g.at(Point::new(2, 0)).is_none());
        assert!(g.at(Point::new(0, -1)).is_none());
        assert!(g.at_mut(Point::new(-1, -1)).is_none());
        assert_eq!(g.toggle_walkable(Point::new(5, 5)), None);
        assert!(!g.set_walkable(Point::new(0, 9), false));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidSize {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(3, -1).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn index_point_inverse() {
        let g = Grid::new(5, 3).unwrap();
        for (i, t) in g.iter().enumerate() {
            assert_eq!(g.index(t.pos()), Some(i));
            assert_eq!(g.point(i), t.pos());
        }
    }

    #[test]
    fn toggle_and_count_walkable() {
        let mut g = Grid::new(3, 3).unwrap();
        assert_eq!(g.toggle_walkable(Point::new(1, 1)), Some(false));
        assert!(g.set_walkable(Point::new(0, 2), false));
        assert_eq!(g.count_walkable(), 7);
        assert_eq!(g.toggle_walkable(Point::new(1, 1)), Some(true));
        assert_eq!(g.count_walkable(), 8);
    }

    #[test]
    fn parse_picture() {
        let g = Grid::parse(
            "
.#..
....
##.#
",
        )
        .unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert!(!g.at(Point::new(1, 0)).unwrap().is_walkable());
        assert!(!g.at(Point::new(3, 2)).unwrap().is_walkable());
        assert!(g.at(Point::new(2, 2)).unwrap().is_walkable());
        assert_eq!(g.count_walkable(), 8);
    }

    #[test]
    fn parse_ragged_picture() {
        let err = Grid::parse("...\n..\n...").unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert!(Grid::parse("\n\n").is_err());
    }
}
