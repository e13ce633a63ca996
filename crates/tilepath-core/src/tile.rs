//! The [`Tile`] type: one lattice cell with walkability and search flags.

use crate::geom::Point;

/// A grid cell.
///
/// The position is fixed at construction. Walkability is edited by the
/// caller; the start/goal/open/closed/path flags are written by the search
/// engine and only read by renderers.
///
/// A tile is never in the open and the closed set at the same time:
/// [`mark_open`](Tile::mark_open) and [`mark_closed`](Tile::mark_closed)
/// each clear the other flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pos: Point,
    walkable: bool,
    start: bool,
    goal: bool,
    open: bool,
    closed: bool,
    final_path: bool,
}

impl Tile {
    /// Create a walkable tile at `pos` with every search flag cleared.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            walkable: true,
            start: false,
            goal: false,
            open: false,
            closed: false,
            final_path: false,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn column(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    #[inline]
    pub fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }

    /// Flip walkability, returning the new value.
    pub fn toggle_walkable(&mut self) -> bool {
        self.walkable = !self.walkable;
        self.walkable
    }

    #[inline]
    pub const fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub const fn is_goal(&self) -> bool {
        self.goal
    }

    /// Frontier membership: discovered but not yet expanded.
    #[inline]
    pub const fn in_open_set(&self) -> bool {
        self.open
    }

    /// Already expanded.
    #[inline]
    pub const fn in_closed_set(&self) -> bool {
        self.closed
    }

    #[inline]
    pub const fn in_final_path(&self) -> bool {
        self.final_path
    }

    pub fn set_start(&mut self, start: bool) {
        self.start = start;
    }

    pub fn set_goal(&mut self, goal: bool) {
        self.goal = goal;
    }

    /// Move the tile into the open set.
    pub fn mark_open(&mut self) {
        self.open = true;
        self.closed = false;
    }

    /// Move the tile from the open set into the closed set.
    pub fn mark_closed(&mut self) {
        self.open = false;
        self.closed = true;
    }

    /// Clear open/closed membership. Walkability, endpoints and the
    /// final-path flag are left alone.
    pub fn clear_search_marks(&mut self) {
        self.open = false;
        self.closed = false;
    }

    pub fn set_in_final_path(&mut self, on_path: bool) {
        self.final_path = on_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_defaults() {
        let t = Tile::new(Point::new(3, 1));
        assert_eq!(t.column(), 3);
        assert_eq!(t.row(), 1);
        assert!(t.is_walkable());
        assert!(!t.is_start() && !t.is_goal());
        assert!(!t.in_open_set() && !t.in_closed_set() && !t.in_final_path());
    }

    #[test]
    fn open_and_closed_are_exclusive() {
        let mut t = Tile::new(Point::ZERO);
        t.mark_open();
        assert!(t.in_open_set() && !t.in_closed_set());
        t.mark_closed();
        assert!(!t.in_open_set() && t.in_closed_set());
        t.mark_open();
        assert!(t.in_open_set() && !t.in_closed_set());
    }

    #[test]
    fn clear_search_marks_keeps_path_and_walkability() {
        let mut t = Tile::new(Point::ZERO);
        t.set_walkable(false);
        t.mark_closed();
        t.set_in_final_path(true);
        t.clear_search_marks();
        assert!(!t.in_closed_set());
        assert!(t.in_final_path());
        assert!(!t.is_walkable());
    }

    #[test]
    fn toggle_walkable_flips() {
        let mut t = Tile::new(Point::ZERO);
        assert!(!t.toggle_walkable());
        assert!(t.toggle_walkable());
    }
}
