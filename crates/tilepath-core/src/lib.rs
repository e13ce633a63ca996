//! **tilepath-core**: the tile lattice searched by `tilepath-search`.
//!
//! This crate provides the [`Point`] coordinate, the
//! [`Tile`] cell with its visualization flags, and the fixed-size [`Grid`]
//! that owns every tile of one lattice.

pub mod geom;
pub mod grid;
pub mod tile;

pub use geom::Point;
pub use grid::{Grid, GridError};
pub use tile::Tile;
