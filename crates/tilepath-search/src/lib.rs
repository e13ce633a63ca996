//! Incremental graph search over tile lattices.
//!
//! The crate builds a [`SearchGraph`] over a [`tilepath_core::Grid`] for one
//! of three adjacency rules and runs a breadth- or depth-first traversal on
//! it one expansion at a time, so a driver can animate the frontier:
//!
//! - [`Topology`]: 4- and 8-connected squares, 6-connected row-offset hexes
//! - [`Strategy`]: BFS (FIFO) or DFS (LIFO) frontier consumption
//! - [`SearchEngine`]: `initialize` → `enter` → `step`… with
//!   `reset_search` and `clear_path_visuals` between runs
//! - [`SearchConfig`]: validated session settings that build an engine
//!
//! Progress is published through the flags on each [`tilepath_core::Tile`]
//! (open, closed, final path), which renderers read between steps.
//!
//! | Call | Fails with |
//! |---|---|
//! | `enter` before `initialize` | [`SearchError::NotInitialized`] |
//! | `enter` off the grid | [`SearchError::OutOfBounds`] |
//! | `step` / `reset_search` before `enter` | [`SearchError::NotEntered`] |
//! | parsing an unknown tag | [`SearchError::UnknownTopology`] / [`SearchError::UnknownStrategy`] |

pub mod config;
mod engine;
mod error;
mod graph;
mod pathnode;
mod strategy;
mod topology;

pub use config::SearchConfig;
pub use engine::{Outcome, SearchEngine, SearchState};
pub use error::SearchError;
pub use graph::{NodeId, SearchGraph, SearchNode};
pub use pathnode::{Ancestry, PathArena, PathId, PathNode};
pub use strategy::Strategy;
pub use topology::Topology;
