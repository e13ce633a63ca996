//! Errors reported by the search engine and its configuration.

use std::fmt;

use tilepath_core::{GridError, Point};

/// Every way a search call can be rejected.
///
/// None of these are fatal: the engine is left exactly as it was before the
/// failing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A topology tag that names no known adjacency rule.
    UnknownTopology(String),
    /// A strategy tag that names no known traversal.
    UnknownStrategy(String),
    /// A configuration value outside its accepted range.
    InvalidConfig { field: &'static str, detail: String },
    /// The grid could not be built.
    Grid(GridError),
    /// `enter` was called before any grid was initialized.
    NotInitialized,
    /// `step` or `reset_search` was called before `enter`.
    NotEntered,
    /// A start or goal coordinate lies outside the grid.
    OutOfBounds { point: Point, size: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTopology(tag) => write!(
                f,
                "unknown topology {tag:?} (expected SQUARE_4, SQUARE_8 or HEX_6)"
            ),
            Self::UnknownStrategy(tag) => {
                write!(f, "unknown strategy {tag:?} (expected BFS or DFS)")
            }
            Self::InvalidConfig { field, detail } => write!(f, "invalid {field}: {detail}"),
            Self::Grid(e) => write!(f, "{e}"),
            Self::NotInitialized => f.write_str("search: no grid initialized"),
            Self::NotEntered => f.write_str("search: no start/goal entered"),
            Self::OutOfBounds { point, size } => write!(
                f,
                "search: {point} is outside the {}x{} grid",
                size.x, size.y
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
