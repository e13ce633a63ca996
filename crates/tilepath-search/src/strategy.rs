use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Order in which the frontier is consumed.
///
/// Parses from `BFS`/`DFS` (case-insensitive), or the long forms
/// `breadth-first`/`depth-first`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// FIFO: expand the oldest discovered node first.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "BFS"))]
    Bfs,
    /// LIFO: expand the newest discovered node first.
    #[cfg_attr(feature = "serde", serde(rename = "DFS"))]
    Dfs,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Bfs, Strategy::Dfs];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match tag.as_str() {
            "BFS" | "BREADTH_FIRST" => Ok(Self::Bfs),
            "DFS" | "DEPTH_FIRST" => Ok(Self::Dfs),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}
