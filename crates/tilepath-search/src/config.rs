//! Settings for one visualizer session.

use std::time::Duration;

use tilepath_core::{Grid, Point};

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::strategy::Strategy;
use crate::topology::Topology;

pub const MIN_GRID_SIZE: i32 = 5;
pub const MAX_GRID_SIZE: i32 = 100;
pub const DEFAULT_GRID_SIZE: i32 = 20;

pub const MIN_STEP_INTERVAL_MS: u64 = 10;
pub const MAX_STEP_INTERVAL_MS: u64 = 500;
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 50;

/// Grid size, adjacency, traversal order, timer pace and endpoints.
///
/// The step interval is only carried for the driver; the engine itself
/// never sleeps. When `goal` is `None` the bottom-right tile is used.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub width: i32,
    pub height: i32,
    pub topology: Topology,
    pub strategy: Strategy,
    pub step_interval_ms: u64,
    pub start: Point,
    pub goal: Option<Point>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            topology: Topology::default(),
            strategy: Strategy::default(),
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            start: Point::ZERO,
            goal: None,
        }
    }
}

impl SearchConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_step_interval_ms(mut self, ms: u64) -> Self {
        self.step_interval_ms = ms;
        self
    }

    pub fn with_endpoints(mut self, start: Point, goal: Point) -> Self {
        self.start = start;
        self.goal = Some(goal);
        self
    }

    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// The configured goal, or the bottom-right tile.
    pub fn goal(&self) -> Point {
        self.goal
            .unwrap_or(Point::new(self.width - 1, self.height - 1))
    }

    /// Check every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), SearchError> {
        let sizes = MIN_GRID_SIZE..=MAX_GRID_SIZE;
        for (field, v) in [("width", self.width), ("height", self.height)] {
            if !sizes.contains(&v) {
                return Err(SearchError::InvalidConfig {
                    field,
                    detail: format!("{v} not in {MIN_GRID_SIZE}..={MAX_GRID_SIZE}"),
                });
            }
        }
        if !(MIN_STEP_INTERVAL_MS..=MAX_STEP_INTERVAL_MS).contains(&self.step_interval_ms) {
            return Err(SearchError::InvalidConfig {
                field: "step_interval_ms",
                detail: format!(
                    "{} not in {MIN_STEP_INTERVAL_MS}..={MAX_STEP_INTERVAL_MS}",
                    self.step_interval_ms
                ),
            });
        }
        let inside = |p: Point| p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height;
        for (field, p) in [("start", self.start), ("goal", self.goal())] {
            if !inside(p) {
                return Err(SearchError::InvalidConfig {
                    field,
                    detail: format!("{p} outside the {}x{} grid", self.width, self.height),
                });
            }
        }
        Ok(())
    }

    /// A fresh, fully walkable grid of the configured size.
    pub fn build_grid(&self) -> Result<Grid, SearchError> {
        self.validate()?;
        Ok(Grid::new(self.width, self.height)?)
    }

    /// Validate, build the grid, initialize an engine on it and enter the
    /// configured endpoints.
    pub fn build_engine(&self) -> Result<SearchEngine, SearchError> {
        self.engine_for(self.build_grid()?)
    }

    /// Like [`build_engine`](SearchConfig::build_engine) but on a grid the
    /// caller prepared, e.g. with walls already placed. The grid size wins
    /// over the configured one.
    pub fn engine_for(&self, grid: Grid) -> Result<SearchEngine, SearchError> {
        let mut engine = SearchEngine::new(self.topology, self.strategy);
        engine.initialize(grid);
        engine.enter_at(self.start, self.goal())?;
        Ok(engine)
    }
}
