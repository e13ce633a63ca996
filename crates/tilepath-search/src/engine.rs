//! The incremental search engine.
//!
//! [`SearchEngine`] owns the grid, its [`SearchGraph`] and all traversal
//! state. A driver calls [`step`](SearchEngine::step) once per timer tick
//! and redraws from the tile flags in between.

use std::collections::VecDeque;

use tilepath_core::{Grid, Point};

use crate::error::SearchError;
use crate::graph::{NodeId, SearchGraph};
use crate::pathnode::{PathArena, PathId, PathNode};
use crate::strategy::Strategy;
use crate::topology::Topology;

/// How a finished search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was expanded and the path reconstructed.
    Found,
    /// The frontier ran dry before reaching the goal.
    Exhausted,
}

/// Where the engine is in its life cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No start/goal entered since the last initialize.
    #[default]
    Uninitialized,
    /// Seeded and waiting for the first step.
    Ready,
    /// At least one step taken, frontier not yet resolved.
    Running,
    /// Further steps are no-ops.
    Finished(Outcome),
}

/// Stateful BFS/DFS over a tile lattice, advanced one expansion at a time.
///
/// Typical use:
///
/// ```
/// use tilepath_core::Grid;
/// use tilepath_search::{SearchEngine, Strategy, Topology};
///
/// let mut engine = SearchEngine::new(Topology::Square4, Strategy::Bfs);
/// engine.initialize(Grid::new(3, 3).unwrap());
/// engine.enter(0, 0, 2, 2).unwrap();
/// while engine.step().unwrap() {
///     // redraw from engine.grid()
/// }
/// assert_eq!(engine.path_hops(), Some(4));
/// ```
///
/// Walkability edits made through [`set_walkable`](SearchEngine::set_walkable)
/// are picked up by the next [`reset_search`](SearchEngine::reset_search);
/// topology and size changes need a new [`initialize`](SearchEngine::initialize)
/// followed by [`enter`](SearchEngine::enter).
#[derive(Debug, Default)]
pub struct SearchEngine {
    topology: Topology,
    strategy: Strategy,
    grid: Option<Grid>,
    graph: Option<SearchGraph>,
    generation: u64,
    /// Start and goal node.
    endpoints: Option<(NodeId, NodeId)>,
    arena: PathArena,
    /// Claimed nodes, indexed by node id.
    visited: Vec<Option<PathId>>,
    visited_len: usize,
    /// Consumed from the front for BFS, from the back for DFS.
    open: VecDeque<PathId>,
    final_path: Vec<Point>,
    state: SearchState,
    steps: usize,
}

impl SearchEngine {
    pub fn new(topology: Topology, strategy: Strategy) -> Self {
        Self {
            topology,
            strategy,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Take ownership of `grid` and build a fresh search graph for the
    /// current topology.
    ///
    /// Any previous grid, graph, endpoints and traversal state are dropped,
    /// and every search flag on `grid` is cleared. Walkability is kept.
    pub fn initialize(&mut self, mut grid: Grid) {
        for t in grid.tiles_mut() {
            t.set_start(false);
            t.set_goal(false);
            t.clear_search_marks();
            t.set_in_final_path(false);
        }
        self.generation = self.generation.wrapping_add(1);
        let graph = SearchGraph::build(&grid, self.topology, self.generation);
        log::debug!(
            "initialize: {}x{} {} graph, {} nodes, {} edges, generation {}",
            grid.width(),
            grid.height(),
            self.topology,
            graph.len(),
            graph.edge_count(),
            self.generation
        );

        self.visited = vec![None; graph.len()];
        self.visited_len = 0;
        self.arena.clear();
        self.open.clear();
        self.final_path.clear();
        self.endpoints = None;
        self.state = SearchState::Uninitialized;
        self.steps = 0;
        self.grid = Some(grid);
        self.graph = Some(graph);
    }

    /// Rebuild the graph of the current grid, e.g. after
    /// [`set_topology`](SearchEngine::set_topology). Endpoints must be
    /// entered again afterwards.
    pub fn rebuild(&mut self) -> Result<(), SearchError> {
        let grid = self.grid.take().ok_or(SearchError::NotInitialized)?;
        self.initialize(grid);
        Ok(())
    }

    /// Place start and goal and seed the frontier.
    ///
    /// Coordinates are `(column, row)`. Out-of-range coordinates are
    /// rejected and leave the engine untouched. Previous start/goal markers
    /// and open/closed flags are cleared; final-path flags are not (see
    /// [`clear_path_visuals`](SearchEngine::clear_path_visuals)).
    pub fn enter(
        &mut self,
        start_x: i32,
        start_y: i32,
        goal_x: i32,
        goal_y: i32,
    ) -> Result<(), SearchError> {
        self.enter_at(Point::new(start_x, start_y), Point::new(goal_x, goal_y))
    }

    /// [`enter`](SearchEngine::enter) taking points.
    pub fn enter_at(&mut self, start: Point, goal: Point) -> Result<(), SearchError> {
        let (Some(grid), Some(graph)) = (self.grid.as_mut(), self.graph.as_ref()) else {
            return Err(SearchError::NotInitialized);
        };
        let out_of_bounds = |point| SearchError::OutOfBounds {
            point,
            size: graph.size(),
        };
        let s = graph.node_at(start).ok_or_else(|| out_of_bounds(start))?;
        let g = graph.node_at(goal).ok_or_else(|| out_of_bounds(goal))?;

        for t in grid.tiles_mut() {
            t.set_start(false);
            t.set_goal(false);
            t.clear_search_marks();
        }
        grid.tiles_mut()[s.index()].set_start(true);
        grid.tiles_mut()[g.index()].set_goal(true);

        log::debug!("enter: {start} -> {goal} ({})", self.strategy);
        self.endpoints = Some((s, g));
        self.seed(s);
        Ok(())
    }

    /// Throw away the current run and reseed from the same start and goal.
    ///
    /// Open/closed flags are cleared on every tile; final-path flags stay
    /// until [`clear_path_visuals`](SearchEngine::clear_path_visuals).
    /// Calling this twice in a row is the same as calling it once.
    pub fn reset_search(&mut self) -> Result<(), SearchError> {
        let grid = self.grid.as_mut().ok_or(SearchError::NotInitialized)?;
        let (start, _) = self.endpoints.ok_or(SearchError::NotEntered)?;
        for t in grid.tiles_mut() {
            t.clear_search_marks();
        }
        log::debug!("reset: reseeding from {}", grid.point(start.index()));
        self.seed(start);
        Ok(())
    }

    /// Clear every final-path flag and forget the last path.
    pub fn clear_path_visuals(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            for t in grid.tiles_mut() {
                t.set_in_final_path(false);
            }
        }
        self.final_path.clear();
    }

    fn seed(&mut self, start: NodeId) {
        self.open.clear();
        self.arena.clear();
        self.visited.fill(None);

        let root = self.arena.root(start);
        self.visited[start.index()] = Some(root);
        self.visited_len = 1;
        self.open.push_back(root);
        if let Some(grid) = self.grid.as_mut() {
            grid.tiles_mut()[start.index()].mark_open();
        }

        self.state = SearchState::Ready;
        self.steps = 0;
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Expand one frontier node.
    ///
    /// Returns `Ok(true)` while the search is still going and `Ok(false)`
    /// once it has finished, either because the goal was expanded or
    /// because nothing is left to expand. Calls after that keep returning
    /// `Ok(false)` without touching any state.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        let goal = match (self.state, self.endpoints) {
            (SearchState::Finished(_), _) => return Ok(false),
            (_, Some((_, goal))) => goal,
            (_, None) if self.graph.is_none() => return Err(SearchError::NotInitialized),
            (_, None) => return Err(SearchError::NotEntered),
        };

        let popped = match self.strategy {
            Strategy::Bfs => self.open.pop_front(),
            Strategy::Dfs => self.open.pop_back(),
        };
        let Some(current) = popped else {
            self.finish(Outcome::Exhausted);
            return Ok(false);
        };
        self.steps += 1;
        self.state = SearchState::Running;
        let node = self.arena.get(current).node;
        if let Some(grid) = self.grid.as_mut() {
            grid.tiles_mut()[node.index()].mark_closed();
        }

        if node == goal {
            self.reconstruct(current);
            self.finish(Outcome::Found);
            return Ok(false);
        }

        let (Some(grid), Some(graph)) = (self.grid.as_mut(), self.graph.as_ref()) else {
            return Err(SearchError::NotInitialized);
        };
        let mut added = 0;
        for &n in graph.node(node).neighbors() {
            if self.visited[n.index()].is_some() {
                continue;
            }
            let tile = &grid.tiles()[n.index()];
            if !tile.is_walkable() {
                continue;
            }
            if self.strategy == Strategy::Dfs && tile.in_closed_set() {
                continue;
            }
            // Claim before queueing so no sibling can add it again.
            let child = self.arena.child(n, current);
            self.visited[n.index()] = Some(child);
            self.visited_len += 1;
            grid.tiles_mut()[n.index()].mark_open();
            self.open.push_back(child);
            added += 1;
        }
        log::trace!(
            "step {}: expanded {}, {} new, {} open",
            self.steps,
            graph.node(node).pos(),
            added,
            self.open.len()
        );

        if self.open.is_empty() {
            self.finish(Outcome::Exhausted);
            return Ok(false);
        }
        Ok(true)
    }

    /// Step until the search finishes. Returns the number of `step` calls.
    pub fn run_to_end(&mut self) -> Result<usize, SearchError> {
        let mut calls = 0;
        loop {
            calls += 1;
            if !self.step()? {
                return Ok(calls);
            }
        }
    }

    fn reconstruct(&mut self, goal: PathId) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        let mut path: Vec<Point> = Vec::new();
        for id in self.arena.ancestry(goal) {
            grid.tiles_mut()[id.index()].set_in_final_path(true);
            path.push(grid.point(id.index()));
        }
        path.reverse();
        self.final_path = path;
    }

    fn finish(&mut self, outcome: Outcome) {
        self.open.clear();
        self.state = SearchState::Finished(outcome);
        match outcome {
            Outcome::Found => log::debug!(
                "goal reached after {} steps, {} hops, {} visited",
                self.steps,
                self.final_path.len().saturating_sub(1),
                self.visited_len
            ),
            Outcome::Exhausted => log::debug!(
                "frontier exhausted after {} steps, {} visited",
                self.steps,
                self.visited_len
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switch traversal order. Usually followed by
    /// [`reset_search`](SearchEngine::reset_search); switching mid-run
    /// changes how the remaining frontier is consumed.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Select the adjacency rule used by the next
    /// [`initialize`](SearchEngine::initialize) or
    /// [`rebuild`](SearchEngine::rebuild). The current graph is unchanged.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SearchState::Finished(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SearchState::Finished(_))
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Set walkability at `p`. Returns `false` when `p` is outside the grid
    /// or no grid is initialized.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> bool {
        self.grid
            .as_mut()
            .is_some_and(|g| g.set_walkable(p, walkable))
    }

    /// Flip walkability at `p`, returning the new value.
    pub fn toggle_walkable(&mut self, p: Point) -> Option<bool> {
        self.grid.as_mut()?.toggle_walkable(p)
    }

    pub fn graph(&self) -> Option<&SearchGraph> {
        self.graph.as_ref()
    }

    /// Generation of the current graph; bumps on every initialize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&self) -> Option<Point> {
        let (s, _) = self.endpoints?;
        Some(self.graph.as_ref()?.node(s).pos())
    }

    pub fn goal(&self) -> Option<Point> {
        let (_, g) = self.endpoints?;
        Some(self.graph.as_ref()?.node(g).pos())
    }

    /// Claimed nodes with their traversal records, in node order.
    pub fn visited(&self) -> impl Iterator<Item = (NodeId, &PathNode)> {
        self.visited
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.map(|id| (NodeId(i), self.arena.get(id))))
    }

    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited_len
    }

    /// Whether the tile at `p` has been claimed in the current run.
    pub fn is_visited(&self, p: Point) -> bool {
        self.graph
            .as_ref()
            .and_then(|g| g.node_at(p))
            .is_some_and(|id| self.visited[id.index()].is_some())
    }

    /// Number of frontier entries.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// The last reconstructed path, start first. Empty until a search
    /// finds its goal or after [`clear_path_visuals`](SearchEngine::clear_path_visuals).
    #[inline]
    pub fn final_path(&self) -> &[Point] {
        &self.final_path
    }

    /// Edges along the last path, or `None` when there is none.
    pub fn path_hops(&self) -> Option<usize> {
        self.final_path.len().checked_sub(1)
    }

    /// Expansions performed since the last seed.
    #[inline]
    pub fn steps_taken(&self) -> usize {
        self.steps
    }
}
