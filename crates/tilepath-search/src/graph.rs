//! The search graph: one node per tile plus precomputed adjacency.

use tilepath_core::{Grid, Point};

use crate::topology::Topology;

/// Index of a [`SearchNode`] within one [`SearchGraph`].
///
/// Ids equal the flat row-major index of the node's tile, and are only
/// meaningful for the graph generation that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tile wrapped for searching, with its neighbors in topology order.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pos: Point,
    neighbors: Vec<NodeId>,
}

impl SearchNode {
    /// Position of the wrapped tile.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// Adjacency over every tile of a grid, for one topology.
///
/// Built once per initialize. Neighbor lists ignore walkability: blocked
/// tiles are skipped at expansion time instead, so toggling a tile never
/// requires a rebuild.
#[derive(Clone, Debug)]
pub struct SearchGraph {
    generation: u64,
    topology: Topology,
    size: Point,
    nodes: Vec<SearchNode>,
}

impl SearchGraph {
    /// Build the graph for `grid` under `topology`.
    ///
    /// `generation` tags this node table so callers can tell graphs of
    /// different initializations apart.
    pub fn build(grid: &Grid, topology: Topology, generation: u64) -> Self {
        let mut nodes: Vec<SearchNode> = grid
            .iter()
            .map(|t| SearchNode {
                pos: t.pos(),
                neighbors: Vec::with_capacity(topology.max_degree()),
            })
            .collect();

        for node in nodes.iter_mut() {
            let p = node.pos;
            for n in topology.neighbors(p) {
                if let Some(ni) = grid.index(n) {
                    node.neighbors.push(NodeId(ni));
                }
            }
        }

        Self {
            generation,
            topology,
            size: grid.size(),
            nodes,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Size of the grid the graph was built from.
    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node wrapping the tile at `p`, or `None` out of range.
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        if p.x < 0 || p.y < 0 || p.x >= self.size.x || p.y >= self.size.y {
            return None;
        }
        Some(NodeId((p.y as usize) * (self.size.x as usize) + (p.x as usize)))
    }

    /// Panics if `id` comes from a larger graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Like [`node`](SearchGraph::node) but returns `None` for foreign ids.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Every node with its id, row-major.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Directed edges as `(from, to)` tile positions, for drawing an
    /// adjacency overlay. Each undirected link appears twice.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.nodes.iter().flat_map(move |n| {
            n.neighbors
                .iter()
                .map(move |&id| (n.pos, self.nodes[id.0].pos))
        })
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degree(g: &SearchGraph, x: i32, y: i32) -> usize {
        let id = g.node_at(Point::new(x, y)).unwrap();
        g.node(id).neighbors().len()
    }

    fn assert_symmetric(g: &SearchGraph) {
        for (id, node) in g.nodes() {
            for &n in node.neighbors() {
                assert!(
                    g.node(n).neighbors().contains(&id),
                    "{:?} lists {} but not the reverse ({})",
                    g.topology(),
                    g.node(n).pos(),
                    node.pos()
                );
            }
        }
    }

    #[test]
    fn adjacency_is_symmetric_for_every_topology() {
        for (w, h) in [(1, 1), (1, 6), (6, 1), (4, 4), (7, 5), (10, 10)] {
            let grid = Grid::new(w, h).unwrap();
            for t in Topology::ALL {
                assert_symmetric(&SearchGraph::build(&grid, t, 0));
            }
        }
    }

    #[test]
    fn square_degrees() {
        let grid = Grid::new(3, 3).unwrap();
        let g4 = SearchGraph::build(&grid, Topology::Square4, 0);
        assert_eq!(degree(&g4, 0, 0), 2);
        assert_eq!(degree(&g4, 1, 0), 3);
        assert_eq!(degree(&g4, 1, 1), 4);
        let g8 = SearchGraph::build(&grid, Topology::Square8, 0);
        assert_eq!(degree(&g8, 0, 0), 3);
        assert_eq!(degree(&g8, 1, 0), 5);
        assert_eq!(degree(&g8, 1, 1), 8);
        assert_eq!(g4.edge_count(), 24);
        assert_eq!(g8.edge_count(), 40);
    }

    #[test]
    fn hex_degrees_on_4x4() {
        let grid = Grid::new(4, 4).unwrap();
        let g = SearchGraph::build(&grid, Topology::Hex6, 0);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(degree(&g, x, y), 6, "interior ({x}, {y})");
        }
        for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            let d = degree(&g, x, y);
            assert!((2..=4).contains(&d), "corner ({x}, {y}) has {d}");
        }
        assert_eq!(degree(&g, 0, 0), 2);
        assert_eq!(degree(&g, 3, 0), 3);
        assert_eq!(degree(&g, 0, 3), 3);
        assert_eq!(degree(&g, 3, 3), 2);
    }

    #[test]
    fn neighbors_follow_topology_order() {
        let grid = Grid::new(3, 3).unwrap();
        let g = SearchGraph::build(&grid, Topology::Square4, 0);
        let center = g.node(g.node_at(Point::new(1, 1)).unwrap());
        let pts: Vec<Point> = center.neighbors().iter().map(|&n| g.node(n).pos()).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn blocked_tiles_stay_in_adjacency() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_walkable(Point::new(1, 1), false);
        let g = SearchGraph::build(&grid, Topology::Square4, 0);
        let blocked = g.node_at(Point::new(1, 1)).unwrap();
        assert_eq!(g.node(blocked).neighbors().len(), 4);
        assert!(g
            .node(g.node_at(Point::new(1, 0)).unwrap())
            .neighbors()
            .contains(&blocked));
    }

    #[test]
    fn node_at_out_of_range() {
        let grid = Grid::new(2, 3).unwrap();
        let g = SearchGraph::build(&grid, Topology::Square8, 4);
        assert_eq!(g.generation(), 4);
        assert!(g.node_at(Point::new(2, 0)).is_none());
        assert!(g.node_at(Point::new(0, 3)).is_none());
        assert!(g.node_at(Point::new(-1, 0)).is_none());
        assert_eq!(g.node_at(Point::new(1, 2)).map(NodeId::index), Some(5));
    }

    #[test]
    fn edges_match_neighbor_lists() {
        let grid = Grid::new(4, 3).unwrap();
        let g = SearchGraph::build(&grid, Topology::Hex6, 0);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges.len(), g.edge_count());
        for (a, b) in edges {
            assert!(Topology::Hex6.neighbors(a).any(|n| n == b));
        }
    }
}
