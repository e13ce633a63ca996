use crate::graph::NodeId;

/// Index of a [`PathNode`] within a [`PathArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(usize);

impl PathId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Traversal record: which node was reached, and from where.
///
/// The parent link is an arena index, so many frontier leaves can share
/// ancestors without any of them owning the chain. The cost fields are
/// carried for cost-aware strategies; BFS and DFS leave them at zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathNode {
    pub node: NodeId,
    pub parent: Option<PathId>,
    /// Cost from the start (g).
    pub given_cost: i32,
    /// Estimated cost to the goal (h).
    pub heuristic_cost: i32,
    /// g + h.
    pub final_cost: i32,
}

impl PathNode {
    fn new(node: NodeId, parent: Option<PathId>) -> Self {
        Self {
            node,
            parent,
            given_cost: 0,
            heuristic_cost: 0,
            final_cost: 0,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Append-only storage for the path tree of one search run.
#[derive(Clone, Debug, Default)]
pub struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rootless record for `node`.
    pub fn root(&mut self, node: NodeId) -> PathId {
        self.push(PathNode::new(node, None))
    }

    /// Add a record for `node` reached from `parent`.
    pub fn child(&mut self, node: NodeId, parent: PathId) -> PathId {
        self.push(PathNode::new(node, Some(parent)))
    }

    fn push(&mut self, record: PathNode) -> PathId {
        let id = PathId(self.nodes.len());
        self.nodes.push(record);
        id
    }

    #[inline]
    pub fn get(&self, id: PathId) -> &PathNode {
        &self.nodes[id.0]
    }

    /// Node ids from `id` back to its root, `id` first.
    pub fn ancestry(&self, id: PathId) -> Ancestry<'_> {
        Ancestry {
            arena: self,
            next: Some(id),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Iterator over a parent chain, see [`PathArena::ancestry`].
pub struct Ancestry<'a> {
    arena: &'a PathArena,
    next: Option<PathId>,
}

impl Iterator for Ancestry<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let rec = self.arena.get(self.next?);
        self.next = rec.parent;
        Some(rec.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestry_walks_to_root() {
        let mut arena = PathArena::new();
        let root = arena.root(NodeId(0));
        let a = arena.child(NodeId(1), root);
        let b = arena.child(NodeId(2), a);
        // a sibling sharing the same ancestors
        let c = arena.child(NodeId(3), a);

        let chain: Vec<usize> = arena.ancestry(b).map(NodeId::index).collect();
        assert_eq!(chain, vec![2, 1, 0]);
        let chain: Vec<usize> = arena.ancestry(c).map(NodeId::index).collect();
        assert_eq!(chain, vec![3, 1, 0]);
        assert!(arena.get(root).is_root());
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn costs_start_at_zero() {
        let mut arena = PathArena::new();
        let r = arena.root(NodeId(7));
        let rec = arena.get(r);
        assert_eq!((rec.given_cost, rec.heuristic_cost, rec.final_cost), (0, 0, 0));
        arena.clear();
        assert!(arena.is_empty());
    }
}
