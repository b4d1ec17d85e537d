//! Arena-backed tree skeleton.
//!
//! Nodes live in one ordered array indexed by [`NodeId`]; parent and child
//! links are plain indices. Pruning detaches nodes without deallocating
//! them, so every traversal starts from the root and ignores ids that are
//! no longer reachable.

use glam::Vec3;

/// Index into [`TreeSkeleton::nodes`]. Only meaningful within the lifetime
/// of the skeleton that issued it.
pub type NodeId = usize;

/// One skeleton node: a joint between branch segments.
#[derive(Clone, Debug)]
pub struct Node {
    /// This node's own index.
    pub id: NodeId,
    /// Parent index; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Ordered child indices.
    pub children: Vec<NodeId>,
    /// World-space position relative to the tree origin.
    pub position: Vec3,
    /// Edge distance from the root.
    pub depth: u32,
    /// Branch radius at this node; zero until the radius solver runs.
    pub radius: f32,
}

/// Invariant violations reported by [`TreeSkeleton::validate`].
#[derive(Debug, thiserror::Error)]
pub enum SkeletonError {
    /// A child's depth is not exactly one more than its parent's.
    #[error("node {child}: depth {child_depth} != parent {parent} depth {parent_depth} + 1")]
    DepthMismatch {
        parent: NodeId,
        child: NodeId,
        parent_depth: u32,
        child_depth: u32,
    },

    /// A child's back-reference does not point at the parent that lists it.
    #[error("node {child}: parent link does not match listing parent {parent}")]
    ParentMismatch { parent: NodeId, child: NodeId },

    /// A node was reached through two different paths from the root.
    #[error("node {node} is reachable through more than one path")]
    CycleDetected { node: NodeId },

    /// The cached terminal list disagrees with the reachable leaves.
    #[error("terminal cache is stale: expected {expected} leaves, cached {cached}")]
    StaleTerminals { expected: usize, cached: usize },
}

/// A rooted tree skeleton stored as an index arena.
#[derive(Clone, Debug)]
pub struct TreeSkeleton {
    /// All nodes ever allocated, including detached ones.
    pub nodes: Vec<Node>,
    /// Index of the root node.
    pub root_id: NodeId,
    /// Cached reachable nodes with no children; kept in ascending id order.
    pub terminal_node_ids: Vec<NodeId>,
}

impl TreeSkeleton {
    /// Create a skeleton containing only a root node at `root_position`.
    pub fn new(root_position: Vec3) -> Self {
        let root = Node {
            id: 0,
            parent: None,
            children: Vec::new(),
            position: root_position,
            depth: 0,
            radius: 0.0,
        };
        Self {
            nodes: vec![root],
            root_id: 0,
            terminal_node_ids: vec![0],
        }
    }

    /// Append a child of `parent` at `position` and return its id.
    ///
    /// The child's depth is `parent.depth + 1`; the terminal cache is not
    /// updated (callers batch-recompute after structural changes).
    pub fn add_child(&mut self, parent: NodeId, position: Vec3) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            position,
            depth,
            radius: 0.0,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Number of allocated nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root is allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Ids reachable from the root, in preorder.
    ///
    /// Iterative and cycle-safe: a node already visited is skipped rather
    /// than revisited, so a corrupted child list cannot hang traversal.
    pub fn reachable_ids(&self) -> Vec<NodeId> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root_id];
        while let Some(id) = stack.pop() {
            if visited[id] {
                continue;
            }
            visited[id] = true;
            order.push(id);
            // Reverse push keeps children in listing order on the stack.
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Nearest node to `point` by linear scan over the full arena.
    /// Returns `(id, squared distance)`.
    pub fn nearest_node(&self, point: Vec3) -> (NodeId, f32) {
        let mut best = self.root_id;
        let mut best_d2 = f32::MAX;
        for node in &self.nodes {
            let d2 = (node.position - point).length_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = node.id;
            }
        }
        (best, best_d2)
    }

    /// True when any allocated node lies within `radius` of `point`.
    pub fn any_node_within(&self, point: Vec3, radius: f32) -> bool {
        let r2 = radius * radius;
        self.nodes
            .iter()
            .any(|n| (n.position - point).length_squared() < r2)
    }

    /// Rebuild [`TreeSkeleton::terminal_node_ids`] from the reachable set.
    pub fn recompute_terminals(&mut self) {
        let mut terminals: Vec<NodeId> = self
            .reachable_ids()
            .into_iter()
            .filter(|&id| self.nodes[id].children.is_empty())
            .collect();
        terminals.sort_unstable();
        self.terminal_node_ids = terminals;
    }

    /// Check the structural invariants over the reachable set.
    pub fn validate(&self) -> Result<(), SkeletonError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![self.root_id];
        visited[self.root_id] = true;
        let mut leaves = 0usize;

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.children.is_empty() {
                leaves += 1;
            }
            for &child in &node.children {
                if visited[child] {
                    return Err(SkeletonError::CycleDetected { node: child });
                }
                visited[child] = true;
                let child_node = &self.nodes[child];
                if child_node.parent != Some(id) {
                    return Err(SkeletonError::ParentMismatch { parent: id, child });
                }
                if child_node.depth != node.depth + 1 {
                    return Err(SkeletonError::DepthMismatch {
                        parent: id,
                        child,
                        parent_depth: node.depth,
                        child_depth: child_node.depth,
                    });
                }
                stack.push(child);
            }
        }

        if leaves != self.terminal_node_ids.len() {
            return Err(SkeletonError::StaleTerminals {
                expected: leaves,
                cached: self.terminal_node_ids.len(),
            });
        }
        Ok(())
    }
}
