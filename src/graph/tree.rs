use std::collections::VecDeque;

use crate::foundation::error::{CueTreeError, CueTreeResult};
use crate::foundation::ids::VertexId;
use crate::graph::builder::DirectedGraphBuilder;

/// Immutable rooted tree.
///
/// Every vertex except the root has exactly one parent and all edges point from
/// parent to child. Child order is the out-edge insertion order of the graph the
/// tree was built from. An empty tree has no root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    children: Vec<Vec<VertexId>>,
    parents: Vec<Option<VertexId>>,
    root: Option<VertexId>,
}

impl Tree {
    /// Tree with no vertices.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Freeze `graph` into a tree, rejecting anything that is not one.
    ///
    /// Nothing is copied unless the structure check passes.
    #[tracing::instrument(skip(graph), fields(vertices = graph.number_of_vertices()))]
    pub fn try_from_graph(graph: DirectedGraphBuilder) -> CueTreeResult<Self> {
        if !Self::is_structure_valid(&graph) {
            tracing::warn!("graph rejected: not a rooted tree");
            return Err(CueTreeError::structure(
                "graph is not a single connected acyclic component with one root",
            ));
        }

        let n = graph.number_of_vertices();
        let root = (0..n).map(VertexId).find(|&v| graph.in_degree(v) == 0);
        let children = graph.into_parts();
        let mut parents = vec![None; n];
        for (p, kids) in children.iter().enumerate() {
            for c in kids {
                parents[c.0] = Some(VertexId(p));
            }
        }

        Ok(Self {
            children,
            parents,
            root,
        })
    }

    /// Return `true` when `graph` is a valid tree candidate.
    ///
    /// The graph must be a single connected component without cycles, with one
    /// vertex of in-degree 0 (the root) and in-degree 1 everywhere else. The
    /// empty graph is accepted as the empty tree.
    pub fn is_structure_valid(graph: &DirectedGraphBuilder) -> bool {
        let n = graph.number_of_vertices();
        if n == 0 {
            return true;
        }
        if graph.number_of_edges() != n - 1 {
            return false;
        }

        let mut root = None;
        for v in (0..n).map(VertexId) {
            match graph.in_degree(v) {
                0 if root.is_none() => root = Some(v),
                1 => {}
                _ => return false,
            }
        }
        let Some(root) = root else {
            return false;
        };

        // With n-1 edges and unit in-degrees, reaching every vertex from the
        // root rules out both cycles and extra components.
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([root]);
        seen[root.0] = true;
        let mut reached = 1usize;
        while let Some(v) = queue.pop_front() {
            for &c in graph.out_edges(v) {
                if seen[c.0] {
                    return false;
                }
                seen[c.0] = true;
                reached += 1;
                queue.push_back(c);
            }
        }
        reached == n
    }

    pub fn root(&self) -> Option<VertexId> {
        self.root
    }

    pub fn number_of_vertices(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Return `true` when `v` names a vertex of this tree.
    pub fn contains(&self, v: VertexId) -> bool {
        v.0 < self.children.len()
    }

    /// Out-degree of `v`.
    pub fn number_of_children(&self, v: VertexId) -> usize {
        self.children[v.0].len()
    }

    /// The `i`-th child of `v`. Panics when `i` is out of range.
    pub fn child(&self, v: VertexId, i: usize) -> VertexId {
        self.children[v.0][i]
    }

    pub fn children(&self, v: VertexId) -> &[VertexId] {
        &self.children[v.0]
    }

    /// Parent of `v`, `None` for the root.
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parents[v.0]
    }

    /// Depth of `v` below the root (root is level 0).
    ///
    /// Returns `None` for ids outside the tree. Walks parent links each call.
    pub fn level(&self, v: VertexId) -> Option<usize> {
        if !self.contains(v) {
            return None;
        }
        let mut level = 0;
        let mut cur = v;
        while let Some(p) = self.parents[cur.0] {
            level += 1;
            cur = p;
        }
        Some(level)
    }

    pub fn is_leaf(&self, v: VertexId) -> bool {
        self.number_of_children(v) == 0
    }

    /// Return `true` when `ancestor` lies on the parent chain of `descendant`.
    ///
    /// A vertex is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: VertexId, descendant: VertexId) -> bool {
        if !self.contains(ancestor) || !self.contains(descendant) {
            return false;
        }
        let mut cur = descendant;
        while let Some(p) = self.parents[cur.0] {
            if p == ancestor {
                return true;
            }
            cur = p;
        }
        false
    }

    /// All `(parent, child)` edges, grouped by parent in child order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .flat_map(|(p, kids)| kids.iter().map(move |&c| (VertexId(p), c)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/tree.rs"]
mod tests;
