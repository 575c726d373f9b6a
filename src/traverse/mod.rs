//! Restartable traversal over the subtree of a [`Tree`].
//!
//! [`TreeIterator`] owns the binding to a tree, the start vertex and the
//! one-ahead cursor. The traversal order itself comes from a
//! [`TraversalStrategy`]: [`Bfs`](bfs::Bfs) or [`Dfs`](dfs::Dfs).
//!
//! ```
//! use std::sync::Arc;
//! use cuetree::{DirectedGraphBuilder, Tree, TreeBfsIterator, VertexId};
//!
//! let mut g = DirectedGraphBuilder::with_vertices(3);
//! g.add_edge(VertexId(0), VertexId(1)).unwrap();
//! g.add_edge(VertexId(0), VertexId(2)).unwrap();
//! let tree = Arc::new(Tree::try_from_graph(g).unwrap());
//!
//! let mut it = TreeBfsIterator::with_tree(tree);
//! let mut seen = Vec::new();
//! while it.has_next() {
//!     seen.extend(it.next());
//! }
//! assert_eq!(seen, [VertexId(0), VertexId(1), VertexId(2)]);
//! ```

use std::sync::Arc;

use crate::foundation::ids::VertexId;
use crate::graph::tree::Tree;

pub mod bfs;
pub mod dfs;

/// Visit state of a vertex during one traversal pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Color {
    /// Not reached yet.
    #[default]
    White,
    /// Reached, still on the frontier.
    Gray,
    /// Fully processed.
    Black,
}

pub(crate) fn reset_colors(colors: &mut Vec<Color>, n: usize) {
    colors.clear();
    colors.resize(n, Color::White);
}

/// Traversal order plugged into a [`TreeIterator`].
pub trait TraversalStrategy {
    /// Discard all scratch state and prepare a pass over the subtree of `start`.
    ///
    /// `start` is always a vertex of `tree`.
    fn initialize(&mut self, tree: &Tree, start: VertexId);

    /// Produce the next vertex in traversal order, or `None` once the subtree
    /// is exhausted.
    fn next_internal(&mut self, tree: &Tree) -> Option<VertexId>;
}

/// Resumable iterator over the subtree rooted at a start vertex.
///
/// The next vertex is always computed one step ahead, so [`has_next`] is a
/// plain check. Once exhausted, further calls to `next` keep returning `None`
/// without doing any work.
///
/// [`has_next`]: TreeIterator::has_next
#[derive(Clone, Debug)]
pub struct TreeIterator<S> {
    tree: Option<Arc<Tree>>,
    start_vertex: Option<VertexId>,
    next_id: Option<VertexId>,
    modified: u64,
    strategy: S,
}

impl<S: TraversalStrategy + Default> Default for TreeIterator<S> {
    fn default() -> Self {
        Self::from_strategy(S::default())
    }
}

impl<S: TraversalStrategy + Default> TreeIterator<S> {
    /// Unbound iterator; yields nothing until a tree is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterator bound to `tree`, starting at its root.
    pub fn with_tree(tree: Arc<Tree>) -> Self {
        let mut it = Self::new();
        it.set_tree(Some(tree));
        it
    }
}

impl<S: TraversalStrategy> TreeIterator<S> {
    pub fn from_strategy(strategy: S) -> Self {
        Self {
            tree: None,
            start_vertex: None,
            next_id: None,
            modified: 0,
            strategy,
        }
    }

    /// Bind to `tree`.
    ///
    /// Rebinding to the tree already held (same allocation) does nothing.
    /// Otherwise the start vertex falls back to the root and the traversal
    /// restarts.
    pub fn set_tree(&mut self, tree: Option<Arc<Tree>>) {
        let same = match (&self.tree, &tree) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        self.tree = tree;
        self.start_vertex = None;
        self.initialize();
    }

    pub fn tree(&self) -> Option<&Arc<Tree>> {
        self.tree.as_ref()
    }

    /// Restrict the traversal to the subtree of `v` (`None` means the root).
    pub fn set_start_vertex(&mut self, v: Option<VertexId>) {
        if v == self.start_vertex {
            return;
        }
        self.start_vertex = v;
        self.initialize();
        self.modified += 1;
    }

    /// Start vertex in effect; resolved to the root once a tree is bound.
    pub fn start_vertex(&self) -> Option<VertexId> {
        self.start_vertex
    }

    pub fn has_next(&self) -> bool {
        self.next_id.is_some()
    }

    /// Begin again from the start vertex with fresh traversal state.
    pub fn restart(&mut self) {
        self.initialize();
    }

    /// Modification counter, bumped whenever a setter changes the start
    /// vertex or the traversal mode.
    pub fn mtime(&self) -> u64 {
        self.modified
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified += 1;
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub(crate) fn initialize(&mut self) {
        let Some(tree) = self.tree.as_deref() else {
            self.next_id = None;
            return;
        };
        if self.start_vertex.is_none() {
            self.start_vertex = tree.root();
        }
        self.next_id = match self.start_vertex {
            Some(start) if tree.contains(start) => {
                self.strategy.initialize(tree, start);
                self.strategy.next_internal(tree)
            }
            _ => None,
        };
    }
}

impl<S: TraversalStrategy> Iterator for TreeIterator<S> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        let current = self.next_id?;
        self.next_id = match self.tree.as_deref() {
            Some(tree) => self.strategy.next_internal(tree),
            None => None,
        };
        Some(current)
    }
}

/// Breadth-first iterator.
pub type TreeBfsIterator = TreeIterator<bfs::Bfs>;

/// Depth-first iterator; see [`DfsMode`](dfs::DfsMode).
pub type TreeDfsIterator = TreeIterator<dfs::Dfs>;

#[cfg(test)]
#[path = "../../tests/unit/traverse/iterator.rs"]
mod tests;
