use std::collections::VecDeque;

use super::{Color, TraversalStrategy, reset_colors};
use crate::foundation::ids::VertexId;
use crate::graph::tree::Tree;

/// Three-color breadth-first order.
///
/// Siblings come out in the tree's child order, not sorted by id.
#[derive(Clone, Debug, Default)]
pub struct Bfs {
    colors: Vec<Color>,
    queue: VecDeque<VertexId>,
    start: Option<VertexId>,
}

impl TraversalStrategy for Bfs {
    fn initialize(&mut self, tree: &Tree, start: VertexId) {
        reset_colors(&mut self.colors, tree.number_of_vertices());
        self.queue.clear();
        self.start = Some(start);
    }

    fn next_internal(&mut self, tree: &Tree) -> Option<VertexId> {
        let start = self.start?;
        if self.colors[start.0] == Color::White {
            self.colors[start.0] = Color::Gray;
            self.queue.push_back(start);
        }

        let current = self.queue.pop_front()?;
        for &child in tree.children(current) {
            if self.colors[child.0] == Color::White {
                self.colors[child.0] = Color::Gray;
                self.queue.push_back(child);
            }
        }
        self.colors[current.0] = Color::Black;
        Some(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traverse/bfs.rs"]
mod tests;
