use super::{Color, TraversalStrategy, TreeIterator, reset_colors};
use crate::foundation::ids::VertexId;
use crate::graph::tree::Tree;

/// When a depth-first traversal emits a vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DfsMode {
    /// On first reach (pre-order).
    #[default]
    Discover,
    /// After all of its descendants (post-order).
    Finish,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    vertex: VertexId,
    cursor: usize, // next child index to inspect
}

/// Three-color depth-first order over an explicit frame stack.
///
/// Exactly one vertex is produced per [`next_internal`] call in both modes.
///
/// [`next_internal`]: TraversalStrategy::next_internal
#[derive(Clone, Debug, Default)]
pub struct Dfs {
    mode: DfsMode,
    colors: Vec<Color>,
    stack: Vec<Frame>,
    cur_root: Option<VertexId>,
}

impl Dfs {
    pub fn with_mode(mode: DfsMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DfsMode {
        self.mode
    }
}

impl TraversalStrategy for Dfs {
    fn initialize(&mut self, tree: &Tree, start: VertexId) {
        reset_colors(&mut self.colors, tree.number_of_vertices());
        self.stack.clear();
        self.cur_root = Some(start);
    }

    fn next_internal(&mut self, tree: &Tree) -> Option<VertexId> {
        let root = self.cur_root?;
        loop {
            if let Some(top) = self.stack.last_mut() {
                let kids = tree.children(top.vertex);
                let mut found = None;
                while top.cursor < kids.len() {
                    let c = kids[top.cursor];
                    top.cursor += 1;
                    if self.colors[c.0] == Color::White {
                        found = Some(c);
                        break;
                    }
                }

                match found {
                    Some(child) => {
                        self.colors[child.0] = Color::Gray;
                        self.stack.push(Frame {
                            vertex: child,
                            cursor: 0,
                        });
                        if self.mode == DfsMode::Discover {
                            return Some(child);
                        }
                    }
                    None => {
                        let done = self.stack.pop()?.vertex;
                        self.colors[done.0] = Color::Black;
                        if self.mode == DfsMode::Finish {
                            return Some(done);
                        }
                    }
                }
                continue;
            }

            if self.colors[root.0] != Color::White {
                return None;
            }
            self.colors[root.0] = Color::Gray;
            self.stack.push(Frame {
                vertex: root,
                cursor: 0,
            });
            if self.mode == DfsMode::Discover {
                return Some(root);
            }
        }
    }
}

impl TreeIterator<Dfs> {
    /// Depth-first iterator in `mode`, unbound.
    pub fn with_mode(mode: DfsMode) -> Self {
        Self::from_strategy(Dfs::with_mode(mode))
    }

    pub fn mode(&self) -> DfsMode {
        self.strategy.mode
    }

    /// Switch emission mode; restarts the traversal when the mode changes.
    pub fn set_mode(&mut self, mode: DfsMode) {
        if self.strategy.mode == mode {
            return;
        }
        self.strategy.mode = mode;
        self.initialize();
        self.mark_modified();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traverse/dfs.rs"]
mod tests;
