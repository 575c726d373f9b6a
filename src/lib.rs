//! Restartable tree traversal and a cue-based animation scene scheduler.
//!
//! - Build a [`Tree`] from a [`DirectedGraphBuilder`] (validated on freeze)
//! - Walk any subtree with [`TreeBfsIterator`] or [`TreeDfsIterator`]
//! - Compose [`Cue`]s into an [`AnimationScene`] and play or seek it
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod config;
pub mod graph;
pub mod traverse;

pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::cue::{
    BasicCue, Cue, CueCore, CueEvent, CueInfo, CueObserver, CueState, SharedCue, TimeMode,
};
pub use crate::animation::scene::{AnimationScene, PlayMode, PlaybackHandle, SceneEvent};
pub use crate::config::{BuiltScene, CueDef, SceneDef, TreeDef};
pub use crate::foundation::error::{CueTreeError, CueTreeResult};
pub use crate::foundation::ids::VertexId;
pub use crate::graph::builder::DirectedGraphBuilder;
pub use crate::graph::tree::Tree;
pub use crate::traverse::bfs::Bfs;
pub use crate::traverse::dfs::{Dfs, DfsMode};
pub use crate::traverse::{TraversalStrategy, TreeBfsIterator, TreeDfsIterator, TreeIterator};
