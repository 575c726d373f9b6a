//! JSON descriptions of trees and scenes.
//!
//! Descriptions are plain serde types. `validate` checks them without building
//! anything; `build` turns them into a runtime [`Tree`] or [`AnimationScene`].

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::animation::cue::{BasicCue, Cue, TimeMode};
use crate::animation::scene::{AnimationScene, PlayMode};
use crate::foundation::error::{CueTreeError, CueTreeResult};
use crate::foundation::ids::VertexId;
use crate::graph::builder::DirectedGraphBuilder;
use crate::graph::tree::Tree;

/// Tree as a vertex count plus `[parent, child]` edges in child order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDef {
    pub vertices: usize,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
}

impl TreeDef {
    pub fn from_json_str(s: &str) -> CueTreeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_tree(tree: &Tree) -> Self {
        Self {
            vertices: tree.number_of_vertices(),
            edges: tree.edges().map(|(p, c)| [p.0, c.0]).collect(),
        }
    }

    #[tracing::instrument(skip(self), fields(vertices = self.vertices, edges = self.edges.len()))]
    pub fn build(&self) -> CueTreeResult<Tree> {
        let mut g = DirectedGraphBuilder::with_vertices(self.vertices);
        for &[p, c] in &self.edges {
            g.add_edge(VertexId(p), VertexId(c))?;
        }
        Tree::try_from_graph(g)
    }
}

fn default_frame_rate() -> f64 {
    10.0
}

/// A child cue of a [`SceneDef`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CueDef {
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub time_mode: TimeMode,
}

/// Scene settings plus its child cues, in play order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub time_mode: TimeMode,
    #[serde(default)]
    pub play_mode: PlayMode,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default, rename = "loop")]
    pub loop_playback: bool,
    #[serde(default)]
    pub cues: Vec<CueDef>,
}

/// A scene built from a [`SceneDef`], with its children addressable by name.
#[derive(Debug)]
pub struct BuiltScene {
    pub scene: AnimationScene,
    pub cues: Vec<(String, Rc<RefCell<BasicCue>>)>,
}

impl SceneDef {
    pub fn from_json_str(s: &str) -> CueTreeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn validate(&self) -> CueTreeResult<()> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(CueTreeError::validation("scene times must be finite"));
        }
        if !self.frame_rate.is_finite() || self.frame_rate < 0.0 {
            return Err(CueTreeError::validation("frame_rate must be finite and >= 0"));
        }

        let mut names = BTreeSet::new();
        for cue in &self.cues {
            if cue.name.trim().is_empty() {
                return Err(CueTreeError::validation("cue name must be non-empty"));
            }
            if !names.insert(cue.name.as_str()) {
                return Err(CueTreeError::validation(format!(
                    "duplicate cue name '{}'",
                    cue.name
                )));
            }
            if !cue.start_time.is_finite() || !cue.end_time.is_finite() {
                return Err(CueTreeError::validation(format!(
                    "cue '{}' times must be finite",
                    cue.name
                )));
            }
            if cue.end_time < cue.start_time {
                return Err(CueTreeError::validation(format!(
                    "cue '{}' end_time must be >= start_time",
                    cue.name
                )));
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(cues = self.cues.len()))]
    pub fn build(&self) -> CueTreeResult<BuiltScene> {
        self.validate()?;

        let mut scene = AnimationScene::new(self.start_time, self.end_time);
        scene.set_frame_rate(self.frame_rate)?;
        scene.set_play_mode(self.play_mode);
        scene.set_loop(self.loop_playback);
        scene.set_time_mode(self.time_mode)?;

        let mut cues = Vec::with_capacity(self.cues.len());
        for def in &self.cues {
            let cue = BasicCue::new(def.start_time, def.end_time)
                .with_time_mode(def.time_mode)
                .shared();
            scene
                .add_cue(cue.clone())
                .map_err(|e| CueTreeError::validation(format!("cue '{}': {e}", def.name)))?;
            cues.push((def.name.clone(), cue));
        }

        Ok(BuiltScene { scene, cues })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
