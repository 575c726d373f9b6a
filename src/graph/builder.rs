use crate::foundation::error::{CueTreeError, CueTreeResult};
use crate::foundation::ids::VertexId;

/// Mutable directed graph used to assemble a candidate tree.
///
/// Out-edges keep insertion order; that order becomes the child order of the
/// resulting [`Tree`](crate::Tree).
#[derive(Clone, Debug, Default)]
pub struct DirectedGraphBuilder {
    out_edges: Vec<Vec<VertexId>>,
    in_degree: Vec<usize>,
    edge_count: usize,
}

impl DirectedGraphBuilder {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with `n` isolated vertices `0..n`.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            out_edges: vec![Vec::new(); n],
            in_degree: vec![0; n],
            edge_count: 0,
        }
    }

    /// Append a vertex and return its id.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(self.out_edges.len());
        self.out_edges.push(Vec::new());
        self.in_degree.push(0);
        id
    }

    /// Add a directed edge `source -> target`.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> CueTreeResult<()> {
        let n = self.number_of_vertices();
        if source.0 >= n || target.0 >= n {
            return Err(CueTreeError::validation(format!(
                "edge {source} -> {target} references a vertex outside 0..{n}"
            )));
        }
        self.out_edges[source.0].push(target);
        self.in_degree[target.0] += 1;
        self.edge_count += 1;
        Ok(())
    }

    pub fn number_of_vertices(&self) -> usize {
        self.out_edges.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edge_count
    }

    /// Targets of the out-edges of `v`, in insertion order.
    pub fn out_edges(&self, v: VertexId) -> &[VertexId] {
        &self.out_edges[v.0]
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_degree[v.0]
    }

    pub(crate) fn into_parts(self) -> Vec<Vec<VertexId>> {
        self.out_edges
    }
}
