use std::sync::Arc;

use super::*;
use crate::graph::builder::DirectedGraphBuilder;
use crate::traverse::TreeDfsIterator;

fn tree(n: usize, edges: &[(usize, usize)]) -> Arc<Tree> {
    let mut g = DirectedGraphBuilder::with_vertices(n);
    for &(a, b) in edges {
        g.add_edge(VertexId(a), VertexId(b)).unwrap();
    }
    Arc::new(Tree::try_from_graph(g).unwrap())
}

fn sample() -> Arc<Tree> {
    tree(5, &[(0, 1), (0, 2), (1, 3), (1, 4)])
}

fn order(it: &mut TreeDfsIterator) -> Vec<usize> {
    it.by_ref().map(|v| v.0).collect()
}

#[test]
fn discover_is_preorder() {
    let mut it = TreeDfsIterator::with_tree(sample());
    assert_eq!(it.mode(), DfsMode::Discover);
    assert_eq!(order(&mut it), vec![0, 1, 3, 4, 2]);
}

#[test]
fn finish_is_postorder() {
    let mut it = TreeDfsIterator::with_mode(DfsMode::Finish);
    it.set_tree(Some(sample()));
    assert_eq!(order(&mut it), vec![3, 4, 1, 2, 0]);
}

#[test]
fn set_mode_restarts() {
    let mut it = TreeDfsIterator::with_tree(sample());
    assert_eq!(it.next(), Some(VertexId(0)));
    let m = it.mtime();
    it.set_mode(DfsMode::Finish);
    assert!(it.mtime() > m);
    assert_eq!(it.next(), Some(VertexId(3)));

    // Unchanged mode keeps the cursor.
    it.set_mode(DfsMode::Finish);
    assert_eq!(it.next(), Some(VertexId(4)));
}

#[test]
fn subtree_only() {
    let mut it = TreeDfsIterator::with_mode(DfsMode::Finish);
    it.set_tree(Some(sample()));
    it.set_start_vertex(Some(VertexId(1)));
    assert_eq!(order(&mut it), vec![3, 4, 1]);
}

#[test]
fn single_vertex_both_modes() {
    for mode in [DfsMode::Discover, DfsMode::Finish] {
        let mut it = TreeDfsIterator::with_mode(mode);
        it.set_tree(Some(tree(1, &[])));
        assert_eq!(order(&mut it), vec![0]);
    }
}

#[test]
fn deep_chain_finish_emits_one_per_call() {
    let edges: Vec<_> = (0..63).map(|i| (i, i + 1)).collect();
    let mut it = TreeDfsIterator::with_mode(DfsMode::Finish);
    it.set_tree(Some(tree(64, &edges)));
    let mut calls = 0;
    while it.has_next() {
        assert!(it.next().is_some());
        calls += 1;
    }
    assert_eq!(calls, 64);
}

#[test]
fn mode_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&DfsMode::Finish).unwrap(),
        "\"finish\""
    );
}
