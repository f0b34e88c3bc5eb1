//! Reference scenario lock: graph A–F, start A, pinned step by step.
//!
//! ```text
//!     A
//!    / \
//!   B   C
//!  / \   \
//! D   E---F
//! ```
//!
//! F is enqueued twice (from C and from E). The edge (E, F) is recorded
//! because F is not yet visited when E expands; the second dequeue of F is
//! a redundant no-op that drains the frontier.

use std::sync::Arc;

use bfstep_kernel::store::GraphStore;
use bfstep_search::engine::TraversalEngine;
use bfstep_search::error::TraversalError;
use bfstep_search::step::DiscoveredEdge;
use lock_tests::support::reference_engine;

fn edges(pairs: &[(&str, &str)]) -> Vec<DiscoveredEdge> {
    pairs.iter().map(|&p| DiscoveredEdge::from(p)).collect()
}

#[test]
fn initial_state_before_any_step() {
    let engine = reference_engine("A");
    let snap = engine.snapshot();
    assert!(snap.visited.is_empty());
    assert!(snap.discovered_edges.is_empty());
    assert_eq!(snap.current_node, None);
    assert_eq!(snap.frontier, vec!["A"]);
    assert!(!snap.is_complete);
}

#[test]
fn step_by_step_trace() {
    let mut engine = reference_engine("A");

    // (current, newly_visited, new edges, visited after, frontier after, complete)
    let expected: [(&str, bool, &[(&str, &str)], &[&str], &[&str], bool); 7] = [
        ("A", true, &[("A", "B"), ("A", "C")], &["A"], &["B", "C"], false),
        ("B", true, &[("B", "D"), ("B", "E")], &["A", "B"], &["C", "D", "E"], false),
        ("C", true, &[("C", "F")], &["A", "B", "C"], &["D", "E", "F"], false),
        ("D", true, &[], &["A", "B", "C", "D"], &["E", "F"], false),
        ("E", true, &[("E", "F")], &["A", "B", "C", "D", "E"], &["F", "F"], false),
        ("F", true, &[], &["A", "B", "C", "D", "E", "F"], &["F"], false),
        ("F", false, &[], &["A", "B", "C", "D", "E", "F"], &[], true),
    ];

    for (i, (current, newly, new_edges, visited, frontier, complete)) in
        expected.iter().enumerate()
    {
        let result = engine.step().unwrap();
        let step = i as u64 + 1;
        assert_eq!(result.step_index, step);
        assert_eq!(result.current_node, *current, "step {step}");
        assert_eq!(result.newly_visited, *newly, "step {step}");
        assert_eq!(result.newly_discovered_edges, edges(new_edges), "step {step}");
        assert_eq!(result.is_complete, *complete, "step {step}");
        assert_eq!(result.queue_len, frontier.len(), "step {step}");

        let snap = engine.snapshot();
        assert_eq!(snap.current_node.as_deref(), Some(*current));
        assert_eq!(snap.visited, *visited, "step {step}");
        assert_eq!(snap.frontier, *frontier, "step {step}");
        assert_eq!(snap.is_complete, *complete);
        assert_eq!(snap.steps_taken, step);
    }

    let snap = engine.snapshot();
    assert_eq!(
        snap.discovered_edges,
        edges(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("B", "E"),
            ("C", "F"),
            ("E", "F"),
        ])
    );
    assert_eq!(engine.redundant_dequeues(), 1);
    assert_eq!(engine.frontier_high_water(), 3);
}

#[test]
fn tree_edges_drop_the_second_discovery_of_f() {
    let mut engine = reference_engine("A");
    while !engine.is_complete() {
        engine.step().unwrap();
    }
    let snap = engine.snapshot();
    let tree: Vec<_> = snap.tree_edges().into_iter().cloned().collect();
    assert_eq!(tree.len(), snap.visited.len() - 1);
    assert_eq!(
        tree,
        edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E"), ("C", "F")])
    );
}

#[test]
fn step_after_completion_fails_and_changes_nothing() {
    let mut engine = reference_engine("A");
    while !engine.is_complete() {
        engine.step().unwrap();
    }
    let before = engine.snapshot();
    for _ in 0..3 {
        assert_eq!(
            engine.step(),
            Err(TraversalError::AlreadyComplete { steps_taken: 7 })
        );
    }
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn isolated_start_completes_in_one_step() {
    let graph = GraphStore::new(&["A", "B", "Z"], &[("A", "B")]).unwrap();
    let mut engine = TraversalEngine::new(Arc::new(graph), "Z").unwrap();
    let result = engine.step().unwrap();
    assert!(result.newly_visited);
    assert!(result.is_complete);
    assert!(result.newly_discovered_edges.is_empty());
    assert_eq!(engine.snapshot().visited, vec!["Z"]);
}

#[test]
fn disconnected_nodes_never_appear() {
    let graph = GraphStore::new(&["A", "B", "X", "Y"], &[("A", "B"), ("X", "Y")]).unwrap();
    let mut engine = TraversalEngine::new(Arc::new(graph), "A").unwrap();
    while !engine.is_complete() {
        engine.step().unwrap();
    }
    let snap = engine.snapshot();
    assert_eq!(snap.visited, vec!["A", "B"]);
    assert_eq!(snap.discovered_edges, edges(&[("A", "B")]));
    assert!(!snap.is_visited("X"));
}

#[test]
fn unknown_start_is_rejected() {
    let graph = Arc::new(GraphStore::new(&["A"], &[] as &[(&str, &str)]).unwrap());
    let err = TraversalEngine::new(graph, "Q").unwrap_err();
    assert!(matches!(err, TraversalError::UnknownNode(ref e) if e.label == "Q"));
}
