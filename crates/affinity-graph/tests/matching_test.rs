//! Matching adapter, oracle validation, straggler detection and inversion.

use affinity_core::errors::{AffinityError, MatchingError};
use affinity_core::traits::{IMatchingOracle, MatchingProblem};
use affinity_core::{NodeKey, Pairing};
use affinity_graph::inversion::invert_weights;
use affinity_graph::matching::{find_stragglers, matching_weight, weighted_pairings};
use affinity_graph::{BlossomMatcher, MatchingAdapter, WeightedGraph};

fn key(name: &str) -> NodeKey {
    NodeKey::user(name)
}

fn graph(edges: &[(&str, &str, f64)]) -> WeightedGraph {
    let mut graph = WeightedGraph::new();
    for &(a, b, w) in edges {
        graph.set_edge(&key(a), &key(b), w);
    }
    graph
}

/// Four users, normalized after one poll with X-X = Y-Y = 5, X-Y = 1.
fn scenario_graph() -> WeightedGraph {
    graph(&[
        ("U1", "U2", 5.01),
        ("U3", "U4", 5.01),
        ("U1", "U3", 1.01),
        ("U1", "U4", 1.01),
        ("U2", "U3", 1.01),
        ("U2", "U4", 1.01),
    ])
}

/// Oracle returning a canned answer.
struct FixedOracle(Result<Vec<(usize, usize)>, &'static str>);

impl IMatchingOracle for FixedOracle {
    fn name(&self) -> &str {
        "fixed"
    }

    fn max_weight_matching(
        &self,
        _problem: &MatchingProblem,
    ) -> Result<Vec<(usize, usize)>, MatchingError> {
        self.0.clone().map_err(|reason| MatchingError::OracleFailed {
            oracle: "fixed".to_string(),
            reason: reason.to_string(),
        })
    }
}

#[test]
fn scenario_pairs_like_answers() {
    let g = scenario_graph();
    let oracle = BlossomMatcher::new();
    let matching = MatchingAdapter::new(&oracle).pair(&g).unwrap();

    assert_eq!(matching.len(), 2);
    assert!(matching.contains(&Pairing::new(key("U1"), key("U2"))));
    assert!(matching.contains(&Pairing::new(key("U3"), key("U4"))));
    assert!((matching_weight(&g, &matching) - 10.02).abs() < 1e-9);
    assert!(find_stragglers(&g, &matching).is_empty());
}

#[test]
fn weighted_pairings_carry_edge_weights() {
    let g = scenario_graph();
    let oracle = BlossomMatcher::new();
    let matching = MatchingAdapter::new(&oracle).pair(&g).unwrap();
    for pairing in weighted_pairings(&g, &matching) {
        assert!((pairing.weight - 5.01).abs() < 1e-12);
    }
}

#[test]
fn odd_node_count_leaves_a_straggler() {
    let g = graph(&[("A", "B", 3.0), ("A", "C", 5.0), ("B", "C", 1.0)]);
    let oracle = BlossomMatcher::new();
    let matching = MatchingAdapter::new(&oracle).pair(&g).unwrap();
    assert_eq!(matching.len(), 1);
    assert!(matching.contains(&Pairing::new(key("A"), key("C"))));
    assert_eq!(find_stragglers(&g, &matching), vec![key("B")]);
}

#[test]
fn inverted_weights_find_the_worst_pairing() {
    let g = scenario_graph();
    let worst = invert_weights(&g, 0.01);
    let oracle = BlossomMatcher::new();
    let matching = MatchingAdapter::new(&oracle).pair(&worst).unwrap();

    assert_eq!(matching.len(), 2);
    assert!(!matching.contains(&Pairing::new(key("U1"), key("U2"))));
    assert!(!matching.contains(&Pairing::new(key("U3"), key("U4"))));
    assert!((matching_weight(&g, &matching) - 2.02).abs() < 1e-9);
}

#[test]
fn shuffled_oracle_still_optimal() {
    let g = scenario_graph();
    let oracle = BlossomMatcher::shuffled(42);
    let adapter = MatchingAdapter::new(&oracle);
    for _ in 0..5 {
        let matching = adapter.pair(&g).unwrap();
        assert!((matching_weight(&g, &matching) - 10.02).abs() < 1e-9);
    }
}

#[test]
fn non_disjoint_oracle_result_is_fatal() {
    let g = scenario_graph();
    let oracle = FixedOracle(Ok(vec![(0, 1), (0, 2)]));
    let err = MatchingAdapter::new(&oracle).pair(&g).unwrap_err();
    assert!(matches!(
        err,
        AffinityError::Matching(MatchingError::NonDisjoint { vertex: 0 })
    ));
}

#[test]
fn unknown_vertex_is_fatal() {
    let g = scenario_graph();
    let oracle = FixedOracle(Ok(vec![(0, 9)]));
    let err = MatchingAdapter::new(&oracle).pair(&g).unwrap_err();
    assert!(matches!(
        err,
        AffinityError::Matching(MatchingError::UnknownVertex { vertex: 9, .. })
    ));
}

#[test]
fn pairing_without_edge_is_fatal() {
    let g = graph(&[("A", "B", 1.0), ("C", "D", 1.0)]);
    // A=0, B=1, C=2, D=3 in node order
    let oracle = FixedOracle(Ok(vec![(0, 2)]));
    let err = MatchingAdapter::new(&oracle).pair(&g).unwrap_err();
    assert!(matches!(
        err,
        AffinityError::Matching(MatchingError::NotAnEdge { a: 0, b: 2 })
    ));
}

#[test]
fn oracle_failure_propagates() {
    let g = scenario_graph();
    let oracle = FixedOracle(Err("boom"));
    let err = MatchingAdapter::new(&oracle).pair(&g).unwrap_err();
    assert!(err.to_string().contains("boom"));
}
