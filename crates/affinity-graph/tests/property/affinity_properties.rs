//! Property tests for the affinity pipeline.

use proptest::prelude::*;

use affinity_core::traits::{IMatchingOracle, MatchingProblem};
use affinity_core::{CompatibilityMatrix, NodeKey, Poll, Vote, VoteBatch};
use affinity_graph::aggregation::aggregate_all;
use affinity_graph::contraction::merge_nodes;
use affinity_graph::graph::{normalize_and_prune, prune_isolated_nodes};
use affinity_graph::{BlossomMatcher, ClusterForest, MatchingAdapter, RawAffinity, RawGraph, WeightedGraph};

const ANSWERS: [&str; 3] = ["P", "Q", "R"];

fn poll() -> Poll {
    let labels: Vec<String> = ANSWERS.iter().map(|s| s.to_string()).collect();
    let rows = vec![vec![4, 1, -2], vec![1, 3, 0], vec![-2, 0, 5]];
    Poll::new("pqr", CompatibilityMatrix::from_rows("pqr", &labels, &rows).unwrap(), 2)
}

fn node(i: usize) -> NodeKey {
    NodeKey::user(format!("u{i}"))
}

/// One vote per user, answers drawn from `ANSWERS`.
fn votes_strategy() -> impl Strategy<Value = Vec<Vote>> {
    prop::collection::vec(0..ANSWERS.len(), 2..8).prop_map(|answers| {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, a)| Vote::new(format!("u{i}"), ANSWERS[a]))
            .collect()
    })
}

fn raw_graph_strategy() -> impl Strategy<Value = RawGraph> {
    prop::collection::vec((0..10usize, 0..10usize, -5.0_f64..10.0, 1..5u32), 0..30).prop_map(
        |edges| {
            let mut graph = RawGraph::new();
            for i in 0..10 {
                graph.ensure_node(&node(i));
            }
            for (a, b, weight, common) in edges {
                graph.set_edge(&node(a), &node(b), RawAffinity { weight, common });
            }
            graph
        },
    )
}

fn weighted_graph_strategy(max_nodes: usize) -> impl Strategy<Value = WeightedGraph> {
    (2..=max_nodes).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.0_f64..10.0), 0..n * 2).prop_map(move |edges| {
            let mut graph = WeightedGraph::new();
            for i in 0..n {
                graph.ensure_node(&node(i));
            }
            for (a, b, w) in edges {
                graph.set_edge(&node(a), &node(b), (w * 100.0).round() / 100.0);
            }
            graph
        })
    })
}

/// Exhaustive maximum-weight matching total.
fn brute_force(n: usize, weights: &[Vec<Option<f64>>], used: &mut Vec<bool>) -> f64 {
    let Some(first) = (0..n).find(|&v| !used[v]) else {
        return 0.0;
    };
    used[first] = true;
    let mut best = brute_force(n, weights, used);
    for other in 0..n {
        if !used[other] {
            if let Some(w) = weights[first][other] {
                used[other] = true;
                best = best.max(w + brute_force(n, weights, used));
                used[other] = false;
            }
        }
    }
    used[first] = false;
    best
}

proptest! {
    #[test]
    fn aggregation_is_symmetric_and_counts_each_pair_once(votes in votes_strategy()) {
        let poll = poll();
        let batch = VoteBatch::from_votes(votes.clone());
        let graph = aggregate_all(&batch.users, &batch.votes, &[poll.clone()]);

        for (i, a) in votes.iter().enumerate() {
            for b in votes.iter().skip(i + 1) {
                let (ka, kb) = (NodeKey::User(a.user.clone()), NodeKey::User(b.user.clone()));
                let forward = graph.edge(&ka, &kb).copied();
                prop_assert_eq!(forward, graph.edge(&kb, &ka).copied());
                let edge = forward.unwrap();
                prop_assert_eq!(edge.common, 1);
                prop_assert_eq!(edge.weight, poll.weighted_score(&a.answer, &b.answer) as f64);
            }
        }
    }

    #[test]
    fn aggregation_ignores_vote_order(
        (votes, shuffled) in votes_strategy().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let a = VoteBatch::from_votes(votes);
        let b = VoteBatch::from_votes(shuffled);
        let ga = aggregate_all(&a.users, &a.votes, &[poll()]);
        let gb = aggregate_all(&b.users, &b.votes, &[poll()]);
        prop_assert_eq!(ga.edge_count(), gb.edge_count());
        for (x, y, edge) in ga.edges() {
            prop_assert_eq!(gb.edge(x, y), Some(edge));
        }
    }

    #[test]
    fn raising_min_polls_never_adds_edges(graph in raw_graph_strategy(), min_polls in 1..5u32) {
        let lower = normalize_and_prune(&graph, min_polls).unwrap();
        let higher = normalize_and_prune(&graph, min_polls + 1).unwrap();
        prop_assert!(higher.graph.edge_count() <= lower.graph.edge_count());
    }

    #[test]
    fn node_pruning_leaves_no_isolated_nodes(graph in raw_graph_strategy(), min_polls in 1..5u32) {
        let normalized = normalize_and_prune(&graph, min_polls).unwrap();
        let pruned = prune_isolated_nodes(&normalized.graph);
        for key in pruned.graph.nodes() {
            prop_assert!(pruned.graph.degree(key) >= 1);
        }
        prop_assert_eq!(pruned.graph.edge_count(), normalized.graph.edge_count());
    }

    #[test]
    fn blossom_matches_brute_force(graph in weighted_graph_strategy(8)) {
        let oracle = BlossomMatcher::new();
        let matching = MatchingAdapter::new(&oracle).pair(&graph).unwrap();

        let matched = matching.matched_nodes();
        prop_assert_eq!(matched.len(), matching.len() * 2);

        let nodes: Vec<&NodeKey> = graph.nodes().collect();
        let n = nodes.len();
        let mut weights = vec![vec![None; n]; n];
        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate() {
                weights[i][j] = graph.edge(a, b).copied();
            }
        }
        let optimum = brute_force(n, &weights, &mut vec![false; n]);
        let total: f64 = matching
            .iter()
            .map(|p| *graph.edge(p.first(), p.second()).unwrap())
            .sum();
        prop_assert!((total - optimum).abs() < 1e-6, "blossom {} vs optimum {}", total, optimum);
    }

    #[test]
    fn shuffled_blossom_returns_disjoint_pairs(graph in weighted_graph_strategy(10), seed in any::<u64>()) {
        let nodes: Vec<&NodeKey> = graph.nodes().collect();
        let mut problem = MatchingProblem::new(nodes.len());
        for (a, b, &w) in graph.edges() {
            let ia = nodes.iter().position(|k| *k == a).unwrap();
            let ib = nodes.iter().position(|k| *k == b).unwrap();
            problem.add_edge(ia, ib, w);
        }
        let pairs = BlossomMatcher::shuffled(seed).max_weight_matching(&problem).unwrap();
        let mut seen = std::collections::HashSet::new();
        for (a, b) in pairs {
            prop_assert!(seen.insert(a));
            prop_assert!(seen.insert(b));
        }
    }

    #[test]
    fn merging_conserves_external_weight(graph in weighted_graph_strategy(8), a in 0..8usize, b in 0..8usize) {
        let (ka, kb) = (node(a), node(b));
        prop_assume!(a != b && graph.contains(&ka) && graph.contains(&kb));

        let internal = graph.edge(&ka, &kb).copied().unwrap_or(0.0);
        let expected = graph.incident_weight(&ka) + graph.incident_weight(&kb) - 2.0 * internal;
        let total_before = graph.total_weight();

        let mut forest = ClusterForest::new();
        let composite = forest.compose(vec![ka.clone(), kb.clone()]);
        let mut merged = graph.clone();
        merge_nodes(&mut merged, &ka, &kb, &composite);

        prop_assert!((merged.incident_weight(&composite) - expected).abs() < 1e-9);
        prop_assert!((merged.total_weight() - (total_before - internal)).abs() < 1e-9);
        prop_assert_eq!(merged.node_count(), graph.node_count() - 1);
    }
}
