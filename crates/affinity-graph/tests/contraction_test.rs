//! Contraction rounds and iterative clustering.

use std::sync::{Arc, Mutex};

use affinity_core::events::{
    AffinityEventHandler, EventDispatcher, RoundContractedEvent, StragglerMergedEvent,
    StragglerUnmergedEvent,
};
use affinity_core::{Matching, NodeKey, Pairing, UserId};
use affinity_graph::contraction::{contract_round, merge_nodes, strongest_neighbour};
use affinity_graph::{
    BlossomMatcher, ClusterEngine, ClusterForest, MatchingAdapter, StragglerResolution,
    WeightedGraph,
};

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

fn names(users: &[UserId]) -> Vec<&str> {
    users.iter().map(UserId::as_str).collect()
}

#[derive(Default)]
struct Recorder {
    rounds: Mutex<Vec<u32>>,
    merged: Mutex<Vec<NodeKey>>,
    unmerged: Mutex<Vec<NodeKey>>,
}

impl AffinityEventHandler for Recorder {
    fn on_round_contracted(&self, event: &RoundContractedEvent) {
        self.rounds.lock().unwrap().push(event.round);
    }
    fn on_straggler_merged(&self, event: &StragglerMergedEvent) {
        self.merged.lock().unwrap().push(event.straggler.clone());
    }
    fn on_straggler_unmerged(&self, event: &StragglerUnmergedEvent) {
        self.unmerged.lock().unwrap().push(event.straggler.clone());
    }
}

#[test]
fn straggler_merges_into_strongest_neighbour_and_sums_edges() {
    let mut g = graph(&[("A", "B", 3.0), ("A", "C", 5.0), ("B", "C", 1.0)]);
    assert_eq!(strongest_neighbour(&g, &key("B")), Some((key("A"), 3.0)));

    let mut forest = ClusterForest::new();
    let composite = forest.compose(vec![key("A"), key("B")]);
    merge_nodes(&mut g, &key("A"), &key("B"), &composite);

    assert_eq!(forest.label(&composite), "A + B");
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge(&composite, &key("C")), Some(&6.0));
}

#[test]
fn straggler_partner_pairing_merges_into_the_same_cluster() {
    let g = graph(&[("A", "B", 3.0), ("A", "C", 5.0), ("B", "C", 1.0)]);
    let matching: Matching = [Pairing::new(key("A"), key("C"))].into_iter().collect();
    let mut forest = ClusterForest::new();

    let outcome = contract_round(&g, &matching, &mut forest).unwrap();

    let StragglerResolution::Merged {
        straggler,
        partner,
        composite,
    } = &outcome.straggler
    else {
        panic!("expected a merged straggler, got {:?}", outcome.straggler);
    };
    assert_eq!(straggler, &key("B"));
    assert_eq!(partner, &key("A"));
    assert_eq!(forest.label(composite), "A + B");

    assert_eq!(outcome.graph.node_count(), 1);
    assert_eq!(outcome.merged.len(), 1);
    let cluster = &outcome.merged[0];
    assert_eq!(names(&forest.members(cluster)), vec!["A", "B", "C"]);
}

#[test]
fn contraction_conserves_external_weight() {
    let g = graph(&[
        ("A", "B", 4.0),
        ("A", "X", 1.0),
        ("B", "X", 2.0),
        ("B", "Y", 3.0),
        ("X", "Y", 7.0),
        ("Y", "Z", 0.5),
    ]);
    let mut working = g.clone();
    let mut forest = ClusterForest::new();
    let composite = forest.compose(vec![key("A"), key("B")]);

    let before = g.incident_weight(&key("A")) + g.incident_weight(&key("B")) - 2.0 * 4.0;
    merge_nodes(&mut working, &key("A"), &key("B"), &composite);

    assert!((working.incident_weight(&composite) - before).abs() < 1e-12);
    assert_eq!(working.edge(&composite, &key("X")), Some(&3.0));
    assert_eq!(working.edge(&composite, &key("Y")), Some(&3.0));
    assert_eq!(working.edge(&key("X"), &key("Y")), Some(&7.0));
    assert_eq!(working.edge(&key("Y"), &key("Z")), Some(&0.5));
}

#[test]
fn isolated_straggler_is_left_alone() {
    let mut g = graph(&[("A", "B", 2.0)]);
    g.ensure_node(&key("lonely"));
    let matching: Matching = [Pairing::new(key("A"), key("B"))].into_iter().collect();
    let mut forest = ClusterForest::new();

    let outcome = contract_round(&g, &matching, &mut forest).unwrap();
    assert_eq!(
        outcome.straggler,
        StragglerResolution::Isolated {
            straggler: key("lonely")
        }
    );
    assert!(outcome.graph.contains(&key("lonely")));
    assert_eq!(outcome.graph.node_count(), 2);
}

#[test]
fn only_the_first_straggler_is_merged() {
    // B and D lose out to the strong A-C edge and the weak pendant edges
    let mut g = graph(&[("A", "C", 10.0), ("A", "B", 1.0), ("C", "D", 1.0)]);
    g.ensure_node(&key("E"));
    let matching: Matching = [Pairing::new(key("A"), key("C"))].into_iter().collect();
    let mut forest = ClusterForest::new();

    let outcome = contract_round(&g, &matching, &mut forest).unwrap();
    assert!(matches!(
        &outcome.straggler,
        StragglerResolution::Merged { straggler, .. } if straggler == &key("B")
    ));
    assert_eq!(outcome.leftover, vec![key("D"), key("E")]);
    assert!(outcome.graph.contains(&key("D")));
    assert!(outcome.graph.contains(&key("E")));
}

#[test]
fn pairing_with_unknown_node_is_an_error() {
    let g = graph(&[("A", "B", 2.0)]);
    let matching: Matching = [Pairing::new(key("A"), key("ghost"))].into_iter().collect();
    let mut forest = ClusterForest::new();
    assert!(contract_round(&g, &matching, &mut forest).is_err());
}

#[test]
fn two_rounds_build_clusters_of_four() {
    let g = graph(&[
        ("A", "B", 9.0),
        ("C", "D", 9.0),
        ("E", "F", 9.0),
        ("G", "H", 9.0),
        ("A", "C", 4.0),
        ("B", "D", 4.0),
        ("E", "G", 4.0),
        ("F", "H", 4.0),
        ("A", "E", 0.5),
    ]);
    let oracle = BlossomMatcher::new();
    let dispatcher = {
        let mut d = EventDispatcher::new();
        d.register(Arc::new(Recorder::default()));
        d
    };
    let outcome = ClusterEngine::new(MatchingAdapter::new(&oracle))
        .with_dispatcher(&dispatcher)
        .cluster(&g, 2)
        .unwrap();

    assert_eq!(outcome.rounds.len(), 2);
    assert_eq!(outcome.pairings.len(), 2);

    let members = outcome.clusters();
    let mut clusters: Vec<Vec<&str>> = members
        .iter()
        .map(|members| {
            let mut sorted = names(members);
            sorted.sort_unstable();
            sorted
        })
        .collect();
    clusters.sort();
    assert_eq!(
        clusters,
        vec![vec!["A", "B", "C", "D"], vec!["E", "F", "G", "H"]]
    );
}

#[test]
fn clustering_stops_when_nothing_can_be_matched() {
    let g = graph(&[("A", "B", 1.0)]);
    let oracle = BlossomMatcher::new();
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    let outcome = ClusterEngine::new(MatchingAdapter::new(&oracle))
        .with_dispatcher(&dispatcher)
        .cluster(&g, 5)
        .unwrap();

    assert_eq!(outcome.rounds.len(), 1);
    assert_eq!(*recorder.rounds.lock().unwrap(), vec![1]);
    assert!(outcome
        .pairings
        .contains(&Pairing::new(key("A"), key("B"))));
    assert_eq!(outcome.graph.node_count(), 1);
    assert_eq!(outcome.matched_graph.node_count(), 2);
}

#[test]
fn straggler_events_are_reported() {
    let g = graph(&[("A", "B", 3.0), ("A", "C", 5.0), ("B", "C", 1.0)]);
    let oracle = BlossomMatcher::new();
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    ClusterEngine::new(MatchingAdapter::new(&oracle))
        .with_dispatcher(&dispatcher)
        .cluster(&g, 1)
        .unwrap();
    assert_eq!(*recorder.merged.lock().unwrap(), vec![key("B")]);
    assert!(recorder.unmerged.lock().unwrap().is_empty());
}

#[test]
fn edgeless_node_does_not_take_the_straggler_slot() {
    let mut g = WeightedGraph::new();
    g.ensure_node(&key("A"));
    g.set_edge(&key("B"), &key("C"), 2.0);
    g.set_edge(&key("C"), &key("D"), 3.0);
    let matching: Matching = [Pairing::new(key("C"), key("D"))].into_iter().collect();
    let mut forest = ClusterForest::new();

    let outcome = contract_round(&g, &matching, &mut forest).unwrap();
    assert!(matches!(
        &outcome.straggler,
        StragglerResolution::Merged { straggler, partner, .. }
            if straggler == &key("B") && partner == &key("C")
    ));
    assert_eq!(outcome.leftover, vec![key("A")]);
    assert!(outcome.graph.contains(&key("A")));
}

#[test]
fn finished_component_does_not_block_the_larger_one() {
    let mut edges = vec![("P", "Q", 1.0)];
    let clique = ["K1", "K2", "K3", "K4", "K5", "K6", "K7"];
    for (i, a) in clique.iter().enumerate() {
        for b in &clique[i + 1..] {
            edges.push((*a, *b, 5.0));
        }
    }
    let g = graph(&edges);
    let oracle = BlossomMatcher::new();
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    let outcome = ClusterEngine::new(MatchingAdapter::new(&oracle))
        .with_dispatcher(&dispatcher)
        .cluster(&g, 3)
        .unwrap();

    // round 3 sees two edgeless composites and stops
    assert_eq!(outcome.rounds.len(), 2);
    for round in &outcome.rounds {
        assert!(
            matches!(round.straggler, StragglerResolution::Merged { .. }),
            "round {} left its straggler unmerged: {:?}",
            round.round,
            round.straggler
        );
    }
    assert!(recorder.unmerged.lock().unwrap().is_empty());
    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.graph.edge_count(), 0);

    let clusters = outcome.clusters();
    assert_eq!(clusters.len(), 1);
    let mut members = names(&clusters[0]);
    members.sort_unstable();
    assert_eq!(members, clique.to_vec());
}
