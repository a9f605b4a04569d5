//! Affinity aggregation: votes + compatibility matrix → raw graph edges.
//!
//! Each vote is compared only against votes already seen for the same poll,
//! so every pair of co-voters receives exactly one contribution per poll no
//! matter how the votes are ordered.

use affinity_core::{AnswerId, NodeKey, Poll, UserId, Vote};

use crate::graph::{RawAffinity, RawGraph};

/// Counts produced while aggregating one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    /// Votes that belonged to the poll.
    pub votes: usize,
    /// Edge contributions applied.
    pub contributions: usize,
}

/// A graph holding every user as an isolated node, in the given order.
pub fn seed_graph(users: &[UserId]) -> RawGraph {
    let mut graph = RawGraph::new();
    for user in users {
        graph.ensure_node(&NodeKey::User(user.clone()));
    }
    graph
}

/// Add `score` between `a` and `b`, creating the edge with `common = 1` or
/// bumping both attributes of an existing one.
pub fn add_contribution(graph: &mut RawGraph, a: &NodeKey, b: &NodeKey, score: f64) -> bool {
    if a == b {
        return false;
    }
    match graph.edge_mut(a, b) {
        Some(edge) => {
            edge.weight += score;
            edge.common += 1;
        }
        None => {
            graph.set_edge(
                a,
                b,
                RawAffinity {
                    weight: score,
                    common: 1,
                },
            );
        }
    }
    true
}

/// Aggregate one poll into a copy of `graph`.
///
/// Votes for answers outside the poll's matrix are ignored.
pub fn aggregate_poll(graph: &RawGraph, votes: &[Vote], poll: &Poll) -> (RawGraph, AggregationOutcome) {
    let mut next = graph.clone();
    let poll_votes = poll.extract_votes(votes);

    // answer → voters, both in first-seen order
    let mut voters: Vec<(&AnswerId, Vec<NodeKey>)> = Vec::new();
    let mut contributions = 0;

    for vote in &poll_votes {
        let user = NodeKey::User(vote.user.clone());
        for (answer, recorded) in &voters {
            let score = poll.weighted_score(&vote.answer, answer) as f64;
            for other in recorded {
                if add_contribution(&mut next, &user, other, score) {
                    contributions += 1;
                }
            }
        }

        match voters.iter_mut().find(|(answer, _)| **answer == vote.answer) {
            Some((_, recorded)) => recorded.push(user),
            None => voters.push((&vote.answer, vec![user])),
        }
    }

    tracing::debug!(
        poll = %poll.name,
        votes = poll_votes.len(),
        contributions,
        "poll aggregated"
    );

    (
        next,
        AggregationOutcome {
            votes: poll_votes.len(),
            contributions,
        },
    )
}

/// Seed the graph with `users` and fold every poll into it.
pub fn aggregate_all(users: &[UserId], votes: &[Vote], polls: &[Poll]) -> RawGraph {
    polls.iter().fold(seed_graph(users), |graph, poll| {
        aggregate_poll(&graph, votes, poll).0
    })
}
