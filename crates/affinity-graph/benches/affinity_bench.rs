use criterion::{criterion_group, criterion_main, Criterion};

use affinity_core::{CompatibilityMatrix, Poll, Vote, VoteBatch};
use affinity_graph::aggregation::aggregate_all;
use affinity_graph::graph::normalize_and_prune;
use affinity_graph::{BlossomMatcher, ClusterEngine, MatchingAdapter, WeightedGraph};

const USERS: usize = 200;

/// Three polls with four answers each; every user answers every poll.
fn build_input() -> (VoteBatch, Vec<Poll>) {
    let labels: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let rows = vec![
        vec![5, 2, 0, -3],
        vec![2, 5, 1, 0],
        vec![0, 1, 5, 2],
        vec![-3, 0, 2, 5],
    ];
    let polls: Vec<Poll> = (0..3)
        .map(|p| {
            let name = format!("poll{p}");
            let answers: Vec<String> = labels.iter().map(|l| format!("{name}-{l}")).collect();
            let matrix = CompatibilityMatrix::from_rows(&name, &answers, &rows).unwrap();
            Poll::new(name, matrix, p + 1)
        })
        .collect();

    let mut votes = Vec::with_capacity(USERS * polls.len());
    for (p, poll) in polls.iter().enumerate() {
        let answers = poll.matrix.answers();
        for u in 0..USERS {
            let answer = &answers[(u * 7 + p * 3) % answers.len()];
            votes.push(Vote::new(format!("user{u}"), answer.as_str()));
        }
    }
    (VoteBatch::from_votes(votes), polls)
}

fn clean_graph() -> WeightedGraph {
    let (batch, polls) = build_input();
    let raw = aggregate_all(&batch.users, &batch.votes, &polls);
    normalize_and_prune(&raw, 2).unwrap().graph
}

fn bench_aggregation(c: &mut Criterion) {
    let (batch, polls) = build_input();
    c.bench_function("aggregate_200_users_3_polls", |b| {
        b.iter(|| aggregate_all(&batch.users, &batch.votes, &polls))
    });
}

fn bench_matching(c: &mut Criterion) {
    let graph = clean_graph();
    let oracle = BlossomMatcher::new();
    let adapter = MatchingAdapter::new(&oracle);
    c.bench_function("blossom_match_200_users", |b| {
        b.iter(|| adapter.pair(&graph).unwrap())
    });
}

fn bench_clustering(c: &mut Criterion) {
    let graph = clean_graph();
    let oracle = BlossomMatcher::new();
    c.bench_function("cluster_power_3_200_users", |b| {
        b.iter(|| {
            ClusterEngine::new(MatchingAdapter::new(&oracle))
                .cluster(&graph, 3)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_matching, bench_clustering);
criterion_main!(benches);
