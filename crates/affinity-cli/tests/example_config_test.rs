//! The shipped example config must stay loadable and runnable.

use affinity_core::{parse_votes, AffinityConfig};
use affinity_graph::AffinityEngine;

const EXAMPLE: &str = include_str!("../polls.example.toml");

#[test]
fn example_config_parses_and_validates() {
    let config = AffinityConfig::from_toml(EXAMPLE).unwrap();
    config.validate().unwrap();
    assert_eq!(config.pipeline.min_polls, 2);
    assert_eq!(config.pipeline.cluster_power, 5);

    let polls = config.polls().unwrap();
    assert_eq!(polls.len(), 3);
    assert_eq!(polls[0].matrix.len(), 5);
    assert_eq!(polls[1].matrix.len(), 2);
    assert_eq!(polls[2].matrix.len(), 3);
}

#[test]
fn example_config_runs_a_small_group() {
    let config = AffinityConfig::from_toml(EXAMPLE).unwrap();
    let polls = config.polls().unwrap();
    let lines = [
        "ana", "Fancy Dinner",
        "ana", "Yes, I want to be scared!",
        "ben", "Fancy Dinner",
        "ben", "Yes, I want to be scared!",
        "cy", "Camping & Stargazing",
        "cy", "No! I hate scary movies",
        "dee", "Go to a concert and listen to music",
        "dee", "No! I hate scary movies",
        "done",
    ];
    let batch = parse_votes(lines).unwrap();
    let outcome = AffinityEngine::from_config(&config)
        .run(&batch, &polls)
        .unwrap();

    assert_eq!(outcome.clean.graph.node_count(), 4);
    assert_eq!(outcome.matching.len(), 2);
    assert!(outcome.stragglers.is_empty());
}
