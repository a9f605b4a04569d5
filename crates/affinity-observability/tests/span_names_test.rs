//! Every pipeline stage opens its named span.

use std::sync::{Arc, Mutex};

use affinity_core::config::PipelineConfig;
use affinity_core::{parse_votes, CompatibilityMatrix, Poll};
use affinity_graph::spans::names;
use affinity_graph::AffinityEngine;
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name());
    }
}

#[test]
fn pipeline_run_opens_every_stage_span() {
    let labels = vec!["X".to_string(), "Y".to_string()];
    let matrix = CompatibilityMatrix::from_rows("xy", &labels, &[vec![5, 1], vec![1, 5]]).unwrap();
    let polls = [Poll::new("xy", matrix, 1)];
    let batch = parse_votes(["ann", "X", "bob", "X", "carla", "Y"]).unwrap();
    let engine = AffinityEngine::new(PipelineConfig {
        min_polls: 1,
        cluster_power: 1,
        stability_checks: 2,
        ..PipelineConfig::default()
    });

    let recorded = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(recorded.clone());
    tracing::subscriber::with_default(subscriber, || engine.run(&batch, &polls).unwrap());

    let seen = recorded.0.lock().unwrap();
    for name in [
        names::AGGREGATION,
        names::PRUNING,
        names::MATCHING,
        names::CONTRACTION,
        names::STABILITY,
    ] {
        assert!(seen.contains(&name), "missing span {name}: {seen:?}");
    }
}
