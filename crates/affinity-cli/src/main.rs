//! affinity: pair and cluster people from poll votes.
//!
//! Votes are read from stdin as alternating lines: a user name, then the
//! answer label they chose, terminated by a line reading `done`.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use affinity_core::{parse_votes, AffinityConfig};
use affinity_graph::AffinityEngine;
use affinity_observability::{init_tracing, Report, TracingEventHandler};

/// Command-line arguments for affinity
#[derive(Parser, Debug)]
#[command(name = "affinity")]
#[command(about = "Group people by poll compatibility")]
#[command(version)]
struct Args {
    /// TOML file with the polls and pipeline settings
    #[arg(short, long, default_value = "polls.toml", env = "AFFINITY_CONFIG")]
    config: PathBuf,

    /// Find the worst pairing instead of the best
    #[arg(long)]
    worst: bool,

    /// Minimum shared polls for two people to be compared
    #[arg(long)]
    min_polls: Option<u32>,

    /// Number of contraction rounds when clustering
    #[arg(long)]
    cluster_power: Option<u32>,

    /// Seed for randomized tie-breaking in the matcher
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AffinityConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if args.worst {
        config.pipeline.invert_weights = true;
    }
    if let Some(min_polls) = args.min_polls {
        config.pipeline.min_polls = min_polls;
    }
    if let Some(power) = args.cluster_power {
        config.pipeline.cluster_power = power;
    }
    if args.seed.is_some() {
        config.pipeline.shuffle_seed = args.seed;
    }
    config.validate().context("invalid settings")?;

    init_tracing(&config.observability);

    let polls = config.polls().context("building poll matrices")?;
    info!(polls = polls.len(), "Input user votes, end with 'done'");

    let stdin = io::stdin();
    let batch = parse_votes(stdin.lock().lines().map_while(|line| line.ok()))
        .context("reading votes")?;
    info!(users = batch.users.len(), votes = batch.votes.len(), "votes read");

    let mut engine = AffinityEngine::from_config(&config);
    engine.register_handler(Arc::new(TracingEventHandler::new()));
    let outcome = engine.run(&batch, &polls)?;

    let report = Report::from_outcome(&outcome);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
