//! Pipeline report: the values a reader needs, rendered as text or JSON.

use std::fmt;

use affinity_core::constants::REPORT_WEIGHT_PRECISION;
use affinity_core::GraphSummary;
use affinity_graph::stability::StabilityReport;
use affinity_graph::PipelineOutcome;
use serde::Serialize;

/// One reported pairing. The longer label comes first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairingLine {
    pub first: String,
    pub second: String,
    pub weight: Option<f64>,
}

impl PairingLine {
    pub fn new(a: String, b: String, weight: Option<f64>) -> Self {
        if a.chars().count() > b.chars().count() {
            Self {
                first: a,
                second: b,
                weight,
            }
        } else {
            Self {
                first: b,
                second: a,
                weight,
            }
        }
    }
}

impl fmt::Display for PairingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.first, self.second)?;
        if let Some(weight) = self.weight {
            write!(f, ", {:.*}", REPORT_WEIGHT_PRECISION, weight)?;
        }
        Ok(())
    }
}

/// Graph statistics at one point in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub stage: String,
    pub summary: GraphSummary,
}

/// The heaviest edge weight and the pairs that reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrongestLine {
    pub weight: f64,
    pub pairs: Vec<(String, String)>,
}

/// Everything the pipeline reports, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summaries: Vec<SummaryLine>,
    pub edges_pruned: usize,
    pub pruned_nodes: Vec<String>,
    pub inverted: bool,
    pub stragglers: Vec<String>,
    pub pairings: Vec<PairingLine>,
    pub stability: StabilityReport,
    pub strongest: Option<StrongestLine>,
    pub cluster_pairings: Vec<PairingLine>,
    pub clusters: Vec<Vec<String>>,
}

impl Report {
    pub fn from_outcome(outcome: &PipelineOutcome) -> Self {
        let mut summaries = vec![SummaryLine {
            stage: "initial".to_string(),
            summary: outcome.initial_summary,
        }];
        summaries.extend(outcome.poll_summaries.iter().map(|p| SummaryLine {
            stage: format!("after poll '{}' ({} votes)", p.poll, p.votes),
            summary: p.summary,
        }));
        summaries.push(SummaryLine {
            stage: "pruned".to_string(),
            summary: outcome.clean_summary,
        });

        let pairings = outcome
            .pairings
            .iter()
            .map(|p| {
                PairingLine::new(
                    p.pairing.first().to_string(),
                    p.pairing.second().to_string(),
                    Some(p.weight),
                )
            })
            .collect();

        let strongest = outcome.strongest.as_ref().map(|s| StrongestLine {
            weight: s.weight,
            pairs: s
                .edges
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        });

        let clustering = &outcome.clusters;
        let cluster_pairings = clustering
            .pairings
            .iter()
            .map(|p| {
                PairingLine::new(
                    clustering.label(p.first()),
                    clustering.label(p.second()),
                    None,
                )
            })
            .collect();
        let clusters = clustering
            .clusters()
            .into_iter()
            .map(|members| members.into_iter().map(|u| u.0).collect())
            .collect();

        Self {
            summaries,
            edges_pruned: outcome.clean.edges_pruned,
            pruned_nodes: outcome
                .clean
                .pruned_nodes
                .iter()
                .map(ToString::to_string)
                .collect(),
            inverted: outcome.inverted,
            stragglers: outcome.stragglers.iter().map(ToString::to_string).collect(),
            pairings,
            stability: outcome.stability.clone(),
            strongest,
            cluster_pairings,
            clusters,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the human-readable report, section by section.
    pub fn write_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for line in &self.summaries {
            let summary = &line.summary;
            writeln!(
                out,
                "Graph ({}): {} nodes, {} edges",
                line.stage, summary.node_count, summary.edge_count
            )?;
            if let Some(mean) = summary.mean_weight {
                writeln!(out, "  Average edge weight: {:.*}", REPORT_WEIGHT_PRECISION, mean)?;
            }
            if let Some(degree) = summary.mean_degree {
                writeln!(
                    out,
                    "  Average connections per node: {:.*}",
                    REPORT_WEIGHT_PRECISION, degree
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Pruned {} edges", self.edges_pruned)?;
        writeln!(out, "{} users pruned", self.pruned_nodes.len())?;
        for node in &self.pruned_nodes {
            writeln!(out, "  {node} pruned")?;
        }

        writeln!(out)?;
        for straggler in &self.stragglers {
            writeln!(out, "Straggler found: {straggler}")?;
        }
        let heading = if self.inverted { "worst pairings" } else { "pairings" };
        writeln!(out, "{} {heading} generated:", self.pairings.len())?;
        for pairing in &self.pairings {
            writeln!(out, "{pairing}")?;
        }

        let s = &self.stability;
        writeln!(out)?;
        writeln!(
            out,
            "Stable matching: {} Avg diff: {:.*} pairings out of {} total",
            s.is_stable(),
            REPORT_WEIGHT_PRECISION,
            s.average_difference,
            s.reference_size
        )?;
        writeln!(out, "Confidence level: {:.*}", REPORT_WEIGHT_PRECISION, s.confidence)?;

        if let Some(strongest) = &self.strongest {
            writeln!(out)?;
            writeln!(
                out,
                "Strongest pairing(s) with weight {:.*}",
                REPORT_WEIGHT_PRECISION, strongest.weight
            )?;
            for (a, b) in &strongest.pairs {
                writeln!(out, "  ({a}, {b})")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{} clusters generated:", self.cluster_pairings.len())?;
        for pairing in &self.cluster_pairings {
            writeln!(out, "{pairing}")?;
        }
        for (i, members) in self.clusters.iter().enumerate() {
            writeln!(out, "Cluster {}: {}", i + 1, members.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}
