//! # odp-eval
//!
//! Reference-free evaluation for text2odp.
//!
//! - [`evaluate`] scores one paper's (scenario, graph, ODP) chain with four
//!   metrics: [`lexical_coverage`], [`graph_density`],
//!   [`cq_answerability_proxy`], [`self_consistency`]
//! - [`aggregate`] reduces a batch of results to mean / population std per
//!   metric
//! - [`summarize_runs`] does the same across `run_*/evaluation.csv` files
//!
//! Scores are lexical proxies: they measure agreement between stages and
//! with the abstract, not the semantic quality of a pattern.

mod aggregate;
mod error;
mod metrics;
mod summarize;

pub use aggregate::{MetricSummary, aggregate};
pub use error::SummarizeError;
pub use metrics::{
    Metric, NOTES, cq_answerability_proxy, evaluate, graph_density, lexical_coverage, round4,
    self_consistency,
};
pub use summarize::summarize_runs;
