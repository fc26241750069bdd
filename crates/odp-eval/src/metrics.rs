//! Per-paper scoring functions.
//!
//! Every score is a ratio in `[0, 1]` computed from lowercased word tokens
//! (`[A-Za-z][A-Za-z-]+`, so single letters and digits never count). Empty
//! denominators score `0.0`.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use odp_core::entities::{
    ConceptRelationGraph, EvaluationResult, OdpArtifact, PaperRecord, ScenarioAndCqs,
};
use regex::Regex;

/// Caveat attached to every [`EvaluationResult`].
pub const NOTES: &str = "Scores in [0,1]. High lexical coverage can be misleading for paraphrases; \
                         consider adding embedding-based metrics for publication-level evaluation.";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\-]+").expect("token pattern is valid"));

/// The four scores, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    LexicalCoverage,
    GraphDensity,
    CqAnswerabilityProxy,
    SelfConsistency,
}

impl Metric {
    pub const ALL: [Self; 4] = [
        Self::LexicalCoverage,
        Self::GraphDensity,
        Self::CqAnswerabilityProxy,
        Self::SelfConsistency,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LexicalCoverage => "lexical_coverage",
            Self::GraphDensity => "graph_density",
            Self::CqAnswerabilityProxy => "cq_answerability_proxy",
            Self::SelfConsistency => "self_consistency",
        }
    }

    /// This metric's score in `result`.
    #[must_use]
    pub const fn value(self, result: &EvaluationResult) -> f64 {
        match self {
            Self::LexicalCoverage => result.lexical_coverage,
            Self::GraphDensity => result.graph_density,
            Self::CqAnswerabilityProxy => result.cq_answerability_proxy,
            Self::SelfConsistency => result.self_consistency,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Round to four decimal places.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Share of the concept tokens that also occur in the abstract.
#[must_use]
pub fn lexical_coverage(abstract_text: &str, concepts: &[String]) -> f64 {
    let abstract_tokens = token_set(abstract_text);
    let concept_tokens = token_set(&concepts.join(" "));
    let shared = concept_tokens.intersection(&abstract_tokens).count();
    ratio(shared, concept_tokens.len())
}

/// Distinct `(subject, object)` pairs over the `n·(n-1)` directed edges
/// possible between the distinct concept labels.
///
/// Triples are not checked against the concept list, so a graph whose
/// triples reference unlisted labels can exceed `1.0`.
#[must_use]
pub fn graph_density(graph: &ConceptRelationGraph) -> f64 {
    let nodes: HashSet<&str> = graph.concepts.iter().map(String::as_str).collect();
    let n = nodes.len();
    if n <= 1 {
        return 0.0;
    }
    let edges: HashSet<(&str, &str)> = graph
        .triples
        .iter()
        .map(|t| (t.subject(), t.object()))
        .collect();
    ratio(edges.len(), n * (n - 1))
}

/// Fraction of competency questions sharing at least one token with the
/// concept or relation labels.
#[must_use]
pub fn cq_answerability_proxy(cqs: &[String], concepts: &[String], relations: &[String]) -> f64 {
    let mut vocabulary = token_set(&concepts.join(" "));
    vocabulary.extend(tokenize(&relations.join(" ")));
    let covered = cqs
        .iter()
        .filter(|cq| tokenize(cq).any(|token| vocabulary.contains(&token)))
        .count();
    ratio(covered, cqs.len())
}

/// Share of the ODP classes (case-folded) that are also graph concepts.
#[must_use]
pub fn self_consistency(odp: &OdpArtifact, graph: &ConceptRelationGraph) -> f64 {
    let classes: HashSet<String> = odp.classes.iter().map(|c| c.to_lowercase()).collect();
    let concepts: HashSet<String> = graph.concepts.iter().map(|c| c.to_lowercase()).collect();
    ratio(classes.intersection(&concepts).count(), classes.len())
}

/// Score one paper's generation chain.
#[must_use]
pub fn evaluate(
    paper: &PaperRecord,
    scenario: &ScenarioAndCqs,
    graph: &ConceptRelationGraph,
    odp: &OdpArtifact,
) -> EvaluationResult {
    EvaluationResult {
        paper_id: paper.paper_id.clone(),
        lexical_coverage: round4(lexical_coverage(&paper.abstract_text, &graph.concepts)),
        graph_density: round4(graph_density(graph)),
        cq_answerability_proxy: round4(cq_answerability_proxy(
            &scenario.competency_questions,
            &graph.concepts,
            &graph.relations,
        )),
        self_consistency: round4(self_consistency(odp, graph)),
        notes: Some(NOTES.to_string()),
    }
}
