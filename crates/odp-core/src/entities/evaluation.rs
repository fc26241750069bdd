use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference-free scores for one paper, each in `[0, 1]` and rounded to four
/// decimals.
///
/// Field order is the column order of `evaluation.csv`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvaluationResult {
    pub paper_id: String,
    pub lexical_coverage: f64,
    pub graph_density: f64,
    pub cq_answerability_proxy: f64,
    pub self_consistency: f64,
    #[serde(default)]
    pub notes: Option<String>,
}
