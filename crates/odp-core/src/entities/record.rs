use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ConceptRelationGraph, EvaluationResult, OdpArtifact, PaperRecord, ScenarioAndCqs};
use crate::enums::Stage;

/// Everything produced for one paper, as persisted in `artifacts.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ArtifactRecord {
    pub paper: PaperRecord,
    pub scenario: ScenarioAndCqs,
    pub graph: ConceptRelationGraph,
    pub odp: OdpArtifact,
    pub evaluation: EvaluationResult,
}

/// A paper whose generation failed, as persisted in `failures.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperFailure {
    pub paper_id: String,
    /// Stage that failed; `None` when the failure happened outside generation.
    pub stage: Option<Stage>,
    pub message: String,
}
